//! Sparse monotone bitvectors
//!
//! [`SparseVector`] stores a strictly increasing sequence of set-bit
//! positions in `[0, universe)` using the Elias-Fano split into packed low
//! bits and a unary-coded high part. [`SdIterator`] walks it in rank order
//! after a select or predecessor query.
//!
//! The high part always carries one more unset bit than there are buckets.
//! A predecessor query at `x == universe` then finds the terminating zero of
//! its bucket even when the bucket count is a power of two.

mod bit_vector;
mod int_vector;
mod iterator;

pub use bit_vector::{select_in_word, BitVector};
pub use int_vector::CompactVector;
pub use iterator::SdIterator;

use crate::{Error, Result};

/// Elias-Fano encoded set of positions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparseVector {
    universe: usize,
    low_width: usize,
    low: CompactVector,
    high: BitVector,
}

impl SparseVector {
    /// Encode strictly increasing `values` below `universe`
    pub fn new(values: &[usize], universe: usize) -> Result<Self> {
        if let Some(index) = values.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(Error::UnsortedValues(index + 1));
        }
        if let Some(&value) = values.last().filter(|&&value| value >= universe) {
            return Err(Error::ValueOutOfUniverse { value, universe });
        }

        let low_width = low_width(values.len(), universe);
        let buckets = if universe == 0 {
            0
        } else {
            ((universe - 1) >> low_width) + 1
        };
        let high_len = values.len() + buckets + 1;

        let low = CompactVector::from_iter_with_width(low_width, values.iter().copied());
        let high = BitVector::from_ones(
            high_len,
            values
                .iter()
                .enumerate()
                .map(|(rank, &value)| (value >> low_width) + rank),
        );

        Ok(Self {
            universe,
            low_width,
            low,
            high,
        })
    }

    /// Number of set bits
    pub fn len(&self) -> usize {
        self.low.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the universe, one past the largest storable position
    pub fn universe(&self) -> usize {
        self.universe
    }

    pub fn low_width(&self) -> usize {
        self.low_width
    }

    /// Value with 0-based rank `rank`
    pub fn select(&self, rank: usize) -> Option<usize> {
        let position = self.high.select1(rank)?;
        Some(self.value_at(rank, position))
    }

    /// Rank and value of the largest set bit `<= x`
    ///
    /// Queries above the universe are answered as if `x == universe`.
    pub fn predecessor(&self, x: usize) -> Option<(usize, usize)> {
        self.predecessor_position(x)
            .map(|(rank, position)| (rank, self.value_at(rank, position)))
    }

    /// Rank and high-part position of the largest set bit `<= x`
    fn predecessor_position(&self, x: usize) -> Option<(usize, usize)> {
        let x = x.min(self.universe);
        let bucket = x >> self.low_width;
        let low_x = x & low_mask(self.low_width);

        // Every bucket up to `universe >> low_width` has a terminating zero.
        let end = self.high.select0(bucket)?;
        let mut rank = end - bucket;
        let mut position = end;
        while rank > 0 && self.high.get(position - 1) {
            position -= 1;
            rank -= 1;
            if self.low_bits(rank) <= low_x {
                return Some((rank, position));
            }
        }

        // Anything left belongs to a lower bucket.
        let rank = rank.checked_sub(1)?;
        self.high.select1(rank).map(|position| (rank, position))
    }

    /// Does the set contain `x`
    pub fn contains(&self, x: usize) -> bool {
        x < self.universe && matches!(self.predecessor(x), Some((_, value)) if value == x)
    }

    /// Iterate over `(rank, value)` pairs in increasing order
    pub fn iter(&self) -> SdIterator<'_> {
        SdIterator::select(self, 1)
    }

    /// Heap size in bytes
    pub fn size_in_bytes(&self) -> usize {
        self.low.size_in_bytes() + self.high.size_in_bytes()
    }

    fn low_bits(&self, rank: usize) -> usize {
        self.low.get(rank).unwrap_or(0)
    }

    fn value_at(&self, rank: usize, position: usize) -> usize {
        ((position - rank) << self.low_width) | self.low_bits(rank)
    }

    fn next_position(&self, position: usize) -> Option<usize> {
        self.high.next_one(position + 1)
    }
}

impl<'a> IntoIterator for &'a SparseVector {
    type Item = (usize, usize);
    type IntoIter = SdIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// `floor(log2(universe / len))`, or 0 when the set is dense
fn low_width(len: usize, universe: usize) -> usize {
    if len == 0 {
        return 0;
    }
    match universe / len {
        0 | 1 => 0,
        ratio => ratio.ilog2() as usize,
    }
}

fn low_mask(width: usize) -> usize {
    if width >= usize::BITS as usize {
        usize::MAX
    } else {
        (1usize << width) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    pub(crate) fn random_values(seed: u64) -> Vec<usize> {
        const TOTAL_VALUES: usize = 1024;
        const UNIVERSE_SIZE: usize = 1024 * 1024;

        let mut rng = StdRng::seed_from_u64(seed);
        let mut values: Vec<usize> = (0..TOTAL_VALUES)
            .map(|_| rng.gen_range(0..UNIVERSE_SIZE))
            .collect();
        values.sort_unstable();
        values.dedup();
        values
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert!(matches!(
            SparseVector::new(&[1, 5, 5], 10),
            Err(Error::UnsortedValues(2))
        ));
        assert!(matches!(
            SparseVector::new(&[3, 2], 10),
            Err(Error::UnsortedValues(1))
        ));
        assert!(matches!(
            SparseVector::new(&[1, 10], 10),
            Err(Error::ValueOutOfUniverse {
                value: 10,
                universe: 10
            })
        ));
    }

    #[test]
    fn test_low_width() {
        assert_eq!(low_width(0, 100), 0);
        assert_eq!(low_width(3, 128), 5);
        assert_eq!(low_width(2, 4), 1);
        assert_eq!(low_width(10, 10), 0);
        assert_eq!(low_width(10, 5), 0);
    }

    #[test]
    fn test_small_example() {
        let v = SparseVector::new(&[5, 10, 100], 128).unwrap();
        assert_eq!(v.len(), 3);
        assert_eq!(v.universe(), 128);
        assert_eq!(v.select(0), Some(5));
        assert_eq!(v.select(2), Some(100));
        assert_eq!(v.select(3), None);
        assert_eq!(v.predecessor(0), None);
        assert_eq!(v.predecessor(7), Some((0, 5)));
        assert_eq!(v.predecessor(99), Some((1, 10)));
        assert_eq!(v.predecessor(128), Some((2, 100)));
        assert_eq!(v.predecessor(usize::MAX), Some((2, 100)));
        assert!(v.contains(10));
        assert!(!v.contains(11));
        assert!(!v.contains(128));
        assert_eq!(v.iter().collect::<Vec<_>>(), vec![(0, 5), (1, 10), (2, 100)]);
    }

    #[test]
    fn test_empty_universe() {
        let v = SparseVector::new(&[], 0).unwrap();
        assert!(v.is_empty());
        assert_eq!(v.predecessor(0), None);
        assert_eq!(v.predecessor(5), None);
        assert_eq!(v.select(0), None);
    }

    #[test]
    fn test_predecessor_against_naive() {
        let values = random_values(0xDEADBEEF);
        let universe = 1024 * 1024;
        let v = SparseVector::new(&values, universe).unwrap();

        for (rank, &value) in values.iter().enumerate() {
            assert_eq!(v.select(rank), Some(value));
            assert!(v.contains(value));
        }
        for x in (0..=universe).step_by(97).chain([universe]) {
            let expected = values.iter().rposition(|&value| value <= x);
            assert_eq!(
                v.predecessor(x),
                expected.map(|rank| (rank, values[rank])),
                "predecessor({x})"
            );
        }
        assert!(v.size_in_bytes() < values.len() * std::mem::size_of::<usize>());
    }

    #[test]
    fn test_dense_values() {
        let values: Vec<usize> = (0..300).collect();
        let v = SparseVector::new(&values, 300).unwrap();
        assert_eq!(v.low_width(), 0);
        for x in 0..300 {
            assert_eq!(v.predecessor(x), Some((x, x)));
        }
        assert_eq!(v.predecessor(300), Some((299, 299)));
    }
}
