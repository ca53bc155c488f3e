//! Rank-order traversal of a sparse vector

use std::iter::FusedIterator;

use super::SparseVector;

/// Cursor over the set bits of a [`SparseVector`]
///
/// In the end state [`value`](Self::value) is the universe size and
/// [`rank`](Self::rank) is the number of set bits, so both stay meaningful
/// one past the last element.
#[derive(Clone, Debug)]
pub struct SdIterator<'a> {
    vector: &'a SparseVector,
    rank: usize,
    position: usize,
    value: usize,
}

impl<'a> SdIterator<'a> {
    /// Start at the `k`-th set bit, counting from 1
    ///
    /// `k == 0` or `k` above the number of set bits starts at the end.
    pub fn select(vector: &'a SparseVector, k: usize) -> Self {
        let position = k
            .checked_sub(1)
            .and_then(|rank| vector.high.select1(rank));
        match position {
            Some(position) => Self::at(vector, k - 1, position),
            None => Self::end(vector),
        }
    }

    /// Start at the largest set bit `<= x`, or at the end if there is none
    pub fn predecessor(vector: &'a SparseVector, x: usize) -> Self {
        match vector.predecessor_position(x) {
            Some((rank, position)) => Self::at(vector, rank, position),
            None => Self::end(vector),
        }
    }

    fn at(vector: &'a SparseVector, rank: usize, position: usize) -> Self {
        Self {
            vector,
            rank,
            position,
            value: vector.value_at(rank, position),
        }
    }

    fn end(vector: &'a SparseVector) -> Self {
        Self {
            vector,
            rank: vector.len(),
            position: 0,
            value: vector.universe(),
        }
    }

    /// Current set-bit position
    pub fn value(&self) -> usize {
        self.value
    }

    /// 0-based rank of the current position
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Number of set bits in the vector
    pub fn size(&self) -> usize {
        self.vector.len()
    }

    pub fn is_end(&self) -> bool {
        self.rank >= self.vector.len()
    }

    /// Move to the next set bit
    pub fn advance(&mut self) {
        if self.is_end() {
            return;
        }
        let next = match self.vector.next_position(self.position) {
            Some(position) if self.rank + 1 < self.vector.len() => position,
            _ => {
                *self = Self::end(self.vector);
                return;
            }
        };
        *self = Self::at(self.vector, self.rank + 1, next);
    }
}

impl Iterator for SdIterator<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_end() {
            return None;
        }
        let item = (self.rank, self.value);
        self.advance();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.vector.len() - self.rank;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SdIterator<'_> {}

impl FusedIterator for SdIterator<'_> {}
