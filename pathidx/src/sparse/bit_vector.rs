//! Plain bitvector with a rank directory
//!
//! Ranks are counted over `[0, i)` and selects are 0-indexed. The directory
//! stores the number of set bits before every 512-bit block, so `rank1` is
//! constant time and both selects binary search the directory before
//! scanning at most one block.

const WORD_BITS: usize = 64;
const BLOCK_WORDS: usize = 8;
const BLOCK_BITS: usize = WORD_BITS * BLOCK_WORDS;

/// Immutable bitvector supporting rank and select
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitVector {
    words: Vec<u64>,
    len: usize,
    /// Set bits before each block, with the total as the last entry
    blocks: Vec<usize>,
}

impl BitVector {
    /// Build a bitvector of `len` bits with the given positions set
    ///
    /// Positions at or beyond `len` are ignored.
    pub fn from_ones<I: IntoIterator<Item = usize>>(len: usize, ones: I) -> Self {
        let mut words = vec![0u64; len.div_ceil(WORD_BITS)];
        for position in ones.into_iter().filter(|&position| position < len) {
            words[position / WORD_BITS] |= 1u64 << (position % WORD_BITS);
        }

        let mut blocks = Vec::with_capacity(words.len().div_ceil(BLOCK_WORDS) + 1);
        let mut total = 0;
        for block in words.chunks(BLOCK_WORDS) {
            blocks.push(total);
            total += block.iter().map(|word| word.count_ones() as usize).sum::<usize>();
        }
        blocks.push(total);

        Self { words, len, blocks }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn count_ones(&self) -> usize {
        self.blocks.last().copied().unwrap_or(0)
    }

    pub fn count_zeros(&self) -> usize {
        self.len - self.count_ones()
    }

    /// Bit at `index`; out-of-range positions read as unset
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        index < self.len && (self.words[index / WORD_BITS] >> (index % WORD_BITS)) & 1 == 1
    }

    /// Count set bits in `[0, index)`
    pub fn rank1(&self, index: usize) -> usize {
        let index = index.min(self.len);
        let word = index / WORD_BITS;
        let block_start = (word / BLOCK_WORDS) * BLOCK_WORDS;

        let mut rank = self.blocks[word / BLOCK_WORDS];
        rank += self.words[block_start..word]
            .iter()
            .map(|word| word.count_ones() as usize)
            .sum::<usize>();
        let bits = index % WORD_BITS;
        if bits > 0 {
            rank += (self.words[word] & ((1u64 << bits) - 1)).count_ones() as usize;
        }
        rank
    }

    /// Count unset bits in `[0, index)`
    pub fn rank0(&self, index: usize) -> usize {
        index.min(self.len) - self.rank1(index)
    }

    /// Position of the `k`-th set bit (0-indexed)
    pub fn select1(&self, k: usize) -> Option<usize> {
        if k >= self.count_ones() {
            return None;
        }
        let block = self.blocks.partition_point(|&before| before <= k) - 1;
        let mut remaining = k - self.blocks[block];
        for word_index in block * BLOCK_WORDS..self.words.len() {
            let word = self.words[word_index];
            let ones = word.count_ones() as usize;
            if remaining < ones {
                return Some(word_index * WORD_BITS + select_in_word(word, remaining));
            }
            remaining -= ones;
        }
        None
    }

    /// Position of the `k`-th unset bit (0-indexed)
    pub fn select0(&self, k: usize) -> Option<usize> {
        if k >= self.count_zeros() {
            return None;
        }
        // Every block before the last one is full.
        let zeros_before = |block: usize| block * BLOCK_BITS - self.blocks[block];
        let (mut block, mut high) = (0, self.blocks.len() - 1);
        while high - block > 1 {
            let mid = block + (high - block) / 2;
            if zeros_before(mid) <= k {
                block = mid;
            } else {
                high = mid;
            }
        }

        let mut remaining = k - zeros_before(block);
        for word_index in block * BLOCK_WORDS..self.words.len() {
            let word = !self.words[word_index] & self.valid_mask(word_index);
            let zeros = word.count_ones() as usize;
            if remaining < zeros {
                return Some(word_index * WORD_BITS + select_in_word(word, remaining));
            }
            remaining -= zeros;
        }
        None
    }

    /// First set bit at or after `index`
    pub fn next_one(&self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }
        let mut word_index = index / WORD_BITS;
        let mut word = self.words[word_index] & (u64::MAX << (index % WORD_BITS));
        loop {
            if word != 0 {
                return Some(word_index * WORD_BITS + word.trailing_zeros() as usize);
            }
            word_index += 1;
            word = *self.words.get(word_index)?;
        }
    }

    fn valid_mask(&self, word_index: usize) -> u64 {
        let bits = self.len - word_index * WORD_BITS;
        if bits >= WORD_BITS {
            u64::MAX
        } else {
            (1u64 << bits) - 1
        }
    }

    /// Heap size in bytes
    pub fn size_in_bytes(&self) -> usize {
        self.words.len() * std::mem::size_of::<u64>()
            + self.blocks.len() * std::mem::size_of::<usize>()
    }
}

/// Position of the `k`-th set bit of `word` (0-indexed)
///
/// The caller guarantees that `word` has more than `k` set bits.
#[inline]
pub fn select_in_word(mut word: u64, k: usize) -> usize {
    for _ in 0..k {
        word &= word - 1;
    }
    word.trailing_zeros() as usize
}
