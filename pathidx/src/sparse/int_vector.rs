//! Fixed-width packed integers

const WORD_BITS: usize = 64;

/// Integers stored in a fixed number of bits each
///
/// Width 0 is allowed; every element then reads back as 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompactVector {
    words: Vec<u64>,
    len: usize,
    width: usize,
}

impl CompactVector {
    /// Create an empty vector of the given width
    ///
    /// # Panics
    ///
    /// Panics if `width > 64`.
    pub fn new(width: usize) -> Self {
        assert!(width <= WORD_BITS, "width {width} exceeds {WORD_BITS} bits");
        Self {
            words: Vec::new(),
            len: 0,
            width,
        }
    }

    pub fn with_capacity(width: usize, capacity: usize) -> Self {
        let mut vector = Self::new(width);
        vector.words.reserve((capacity * width).div_ceil(WORD_BITS));
        vector
    }

    /// Pack `values`, keeping the low `width` bits of each
    pub fn from_iter_with_width<I: IntoIterator<Item = usize>>(width: usize, values: I) -> Self {
        let values = values.into_iter();
        let mut vector = Self::with_capacity(width, values.size_hint().0);
        for value in values {
            vector.push(value);
        }
        vector
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn width(&self) -> usize {
        self.width
    }

    fn mask(&self) -> u64 {
        if self.width == WORD_BITS {
            u64::MAX
        } else {
            (1u64 << self.width) - 1
        }
    }

    /// Append the low `width` bits of `value`
    pub fn push(&mut self, value: usize) {
        let bit = self.len * self.width;
        self.len += 1;
        if self.width == 0 {
            return;
        }

        let needed = (self.len * self.width).div_ceil(WORD_BITS);
        self.words.resize(needed, 0);

        let value = value as u64 & self.mask();
        let (word, shift) = (bit / WORD_BITS, bit % WORD_BITS);
        self.words[word] |= value << shift;
        if shift + self.width > WORD_BITS {
            self.words[word + 1] |= value >> (WORD_BITS - shift);
        }
    }

    /// Value at `index`, or `None` if out of bounds
    pub fn get(&self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }
        if self.width == 0 {
            return Some(0);
        }

        let bit = index * self.width;
        let (word, shift) = (bit / WORD_BITS, bit % WORD_BITS);
        let mut value = self.words[word] >> shift;
        if shift + self.width > WORD_BITS {
            value |= self.words[word + 1] << (WORD_BITS - shift);
        }
        Some((value & self.mask()) as usize)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        (0..self.len).map(|index| self.get(index).unwrap_or(0))
    }

    /// Heap size in bytes
    pub fn size_in_bytes(&self) -> usize {
        self.words.len() * std::mem::size_of::<u64>()
    }
}
