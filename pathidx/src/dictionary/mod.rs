//! Unique string keys with dense, stable offsets
//!
//! Keys are stored in insertion order as one concatenated string with a
//! boundary table, which is also the persisted layout. A separate table of
//! key ids in lexicographic order answers [`Dictionary::find`] by binary
//! search. Every mutation keeps the two in sync.

mod file_io;

use std::ops::Index;

use tracing::debug;

use crate::{Error, Result};

/// Bijection between unique string keys and offsets `0..len()`
#[derive(Debug, Clone)]
pub struct Dictionary {
    /// Start of every key in `data`, followed by `data.len()`
    boundaries: Vec<usize>,
    /// Key offsets sorted by key
    sorted_ids: Vec<usize>,
    data: String,
}

impl Dictionary {
    /// Empty dictionary
    pub fn new() -> Self {
        Self {
            boundaries: vec![0],
            sorted_ids: Vec::new(),
            data: String::new(),
        }
    }

    /// Dictionary over `keys` in the given order
    ///
    /// Fails with [`Error::DuplicateKey`] if a key repeats.
    pub fn from_keys<I, S>(keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::new();
        for key in keys {
            dict.push_key(key.as_ref());
        }
        dict.sort_ids();
        if let Some(key) = dict.first_duplicate() {
            return Err(Error::DuplicateKey(key.to_owned()));
        }
        Ok(dict)
    }

    /// Union of `first` and `second`
    ///
    /// Keys of `first` keep their offsets; keys of `second` missing from
    /// `first` follow in `second`'s order.
    pub fn merge(first: &Dictionary, second: &Dictionary) -> Self {
        let mut merged = first.clone();
        merged.append(second);
        merged
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total length of all keys in bytes
    pub fn length(&self) -> usize {
        self.data.len()
    }

    /// Key at `offset`
    pub fn get(&self, offset: usize) -> Option<&str> {
        (offset < self.len()).then(|| self.key(offset))
    }

    /// Keys in offset order
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        (0..self.len()).map(move |offset| self.key(offset))
    }

    /// Offset of `key`, or `len()` if the key is absent
    pub fn find(&self, key: &str) -> usize {
        match self
            .sorted_ids
            .binary_search_by(|&id| self.key(id).cmp(key))
        {
            Ok(pos) => self.sorted_ids[pos],
            Err(_) => self.len(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find(key) < self.len()
    }

    /// Remove the key at `offset`, shifting later keys down by one
    ///
    /// Out-of-range offsets are ignored.
    pub fn remove(&mut self, offset: usize) {
        if offset >= self.len() {
            return;
        }

        let start = self.boundaries[offset];
        let end = self.boundaries[offset + 1];
        self.data.replace_range(start..end, "");
        self.boundaries.remove(offset + 1);
        for boundary in &mut self.boundaries[offset + 1..] {
            *boundary -= end - start;
        }

        self.sorted_ids.retain(|&id| id != offset);
        for id in &mut self.sorted_ids {
            if *id > offset {
                *id -= 1;
            }
        }
    }

    /// Append the keys of `other` after the existing keys
    ///
    /// Keys already present keep their current offset and are not added
    /// again, so appending onto an empty dictionary reproduces `other`.
    pub fn append(&mut self, other: &Dictionary) {
        let first_new = self.len();
        let mut skipped = 0;
        // `contains` only sees the keys present before this call. Keys of
        // `other` are unique, so none of them can repeat a key pushed here.
        for key in other.keys() {
            if self.contains(key) {
                skipped += 1;
            } else {
                self.push_key(key);
            }
        }
        self.merge_new_ids(first_new);
        if skipped > 0 {
            debug!(skipped, total = self.len(), "skipped keys already in dictionary");
        }
    }

    /// Remove every key
    pub fn clear(&mut self) {
        self.boundaries.truncate(1);
        self.sorted_ids.clear();
        self.data.clear();
    }

    /// Whether any key occurs twice
    ///
    /// Always false for dictionaries built through the public constructors.
    pub fn has_duplicates(&self) -> bool {
        self.first_duplicate().is_some()
    }

    fn first_duplicate(&self) -> Option<&str> {
        self.sorted_ids
            .windows(2)
            .find(|pair| self.key(pair[0]) == self.key(pair[1]))
            .map(|pair| self.key(pair[0]))
    }

    fn key(&self, offset: usize) -> &str {
        &self.data[self.boundaries[offset]..self.boundaries[offset + 1]]
    }

    /// Push without touching the sorted ids; `sort_ids` must follow
    fn push_key(&mut self, key: &str) {
        self.data.push_str(key);
        self.boundaries.push(self.data.len());
    }

    /// Merge the ids of keys pushed from `first_new` on into the sorted table
    fn merge_new_ids(&mut self, first_new: usize) {
        let mut new_ids: Vec<usize> = (first_new..self.len()).collect();
        if new_ids.is_empty() {
            return;
        }
        new_ids.sort_by(|&a, &b| self.key(a).cmp(self.key(b)));

        let old_ids = std::mem::take(&mut self.sorted_ids);
        let mut merged = Vec::with_capacity(old_ids.len() + new_ids.len());
        let (mut old, mut new) = (old_ids.into_iter().peekable(), new_ids.into_iter().peekable());
        while let (Some(&a), Some(&b)) = (old.peek(), new.peek()) {
            if self.key(a) < self.key(b) {
                merged.push(a);
                old.next();
            } else {
                merged.push(b);
                new.next();
            }
        }
        merged.extend(old);
        merged.extend(new);
        self.sorted_ids = merged;
    }

    fn sort_ids(&mut self) {
        let mut ids: Vec<usize> = (0..self.len()).collect();
        ids.sort_by(|&a, &b| self.key(a).cmp(self.key(b)));
        self.sorted_ids = ids;
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

/// Same keys at the same offsets
impl PartialEq for Dictionary {
    fn eq(&self, other: &Self) -> bool {
        self.boundaries == other.boundaries && self.data == other.data
    }
}

impl Eq for Dictionary {}

impl Index<usize> for Dictionary {
    type Output = str;

    /// # Panics
    ///
    /// Panics if `offset >= len()`.
    fn index(&self, offset: usize) -> &str {
        assert!(
            offset < self.len(),
            "dictionary offset {offset} out of range for {} keys",
            self.len()
        );
        self.key(offset)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Dictionary {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.keys())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Dictionary {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let keys = <Vec<String> as serde::Deserialize>::deserialize(deserializer)?;
        Dictionary::from_keys(keys).map_err(serde::de::Error::custom)
    }
}
