//! Node identifiers, rank intervals and search states
//!
//! A search over the index is described by the node it currently ends at and
//! a closed interval of rows in that node's record. Empty intervals are
//! absorbing: extending an empty state yields an empty state.

/// Opaque node identifier of the underlying index
pub type NodeId = u64;

/// Node identifier reserved for the sequence endmarker
pub const ENDMARKER: NodeId = 0;

/// Closed interval `[start, end]` of record rows
///
/// The interval is empty when `start > end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    /// First row in the interval
    pub start: usize,
    /// Last row in the interval (inclusive)
    pub end: usize,
}

impl Range {
    /// Canonical empty interval
    pub const EMPTY: Range = Range { start: 1, end: 0 };

    /// Create a closed interval
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Convert a half-open rank pair `[lo, hi)` into a closed interval
    pub const fn from_half_open(lo: usize, hi: usize) -> Self {
        if hi <= lo {
            Self::EMPTY
        } else {
            Self { start: lo, end: hi - 1 }
        }
    }

    /// Interval covering the first `len` rows
    pub const fn prefix(len: usize) -> Self {
        Self::from_half_open(0, len)
    }

    pub const fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Number of rows in the interval
    pub const fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.end - self.start + 1
        }
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Current node and row interval of a unidirectional search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchState {
    pub node: NodeId,
    pub range: Range,
}

impl SearchState {
    pub const fn new(node: NodeId, range: Range) -> Self {
        Self { node, range }
    }

    /// Empty state at the endmarker
    pub const fn empty() -> Self {
        Self {
            node: ENDMARKER,
            range: Range::EMPTY,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Number of matching rows
    pub const fn size(&self) -> usize {
        self.range.len()
    }
}

/// Forward and backward search states over the same set of occurrences
///
/// `backward` tracks the reverse orientation of the pattern matched by
/// `forward`; both sides always have the same size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BidirectionalState {
    pub forward: SearchState,
    pub backward: SearchState,
}

impl BidirectionalState {
    pub const fn new(forward: SearchState, backward: SearchState) -> Self {
        Self { forward, backward }
    }

    pub const fn empty() -> Self {
        Self {
            forward: SearchState::empty(),
            backward: SearchState::empty(),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub const fn size(&self) -> usize {
        self.forward.size()
    }

    /// Exchange the forward and backward sides
    pub fn flip(&mut self) {
        core::mem::swap(&mut self.forward, &mut self.backward);
    }
}
