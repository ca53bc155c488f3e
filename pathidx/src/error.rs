//! Error types for the support structures

use pathidx_core::{FormatError, NodeId};
use thiserror::Error;

/// Result type using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by caches, dictionaries and sparse vectors
///
/// Ordinary absence (a missing key, a missing predecessor) is never an error;
/// those outcomes are sentinel values on the respective types.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O errors while reading or writing serialized data
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed serialized data
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// The cache probe sequence visited every slot without a match or a free slot
    #[error("cannot find a cache slot for node {node} (cached {size}, capacity {capacity})")]
    ProbeExhausted {
        node: NodeId,
        size: usize,
        capacity: usize,
    },

    /// A dictionary was built from keys that are not unique
    #[error("duplicate dictionary key: {0:?}")]
    DuplicateKey(String),

    /// Serialized key bytes are not valid UTF-8 at key boundaries
    #[error("dictionary keys are not valid UTF-8")]
    InvalidUtf8,

    /// Path node that collides with the reserved endmarker identifiers
    #[error("node {0} is reserved for the endmarker")]
    ReservedNode(NodeId),

    /// Rejected configuration value
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// Sparse vector input is not strictly increasing
    #[error("values are not strictly increasing at position {0}")]
    UnsortedValues(usize),

    /// Sparse vector input falls outside the universe
    #[error("value {value} is outside the universe [0, {universe})")]
    ValueOutOfUniverse { value: usize, universe: usize },
}

impl Error {
    /// Whether the error indicates a broken internal invariant
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::ProbeExhausted { .. })
    }
}
