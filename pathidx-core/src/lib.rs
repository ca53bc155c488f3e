#![no_std]

//! pathidx core - node, search state and record definitions
//!
//! This crate provides the vocabulary shared by the support structures of a
//! compressed path index: node identifiers, row intervals, search states, the
//! interfaces of the external index, and the persisted dictionary layout.

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod error;
pub mod format;
pub mod hash;
pub mod state;
pub mod traits;
pub mod validation;

pub use error::{FormatError, Result};
pub use format::{DictionaryHeader, DictionaryLayout};
pub use hash::{bucket, wang_hash_64};
pub use state::{BidirectionalState, NodeId, Range, SearchState, ENDMARKER};
pub use traits::{Record, RecordSource};
#[cfg(feature = "alloc")]
pub use validation::decode_u64_array;
pub use validation::{align_to_boundary, validate_array_bounds, validate_section_bounds};
