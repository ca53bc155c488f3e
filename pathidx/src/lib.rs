//! pathidx - Query-side support structures for compressed path indexes
//!
//! This library accelerates searches over a BWT-style index of paths in a
//! graph: a per-query record cache, a string-to-offset dictionary and
//! sparse rank/select vectors.
//!
//! ## Architecture
//!
//! pathidx follows a format/implementation separation:
//!
//! - **pathidx-core**: Search state types, the record traits, the dictionary
//!   file layout and validation helpers (no I/O, `no_std`)
//! - **pathidx**: The record cache, dictionary, sparse vectors and an
//!   in-memory reference index
//!
//! ## Quick Start
//!
//! ```rust
//! use pathidx::{MemoryIndex, RecordCache};
//!
//! fn example() -> pathidx::Result<()> {
//!     let paths = vec![vec![2, 4, 6], vec![2, 4, 8]];
//!     let index = MemoryIndex::from_paths(&paths, true)?;
//!
//!     // One cache per query thread; the index itself is shared.
//!     let cache = RecordCache::new(&index);
//!     let state = cache.bd_find(2)?;
//!     let state = cache.extend_forward_to(state, 4)?;
//!     assert_eq!(state.size(), 2);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! ## Features
//!
//! - **`mmap`** (default): Load dictionaries through memory-mapped files
//! - **`serde`** (default): Serde support for dictionaries and search states

// Re-export core abstractions
pub use pathidx_core::{
    // Search states
    BidirectionalState, NodeId, Range, SearchState, ENDMARKER,
    // Record traits
    Record, RecordSource,
    // Format definitions
    DictionaryHeader, DictionaryLayout, FormatError,
    // Hashing
    wang_hash_64,
};

pub mod dictionary;
pub mod error;
pub mod memory_index;
pub mod record_cache;
pub mod sparse;

pub use dictionary::Dictionary;
pub use error::{Error, Result};
pub use memory_index::{MemoryIndex, MemoryRecord};
pub use record_cache::{CacheConfig, RecordCache};
pub use sparse::{BitVector, CompactVector, SdIterator, SparseVector};
