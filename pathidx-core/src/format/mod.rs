//! Persisted format definitions
//!
//! Pure data structure definitions for the on-disk layouts. No I/O here.

pub mod constants;
pub mod dictionary;

pub use dictionary::{DictionaryHeader, DictionaryLayout};
