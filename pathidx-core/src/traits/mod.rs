//! Interfaces of the external index consumed by the support structures
//!
//! The index itself is immutable and shared; these traits only describe the
//! part of it that caches and searches need.

pub mod record;
pub mod source;

pub use record::Record;
pub use source::RecordSource;
