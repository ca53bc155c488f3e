//! Validation utilities for persisted layouts
//!
//! Pure functions over offsets, lengths and byte slices with no I/O
//! dependencies.

pub mod bounds;
pub mod format;

#[cfg(feature = "alloc")]
pub use bounds::decode_u64_array;
pub use bounds::{u64_array_size, validate_array_bounds};
pub use format::{align_to_boundary, calculate_padding, validate_magic_bytes, validate_section_bounds};
