//! Layout validation for persisted sections
//!
//! Pure arithmetic on offsets and lengths; nothing here touches I/O.

use crate::FormatError;

/// Align an offset to a power-of-two boundary
pub const fn align_to_boundary(offset: usize, boundary: usize) -> usize {
    (offset + boundary - 1) & !(boundary - 1)
}

/// Bytes needed to pad `offset` up to `boundary`
pub const fn calculate_padding(offset: usize, boundary: usize) -> usize {
    align_to_boundary(offset, boundary) - offset
}

/// Check that the section `[start, start + len)` fits in a buffer of `total_size` bytes
///
/// Returns the end offset of the section.
pub const fn validate_section_bounds(
    start: usize,
    len: usize,
    total_size: usize,
) -> Result<usize, FormatError> {
    let end = match start.checked_add(len) {
        Some(end) => end,
        None => return Err(FormatError::ArraySizeOverflow),
    };
    if end > total_size {
        return Err(FormatError::InsufficientBuffer);
    }
    Ok(end)
}

/// Compare magic bytes in a const-friendly way
pub const fn validate_magic_bytes(actual: &[u8; 4], expected: &[u8; 4]) -> Result<(), FormatError> {
    if actual[0] != expected[0]
        || actual[1] != expected[1]
        || actual[2] != expected[2]
        || actual[3] != expected[3]
    {
        return Err(FormatError::InvalidHeader);
    }
    Ok(())
}
