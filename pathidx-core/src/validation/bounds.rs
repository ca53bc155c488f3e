//! Array bounds validation and little-endian word decoding

use crate::FormatError;

/// Validate a byte length as an array of `T`
///
/// Returns the element count. Lengths that are not a whole number of
/// elements, or counts too large for downstream offset arithmetic, are
/// rejected.
pub const fn validate_array_bounds<T>(byte_len: usize) -> Result<usize, FormatError> {
    let element_size = core::mem::size_of::<T>();

    if byte_len % element_size != 0 {
        return Err(FormatError::ArrayAlignment);
    }

    let count = byte_len / element_size;
    if count > usize::MAX / 8 {
        return Err(FormatError::ArraySizeOverflow);
    }

    Ok(count)
}

/// Byte length of `count` little-endian u64 words
pub const fn u64_array_size(count: usize) -> Result<usize, FormatError> {
    match count.checked_mul(core::mem::size_of::<u64>()) {
        Some(size) => Ok(size),
        None => Err(FormatError::ArraySizeOverflow),
    }
}

/// Decode a section of little-endian u64 words
///
/// Aligned sections on little-endian targets are cast in place; everything
/// else is decoded word by word.
#[cfg(feature = "alloc")]
pub fn decode_u64_array(bytes: &[u8]) -> Result<alloc::vec::Vec<u64>, FormatError> {
    validate_array_bounds::<u64>(bytes.len())?;

    if cfg!(target_endian = "little") {
        if let Ok(words) = bytemuck::try_cast_slice::<u8, u64>(bytes) {
            return Ok(words.to_vec());
        }
    }

    Ok(bytes
        .chunks_exact(8)
        .map(|chunk| {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            u64::from_le_bytes(word)
        })
        .collect())
}
