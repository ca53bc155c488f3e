//! Binary layout of a serialized dictionary
//!
//! ```text
//! header            24 bytes   magic "DICT", version, padding, key count, key bytes
//! boundaries        (n + 1) * u64   start of every key in the key bytes, then the total
//! sorted ids        n * u64         key offsets in lexicographic key order
//! key bytes         data_size bytes, concatenated UTF-8 keys
//! padding           to the next 8-byte boundary
//! ```
//!
//! All integers are little-endian.

use super::constants::dictionary::*;
use super::constants::ALIGNMENT_BOUNDARY;
use crate::validation::{align_to_boundary, u64_array_size, validate_magic_bytes};
use crate::{FormatError, Result};

/// Fixed-size dictionary header (24 bytes, 8-byte aligned)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryHeader {
    /// Magic bytes: "DICT"
    pub magic: [u8; 4],
    /// Version number
    pub version: u8,
    /// Padding for alignment
    pub _padding: [u8; 3],
    /// Number of keys
    pub key_count: u64,
    /// Total length of the key bytes
    pub data_size: u64,
}

impl Default for DictionaryHeader {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl DictionaryHeader {
    pub const fn new(key_count: u64, data_size: u64) -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            _padding: [0; 3],
            key_count,
            data_size,
        }
    }

    pub const fn is_valid(&self) -> bool {
        validate_magic_bytes(&self.magic, &MAGIC).is_ok() && self.version <= VERSION
    }

    /// Parse the header from the start of `bytes`
    pub const fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(FormatError::InsufficientBuffer);
        }

        let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
        if let Err(err) = validate_magic_bytes(&magic, &MAGIC) {
            return Err(err);
        }

        let version = bytes[4];
        if version > VERSION {
            return Err(FormatError::UnsupportedFormat);
        }

        let key_count = u64::from_le_bytes([
            bytes[8], bytes[9], bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15],
        ]);
        let data_size = u64::from_le_bytes([
            bytes[16], bytes[17], bytes[18], bytes[19], bytes[20], bytes[21], bytes[22], bytes[23],
        ]);

        Ok(Self {
            magic,
            version,
            _padding: [0; 3],
            key_count,
            data_size,
        })
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes[8..16].copy_from_slice(&self.key_count.to_le_bytes());
        bytes[16..24].copy_from_slice(&self.data_size.to_le_bytes());
        bytes
    }

    /// Byte offsets of each section, computed with overflow checks
    pub fn layout(&self) -> Result<DictionaryLayout> {
        let key_count =
            usize::try_from(self.key_count).map_err(|_| FormatError::ArraySizeOverflow)?;
        let data_size =
            usize::try_from(self.data_size).map_err(|_| FormatError::ArraySizeOverflow)?;

        let boundaries_size = u64_array_size(
            key_count
                .checked_add(1)
                .ok_or(FormatError::ArraySizeOverflow)?,
        )?;
        let sorted_ids_size = u64_array_size(key_count)?;

        let boundaries_offset = HEADER_SIZE;
        let sorted_ids_offset = boundaries_offset
            .checked_add(boundaries_size)
            .ok_or(FormatError::ArraySizeOverflow)?;
        let data_offset = sorted_ids_offset
            .checked_add(sorted_ids_size)
            .ok_or(FormatError::ArraySizeOverflow)?;
        let data_end = data_offset
            .checked_add(data_size)
            .ok_or(FormatError::ArraySizeOverflow)?;
        if data_end > usize::MAX - ALIGNMENT_BOUNDARY {
            return Err(FormatError::ArraySizeOverflow);
        }

        Ok(DictionaryLayout {
            key_count,
            boundaries_offset,
            sorted_ids_offset,
            data_offset,
            data_size,
            total_size: align_to_boundary(data_end, ALIGNMENT_BOUNDARY),
        })
    }
}

/// Section offsets of a serialized dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryLayout {
    pub key_count: usize,
    pub boundaries_offset: usize,
    pub sorted_ids_offset: usize,
    pub data_offset: usize,
    pub data_size: usize,
    /// Total serialized size including trailing padding
    pub total_size: usize,
}

impl DictionaryLayout {
    /// Byte range of the key boundary table
    pub const fn boundaries(&self) -> core::ops::Range<usize> {
        self.boundaries_offset..self.sorted_ids_offset
    }

    /// Byte range of the sorted id table
    pub const fn sorted_ids(&self) -> core::ops::Range<usize> {
        self.sorted_ids_offset..self.data_offset
    }

    /// Byte range of the concatenated keys
    pub const fn data(&self) -> core::ops::Range<usize> {
        self.data_offset..self.data_offset + self.data_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_bytes() {
        let header = DictionaryHeader::new(5, 27);
        let bytes = header.to_bytes();
        assert_eq!(&bytes[0..4], b"DICT");
        assert_eq!(DictionaryHeader::from_bytes(&bytes), Ok(header));
        assert!(header.is_valid());
    }

    #[test]
    fn test_header_rejects_bad_input() {
        let mut bytes = DictionaryHeader::new(1, 1).to_bytes();
        assert_eq!(
            DictionaryHeader::from_bytes(&bytes[..10]),
            Err(FormatError::InsufficientBuffer)
        );

        bytes[4] = VERSION + 1;
        assert_eq!(
            DictionaryHeader::from_bytes(&bytes),
            Err(FormatError::UnsupportedFormat)
        );

        bytes[0] = b'X';
        assert_eq!(
            DictionaryHeader::from_bytes(&bytes),
            Err(FormatError::InvalidHeader)
        );
    }

    #[test]
    fn test_layout() {
        let layout = DictionaryHeader::new(2, 5).layout().unwrap();
        assert_eq!(layout.boundaries(), 24..48);
        assert_eq!(layout.sorted_ids(), 48..64);
        assert_eq!(layout.data(), 64..69);
        assert_eq!(layout.total_size, 72);

        let empty = DictionaryHeader::default().layout().unwrap();
        assert_eq!(empty.boundaries(), 24..32);
        assert_eq!(empty.total_size, 32);
    }

    #[test]
    fn test_layout_overflow() {
        let header = DictionaryHeader::new(u64::MAX, 0);
        assert!(header.layout().is_err());
    }
}
