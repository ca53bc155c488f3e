//! Format constants and magic bytes

/// Alignment boundary of every persisted section
pub const ALIGNMENT_BOUNDARY: usize = 8;

/// Dictionary format constants
pub mod dictionary {
    /// Magic bytes for a serialized dictionary
    pub const MAGIC: [u8; 4] = *b"DICT";

    /// Current dictionary format version
    pub const VERSION: u8 = 1;

    /// Fixed size of the dictionary header
    pub const HEADER_SIZE: usize = 24;
}
