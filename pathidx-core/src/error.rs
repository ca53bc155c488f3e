//! Error types for persisted-format operations

/// Errors that can occur while reading or validating persisted structures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// Invalid header (bad magic bytes)
    InvalidHeader,
    /// Unsupported format version
    UnsupportedFormat,
    /// Insufficient buffer space
    InsufficientBuffer,
    /// Data corruption detected
    CorruptedData,
    /// Byte length is not a whole number of elements
    ArrayAlignment,
    /// Element count too large to address safely
    ArraySizeOverflow,
}

impl FormatError {
    /// Whether the error points at damaged data rather than a short or foreign buffer
    pub const fn is_corruption(&self) -> bool {
        matches!(
            self,
            FormatError::CorruptedData | FormatError::ArrayAlignment | FormatError::ArraySizeOverflow
        )
    }
}

impl core::fmt::Display for FormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            FormatError::InvalidHeader => "Invalid header",
            FormatError::UnsupportedFormat => "Unsupported format version",
            FormatError::InsufficientBuffer => "Insufficient buffer space",
            FormatError::CorruptedData => "Data corruption detected",
            FormatError::ArrayAlignment => "Array length is not a multiple of the element size",
            FormatError::ArraySizeOverflow => "Array size overflow",
        };
        write!(f, "{msg}")
    }
}

/// Result type for format operations
pub type Result<T> = core::result::Result<T, FormatError>;

impl core::error::Error for FormatError {}
