//! Binary serialization of dictionaries
//!
//! The layout is defined by [`DictionaryHeader`]. Loading checks every
//! section against the buffer and rebuilds nothing: the boundary and order
//! tables are validated and used as they are.

use std::io::{Read, Write};
#[cfg(feature = "mmap")]
use std::path::Path;

use pathidx_core::format::constants::dictionary::HEADER_SIZE;
use pathidx_core::{decode_u64_array, validate_section_bounds, DictionaryHeader, FormatError};
#[cfg(feature = "mmap")]
use tracing::debug;

use super::Dictionary;
use crate::{Error, Result};

impl Dictionary {
    /// Size of the serialized dictionary in bytes
    pub fn serialized_size(&self) -> usize {
        self.header()
            .layout()
            .map(|layout| layout.total_size)
            .unwrap_or(usize::MAX)
    }

    fn header(&self) -> DictionaryHeader {
        DictionaryHeader::new(self.len() as u64, self.data.len() as u64)
    }

    /// Serialize into a new buffer
    pub fn to_bytes(&self) -> Vec<u8> {
        let header = self.header();
        let mut buffer = Vec::with_capacity(self.serialized_size());

        buffer.extend_from_slice(&header.to_bytes());
        for &boundary in &self.boundaries {
            buffer.extend_from_slice(&(boundary as u64).to_le_bytes());
        }
        for &id in &self.sorted_ids {
            buffer.extend_from_slice(&(id as u64).to_le_bytes());
        }
        buffer.extend_from_slice(self.data.as_bytes());
        buffer.resize(pathidx_core::align_to_boundary(buffer.len(), 8), 0);

        buffer
    }

    /// Deserialize from a buffer produced by [`to_bytes`](Self::to_bytes)
    ///
    /// Trailing padding is optional; bytes after the key data are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let header = DictionaryHeader::from_bytes(bytes)?;
        let layout = header.layout()?;
        validate_section_bounds(layout.data_offset, layout.data_size, bytes.len())?;

        let boundaries = to_offsets(&decode_u64_array(&bytes[layout.boundaries()])?)?;
        let sorted_ids = to_offsets(&decode_u64_array(&bytes[layout.sorted_ids()])?)?;
        let data = String::from_utf8(bytes[layout.data()].to_vec()).map_err(|_| Error::InvalidUtf8)?;

        if boundaries.first() != Some(&0)
            || boundaries.last() != Some(&data.len())
            || boundaries.windows(2).any(|pair| pair[0] > pair[1])
        {
            return Err(FormatError::CorruptedData.into());
        }
        if !boundaries.iter().all(|&boundary| data.is_char_boundary(boundary)) {
            return Err(Error::InvalidUtf8);
        }

        let dict = Self {
            boundaries,
            sorted_ids,
            data,
        };
        dict.validate_order()?;
        Ok(dict)
    }

    /// Check that the order table is a permutation sorted by key
    fn validate_order(&self) -> Result<()> {
        let mut seen = vec![false; self.len()];
        for &id in &self.sorted_ids {
            match seen.get_mut(id) {
                Some(flag) if !*flag => *flag = true,
                _ => return Err(FormatError::CorruptedData.into()),
            }
        }
        for pair in self.sorted_ids.windows(2) {
            let (a, b) = (self.key(pair[0]), self.key(pair[1]));
            if a == b {
                return Err(Error::DuplicateKey(a.to_owned()));
            }
            if a > b {
                return Err(FormatError::CorruptedData.into());
            }
        }
        Ok(())
    }

    /// Write the serialized dictionary, returning the number of bytes written
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<usize> {
        let bytes = self.to_bytes();
        writer.write_all(&bytes)?;
        Ok(bytes.len())
    }

    /// Read one serialized dictionary from a stream
    ///
    /// Consumes exactly the bytes `write_to` produced, padding included.
    /// The buffer grows with the data actually read, so a header claiming
    /// more than the stream holds fails with `InsufficientBuffer`.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = vec![0u8; HEADER_SIZE];
        reader.read_exact(&mut bytes)?;
        let layout = DictionaryHeader::from_bytes(&bytes)?.layout()?;

        let remaining = (layout.total_size - HEADER_SIZE) as u64;
        reader.by_ref().take(remaining).read_to_end(&mut bytes)?;
        if bytes.len() < layout.total_size {
            return Err(FormatError::InsufficientBuffer.into());
        }
        Self::from_bytes(&bytes)
    }

    /// Store the dictionary in a file
    #[cfg(feature = "mmap")]
    pub fn store_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = std::io::BufWriter::new(std::fs::File::create(path.as_ref())?);
        let written = self.write_to(&mut file)?;
        file.flush()?;
        debug!(path = %path.as_ref().display(), bytes = written, keys = self.len(), "stored dictionary");
        Ok(())
    }

    /// Load a dictionary from a file through a read-only memory map
    #[cfg(feature = "mmap")]
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        // SAFETY: the map is read-only and dropped before this function
        // returns; every section is bounds-checked and copied out.
        let mmap = unsafe { memmap2::Mmap::map(&file)? };
        let dict = Self::from_bytes(&mmap)?;
        debug!(path = %path.as_ref().display(), keys = dict.len(), "loaded dictionary");
        Ok(dict)
    }
}

fn to_offsets(words: &[u64]) -> Result<Vec<usize>> {
    words
        .iter()
        .map(|&word| usize::try_from(word).map_err(|_| Error::from(FormatError::ArraySizeOverflow)))
        .collect()
}
