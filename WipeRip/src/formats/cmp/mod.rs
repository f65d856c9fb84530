//! `.CMP` packed container support
//!
//! A container is a little-endian file count `N`, a table of `N` unpacked
//! lengths, and one compressed stream at byte `(N + 1) * 4` holding every
//! file back to back.

use std::path::Path;

use byteorder::LittleEndian;
use tracing::{debug, warn};

use crate::compression::{self, Termination};
use crate::error::{Error, Result};
use crate::formats::common::RecordCursor;

/// Parsed container header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Unpacked length of each file, in payload order.
    pub lengths: Vec<u32>,
}

impl ContainerHeader {
    /// Read the file count and length table.
    pub fn read(data: &[u8]) -> Result<Self> {
        let mut cursor = RecordCursor::<LittleEndian>::new(data);
        let count = cursor.read_u32()? as usize;

        let table_len = count.checked_mul(4).ok_or_else(|| Error::InvalidContainer {
            message: format!("file count {count} overflows the length table"),
        })?;
        if cursor.remaining() < table_len {
            return Err(Error::InvalidContainer {
                message: format!(
                    "file count {count} needs a {table_len} byte length table, {} bytes left",
                    cursor.remaining()
                ),
            });
        }

        let mut lengths = Vec::with_capacity(count);
        for _ in 0..count {
            lengths.push(cursor.read_u32()?);
        }
        Ok(Self { lengths })
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        self.lengths.len()
    }

    /// Byte offset of the compressed payload.
    #[must_use]
    pub fn payload_offset(&self) -> usize {
        (self.lengths.len() + 1) * 4
    }

    /// Total unpacked size declared by the length table, saturating.
    #[must_use]
    pub fn unpacked_len(&self) -> usize {
        self.lengths
            .iter()
            .fold(0usize, |total, &len| total.saturating_add(len as usize))
    }
}

/// The unpacked files of one container.
#[derive(Debug, Clone, Default)]
pub struct PackedContainer {
    pub files: Vec<Vec<u8>>,
}

impl PackedContainer {
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Read and unpack a `.CMP` file from disk.
///
/// # Errors
///
/// Returns [`Error::MissingInput`] if the file does not exist.
/// Returns [`Error::InvalidContainer`] if the header is unusable.
pub fn read_container<P: AsRef<Path>>(path: P) -> Result<PackedContainer> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::MissingInput {
            path: path.to_path_buf(),
        });
    }
    let data = std::fs::read(path)?;
    debug!("Read container {} ({} bytes)", path.display(), data.len());
    parse_container_bytes(&data)
}

/// Unpack a container already in memory.
///
/// A stream that ends early is not an error: the produced bytes are split
/// as far as they go and later files come back short or empty.
pub fn parse_container_bytes(data: &[u8]) -> Result<PackedContainer> {
    let header = ContainerHeader::read(data)?;
    let payload = &data[header.payload_offset()..];
    let expected = header.unpacked_len();

    let unpacked = compression::unpack(payload, expected);
    if unpacked.data.len() < expected {
        warn!(
            "Container stream ended early ({:?}): {} of {} bytes",
            unpacked.termination,
            unpacked.data.len(),
            expected
        );
    } else if unpacked.termination == Termination::OutputFull {
        debug!("Container stream filled its declared length without a sentinel");
    }

    Ok(PackedContainer {
        files: split_files(&unpacked.data, &header.lengths),
    })
}

/// Slice one contiguous buffer into consecutive files by length.
///
/// Slices that run past the end of `payload` are clamped.
#[must_use]
pub fn split_files(payload: &[u8], lengths: &[u32]) -> Vec<Vec<u8>> {
    let mut offset = 0usize;
    lengths
        .iter()
        .map(|&len| {
            let start = offset.min(payload.len());
            let end = offset.saturating_add(len as usize).min(payload.len());
            offset = offset.saturating_add(len as usize);
            payload[start..end].to_vec()
        })
        .collect()
}
