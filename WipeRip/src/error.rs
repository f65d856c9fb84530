//! Error types for `WipeRip`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `WipeRip` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A required container or record file could not be located.
    #[error("required input not found: {path}")]
    MissingInput {
        /// The path that was expected to exist.
        path: PathBuf,
    },

    // ==================== Record Errors ====================
    /// Fewer bytes are available than a record declares.
    #[error("truncated {record} at offset {offset}: needed {needed} bytes, {available} available")]
    TruncatedStream {
        /// The record or field being read.
        record: &'static str,
        /// Offset of the read within its source.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
        /// Bytes left in the source.
        available: usize,
    },

    /// A polygon references a vertex outside its object's vertex list.
    #[error("object '{object}' references vertex {index} but has {count} vertices")]
    VertexIndexOutOfRange {
        /// Name of the offending object.
        object: String,
        /// The out-of-range index.
        index: usize,
        /// The object's vertex count.
        count: usize,
    },

    // ==================== Container Errors ====================
    /// The container header is not usable.
    #[error("invalid container: {message}")]
    InvalidContainer {
        /// Description of what is invalid.
        message: String,
    },

    // ==================== Image Errors ====================
    /// The image declares a pixel format this decoder does not know.
    #[error("unsupported pixel format: 0x{0:02x}")]
    UnsupportedPixelFormat(u32),

    /// The pixel header declares more data than video memory holds.
    #[error("image of {width}x{height} words exceeds video memory")]
    ImageTooLarge {
        /// Declared width in 16-bit words.
        width: u16,
        /// Declared height in rows.
        height: u16,
    },

    /// A texture index entry references an image that was not decoded.
    #[error("texture tile references image {image}, only {available} images available")]
    MissingTile {
        /// The referenced library image.
        image: i32,
        /// Number of decoded library images.
        available: usize,
    },

    /// A library image used as a composite tile has the wrong size.
    #[error("tile image {image} is {width}x{height}, expected {expected}x{expected}")]
    InvalidTile {
        /// The referenced library image.
        image: usize,
        /// Actual width.
        width: u32,
        /// Actual height.
        height: u32,
        /// Required edge length.
        expected: u32,
    },

    /// Failed to create an image buffer from pixel data.
    #[error("failed to create image buffer")]
    ImageBufferFailed,

    /// Failed to encode PNG image.
    #[error("failed to encode PNG: {message}")]
    PngEncodeFailed {
        /// The encoding error message.
        message: String,
    },

    // ==================== Parsing Errors ====================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Export configuration file could not be parsed.
    #[error("config error: {0}")]
    ConfigError(#[from] toml::de::Error),

    // ==================== File System Errors ====================
    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

impl Error {
    /// Shorthand for [`Error::TruncatedStream`].
    pub(crate) fn truncated(record: &'static str, offset: usize, needed: usize, available: usize) -> Self {
        Error::TruncatedStream {
            record,
            offset,
            needed,
            available,
        }
    }
}

/// A specialized Result type for `WipeRip` operations.
pub type Result<T> = std::result::Result<T, Error>;
