//! Error types for segment-io

use std::io;

/// Result type for segment-io operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing, editing or writing a container
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A JPEG segment did not start with a valid `0xFF xx` marker
    #[error("Invalid marker header at offset {offset}: unexpected byte 0x{found:02X}")]
    InvalidHeader { offset: u64, found: u8 },

    /// A length field that cannot describe a valid segment or chunk
    #[error("Invalid segment length {length} at offset {offset}")]
    InvalidSegmentLength { offset: u64, length: u64 },

    /// Input ended before the format said it would
    #[error("Truncated input at offset {offset}")]
    TruncatedInput { offset: u64 },

    /// PNG chunk CRC did not match its contents
    #[error("Checksum mismatch in {chunk_type} chunk: stored 0x{stored:08X}, computed 0x{computed:08X}")]
    ChecksumMismatch {
        chunk_type: String,
        stored: u32,
        computed: u32,
    },

    /// PNG file signature is wrong
    #[error("PNG signature mismatch")]
    SignatureMismatch,

    /// Leading bytes match no supported container
    #[error("Unsupported file type")]
    UnsupportedFileType,

    /// APPn index outside 0..=15
    #[error("Invalid APP segment index: {0}")]
    InvalidAppIndex(u8),

    /// Marker name not present in the marker table
    #[error("Unknown marker name: {0}")]
    UnknownMarker(String),

    /// No built-in ICC profile with this name
    #[error("Unknown ICC profile: {0}")]
    UnknownProfile(String),

    /// ICC profile size header disagrees with its length
    #[error("Invalid ICC profile: header declares {declared} bytes, found {actual}")]
    InvalidProfile { declared: u32, actual: usize },

    /// Operation exists on the interface but has no implementation
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    /// The output sink stopped accepting bytes
    #[error("Short write")]
    ShortWrite,

    /// Data size exceeds maximum allowed
    #[error("Data too large: {size} bytes (max: {max})")]
    DataTooLarge { size: usize, max: usize },
}

impl Error {
    /// Convert a read error, reporting end of input as truncation at `offset`
    pub(crate) fn from_read(err: io::Error, offset: u64) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Error::TruncatedInput { offset },
            _ => Error::Io(err),
        }
    }

    /// Convert a write error, reporting a full sink as a short write
    pub(crate) fn from_write(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::WriteZero => Error::ShortWrite,
            _ => Error::Io(err),
        }
    }
}
