//! Lossless segment-level I/O for JPEG and PNG containers.
//!
//! This crate splits an image file into its container units (JPEG marker
//! segments, PNG chunks) without decoding pixel data, lets you edit that
//! structure, and writes it back. An unedited container writes back exactly
//! the bytes it was parsed from.
//!
//! # Design Principles
//!
//! - **Byte fidelity**: every segment owns its bytes; nothing is re-encoded
//! - **Closed segment model**: JPEG segments are an enum, matched exhaustively
//! - **Strict framing**: truncated input and bad PNG checksums are errors
//! - **Media type agnostic**: one [`Asset`] API over JPEG and PNG
//!
//! # Quick Start
//!
//! ```no_run
//! use segment_io::{Asset, ContainerIO};
//!
//! # fn main() -> segment_io::Result<()> {
//! let input = std::fs::read("image.jpg")?;
//! let profile = std::fs::read("profile.icc")?;
//!
//! // Container is detected from the leading bytes
//! let mut asset = Asset::parse(&input)?;
//! asset.embed_icc_profile(&profile)?;
//!
//! let mut output = std::fs::File::create("output.jpg")?;
//! asset.write_to(&mut output)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Container-Specific API
//!
//! ```no_run
//! use segment_io::{ContainerIO, JpegImage};
//!
//! # fn main() -> segment_io::Result<()> {
//! let input = std::fs::read("image.jpg")?;
//! let mut image = JpegImage::parse(&input)?;
//!
//! for segment in image.segments() {
//!     println!("{} ({} bytes)", segment.label(), segment.encoded_len());
//! }
//!
//! // APP segments stay sorted; an existing APP1 would be replaced
//! image.insert_app_segment(1, b"Exif\0\0")?;
//!
//! // Built-in profiles are embedded by name
//! image.embed_icc_preset("Display P3")?;
//! let bytes = image.to_bytes()?;
//! # Ok(())
//! # }
//! ```

mod asset;
pub mod batch;
#[cfg(feature = "png")]
mod chunk;
mod error;
mod formats;
pub mod icc;
pub mod markers;
mod reader;
#[cfg(feature = "jpeg")]
mod segment;

pub use asset::Asset;
#[cfg(feature = "png")]
pub use chunk::{Chunk, MAX_CHUNK_LEN};
pub use error::{Error, Result};
pub use formats::{ContainerIO, ContainerKind, JPEG_SIGNATURE, PNG_SIGNATURE};
#[cfg(feature = "jpeg")]
pub use segment::{Segment, SegmentKind, MAX_SEGMENT_DATA};

// Re-export container implementations at crate root
#[cfg(feature = "jpeg")]
pub use formats::jpeg_io::JpegImage;
#[cfg(feature = "png")]
pub use formats::png_io::PngImage;

/// Initial buffer capacity for bounded reads (64KB)
pub const DEFAULT_CHUNK_SIZE: usize = 65536;

// Test utilities - only compiled for tests or when explicitly enabled
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
