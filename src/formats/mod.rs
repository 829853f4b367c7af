//! Container-specific implementations
//!
//! Each container format (JPEG, PNG) has a type that can parse itself from
//! bytes, write itself back and embed an ICC profile. Format identity is
//! decided once, from the leading bytes, by [`ContainerKind::detect`].

use crate::error::Result;
use std::io::{Read, Write};

#[cfg(feature = "jpeg")]
pub mod jpeg_io;
#[cfg(feature = "png")]
pub mod png_io;

/// JPEG magic bytes (SOI marker)
pub const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8];

/// PNG file signature
pub const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Container format - defines how a file is structured on disk
///
/// Note: The actual variants are determined by enabled features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// JPEG marker-segment structure
    #[cfg(feature = "jpeg")]
    Jpeg,

    /// PNG chunk structure
    #[cfg(feature = "png")]
    Png,
}

impl ContainerKind {
    /// Get all container kinds that are available in this build
    pub fn all() -> &'static [ContainerKind] {
        &[
            #[cfg(feature = "jpeg")]
            ContainerKind::Jpeg,
            #[cfg(feature = "png")]
            ContainerKind::Png,
        ]
    }

    /// Detect the container from the first bytes of a file
    ///
    /// Returns `None` for unknown or too-short headers.
    pub fn detect(header: &[u8]) -> Option<ContainerKind> {
        #[cfg(feature = "jpeg")]
        if header.starts_with(JPEG_SIGNATURE) {
            return Some(ContainerKind::Jpeg);
        }
        #[cfg(feature = "png")]
        if header.starts_with(PNG_SIGNATURE) {
            return Some(ContainerKind::Png);
        }
        let _ = header;
        None
    }

    /// Detect the container from a file extension (without dot, case-insensitive)
    pub fn from_extension(ext: &str) -> Option<ContainerKind> {
        let ext = ext.to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.extensions().contains(&ext.as_str()))
    }

    /// Primary MIME type
    pub fn to_mime(&self) -> &'static str {
        match *self {
            #[cfg(feature = "jpeg")]
            ContainerKind::Jpeg => "image/jpeg",
            #[cfg(feature = "png")]
            ContainerKind::Png => "image/png",
        }
    }

    /// File extensions this container uses, primary first
    pub fn extensions(&self) -> &'static [&'static str] {
        match *self {
            #[cfg(feature = "jpeg")]
            ContainerKind::Jpeg => &["jpg", "jpeg", "jpe", "jfif"],
            #[cfg(feature = "png")]
            ContainerKind::Png => &["png"],
        }
    }
}

impl std::fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_mime())
    }
}

/// Capabilities shared by every parsed container
pub trait ContainerIO: Sized + Send + Sync {
    /// Container kind this type represents
    fn container_kind(&self) -> ContainerKind;

    /// Parse a complete in-memory file
    fn parse(bytes: &[u8]) -> Result<Self>;

    /// Buffer a reader completely, then parse it
    ///
    /// Parsing needs to step back over a marker, so the input is always
    /// buffered before the structure is read.
    fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::parse(&bytes)
    }

    /// Serialize the structure, returning the number of bytes written
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<u64>;

    /// Serialize into a new buffer
    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Embed an ICC profile in the format's conventional location
    fn embed_icc_profile(&mut self, profile: &[u8]) -> Result<()>;

    /// Embed one of the built-in profiles by name
    ///
    /// See [`crate::icc::preset_names`] for the available names.
    #[cfg(feature = "icc-presets")]
    fn embed_icc_preset(&mut self, name: &str) -> Result<()> {
        let profile = crate::icc::embedded_profile(name)?;
        self.embed_icc_profile(&profile)
    }
}
