//! Format-agnostic asset handling
//!
//! This module provides a unified API for working with image files
//! without needing to know the specific format.

use crate::{
    error::{Error, Result},
    formats::{ContainerIO, ContainerKind},
};
use std::io::Write;

#[cfg(feature = "jpeg")]
use crate::formats::jpeg_io::JpegImage;
#[cfg(feature = "png")]
use crate::formats::png_io::PngImage;

/// A parsed image whose container was detected from its leading bytes
///
/// # Example
///
/// ```no_run
/// use segment_io::{Asset, ContainerIO};
///
/// # fn main() -> segment_io::Result<()> {
/// let input = std::fs::read("image.jpg")?;
/// let profile = std::fs::read("display-p3.icc")?;
///
/// let mut asset = Asset::parse(&input)?;
/// asset.embed_icc_profile(&profile)?;
/// std::fs::write("output.jpg", asset.to_bytes()?)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asset {
    #[cfg(feature = "jpeg")]
    Jpeg(JpegImage),

    #[cfg(feature = "png")]
    Png(PngImage),
}

impl Asset {
    /// Get the container kind
    pub fn container(&self) -> ContainerKind {
        self.container_kind()
    }

    /// JPEG view, if this is a JPEG
    #[cfg(feature = "jpeg")]
    #[allow(unreachable_patterns)]
    pub fn as_jpeg(&self) -> Option<&JpegImage> {
        match self {
            Asset::Jpeg(image) => Some(image),
            _ => None,
        }
    }

    /// PNG view, if this is a PNG
    #[cfg(feature = "png")]
    #[allow(unreachable_patterns)]
    pub fn as_png(&self) -> Option<&PngImage> {
        match self {
            Asset::Png(image) => Some(image),
            _ => None,
        }
    }
}

impl ContainerIO for Asset {
    fn container_kind(&self) -> ContainerKind {
        match self {
            #[cfg(feature = "jpeg")]
            Asset::Jpeg(image) => image.container_kind(),
            #[cfg(feature = "png")]
            Asset::Png(image) => image.container_kind(),
        }
    }

    /// Sniff the leading bytes and parse with the matching container
    fn parse(bytes: &[u8]) -> Result<Self> {
        let kind = ContainerKind::detect(bytes).ok_or(Error::UnsupportedFileType)?;
        log::debug!("detected {} ({} bytes)", kind, bytes.len());

        match kind {
            #[cfg(feature = "jpeg")]
            ContainerKind::Jpeg => JpegImage::parse(bytes).map(Asset::Jpeg),
            #[cfg(feature = "png")]
            ContainerKind::Png => PngImage::parse(bytes).map(Asset::Png),
        }
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> Result<u64> {
        match self {
            #[cfg(feature = "jpeg")]
            Asset::Jpeg(image) => image.write_to(writer),
            #[cfg(feature = "png")]
            Asset::Png(image) => image.write_to(writer),
        }
    }

    fn embed_icc_profile(&mut self, profile: &[u8]) -> Result<()> {
        match self {
            #[cfg(feature = "jpeg")]
            Asset::Jpeg(image) => image.embed_icc_profile(profile),
            #[cfg(feature = "png")]
            Asset::Png(image) => image.embed_icc_profile(profile),
        }
    }
}

#[cfg(feature = "jpeg")]
impl From<JpegImage> for Asset {
    fn from(image: JpegImage) -> Self {
        Asset::Jpeg(image)
    }
}

#[cfg(feature = "png")]
impl From<PngImage> for Asset {
    fn from(image: PngImage) -> Self {
        Asset::Png(image)
    }
}

#[cfg(all(test, feature = "jpeg", feature = "png"))]
mod tests {
    use super::*;
    use crate::test_utils::{sample_jpeg, sample_png};

    #[test]
    fn test_dispatch_jpeg() {
        let data = sample_jpeg();
        let asset = Asset::parse(&data).unwrap();
        assert_eq!(asset.container(), ContainerKind::Jpeg);
        assert!(asset.as_jpeg().is_some());
        assert!(asset.as_png().is_none());
        assert_eq!(asset.to_bytes().unwrap(), data);
    }

    #[test]
    fn test_dispatch_png() {
        let data = sample_png();
        let asset = Asset::parse(&data).unwrap();
        assert_eq!(asset.container(), ContainerKind::Png);
        assert!(asset.as_png().is_some());
        assert_eq!(asset.to_bytes().unwrap(), data);
    }

    #[test]
    fn test_dispatch_unknown() {
        for data in [&b"GIF89a......"[..], &b"\xFF"[..], &b""[..], &b"\x89PNG\r\n"[..]] {
            let result = Asset::parse(data);
            assert!(matches!(result, Err(Error::UnsupportedFileType)));
        }
    }

    #[test]
    fn test_embed_through_asset() {
        let mut jpeg = Asset::parse(&sample_jpeg()).unwrap();
        jpeg.embed_icc_profile(b"profile").unwrap();
        assert_eq!(
            jpeg.as_jpeg().and_then(JpegImage::icc_profile),
            Some(b"profile".to_vec())
        );

        let mut png = Asset::parse(&sample_png()).unwrap();
        assert!(matches!(
            png.embed_icc_profile(b"profile"),
            Err(Error::NotImplemented(_))
        ));
    }

    #[test]
    fn test_read_from() {
        let data = sample_png();
        let asset = Asset::read_from(&mut std::io::Cursor::new(&data)).unwrap();
        assert_eq!(asset, Asset::from(PngImage::parse(&data).unwrap()));
    }
}
