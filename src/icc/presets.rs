//! Built-in ICC profiles
//!
//! Stored gzip-compressed and decoded on request.

use super::validate_profile;
use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use std::io::Read;

const PRESETS: &[(&str, &[u8])] = &[
    ("sRGB", include_bytes!("../../assets/icc/srgb.icc.gz")),
    ("Display P3", include_bytes!("../../assets/icc/display_p3.icc.gz")),
    ("DCI P3", include_bytes!("../../assets/icc/dci_p3.icc.gz")),
    ("Adobe RGB", include_bytes!("../../assets/icc/adobe_rgb.icc.gz")),
    ("ROMM RGB", include_bytes!("../../assets/icc/romm_rgb.icc.gz")),
];

/// Names of the built-in profiles
pub fn preset_names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|&(name, _)| name)
}

/// Decode a built-in profile by name (case-insensitive)
///
/// # Example
///
/// ```
/// let profile = segment_io::icc::embedded_profile("display p3")?;
/// assert_eq!(&profile[36..40], b"acsp");
/// # Ok::<(), segment_io::Error>(())
/// ```
pub fn embedded_profile(name: &str) -> Result<Vec<u8>> {
    let (_, compressed) = PRESETS
        .iter()
        .find(|(preset, _)| preset.eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::UnknownProfile(name.into()))?;

    let mut profile = Vec::new();
    GzDecoder::new(*compressed).read_to_end(&mut profile)?;
    validate_profile(&profile)?;

    log::debug!("decoded {} profile, {} bytes", name, profile.len());
    Ok(profile)
}
