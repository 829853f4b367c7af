//! ICC profile chunks for JPEG APP2 segments
//!
//! An embedded profile is carried in one or more APP2 segments, each starting
//! with `ICC_PROFILE\0`, a 1-based sequence number and the total chunk count.
//! With the `icc-presets` feature a few common profiles ship with the crate.

use crate::error::{Error, Result};
use byteorder::{BigEndian, ByteOrder};

#[cfg(feature = "icc-presets")]
mod presets;

#[cfg(feature = "icc-presets")]
pub use presets::{embedded_profile, preset_names};

/// Identifier at the start of every ICC APP2 payload
pub const ICC_SIGNATURE: &[u8] = b"ICC_PROFILE\0";

/// Signature plus sequence and count bytes
pub const ICC_HEADER_LEN: usize = ICC_SIGNATURE.len() + 2;

/// Largest profile that fits in a single APP2 segment
///
/// An APP2 payload is limited by its u16 length field, which counts itself.
pub const MAX_ICC_CHUNK_DATA: usize = u16::MAX as usize - 2 - ICC_HEADER_LEN;

/// Check that the profile's size header (bytes 0..4, big-endian) matches its length
pub fn validate_profile(profile: &[u8]) -> Result<()> {
    let declared = profile.get(..4).map_or(0, BigEndian::read_u32);
    if profile.len() < 4 || declared as usize != profile.len() {
        return Err(Error::InvalidProfile {
            declared,
            actual: profile.len(),
        });
    }
    Ok(())
}

/// Build the APP2 payload for a profile embedded as a single chunk
///
/// Profiles larger than [`MAX_ICC_CHUNK_DATA`] would have to be split across
/// several APP2 segments, which is not supported for writing.
pub fn build_icc_chunk(profile: &[u8]) -> Result<Vec<u8>> {
    if profile.len() > MAX_ICC_CHUNK_DATA {
        return Err(Error::NotImplemented("multi-chunk ICC profile embedding"));
    }

    let mut payload = Vec::with_capacity(ICC_HEADER_LEN + profile.len());
    payload.extend_from_slice(ICC_SIGNATURE);
    payload.push(1); // sequence number
    payload.push(1); // chunk count
    payload.extend_from_slice(profile);
    Ok(payload)
}

/// One parsed ICC chunk header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IccChunk<'a> {
    /// 1-based position of this chunk
    pub sequence: u8,
    /// Total number of chunks in the profile
    pub count: u8,
    /// Profile bytes carried by this chunk
    pub data: &'a [u8],
}

/// Parse an APP2 payload as an ICC chunk, if it is one
pub fn parse_icc_chunk(payload: &[u8]) -> Option<IccChunk<'_>> {
    let rest = payload.strip_prefix(ICC_SIGNATURE)?;
    let (&sequence, rest) = rest.split_first()?;
    let (&count, data) = rest.split_first()?;
    Some(IccChunk {
        sequence,
        count,
        data,
    })
}

/// Reassemble a profile from chunks in any order
///
/// Chunks are ordered by sequence number. Returns `None` when there are no
/// chunks, or when sequence numbers are missing, repeated or inconsistent
/// with the declared count.
pub fn assemble_icc_profile(mut chunks: Vec<IccChunk<'_>>) -> Option<Vec<u8>> {
    let count = chunks.first()?.count;
    if count as usize != chunks.len() || chunks.iter().any(|c| c.count != count) {
        return None;
    }

    chunks.sort_by_key(|c| c.sequence);
    let in_order = chunks
        .iter()
        .enumerate()
        .all(|(i, c)| c.sequence as usize == i + 1);
    if !in_order {
        return None;
    }

    let total: usize = chunks.iter().map(|c| c.data.len()).sum();
    let mut profile = Vec::with_capacity(total);
    for chunk in &chunks {
        profile.extend_from_slice(chunk.data);
    }
    Some(profile)
}
