//! Bounded reads shared by the segment and chunk readers

use crate::error::{Error, Result};
use std::io::Read;

/// Read exactly `len` bytes into a new buffer.
///
/// The buffer grows with the data actually present, so a bogus length field
/// cannot force a large up-front allocation. `offset` is the stream position
/// of the first byte and is used to report where the input ran out.
pub(crate) fn read_vec<R: Read>(source: &mut R, len: usize, offset: u64) -> Result<Vec<u8>> {
    let mut data = Vec::with_capacity(len.min(crate::DEFAULT_CHUNK_SIZE));
    source
        .by_ref()
        .take(len as u64)
        .read_to_end(&mut data)
        .map_err(|e| Error::from_read(e, offset))?;

    if data.len() < len {
        return Err(Error::TruncatedInput {
            offset: offset + data.len() as u64,
        });
    }
    Ok(data)
}
