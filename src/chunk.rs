//! PNG chunk model
//!
//! Each chunk is `length (u32 BE) | type (4 ASCII bytes) | data | CRC32 (u32 BE)`
//! with the CRC computed over type and data.

use crate::{
    error::{Error, Result},
    markers,
    reader::read_vec,
};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use crc::{Crc, CRC_32_ISO_HDLC};
use std::io::{self, Read, Seek, Write};

/// Largest chunk length allowed by the PNG specification (2^31 - 1)
pub const MAX_CHUNK_LEN: u32 = 0x7FFF_FFFF;

/// IEEE 802.3 CRC32 as used by PNG
const PNG_CRC: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// One PNG chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    chunk_type: [u8; 4],
    data: Vec<u8>,
}

impl Chunk {
    /// Create a chunk; its CRC is computed whenever it is written
    pub fn new(chunk_type: [u8; 4], data: Vec<u8>) -> Result<Self> {
        if data.len() > MAX_CHUNK_LEN as usize {
            return Err(Error::DataTooLarge {
                size: data.len(),
                max: MAX_CHUNK_LEN as usize,
            });
        }
        Ok(Self { chunk_type, data })
    }

    /// Read one chunk and verify its CRC
    pub fn read<R: Read + Seek>(source: &mut R) -> Result<Self> {
        let offset = source.stream_position()?;

        let length = source
            .read_u32::<BigEndian>()
            .map_err(|e| Error::from_read(e, offset))?;
        if length > MAX_CHUNK_LEN {
            return Err(Error::InvalidSegmentLength {
                offset,
                length: length as u64,
            });
        }

        let mut chunk_type = [0u8; 4];
        source
            .read_exact(&mut chunk_type)
            .map_err(|e| Error::from_read(e, offset + 4))?;

        let data = read_vec(source, length as usize, offset + 8)?;

        let stored = source
            .read_u32::<BigEndian>()
            .map_err(|e| Error::from_read(e, offset + 8 + length as u64))?;

        let chunk = Self { chunk_type, data };
        let computed = chunk.checksum();
        if stored != computed {
            return Err(Error::ChecksumMismatch {
                chunk_type: chunk.type_str().into_owned(),
                stored,
                computed,
            });
        }

        log::trace!(
            "{} chunk at offset {}, length {}",
            markers::chunk_label(&chunk.chunk_type),
            offset,
            length
        );
        Ok(chunk)
    }

    /// Write the chunk with a freshly computed CRC, returning bytes written
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<u64> {
        self.emit(writer).map_err(Error::from_write)?;
        Ok(self.encoded_len())
    }

    fn emit<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u32::<BigEndian>(self.data.len() as u32)?;
        writer.write_all(&self.chunk_type)?;
        writer.write_all(&self.data)?;
        writer.write_u32::<BigEndian>(self.checksum())?;
        Ok(())
    }

    /// CRC32 over type and data
    pub fn checksum(&self) -> u32 {
        let mut digest = PNG_CRC.digest();
        digest.update(&self.chunk_type);
        digest.update(&self.data);
        digest.finalize()
    }

    /// Number of bytes [`Chunk::write`] produces
    pub fn encoded_len(&self) -> u64 {
        12 + self.data.len() as u64
    }

    /// Four-byte type tag
    pub fn chunk_type(&self) -> &[u8; 4] {
        &self.chunk_type
    }

    /// Type tag as text (lossy for non-ASCII tags)
    pub fn type_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.chunk_type)
    }

    /// Chunk data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Critical chunks have an uppercase first letter
    pub fn is_critical(&self) -> bool {
        self.chunk_type[0].is_ascii_uppercase()
    }

    /// True for the terminating IEND chunk
    pub fn is_end(&self) -> bool {
        self.chunk_type == markers::IEND
    }
}
