//! PNG container implementation

use crate::{
    chunk::Chunk,
    error::{Error, Result},
    formats::{ContainerIO, ContainerKind, PNG_SIGNATURE},
};
use std::io::{Cursor, Read, Seek, Write};

/// A parsed PNG file: chunks in file order up to and including IEND
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngImage {
    chunks: Vec<Chunk>,
    /// Bytes after IEND, written back verbatim
    trailer: Vec<u8>,
}

impl PngImage {
    /// Create a container from a chunk list
    pub fn from_chunks(chunks: Vec<Chunk>) -> Self {
        Self {
            chunks,
            trailer: Vec::new(),
        }
    }

    /// Fast single-pass parser
    pub fn from_source<R: Read + Seek>(source: &mut R) -> Result<Self> {
        let offset = source.stream_position()?;
        let mut sig = [0u8; 8];
        source
            .read_exact(&mut sig)
            .map_err(|e| Error::from_read(e, offset))?;
        if sig != PNG_SIGNATURE {
            return Err(Error::SignatureMismatch);
        }

        let mut chunks = Vec::new();
        loop {
            let chunk = Chunk::read(source)?;
            let is_end = chunk.is_end();
            chunks.push(chunk);
            if is_end {
                break;
            }
        }

        let mut trailer = Vec::new();
        source.read_to_end(&mut trailer)?;
        if !trailer.is_empty() {
            log::debug!("{} bytes after IEND", trailer.len());
        }

        log::debug!("parsed PNG with {} chunks", chunks.len());
        Ok(Self { chunks, trailer })
    }

    /// All chunks in file order
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// First chunk with the given type
    pub fn chunk(&self, chunk_type: &[u8; 4]) -> Option<&Chunk> {
        self.chunks.iter().find(|c| c.chunk_type() == chunk_type)
    }

    /// Bytes that followed IEND
    pub fn trailer(&self) -> &[u8] {
        &self.trailer
    }

    /// Total serialized size
    pub fn encoded_len(&self) -> u64 {
        PNG_SIGNATURE.len() as u64
            + self.chunks.iter().map(Chunk::encoded_len).sum::<u64>()
            + self.trailer.len() as u64
    }
}

impl ContainerIO for PngImage {
    fn container_kind(&self) -> ContainerKind {
        ContainerKind::Png
    }

    fn parse(bytes: &[u8]) -> Result<Self> {
        let mut source = Cursor::new(bytes);
        let image = Self::from_source(&mut source)?;

        let consumed = source.position();
        if image.encoded_len() != consumed {
            log::warn!(
                "PNG size mismatch: consumed {} bytes, would write {}",
                consumed,
                image.encoded_len()
            );
        }
        Ok(image)
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> Result<u64> {
        writer.write_all(PNG_SIGNATURE).map_err(Error::from_write)?;
        let mut total = PNG_SIGNATURE.len() as u64;
        for chunk in &self.chunks {
            total += chunk.write(writer)?;
        }
        writer.write_all(&self.trailer).map_err(Error::from_write)?;
        Ok(total + self.trailer.len() as u64)
    }

    /// ICC embedding for PNG (an `iCCP` chunk) is not supported
    fn embed_icc_profile(&mut self, _profile: &[u8]) -> Result<()> {
        Err(Error::NotImplemented("PNG ICC profile embedding"))
    }
}
