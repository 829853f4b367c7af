//! JPEG segment model
//!
//! A JPEG file is a sequence of marker segments. Most carry a big-endian
//! 16-bit length, a few are bare markers, and the compressed scan data that
//! follows SOS has no length at all and must be scanned for the next marker.

use crate::{
    error::{Error, Result},
    markers::{self, MARKER_PREFIX, STUFFING},
    reader::read_vec,
};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Maximum payload of a length-prefixed segment (u16 length minus its own two bytes)
pub const MAX_SEGMENT_DATA: usize = u16::MAX as usize - 2;

/// Shape of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Bare marker without a length field (SOI, EOI, RSTn)
    Marker,
    /// Marker with length-prefixed payload
    General,
    /// Compressed scan data following SOS
    EntropyCoded,
    /// Bytes after EOI
    Trailer,
}

impl SegmentKind {
    /// Get a string representation of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Marker => "marker",
            Self::General => "general",
            Self::EntropyCoded => "entropy_coded",
            Self::Trailer => "trailer",
        }
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One structural unit of a JPEG file
///
/// Each segment owns its bytes, so edits to one never affect another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Parameter-less marker: `FF xx`
    Marker(u8),

    /// `FF xx`, big-endian length (including itself), payload
    General {
        /// Marker byte following 0xFF
        marker: u8,
        /// Payload without marker and length
        data: Vec<u8>,
    },

    /// Entropy-coded scan data, stuffed bytes and restart markers included
    EntropyCoded(Vec<u8>),

    /// Verbatim bytes following EOI
    Trailer(Vec<u8>),
}

impl Segment {
    /// Build a segment for `marker` wrapping `data`
    ///
    /// Parameter-less markers with no data become [`Segment::Marker`].
    pub fn new(marker: u8, data: Vec<u8>) -> Result<Self> {
        if data.is_empty() && markers::is_parameterless(marker) {
            return Ok(Segment::Marker(marker));
        }
        if data.len() > MAX_SEGMENT_DATA {
            return Err(Error::DataTooLarge {
                size: data.len(),
                max: MAX_SEGMENT_DATA,
            });
        }
        Ok(Segment::General { marker, data })
    }

    /// Build a segment from a symbolic marker name such as `"APP0"`
    pub fn from_marker_name(name: &str, data: Vec<u8>) -> Result<Self> {
        let marker =
            markers::marker_from_name(name).ok_or_else(|| Error::UnknownMarker(name.into()))?;
        Self::new(marker, data)
    }

    /// Read one marker segment from the current position
    pub fn read<R: Read + Seek>(source: &mut R) -> Result<Self> {
        let offset = source.stream_position()?;

        let mut header = [0u8; 2];
        source
            .read_exact(&mut header)
            .map_err(|e| Error::from_read(e, offset))?;
        let [prefix, marker] = header;

        if prefix != MARKER_PREFIX {
            return Err(Error::InvalidHeader {
                offset,
                found: prefix,
            });
        }

        // 0x00 is a stuffing escape and 0xFF a fill byte; neither names a segment
        if marker == STUFFING || marker == MARKER_PREFIX {
            return Err(Error::InvalidHeader {
                offset: offset + 1,
                found: marker,
            });
        }

        if markers::is_parameterless(marker) {
            log::trace!("{} at offset {}", markers::marker_label(marker), offset);
            return Ok(Segment::Marker(marker));
        }

        let length = source
            .read_u16::<BigEndian>()
            .map_err(|e| Error::from_read(e, offset + 2))?;
        if length < 2 {
            return Err(Error::InvalidSegmentLength {
                offset,
                length: length as u64,
            });
        }

        let data = read_vec(source, length as usize - 2, offset + 4)?;
        log::trace!(
            "{} at offset {}, length {}",
            markers::marker_label(marker),
            offset,
            length
        );

        Ok(Segment::General { marker, data })
    }

    /// Scan entropy-coded data up to the next real marker
    ///
    /// Must be called right after the SOS segment has been read. On success
    /// the source is positioned on the 0xFF of the terminating marker.
    pub fn scan_entropy<R: Read + Seek>(source: &mut R) -> Result<Self> {
        let start = source.stream_position()?;
        let mut data = Vec::new();

        loop {
            let pos = start + data.len() as u64;
            let byte = source.read_u8().map_err(|e| Error::from_read(e, pos))?;
            if byte != MARKER_PREFIX {
                data.push(byte);
                continue;
            }

            let next = source
                .read_u8()
                .map_err(|e| Error::from_read(e, pos + 1))?;
            if next == STUFFING || next == MARKER_PREFIX || markers::is_restart(next) {
                data.extend_from_slice(&[byte, next]);
                continue;
            }

            // Genuine marker: leave it for the next segment read
            source.seek(SeekFrom::Current(-2))?;
            log::trace!("entropy-coded data at offset {}, {} bytes", start, data.len());
            return Ok(Segment::EntropyCoded(data));
        }
    }

    /// Read everything left in the source as a trailer, if anything is left
    pub fn read_trailer<R: Read>(source: &mut R) -> Result<Option<Self>> {
        let mut data = Vec::new();
        source.read_to_end(&mut data)?;
        Ok((!data.is_empty()).then_some(Segment::Trailer(data)))
    }

    /// Write the segment in its wire form, returning the number of bytes written
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<u64> {
        if let Segment::General { data, .. } = self {
            if data.len() > MAX_SEGMENT_DATA {
                return Err(Error::DataTooLarge {
                    size: data.len(),
                    max: MAX_SEGMENT_DATA,
                });
            }
        }
        self.emit(writer).map_err(Error::from_write)?;
        Ok(self.encoded_len())
    }

    fn emit<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        match self {
            Segment::Marker(marker) => {
                writer.write_u8(MARKER_PREFIX)?;
                writer.write_u8(*marker)?;
            }
            Segment::General { marker, .. } if self.is_bare() => {
                writer.write_u8(MARKER_PREFIX)?;
                writer.write_u8(*marker)?;
            }
            Segment::General { marker, data } => {
                writer.write_u8(MARKER_PREFIX)?;
                writer.write_u8(*marker)?;
                writer.write_u16::<BigEndian>((data.len() + 2) as u16)?;
                writer.write_all(data)?;
            }
            Segment::EntropyCoded(data) | Segment::Trailer(data) => {
                writer.write_all(data)?;
            }
        }
        Ok(())
    }

    /// Number of bytes [`Segment::write`] produces
    pub fn encoded_len(&self) -> u64 {
        match self {
            Segment::Marker(_) => 2,
            Segment::General { .. } if self.is_bare() => 2,
            Segment::General { data, .. } => 4 + data.len() as u64,
            Segment::EntropyCoded(data) | Segment::Trailer(data) => data.len() as u64,
        }
    }

    /// Shape of this segment
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Marker(_) => SegmentKind::Marker,
            Segment::General { .. } => SegmentKind::General,
            Segment::EntropyCoded(_) => SegmentKind::EntropyCoded,
            Segment::Trailer(_) => SegmentKind::Trailer,
        }
    }

    /// Marker byte, for marker-introduced segments
    pub fn marker(&self) -> Option<u8> {
        match self {
            Segment::Marker(marker) | Segment::General { marker, .. } => Some(*marker),
            Segment::EntropyCoded(_) | Segment::Trailer(_) => None,
        }
    }

    /// Payload bytes (empty for bare markers)
    pub fn data(&self) -> &[u8] {
        match self {
            Segment::Marker(_) => &[],
            Segment::General { data, .. }
            | Segment::EntropyCoded(data)
            | Segment::Trailer(data) => data,
        }
    }

    /// Length field as written on the wire
    ///
    /// `None` for segments without one, and for payloads too large to frame.
    pub fn length(&self) -> Option<u16> {
        match self {
            Segment::General { .. } if self.is_bare() => None,
            Segment::General { data, .. } => u16::try_from(data.len() + 2).ok(),
            _ => None,
        }
    }

    /// A general segment that is written without a length field
    fn is_bare(&self) -> bool {
        matches!(self, Segment::General { marker, data }
            if data.is_empty() && markers::is_parameterless(*marker))
    }

    /// APPn index of a general APP segment
    pub fn app_index(&self) -> Option<u8> {
        match self {
            Segment::General { marker, .. } if markers::is_app(*marker) => {
                Some(marker - markers::APP0)
            }
            _ => None,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Segment::Marker(marker) | Segment::General { marker, .. } => {
                markers::marker_label(*marker)
            }
            Segment::EntropyCoded(_) => "ECS",
            Segment::Trailer(_) => "TRAILER",
        }
    }
}
