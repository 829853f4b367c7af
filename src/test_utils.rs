//! Test utilities: synthetic fixture builders.
//!
//! The fixtures are tiny, structurally valid files assembled from segment
//! and chunk values, so tests need no binary files on disk. The images are
//! not meant to decode to anything sensible; only their container structure
//! is valid.
//!
//! # Usage
//!
//! ```
//! use segment_io::{test_utils::*, Asset, ContainerIO};
//!
//! # fn example() -> segment_io::Result<()> {
//! let input = sample_jpeg();
//! let asset = Asset::parse(&input)?;
//! assert_eq!(asset.to_bytes()?, input);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#[cfg(feature = "jpeg")]
use crate::{
    markers::{APP0, DHT, DQT, EOI, SOF0, SOI, SOS},
    segment::Segment,
};

#[cfg(feature = "png")]
use crate::{
    chunk::Chunk,
    formats::PNG_SIGNATURE,
    markers::{IDAT, IEND, IHDR},
};

/// Serialize a list of JPEG segments
#[cfg(feature = "jpeg")]
pub fn jpeg_bytes(segments: &[Segment]) -> Vec<u8> {
    let mut out = Vec::new();
    for segment in segments {
        segment
            .write(&mut out)
            .expect("writing to a Vec cannot fail");
    }
    out
}

/// SOI followed directly by EOI
#[cfg(feature = "jpeg")]
pub fn minimal_jpeg() -> Vec<u8> {
    vec![0xFF, SOI, 0xFF, EOI]
}

/// Segments of a small baseline JPEG
///
/// SOI, APP0 (JFIF), DQT, SOF0, DHT, SOS, scan data containing a stuffed
/// byte and a restart marker, EOI.
#[cfg(feature = "jpeg")]
pub fn sample_jpeg_segments() -> Vec<Segment> {
    let jfif = b"JFIF\x00\x01\x01\x01\x00\x48\x00\x48\x00\x00".to_vec();

    let mut dqt = vec![0x00];
    dqt.extend(1..=64u8);

    // 8-bit, 8x8, one component sampled 1x1 using table 0
    let sof0 = vec![0x08, 0x00, 0x08, 0x00, 0x08, 0x01, 0x01, 0x11, 0x00];

    // DC table 0 with a single 1-bit code for symbol 0
    let mut dht = vec![0x00, 0x01];
    dht.extend([0u8; 15]);
    dht.push(0x00);

    let sos = vec![0x01, 0x01, 0x00, 0x00, 0x3F, 0x00];

    vec![
        Segment::Marker(SOI),
        Segment::General {
            marker: APP0,
            data: jfif,
        },
        Segment::General {
            marker: DQT,
            data: dqt,
        },
        Segment::General {
            marker: SOF0,
            data: sof0,
        },
        Segment::General {
            marker: DHT,
            data: dht,
        },
        Segment::General {
            marker: SOS,
            data: sos,
        },
        Segment::EntropyCoded(vec![0x12, 0xFF, 0x00, 0x34, 0xFF, 0xD0, 0x56, 0x78]),
        Segment::Marker(EOI),
    ]
}

/// Bytes of [`sample_jpeg_segments`]
#[cfg(feature = "jpeg")]
pub fn sample_jpeg() -> Vec<u8> {
    jpeg_bytes(&sample_jpeg_segments())
}

/// Serialize a PNG signature followed by the given chunks
#[cfg(feature = "png")]
pub fn png_bytes(chunks: &[Chunk]) -> Vec<u8> {
    let mut out = PNG_SIGNATURE.to_vec();
    for chunk in chunks {
        chunk.write(&mut out).expect("writing to a Vec cannot fail");
    }
    out
}

/// IHDR for a 1x1 8-bit RGB image
#[cfg(feature = "png")]
pub fn ihdr_chunk() -> Chunk {
    let data = vec![
        0x00, 0x00, 0x00, 0x01, // Width: 1
        0x00, 0x00, 0x00, 0x01, // Height: 1
        0x08, // Bit depth: 8
        0x02, // Color type: RGB
        0x00, // Compression: deflate
        0x00, // Filter: adaptive
        0x00, // Interlace: none
    ];
    Chunk::new(IHDR, data).expect("IHDR data is small")
}

/// Signature, IHDR, IEND
#[cfg(feature = "png")]
pub fn minimal_png() -> Vec<u8> {
    png_bytes(&[ihdr_chunk(), end_chunk()])
}

/// Signature, IHDR, tEXt, IDAT, IEND
#[cfg(feature = "png")]
pub fn sample_png() -> Vec<u8> {
    let text = Chunk::new(*b"tEXt", b"Comment\0synthetic".to_vec()).expect("small chunk");
    // zlib stream of a single filtered RGB row (0, 0, 0, 0)
    let idat = Chunk::new(
        IDAT,
        vec![
            0x78, 0x01, 0x01, 0x04, 0x00, 0xFB, 0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x00,
            0x01,
        ],
    )
    .expect("small chunk");
    png_bytes(&[ihdr_chunk(), text, idat, end_chunk()])
}

#[cfg(feature = "png")]
fn end_chunk() -> Chunk {
    Chunk::new(IEND, Vec::new()).expect("empty chunk")
}
