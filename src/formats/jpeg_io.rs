//! JPEG container implementation

use crate::{
    error::{Error, Result},
    formats::{ContainerIO, ContainerKind},
    icc,
    markers::{self, EOI, SOI, SOS},
    segment::{Segment, MAX_SEGMENT_DATA},
};
use std::io::{Cursor, Read, Seek, Write};

/// A parsed JPEG file: its segments in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JpegImage {
    segments: Vec<Segment>,
}

impl JpegImage {
    /// Create a container from an existing segment list
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Fast single-pass parser
    ///
    /// Reads segments until EOI. SOS is always followed by its entropy-coded
    /// data; anything after EOI is kept as a trailer.
    pub fn from_source<R: Read + Seek>(source: &mut R) -> Result<Self> {
        let mut segments = Vec::new();

        loop {
            let segment = Segment::read(source)?;
            let marker = segment.marker();
            segments.push(segment);

            match marker {
                Some(SOS) => segments.push(Segment::scan_entropy(source)?),
                Some(EOI) => {
                    if let Some(trailer) = Segment::read_trailer(source)? {
                        log::debug!("{} bytes after EOI", trailer.encoded_len());
                        segments.push(trailer);
                    }
                    break;
                }
                _ => {}
            }
        }

        log::debug!("parsed JPEG with {} segments", segments.len());
        Ok(Self { segments })
    }

    /// All segments in file order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Consume the container, returning its segments
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Total serialized size
    pub fn encoded_len(&self) -> u64 {
        self.segments.iter().map(Segment::encoded_len).sum()
    }

    /// Payload of the APPn segment with the given index, if present
    pub fn app_segment(&self, app_index: u8) -> Option<&[u8]> {
        self.segments
            .iter()
            .find(|s| s.app_index() == Some(app_index))
            .map(Segment::data)
    }

    /// Insert or replace the APPn segment with the given index
    ///
    /// An existing segment with the same marker is overwritten in place.
    /// Otherwise the new segment goes after SOI and any lower-numbered APP
    /// segments, in front of the first higher APP segment or non-APP content.
    pub fn insert_app_segment(&mut self, app_index: u8, data: &[u8]) -> Result<()> {
        let marker = markers::app_marker(app_index).ok_or(Error::InvalidAppIndex(app_index))?;
        if data.len() > MAX_SEGMENT_DATA {
            return Err(Error::DataTooLarge {
                size: data.len(),
                max: MAX_SEGMENT_DATA,
            });
        }
        let segment = Segment::General {
            marker,
            data: data.to_vec(),
        };

        if let Some(existing) = self
            .segments
            .iter_mut()
            .find(|s| matches!(s, Segment::General { marker: m, .. } if *m == marker))
        {
            log::debug!("replacing {}", markers::marker_label(marker));
            *existing = segment;
            return Ok(());
        }

        let position = self
            .segments
            .iter()
            .position(|s| match s {
                Segment::Marker(SOI) => false,
                Segment::General { marker: m, .. } if markers::is_app(*m) => *m > marker,
                _ => true,
            })
            .unwrap_or(self.segments.len());

        log::debug!(
            "inserting {} at position {}",
            markers::marker_label(marker),
            position
        );
        self.segments.insert(position, segment);
        Ok(())
    }

    /// Reassemble an embedded ICC profile from its APP2 chunks
    pub fn icc_profile(&self) -> Option<Vec<u8>> {
        let chunks = self
            .segments
            .iter()
            .filter(|s| s.app_index() == Some(2))
            .filter_map(|s| icc::parse_icc_chunk(s.data()))
            .collect::<Vec<_>>();
        if chunks.is_empty() {
            return None;
        }
        icc::assemble_icc_profile(chunks)
    }
}

impl ContainerIO for JpegImage {
    fn container_kind(&self) -> ContainerKind {
        ContainerKind::Jpeg
    }

    fn parse(bytes: &[u8]) -> Result<Self> {
        let mut source = Cursor::new(bytes);
        let image = Self::from_source(&mut source)?;

        // Self-check: an unedited container serializes to what it consumed
        let consumed = source.position();
        if image.encoded_len() != consumed {
            log::warn!(
                "JPEG size mismatch: consumed {} bytes, would write {}",
                consumed,
                image.encoded_len()
            );
        }
        Ok(image)
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> Result<u64> {
        let mut total = 0;
        for segment in &self.segments {
            total += segment.write(writer)?;
        }
        Ok(total)
    }

    /// Embed as a single APP2 `ICC_PROFILE` chunk, replacing any existing APP2
    ///
    /// Further chunks of a previously embedded profile are removed so the
    /// new profile is the only one left.
    fn embed_icc_profile(&mut self, profile: &[u8]) -> Result<()> {
        let payload = icc::build_icc_chunk(profile)?;

        // The first APP2 is overwritten in place by insert_app_segment
        let mut first_app2 = true;
        let before = self.segments.len();
        self.segments.retain(|s| {
            if s.app_index() != Some(2) || std::mem::take(&mut first_app2) {
                return true;
            }
            icc::parse_icc_chunk(s.data()).is_none()
        });
        if self.segments.len() != before {
            log::debug!(
                "removed {} stale ICC chunks",
                before - self.segments.len()
            );
        }

        self.insert_app_segment(2, &payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::{APP0, APP1, APP2, DQT};
    use crate::test_utils::{jpeg_bytes, minimal_jpeg, sample_jpeg};

    fn app_indices(image: &JpegImage) -> Vec<u8> {
        image
            .segments()
            .iter()
            .filter_map(Segment::app_index)
            .collect()
    }

    #[test]
    fn test_jpeg_parse_minimal() {
        // Minimal JPEG: SOI + EOI
        let data = minimal_jpeg();
        let image = JpegImage::parse(&data).unwrap();

        assert_eq!(image.container_kind(), ContainerKind::Jpeg);
        assert_eq!(image.encoded_len(), 4);
        assert_eq!(
            image.segments(),
            &[Segment::Marker(SOI), Segment::Marker(EOI)]
        );
    }

    #[test]
    fn test_parse_sample_structure() {
        let data = sample_jpeg();
        let image = JpegImage::parse(&data).unwrap();

        let labels: Vec<_> = image.segments().iter().map(Segment::label).collect();
        assert_eq!(
            labels,
            vec!["SOI", "APP0", "DQT", "SOF0", "DHT", "SOS", "ECS", "EOI"]
        );

        let sos = image
            .segments()
            .iter()
            .position(|s| s.marker() == Some(SOS))
            .unwrap();
        assert!(matches!(image.segments()[sos + 1], Segment::EntropyCoded(_)));
    }

    #[test]
    fn test_round_trip_identity() {
        let data = sample_jpeg();
        let image = JpegImage::parse(&data).unwrap();
        let out = image.to_bytes().unwrap();
        assert_eq!(out, data);
        assert_eq!(image.encoded_len(), data.len() as u64);
    }

    #[test]
    fn test_trailer_preserved() {
        let mut data = sample_jpeg();
        data.extend_from_slice(b"trailing garbage");
        let image = JpegImage::parse(&data).unwrap();

        assert_eq!(
            image.segments().last(),
            Some(&Segment::Trailer(b"trailing garbage".to_vec()))
        );
        assert_eq!(image.to_bytes().unwrap(), data);
    }

    #[test]
    fn test_missing_eoi_is_truncated() {
        let data = jpeg_bytes(&[Segment::Marker(SOI), Segment::new(APP0, vec![1, 2]).unwrap()]);
        let result = JpegImage::parse(&data);
        assert!(matches!(result, Err(Error::TruncatedInput { .. })));

        // Scan data that never reaches a marker
        let mut data = sample_jpeg();
        data.truncate(data.len() - 2);
        let result = JpegImage::parse(&data);
        assert!(matches!(result, Err(Error::TruncatedInput { .. })));
    }

    #[test]
    fn test_restart_markers_inside_scan() {
        let data = jpeg_bytes(&[
            Segment::Marker(SOI),
            Segment::new(SOS, vec![0x01, 0x01, 0x00, 0x00, 0x3F, 0x00]).unwrap(),
            Segment::EntropyCoded(vec![0x12, 0xFF, 0xD0, 0x34, 0xFF, 0x00, 0xFF, 0xD7]),
            Segment::Marker(EOI),
        ]);
        let image = JpegImage::parse(&data).unwrap();
        assert_eq!(image.segments().len(), 4);
        assert_eq!(image.segments()[2].data().len(), 8);
        assert_eq!(image.to_bytes().unwrap(), data);
    }

    #[test]
    fn test_progressive_multiple_scans() {
        let sos = Segment::new(SOS, vec![0x01, 0x01, 0x00, 0x00, 0x3F, 0x00]).unwrap();
        let data = jpeg_bytes(&[
            Segment::Marker(SOI),
            sos.clone(),
            Segment::EntropyCoded(vec![0xAA, 0xBB]),
            Segment::new(0xC4, vec![0x00]).unwrap(),
            sos,
            Segment::EntropyCoded(vec![0xCC]),
            Segment::Marker(EOI),
        ]);
        let image = JpegImage::parse(&data).unwrap();
        let kinds: Vec<_> = image.segments().iter().map(Segment::label).collect();
        assert_eq!(kinds, vec!["SOI", "SOS", "ECS", "DHT", "SOS", "ECS", "EOI"]);
        assert_eq!(image.to_bytes().unwrap(), data);
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut image = JpegImage::parse(&sample_jpeg()).unwrap();
        let count = image.segments().len();

        image.insert_app_segment(0, b"new jfif").unwrap();

        assert_eq!(image.segments().len(), count);
        assert_eq!(app_indices(&image), vec![0]);
        assert_eq!(image.app_segment(0), Some(&b"new jfif"[..]));
    }

    #[test]
    fn test_insert_keeps_ascending_order() {
        let mut image = JpegImage::parse(&minimal_jpeg()).unwrap();

        image.insert_app_segment(5, b"five").unwrap();
        image.insert_app_segment(4, b"four").unwrap();
        image.insert_app_segment(3, b"three").unwrap();

        assert_eq!(app_indices(&image), vec![3, 4, 5]);
        assert_eq!(image.segments().first(), Some(&Segment::Marker(SOI)));
        assert_eq!(image.segments().last(), Some(&Segment::Marker(EOI)));
    }

    #[test]
    fn test_insert_between_existing_apps() {
        let mut image = JpegImage::parse(&sample_jpeg()).unwrap();
        image.insert_app_segment(1, b"Exif\0\0").unwrap();
        image.insert_app_segment(14, b"Adobe").unwrap();
        image.insert_app_segment(2, b"icc").unwrap();

        let labels: Vec<_> = image.segments().iter().map(Segment::label).collect();
        assert_eq!(
            &labels[..6],
            &["SOI", "APP0", "APP1", "APP2", "APP14", "DQT"]
        );
    }

    #[test]
    fn test_insert_into_soi_only_appends() {
        let mut image = JpegImage::from_segments(vec![Segment::Marker(SOI)]);
        image.insert_app_segment(2, b"x").unwrap();
        assert_eq!(image.segments().len(), 2);
        assert_eq!(image.segments()[1].marker(), Some(APP2));
    }

    #[test]
    fn test_insert_stops_at_raw_segment() {
        let mut image = JpegImage::from_segments(vec![
            Segment::Marker(SOI),
            Segment::EntropyCoded(vec![1]),
            Segment::Marker(EOI),
        ]);
        image.insert_app_segment(1, b"x").unwrap();
        assert_eq!(image.segments()[1].marker(), Some(APP1));
    }

    #[test]
    fn test_insert_invalid_index() {
        let mut image = JpegImage::parse(&minimal_jpeg()).unwrap();
        let result = image.insert_app_segment(16, b"x");
        assert!(matches!(result, Err(Error::InvalidAppIndex(16))));
        assert_eq!(image.segments().len(), 2);
    }

    #[test]
    fn test_insert_too_large() {
        let mut image = JpegImage::parse(&minimal_jpeg()).unwrap();
        let result = image.insert_app_segment(3, &vec![0u8; MAX_SEGMENT_DATA + 1]);
        assert!(matches!(result, Err(Error::DataTooLarge { .. })));
    }

    #[test]
    fn test_embed_icc_profile() {
        let mut image = JpegImage::parse(&sample_jpeg()).unwrap();
        image.embed_icc_profile(b"fake profile").unwrap();

        let payload = image.app_segment(2).unwrap();
        assert!(payload.starts_with(b"ICC_PROFILE\0\x01\x01"));
        assert_eq!(image.icc_profile(), Some(b"fake profile".to_vec()));

        // Embedding again replaces rather than duplicates
        image.embed_icc_profile(b"second").unwrap();
        assert_eq!(app_indices(&image), vec![0, 2]);
        assert_eq!(image.icc_profile(), Some(b"second".to_vec()));

        // Edited output parses back to the same structure
        let out = image.to_bytes().unwrap();
        assert_eq!(JpegImage::parse(&out).unwrap(), image);
    }

    #[test]
    fn test_icc_profile_from_multiple_chunks() {
        let image = JpegImage::from_segments(vec![
            Segment::Marker(SOI),
            Segment::new(APP2, b"ICC_PROFILE\0\x02\x02world".to_vec()).unwrap(),
            Segment::new(APP2, b"ICC_PROFILE\0\x01\x02hello ".to_vec()).unwrap(),
            Segment::new(DQT, vec![0]).unwrap(),
            Segment::Marker(EOI),
        ]);
        assert_eq!(image.icc_profile(), Some(b"hello world".to_vec()));
    }

    #[test]
    fn test_embed_replaces_multi_chunk_profile() {
        let mut image = JpegImage::from_segments(vec![
            Segment::Marker(SOI),
            Segment::new(APP2, b"ICC_PROFILE\0\x01\x02hello ".to_vec()).unwrap(),
            Segment::new(APP2, b"ICC_PROFILE\0\x02\x02world".to_vec()).unwrap(),
            Segment::new(DQT, vec![0]).unwrap(),
            Segment::Marker(EOI),
        ]);

        image.embed_icc_profile(b"new").unwrap();

        assert_eq!(app_indices(&image), vec![2]);
        assert_eq!(image.icc_profile(), Some(b"new".to_vec()));
        assert_eq!(image.segments()[1].marker(), Some(APP2));
    }

    #[test]
    fn test_embed_keeps_unrelated_app2() {
        let mut image = JpegImage::from_segments(vec![
            Segment::Marker(SOI),
            Segment::new(APP2, b"ICC_PROFILE\0\x01\x02hello ".to_vec()).unwrap(),
            Segment::new(APP2, b"MPF\0data".to_vec()).unwrap(),
            Segment::new(APP2, b"ICC_PROFILE\0\x02\x02world".to_vec()).unwrap(),
            Segment::Marker(EOI),
        ]);

        image.embed_icc_profile(b"new").unwrap();

        let app2: Vec<_> = image
            .segments()
            .iter()
            .filter(|s| s.app_index() == Some(2))
            .map(Segment::data)
            .collect();
        assert_eq!(app2.len(), 2);
        assert_eq!(app2[1], b"MPF\0data");
        assert_eq!(image.icc_profile(), Some(b"new".to_vec()));
    }

    #[test]
    fn test_oversized_embed_leaves_chunks_alone() {
        let original = JpegImage::from_segments(vec![
            Segment::Marker(SOI),
            Segment::new(APP2, b"ICC_PROFILE\0\x01\x02hello ".to_vec()).unwrap(),
            Segment::new(APP2, b"ICC_PROFILE\0\x02\x02world".to_vec()).unwrap(),
            Segment::Marker(EOI),
        ]);
        let mut image = original.clone();
        let result = image.embed_icc_profile(&vec![0u8; icc::MAX_ICC_CHUNK_DATA + 1]);
        assert!(matches!(result, Err(Error::NotImplemented(_))));
        assert_eq!(image, original);
    }

    #[test]
    #[cfg(feature = "icc-presets")]
    fn test_embed_icc_preset() {
        let mut image = JpegImage::parse(&sample_jpeg()).unwrap();
        image.embed_icc_preset("sRGB").unwrap();

        let expected = icc::embedded_profile("srgb").unwrap();
        assert_eq!(image.icc_profile(), Some(expected));

        // Reparse sees the same profile
        let reparsed = JpegImage::parse(&image.to_bytes().unwrap()).unwrap();
        assert_eq!(reparsed, image);
    }

    #[test]
    #[cfg(feature = "icc-presets")]
    fn test_unknown_preset_leaves_image_alone() {
        let mut image = JpegImage::parse(&sample_jpeg()).unwrap();
        let result = image.embed_icc_preset("no such profile");
        assert!(matches!(result, Err(Error::UnknownProfile(_))));
        assert_eq!(image.to_bytes().unwrap(), sample_jpeg());
    }

    #[test]
    fn test_no_icc_profile() {
        let image = JpegImage::parse(&sample_jpeg()).unwrap();
        assert_eq!(image.icc_profile(), None);
        assert_eq!(image.app_segment(2), None);
    }

    #[test]
    fn test_read_from_reader() {
        let data = sample_jpeg();
        let image = JpegImage::read_from(&mut data.as_slice()).unwrap();
        assert_eq!(image.to_bytes().unwrap(), data);
    }
}
