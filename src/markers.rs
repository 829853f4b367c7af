//! Marker table
//!
//! Symbolic names for JPEG (and JPEG 2000) marker bytes and PNG chunk type tags.
//! A JPEG marker is written as `0xFF` followed by one of the bytes below.

/// Prefix byte of every JPEG marker
pub const MARKER_PREFIX: u8 = 0xFF;

// JPEG markers used by the parser
pub const SOF0: u8 = 0xC0;
pub const DHT: u8 = 0xC4;
pub const RST0: u8 = 0xD0;
pub const RST7: u8 = 0xD7;
pub const SOI: u8 = 0xD8; // Start of Image
pub const EOI: u8 = 0xD9; // End of Image
pub const SOS: u8 = 0xDA; // Start of Scan (entropy-coded data follows)
pub const DQT: u8 = 0xDB;
pub const DRI: u8 = 0xDD;
pub const APP0: u8 = 0xE0;
pub const APP1: u8 = 0xE1; // EXIF / XMP
pub const APP2: u8 = 0xE2; // ICC profile
pub const APP15: u8 = 0xEF;
pub const COM: u8 = 0xFE;

/// Stuffing byte that follows a literal 0xFF inside scan data
pub const STUFFING: u8 = 0x00;

/// Every marker byte the table knows, in ascending byte order.
///
/// The 0x01..=0x94 range belongs to JPEG 2000 codestreams; those markers are
/// recognised by name only.
pub const JPEG_MARKERS: &[(&str, u8)] = &[
    ("TEM", 0x01),
    ("SIZ", 0x51),
    ("COD", 0x52),
    ("COC", 0x53),
    ("TLM", 0x55),
    ("PLM", 0x57),
    ("PLT", 0x58),
    ("QCD", 0x5C),
    ("QCC", 0x5D),
    ("RGN", 0x5E),
    ("POC", 0x5F),
    ("PPM", 0x60),
    ("PPT", 0x61),
    ("CRG", 0x63),
    ("CME", 0x64),
    ("SEC", 0x65),
    ("EPB", 0x66),
    ("ESD", 0x67),
    ("EPC", 0x68),
    ("RED", 0x69),
    ("SOT", 0x90),
    ("SOP", 0x91),
    ("EPH", 0x92),
    ("SOD", 0x93),
    ("INSEC", 0x94),
    ("SOF0", 0xC0),
    ("SOF1", 0xC1),
    ("SOF2", 0xC2),
    ("SOF3", 0xC3),
    ("DHT", 0xC4),
    ("SOF5", 0xC5),
    ("SOF6", 0xC6),
    ("SOF7", 0xC7),
    ("JPG", 0xC8),
    ("SOF9", 0xC9),
    ("SOF10", 0xCA),
    ("SOF11", 0xCB),
    ("DAC", 0xCC),
    ("SOF13", 0xCD),
    ("SOF14", 0xCE),
    ("SOF15", 0xCF),
    ("RST0", 0xD0),
    ("RST1", 0xD1),
    ("RST2", 0xD2),
    ("RST3", 0xD3),
    ("RST4", 0xD4),
    ("RST5", 0xD5),
    ("RST6", 0xD6),
    ("RST7", 0xD7),
    ("SOI", 0xD8),
    ("EOI", 0xD9),
    ("SOS", 0xDA),
    ("DQT", 0xDB),
    ("DNL", 0xDC),
    ("DRI", 0xDD),
    ("DHP", 0xDE),
    ("EXP", 0xDF),
    ("APP0", 0xE0),
    ("APP1", 0xE1),
    ("APP2", 0xE2),
    ("APP3", 0xE3),
    ("APP4", 0xE4),
    ("APP5", 0xE5),
    ("APP6", 0xE6),
    ("APP7", 0xE7),
    ("APP8", 0xE8),
    ("APP9", 0xE9),
    ("APP10", 0xEA),
    ("APP11", 0xEB),
    ("APP12", 0xEC),
    ("APP13", 0xED),
    ("APP14", 0xEE),
    ("APP15", 0xEF),
    ("JPG0", 0xF0),
    ("JPG1", 0xF1),
    ("JPG2", 0xF2),
    ("JPG3", 0xF3),
    ("JPG4", 0xF4),
    ("JPG5", 0xF5),
    ("JPG6", 0xF6),
    ("SOF48", 0xF7),
    ("LSE", 0xF8),
    ("JPG9", 0xF9),
    ("JPG10", 0xFA),
    ("JPG11", 0xFB),
    ("JPG12", 0xFC),
    ("JPG13", 0xFD),
    ("COM", 0xFE),
];

/// Get the symbolic name of a JPEG marker byte
pub fn marker_name(marker: u8) -> Option<&'static str> {
    JPEG_MARKERS
        .binary_search_by_key(&marker, |&(_, byte)| byte)
        .ok()
        .map(|i| JPEG_MARKERS[i].0)
}

/// Look up a JPEG marker byte by name (case-insensitive)
pub fn marker_from_name(name: &str) -> Option<u8> {
    JPEG_MARKERS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, byte)| byte)
}

/// Get human-readable label for a JPEG marker
pub fn marker_label(marker: u8) -> &'static str {
    marker_name(marker).unwrap_or("OTHER")
}

/// Markers that never carry a length field
pub fn is_parameterless(marker: u8) -> bool {
    matches!(marker, SOI | EOI | RST0..=RST7)
}

/// Restart markers may appear inside entropy-coded data
pub fn is_restart(marker: u8) -> bool {
    (RST0..=RST7).contains(&marker)
}

/// APP0..=APP15
pub fn is_app(marker: u8) -> bool {
    (APP0..=APP15).contains(&marker)
}

/// Marker byte for APPn, if `index` is in 0..=15
pub fn app_marker(index: u8) -> Option<u8> {
    (index <= APP15 - APP0).then(|| APP0 + index)
}

// PNG chunk types
pub const IHDR: [u8; 4] = *b"IHDR";
pub const PLTE: [u8; 4] = *b"PLTE";
pub const IDAT: [u8; 4] = *b"IDAT";
pub const IEND: [u8; 4] = *b"IEND";
pub const ICCP: [u8; 4] = *b"iCCP";

/// Get human-readable label for a PNG chunk type
pub fn chunk_label(chunk_type: &[u8; 4]) -> &'static str {
    match chunk_type {
        b"IHDR" => "IHDR",
        b"PLTE" => "PLTE",
        b"IDAT" => "IDAT",
        b"IEND" => "IEND",
        b"tRNS" => "tRNS",
        b"gAMA" => "gAMA",
        b"cHRM" => "cHRM",
        b"sRGB" => "sRGB",
        b"iCCP" => "iCCP",
        b"iTXt" => "iTXt",
        b"tEXt" => "tEXt",
        b"zTXt" => "zTXt",
        b"bKGD" => "bKGD",
        b"pHYs" => "pHYs",
        b"tIME" => "tIME",
        b"eXIf" => "eXIf",
        _ => "OTHER",
    }
}
