use once_cell::sync::Lazy;
use std::collections::HashMap;

// MARKER CODES //

pub const MARKER_PREFIX: u8 = 0xFF;
pub const STUFFED: u8 = 0x00;
pub const SOI: u8 = 0xD8;
pub const EOI: u8 = 0xD9;
pub const SOS: u8 = 0xDA;
pub const COM: u8 = 0xFE;

/// Magic bytes every JPEG stream starts with.
pub const JPEG_MAGIC: [u8; 2] = [MARKER_PREFIX, SOI];

/// Returns true if `code` is followed by a two-byte length field and payload.
///
/// Standalone markers (SOI, EOI, RSTn, TEM) and the pseudo codes `0x00` and
/// `0xFF` answer false, as does anything not in the registry.
pub fn has_payload(code: u8) -> bool {
    matches!(
        code,
        0x02..=0x0F | 0xA0..=0xBF | 0xC0..=0xCF | 0xDA..=0xDF | 0xE0..=0xEF | 0xF0..=0xFE
    )
}

static MARKER_NAMES: Lazy<HashMap<u8, String>> = Lazy::new(build_marker_names);

fn build_marker_names() -> HashMap<u8, String> {
    let mut names = HashMap::new();
    names.insert(0x01, "TEM".to_string());
    for n in 0..16u8 {
        // 0xC4, 0xC8 and 0xCC are not frame markers; overwritten below.
        names.insert(0xC0 + n, format!("SOF{}", n));
    }
    names.insert(0xC4, "DHT".to_string());
    names.insert(0xC8, "JPG".to_string());
    names.insert(0xCC, "DAC".to_string());
    for n in 0..8u8 {
        names.insert(0xD0 + n, format!("RST{}", n));
    }
    for (code, name) in [
        (SOI, "SOI"),
        (EOI, "EOI"),
        (SOS, "SOS"),
        (0xDB, "DQT"),
        (0xDC, "DNL"),
        (0xDD, "DRI"),
        (0xDE, "DHP"),
        (0xDF, "EXP"),
        (COM, "COM"),
    ] {
        names.insert(code, name.to_string());
    }
    for n in 0..16u8 {
        names.insert(0xE0 + n, format!("APP{}", n));
    }
    for n in 0..14u8 {
        names.insert(0xF0 + n, format!("JPG{}", n));
    }
    names
}

/// Short mnemonic of a marker code ("SOI", "APP1", ...), used in log output.
pub fn marker_name(code: u8) -> &'static str {
    MARKER_NAMES.get(&code).map_or("UNKNOWN", String::as_str)
}
