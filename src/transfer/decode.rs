//! Byte-level decoding of import documents: UTF-8 first, UTF-16 as the only fallback

use serde_json::Value;

use crate::error::{ImportError, ImportResult};

const UTF8_BOM: char = '\u{feff}';

/// Decode raw bytes and parse them as a JSON value
pub fn parse_document(bytes: &[u8]) -> ImportResult<Value> {
    let text = decode_text(bytes)?;
    Ok(serde_json::from_str(&text)?)
}

/// Decode bytes as UTF-8, retrying as UTF-16 when that fails.
///
/// BOM-less UTF-16 of ASCII text is also valid UTF-8 full of NULs, which
/// JSON text never contains, so a NUL in the UTF-8 reading triggers the
/// UTF-16 retry as well.
pub fn decode_text(bytes: &[u8]) -> ImportResult<String> {
    match std::str::from_utf8(bytes) {
        Ok(text) if text.contains('\0') => match decode_utf16(bytes) {
            Ok(wide) => Ok(wide),
            Err(_) => Ok(text.to_string()),
        },
        Ok(text) => Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string()),
        Err(utf8_err) => decode_utf16(bytes)
            .map_err(|utf16_err| ImportError::decode(format!("{}; UTF-16: {}", utf8_err, utf16_err))),
    }
}

/// UTF-16 with optional BOM; little-endian when no BOM is present
fn decode_utf16(bytes: &[u8]) -> Result<String, String> {
    if bytes.len() % 2 != 0 {
        return Err(format!("odd byte length {}", bytes.len()));
    }

    let (big_endian, body) = match bytes {
        [0xFE, 0xFF, rest @ ..] => (true, rest),
        [0xFF, 0xFE, rest @ ..] => (false, rest),
        _ => (false, bytes),
    };

    let units = body.chunks_exact(2).map(|pair| {
        if big_endian {
            u16::from_be_bytes([pair[0], pair[1]])
        } else {
            u16::from_le_bytes([pair[0], pair[1]])
        }
    });

    char::decode_utf16(units).collect::<Result<String, _>>().map_err(|e| e.to_string())
}
