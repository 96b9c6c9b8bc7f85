//! Canonical JSON encoder for APNs payloads
//!
//! All JSON text produced by this crate goes through [`to_json_vec`], so the
//! payload returned by `Message::payload_json` and the bytes handed to the
//! delivery channel are always encoded identically for a given
//! [`JsonEncoding`].

use std::io;

use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, Serializer};

use crate::config::JsonEncoding;
use crate::errors::{PayloadError, Result};

/// Compact formatter that writes non-ASCII characters as `\uXXXX` escapes
#[derive(Debug, Default, Clone, Copy)]
struct EscapedUnicodeFormatter;

impl Formatter for EscapedUnicodeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            if start < idx {
                writer.write_all(fragment[start..idx].as_bytes())?;
            }
            // Characters outside the BMP become a surrogate pair
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = idx + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Serialize `value` to compact JSON bytes using the given encoding mode
pub fn to_json_vec<T>(value: &T, encoding: JsonEncoding) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    let mut out = Vec::with_capacity(256);
    match encoding {
        JsonEncoding::EscapedUnicode => {
            let mut ser = Serializer::with_formatter(&mut out, EscapedUnicodeFormatter);
            value.serialize(&mut ser)?;
        }
        JsonEncoding::Utf8 => {
            let mut ser = Serializer::with_formatter(&mut out, CompactFormatter);
            value.serialize(&mut ser)?;
        }
    }
    Ok(out)
}

/// Serialize `value` to compact JSON text using the given encoding mode
pub fn to_json_string<T>(value: &T, encoding: JsonEncoding) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let bytes = to_json_vec(value, encoding)?;
    String::from_utf8(bytes)
        .map_err(|e| PayloadError::Serialization(serde::ser::Error::custom(e)))
}
