//! Source code page handling.
//!
//! Exports are written in a single-byte Central European code page. The
//! bytes are decoded to UTF-8 before any parsing happens.

use crate::error::{Error, Result};
use encoding_rs::Encoding;

/// Label of the code page used by the exports.
pub const DEFAULT_ENCODING: &str = "windows-1250";

/// Look up an encoding by its WHATWG label (`windows-1250`, `iso-8859-2`, ...).
pub fn resolve(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| Error::UnknownEncoding(label.to_string()))
}

/// Decode raw export bytes.
///
/// Malformed input is reported, never replaced with U+FFFD.
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        let position = text.find('\u{FFFD}').unwrap_or(0);
        return Err(Error::Encoding {
            encoding: encoding.name().to_string(),
            message: format!("invalid byte sequence near offset {} of the decoded text", position),
        });
    }
    Ok(text.into_owned())
}
