//! Ordered decode attempts for text file content.
//!
//! A file is decoded by trying each candidate [`TextEncoding`] in turn. Every
//! attempt is strict: a byte sequence that is malformed for the candidate makes
//! that attempt fail instead of producing replacement characters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A character encoding that file content may be decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextEncoding {
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    #[serde(rename = "cp1251", alias = "windows-1251")]
    Windows1251,
    #[serde(rename = "cp1252", alias = "windows-1252")]
    Windows1252,
    #[serde(rename = "latin-1", alias = "latin1", alias = "iso-8859-1")]
    Latin1,
    #[serde(rename = "utf-16", alias = "utf16")]
    Utf16,
}

impl TextEncoding {
    /// The default candidate order.
    pub const DEFAULT_ORDER: [TextEncoding; 5] = [
        TextEncoding::Utf8,
        TextEncoding::Windows1251,
        TextEncoding::Windows1252,
        TextEncoding::Latin1,
        TextEncoding::Utf16,
    ];

    /// The label used in report headers.
    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Windows1251 => "cp1251",
            TextEncoding::Windows1252 => "cp1252",
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Utf16 => "utf-16",
        }
    }

    /// Decodes `bytes` strictly, returning `None` on any malformed sequence.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => strict(encoding_rs::UTF_8, bytes),
            TextEncoding::Windows1251 => {
                legacy(encoding_rs::WINDOWS_1251, &WINDOWS_1251_UNDEFINED, bytes)
            }
            TextEncoding::Windows1252 => {
                legacy(encoding_rs::WINDOWS_1252, &WINDOWS_1252_UNDEFINED, bytes)
            }
            // encoding_rs folds ISO-8859-1 into windows-1252, so the identity
            // mapping is done here.
            TextEncoding::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
            TextEncoding::Utf16 => decode_utf16(bytes),
        }
    }
}

// The WHATWG tables used by encoding_rs map these bytes to C1 controls, but
// the code pages themselves leave them unassigned.
const WINDOWS_1251_UNDEFINED: [u8; 1] = [0x98];
const WINDOWS_1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

fn legacy(
    encoding: &'static encoding_rs::Encoding,
    undefined: &[u8],
    bytes: &[u8],
) -> Option<String> {
    if bytes.iter().any(|b| undefined.contains(b)) {
        return None;
    }
    strict(encoding, bytes)
}

fn strict(encoding: &'static encoding_rs::Encoding, bytes: &[u8]) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
}

/// BOM selects the byte order; without one, little-endian is assumed.
fn decode_utf16(bytes: &[u8]) -> Option<String> {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => strict(encoding_rs::UTF_16BE, rest),
        [0xFF, 0xFE, rest @ ..] => strict(encoding_rs::UTF_16LE, rest),
        _ => strict(encoding_rs::UTF_16LE, bytes),
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TextEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "cp1251" | "windows-1251" => Ok(TextEncoding::Windows1251),
            "cp1252" | "windows-1252" => Ok(TextEncoding::Windows1252),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(TextEncoding::Latin1),
            "utf-16" | "utf16" => Ok(TextEncoding::Utf16),
            _ => Err(format!("unsupported encoding: {}", s)),
        }
    }
}

/// Result of trying a list of candidate encodings against some bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    Decoded {
        text: String,
        encoding: TextEncoding,
    },
    Failed,
}

/// Tries each candidate in order and stops at the first one that decodes.
pub fn decode(bytes: &[u8], candidates: &[TextEncoding]) -> DecodeOutcome {
    candidates
        .iter()
        .find_map(|encoding| {
            encoding.decode(bytes).map(|text| DecodeOutcome::Decoded {
                text,
                encoding: *encoding,
            })
        })
        .unwrap_or(DecodeOutcome::Failed)
}
