//! Text encodings used to turn string payloads into bytes.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Deserialize;

use crate::error::AppendError;

const LENIENT_PADDING: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const BASE64_STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT_PADDING);
const BASE64_URL: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT_PADDING);

/// Encoding applied to text (and numeric) payloads before writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Encoding {
    #[default]
    Utf8,
    Utf16Le,
    /// One byte per UTF-16 code unit, keeping the low 8 bits.
    Latin1,
    /// Same byte mapping as `Latin1`.
    Ascii,
    Base64,
    Base64Url,
    Hex,
}

impl Encoding {
    /// Parse an encoding name. Names are case-insensitive and accept the
    /// usual aliases (`utf-8`, `ucs2`, `binary`, ...).
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Some(Encoding::Utf8),
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => Some(Encoding::Utf16Le),
            "latin1" | "binary" => Some(Encoding::Latin1),
            "ascii" => Some(Encoding::Ascii),
            "base64" => Some(Encoding::Base64),
            "base64url" => Some(Encoding::Base64Url),
            "hex" => Some(Encoding::Hex),
            _ => None,
        }
    }

    /// Canonical name of the encoding.
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Utf16Le => "utf16le",
            Encoding::Latin1 => "latin1",
            Encoding::Ascii => "ascii",
            Encoding::Base64 => "base64",
            Encoding::Base64Url => "base64url",
            Encoding::Hex => "hex",
        }
    }

    /// Encode `text` into the bytes that will be written to the file.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, AppendError> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            Encoding::Latin1 | Encoding::Ascii => {
                Ok(text.encode_utf16().map(|unit| unit as u8).collect())
            }
            Encoding::Base64 => self.decode_base64(&BASE64_STANDARD, text),
            Encoding::Base64Url => self.decode_base64(&BASE64_URL, text),
            Encoding::Hex => hex::decode(text).map_err(|e| AppendError::InvalidEncodedText {
                encoding: *self,
                reason: e.to_string(),
            }),
        }
    }

    fn decode_base64(&self, engine: &GeneralPurpose, text: &str) -> Result<Vec<u8>, AppendError> {
        let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        engine
            .decode(compact)
            .map_err(|e| AppendError::InvalidEncodedText {
                encoding: *self,
                reason: e.to_string(),
            })
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = AppendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Encoding::parse(s).ok_or_else(|| AppendError::UnknownEncoding(s.to_string()))
    }
}

impl TryFrom<String> for Encoding {
    type Error = AppendError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
