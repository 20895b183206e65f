//! Write options and their conversions.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::{Encoding, OpenFlag};
use crate::error::AppendError;

/// Default permission bits for files created by an append.
pub const DEFAULT_MODE: u32 = 0o666;

/// Options recognized by the append entry points.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Permission bits applied when the file is created
    #[serde(deserialize_with = "deserialize_mode")]
    pub mode: u32,
    /// Encoding used for text and numeric payloads
    #[serde(deserialize_with = "deserialize_encoding")]
    pub encoding: Encoding,
    /// Open flag used for path targets
    pub flag: OpenFlag,
    /// Sync file data to disk before completing
    pub flush: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            mode: DEFAULT_MODE,
            encoding: Encoding::default(),
            flag: OpenFlag::default(),
            flush: false,
        }
    }
}

impl WriteOptions {
    /// Create options with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the creation mode.
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    /// Set the text encoding.
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the open flag.
    pub fn with_flag(mut self, flag: OpenFlag) -> Self {
        self.flag = flag;
        self
    }

    /// Request a data sync before the append completes.
    pub fn with_flush(mut self, flush: bool) -> Self {
        self.flush = flush;
        self
    }

    /// Build options from a dynamic value.
    ///
    /// `null` yields the defaults, a string is an encoding name and an
    /// object is deserialized field by field.
    pub fn from_value(value: &Value) -> Result<Self, AppendError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::String(name) => Ok(Self::default().with_encoding(name.parse()?)),
            Value::Object(_) => Self::deserialize(value).map_err(options_error),
            other => Err(AppendError::InvalidOptions(format!(
                "expected an object or an encoding name, received {}",
                value_kind(other)
            ))),
        }
    }

    /// Parse options from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, AppendError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| AppendError::InvalidOptions(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Parse options from YAML text.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(text: &str) -> Result<Self, AppendError> {
        let value: Value = serde_yaml::from_str(text)
            .map_err(|e| AppendError::InvalidOptions(e.to_string()))?;
        Self::from_value(&value)
    }
}

/// Conversion into [`WriteOptions`], performed when the append runs.
pub trait IntoOptions {
    fn into_options(self) -> Result<WriteOptions, AppendError>;
}

impl IntoOptions for WriteOptions {
    fn into_options(self) -> Result<WriteOptions, AppendError> {
        Ok(self)
    }
}

impl IntoOptions for &WriteOptions {
    fn into_options(self) -> Result<WriteOptions, AppendError> {
        Ok(self.clone())
    }
}

/// Omitted options.
impl IntoOptions for () {
    fn into_options(self) -> Result<WriteOptions, AppendError> {
        Ok(WriteOptions::default())
    }
}

impl IntoOptions for Option<WriteOptions> {
    fn into_options(self) -> Result<WriteOptions, AppendError> {
        Ok(self.unwrap_or_default())
    }
}

impl IntoOptions for Encoding {
    fn into_options(self) -> Result<WriteOptions, AppendError> {
        Ok(WriteOptions::default().with_encoding(self))
    }
}

/// An encoding name.
impl IntoOptions for &str {
    fn into_options(self) -> Result<WriteOptions, AppendError> {
        Ok(WriteOptions::default().with_encoding(self.parse()?))
    }
}

impl IntoOptions for Value {
    fn into_options(self) -> Result<WriteOptions, AppendError> {
        WriteOptions::from_value(&self)
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn options_error(e: serde_json::Error) -> AppendError {
    AppendError::InvalidOptions(e.to_string())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMode {
    Bits(u32),
    Octal(String),
}

fn deserialize_mode<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match RawMode::deserialize(deserializer)? {
        RawMode::Bits(bits) => Ok(bits),
        RawMode::Octal(text) => parse_octal_mode(&text).map_err(serde::de::Error::custom),
    }
}

/// Parse a mode written as an octal string: `"600"`, `"0600"` or `"0o600"`.
pub fn parse_octal_mode(text: &str) -> Result<u32, AppendError> {
    let digits = text
        .strip_prefix("0o")
        .or_else(|| text.strip_prefix("0O"))
        .unwrap_or(text);
    u32::from_str_radix(digits, 8)
        .map_err(|_| AppendError::InvalidOptions(format!("mode must be octal, received {text:?}")))
}

fn deserialize_encoding<'de, D>(deserializer: D) -> Result<Encoding, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(Encoding::default()),
        Some(name) => name.parse().map_err(serde::de::Error::custom),
    }
}
