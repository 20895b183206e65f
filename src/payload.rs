//! Payloads accepted by append and their normalization into bytes.

use serde_json::{Number, Value};

use crate::config::{Encoding, value_kind};
use crate::error::AppendError;

/// Data to append.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Text, encoded with the configured encoding
    Text(String),
    /// Raw bytes, written as-is
    Bytes(Vec<u8>),
    /// A number, written as its decimal string
    Numeric(Number),
}

impl Payload {
    /// Build a numeric payload from a float. NaN and infinities have no
    /// decimal form and are rejected.
    pub fn numeric(value: f64) -> Result<Self, AppendError> {
        Number::from_f64(value)
            .map(Payload::Numeric)
            .ok_or_else(|| AppendError::InvalidPayload {
                received: format!("non-finite number {value}"),
            })
    }

    /// Build a payload from a dynamic value.
    ///
    /// Strings become text, numbers stay numeric and arrays of integers in
    /// `0..=255` become bytes. Everything else is an invalid payload.
    pub fn from_value(value: Value) -> Result<Self, AppendError> {
        match value {
            Value::String(text) => Ok(Payload::Text(text)),
            Value::Number(number) => Ok(Payload::Numeric(number)),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_u64().and_then(|b| u8::try_from(b).ok()))
                .collect::<Option<Vec<u8>>>()
                .map(Payload::Bytes)
                .ok_or_else(|| AppendError::InvalidPayload {
                    received: "array with non-byte elements".into(),
                }),
            other => Err(AppendError::InvalidPayload {
                received: value_kind(&other).into(),
            }),
        }
    }

    /// Normalize the payload into the exact bytes that will be appended.
    pub fn encode(&self, encoding: Encoding) -> Result<Vec<u8>, AppendError> {
        match self {
            Payload::Text(text) => encoding.encode(text),
            Payload::Bytes(bytes) => Ok(bytes.clone()),
            Payload::Numeric(number) => encoding.encode(&decimal_string(number)),
        }
    }

    /// Consume the payload, avoiding a copy for raw bytes.
    pub(crate) fn into_bytes(self, encoding: Encoding) -> Result<Vec<u8>, AppendError> {
        match self {
            Payload::Bytes(bytes) => Ok(bytes),
            other => other.encode(encoding),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Text(_) => "text",
            Payload::Bytes(_) => "bytes",
            Payload::Numeric(_) => "numeric",
        }
    }
}

/// Decimal rendering of a number: whole floats lose their fraction, `-0`
/// becomes `0` and no exponent notation is used.
pub(crate) fn decimal_string(number: &Number) -> String {
    if number.is_f64() {
        match number.as_f64() {
            Some(value) if value == 0.0 => "0".to_string(),
            Some(value) => value.to_string(),
            None => number.to_string(),
        }
    } else {
        number.to_string()
    }
}

/// Conversion into a [`Payload`].
///
/// Conversions that can fail (non-finite floats, dynamic values) report
/// their error through the append's completion rather than up front.
pub trait IntoPayload {
    fn into_payload(self) -> Result<Payload, AppendError>;
}

impl IntoPayload for Payload {
    fn into_payload(self) -> Result<Payload, AppendError> {
        Ok(self)
    }
}

impl IntoPayload for &str {
    fn into_payload(self) -> Result<Payload, AppendError> {
        Ok(Payload::Text(self.to_string()))
    }
}

impl IntoPayload for String {
    fn into_payload(self) -> Result<Payload, AppendError> {
        Ok(Payload::Text(self))
    }
}

impl IntoPayload for &String {
    fn into_payload(self) -> Result<Payload, AppendError> {
        Ok(Payload::Text(self.clone()))
    }
}

impl IntoPayload for Vec<u8> {
    fn into_payload(self) -> Result<Payload, AppendError> {
        Ok(Payload::Bytes(self))
    }
}

impl IntoPayload for &[u8] {
    fn into_payload(self) -> Result<Payload, AppendError> {
        Ok(Payload::Bytes(self.to_vec()))
    }
}

impl<const N: usize> IntoPayload for &[u8; N] {
    fn into_payload(self) -> Result<Payload, AppendError> {
        Ok(Payload::Bytes(self.to_vec()))
    }
}

impl IntoPayload for f64 {
    fn into_payload(self) -> Result<Payload, AppendError> {
        Payload::numeric(self)
    }
}

impl IntoPayload for f32 {
    fn into_payload(self) -> Result<Payload, AppendError> {
        Payload::numeric(f64::from(self))
    }
}

impl IntoPayload for Value {
    fn into_payload(self) -> Result<Payload, AppendError> {
        Payload::from_value(self)
    }
}

macro_rules! integer_payload {
    ($($ty:ty),*) => {
        $(
            impl IntoPayload for $ty {
                fn into_payload(self) -> Result<Payload, AppendError> {
                    Ok(Payload::Numeric(Number::from(self)))
                }
            }
        )*
    };
}

integer_payload!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
