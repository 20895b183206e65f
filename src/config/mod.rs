//! Configuration types for append operations.
//!
//! This module provides:
//! - `WriteOptions`: Mode, encoding, open flag and flush settings
//! - `Encoding`: Text encodings for string payloads
//! - `OpenFlag`: POSIX-style open flag strings
//! - `IntoOptions`: Conversions accepted wherever options are expected

mod encoding;
mod flag;
mod options;

pub use encoding::Encoding;
pub use flag::OpenFlag;
pub(crate) use options::value_kind;
pub use options::{DEFAULT_MODE, IntoOptions, WriteOptions, parse_octal_mode};
