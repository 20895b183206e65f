//! # appendio
//!
//! Append data to files from async Rust, with callback and awaitable
//! entry points over one implementation.
//!
//! ## Overview
//!
//! appendio provides:
//! - **Two calling conventions**: [`append_file`] reports to a callback,
//!   [`append_file_async`] returns a future; both run the same sequence
//! - **Flexible payloads**: text, raw bytes and numbers (written as their
//!   decimal string)
//! - **Paths or handles**: a path is opened in append-create mode and closed
//!   per call; a [`FileHandle`] is written through and left open
//! - **Creation mode**: `mode` bits apply when the append creates the file
//! - **Encodings**: utf8, utf16le, latin1, ascii, base64, base64url, hex
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use appendio::{WriteOptions, append_file_async};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), appendio::AppendError> {
//!     append_file_async("app.log", "started\n", ()).await?;
//!     append_file_async("counter.txt", 220, WriteOptions::new().with_mode(0o600)).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Callbacks
//!
//! ```rust,ignore
//! use appendio::{AppendError, append_file};
//!
//! append_file("app.log", b"bytes", (), |result: Result<(), AppendError>| {
//!     if let Err(e) = result {
//!         eprintln!("append failed: {e}");
//!     }
//! })?;
//! ```
//!
//! The callback form needs a running tokio runtime. Passing a non-callable
//! value in the callback position fails synchronously with
//! `ERR_INVALID_CALLBACK` before any file is touched.
//!
//! ## Concurrency
//!
//! Appends to different targets are independent. Concurrent appends to the
//! same path are not serialized here; whether each write lands atomically
//! at end-of-file is up to the platform's `O_APPEND` semantics.
//!
//! ## Features
//!
//! - `yaml` - Load [`WriteOptions`] from YAML
//! - `miette` - Pretty error reporting with miette
//! - `cli` - Builds the `append_file` binary and its log subscriber

// Core modules
pub mod append;
pub mod config;
pub mod error;
pub mod io;
pub mod payload;

// Re-exports for convenience
pub use append::{
    Callback, Completion, IntoCompletion, append_file, append_file_async, append_file_blocking,
};
pub use config::{Encoding, IntoOptions, OpenFlag, WriteOptions};
pub use error::{AppendError, ErrorClass, IoFailure, Stage};
pub use io::{FileHandle, Target};
pub use payload::{IntoPayload, Payload};

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::IoDiagnostic;
