//! I/O abstractions for append targets.
//!
//! This module provides:
//! - `Target`: A path or an already open handle
//! - `FileHandle`: A caller-owned open file
//! - The open/write/close primitives every append goes through

mod file;
mod handle;
mod target;

pub(crate) use file::{close_file, open_file, write_bytes};
pub use handle::FileHandle;
pub use target::Target;
