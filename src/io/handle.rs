//! Caller-owned open files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs::File;
use tokio::sync::Mutex;
use tracing::debug;

use super::file::{close_file, open_file, write_bytes};
use crate::config::{DEFAULT_MODE, OpenFlag};
use crate::error::{AppendError, Stage, bad_descriptor};

/// An open file that can be used as an append target.
///
/// Appends through a handle never close it; the owner calls
/// [`FileHandle::close`] when done. Clones share the same file, and writes
/// through clones are serialized.
#[derive(Debug, Clone)]
pub struct FileHandle {
    id: String,
    path: PathBuf,
    flag: OpenFlag,
    file: Arc<Mutex<Option<File>>>,
}

impl FileHandle {
    /// Open `path` with a flag string such as `"a+"`, creating it with
    /// mode `0o666` if the flag allows creation.
    pub async fn open(path: impl AsRef<Path>, flag: &str) -> Result<Self, AppendError> {
        Self::open_with_mode(path, flag, DEFAULT_MODE).await
    }

    /// Open `path` with a flag string and an explicit creation mode.
    pub async fn open_with_mode(
        path: impl AsRef<Path>,
        flag: &str,
        mode: u32,
    ) -> Result<Self, AppendError> {
        let flag: OpenFlag = flag.parse()?;
        let path = path.as_ref().to_path_buf();
        let id = path.to_string_lossy().into_owned();

        let file = open_file(&path, flag, mode)
            .await
            .map_err(|e| AppendError::io(Stage::Open, id.clone(), e))?;
        debug!(target_id = %id, %flag, "opened file handle");

        Ok(Self {
            id,
            path,
            flag,
            file: Arc::new(Mutex::new(Some(file))),
        })
    }

    /// Identifier used in error messages (the opened path).
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flag the handle was opened with.
    pub fn flag(&self) -> OpenFlag {
        self.flag
    }

    /// The raw descriptor number, or `None` once the handle is closed.
    #[cfg(unix)]
    pub async fn raw_fd(&self) -> Option<std::os::fd::RawFd> {
        use std::os::fd::AsRawFd;

        self.file.lock().await.as_ref().map(|file| file.as_raw_fd())
    }

    pub async fn is_closed(&self) -> bool {
        self.file.lock().await.is_none()
    }

    /// Write all bytes at the handle's current position.
    pub(crate) async fn write(&self, bytes: &[u8], sync: bool) -> Result<(), AppendError> {
        let mut guard = self.file.lock().await;
        let file = guard
            .as_mut()
            .ok_or_else(|| AppendError::io(Stage::Write, self.id.clone(), bad_descriptor()))?;
        write_bytes(file, bytes, sync)
            .await
            .map_err(|e| AppendError::io(Stage::Write, self.id.clone(), e))
    }

    /// Close the handle. Closing an already closed handle fails with `EBADF`.
    pub async fn close(&self) -> Result<(), AppendError> {
        let file = self
            .file
            .lock()
            .await
            .take()
            .ok_or_else(|| AppendError::io(Stage::Close, self.id.clone(), bad_descriptor()))?;
        debug!(target_id = %self.id, "closing file handle");
        close_file(file)
            .await
            .map_err(|e| AppendError::io(Stage::Close, self.id.clone(), e))
    }
}
