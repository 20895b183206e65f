//! Append targets.

use std::path::{Path, PathBuf};

use super::FileHandle;

/// Where an append writes: a path opened per call, or a handle owned by
/// the caller.
#[derive(Debug, Clone)]
pub enum Target {
    Path(PathBuf),
    Handle(FileHandle),
}

impl Target {
    /// Identifier used in error messages and logs.
    pub fn id(&self) -> String {
        match self {
            Target::Path(path) => path.to_string_lossy().into_owned(),
            Target::Handle(handle) => handle.id().to_string(),
        }
    }

    pub fn is_handle(&self) -> bool {
        matches!(self, Target::Handle(_))
    }
}

impl From<PathBuf> for Target {
    fn from(path: PathBuf) -> Self {
        Target::Path(path)
    }
}

impl From<&PathBuf> for Target {
    fn from(path: &PathBuf) -> Self {
        Target::Path(path.clone())
    }
}

impl From<&Path> for Target {
    fn from(path: &Path) -> Self {
        Target::Path(path.to_path_buf())
    }
}

impl From<&str> for Target {
    fn from(path: &str) -> Self {
        Target::Path(PathBuf::from(path))
    }
}

impl From<String> for Target {
    fn from(path: String) -> Self {
        Target::Path(PathBuf::from(path))
    }
}

impl From<FileHandle> for Target {
    fn from(handle: FileHandle) -> Self {
        Target::Handle(handle)
    }
}

impl From<&FileHandle> for Target {
    fn from(handle: &FileHandle) -> Self {
        Target::Handle(handle.clone())
    }
}
