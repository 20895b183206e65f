//! Tests for caller-owned file handles and targets.

use std::fs;
use std::path::PathBuf;

use crate::{AppendError, FileHandle, Stage, Target, append_file_async};

#[tokio::test]
async fn open_close_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("handle.txt");

    let handle = FileHandle::open(&path, "a").await.unwrap();
    assert_eq!(handle.path(), path.as_path());
    assert_eq!(handle.flag().as_str(), "a");
    assert!(path.exists());
    assert!(!handle.is_closed().await);

    handle.close().await.unwrap();
    assert!(handle.is_closed().await);
}

#[tokio::test]
async fn closing_twice_is_a_bad_descriptor() {
    let dir = tempfile::tempdir().unwrap();
    let handle = FileHandle::open(dir.path().join("twice.txt"), "a")
        .await
        .unwrap();

    handle.close().await.unwrap();
    let err = handle.close().await.unwrap_err();

    assert_eq!(err.stage(), Some(Stage::Close));
    assert_eq!(err.code(), "EBADF");
}

#[tokio::test]
async fn append_through_closed_handle_fails_at_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("closed.txt");
    let handle = FileHandle::open(&path, "a").await.unwrap();
    handle.close().await.unwrap();

    let err = append_file_async(&handle, "x", ()).await.unwrap_err();

    assert_eq!(err.stage(), Some(Stage::Write));
    assert_eq!(fs::read(&path).unwrap().len(), 0);
}

#[tokio::test]
async fn clones_share_the_same_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.txt");
    let handle = FileHandle::open(&path, "a").await.unwrap();
    let clone = handle.clone();

    append_file_async(&handle, "ab", ()).await.unwrap();
    append_file_async(&clone, "cd", ()).await.unwrap();
    clone.close().await.unwrap();

    assert!(handle.is_closed().await);
    assert_eq!(fs::read_to_string(&path).unwrap(), "abcd");
}

#[tokio::test]
async fn read_only_handle_rejects_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("readonly.txt");
    fs::write(&path, "ABCD").unwrap();

    let handle = FileHandle::open(&path, "r").await.unwrap();
    let err = append_file_async(&handle, "x", ()).await.unwrap_err();
    handle.close().await.unwrap();

    assert_eq!(err.stage(), Some(Stage::Write));
    assert_eq!(fs::read_to_string(&path).unwrap(), "ABCD");
}

#[tokio::test]
async fn open_with_bad_flag_fails_before_io() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad-flag.txt");

    let err = FileHandle::open(&path, "append").await.unwrap_err();

    assert!(matches!(err, AppendError::InvalidFlag(_)));
    assert!(!path.exists());
}

#[cfg(unix)]
#[tokio::test]
async fn open_with_mode_sets_creation_bits() {
    use crate::tests::permission_bits;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mode.txt");

    let handle = FileHandle::open_with_mode(&path, "ax+", 0o600).await.unwrap();
    assert!(handle.raw_fd().await.is_some_and(|fd| fd >= 0));
    handle.close().await.unwrap();
    assert_eq!(handle.raw_fd().await, None);

    assert_eq!(permission_bits(&path), 0o600);
}

#[test]
fn targets_convert_from_paths() {
    let from_str: Target = "a.txt".into();
    let from_buf: Target = PathBuf::from("a.txt").into();

    assert_eq!(from_str.id(), "a.txt");
    assert_eq!(from_buf.id(), "a.txt");
    assert!(!from_str.is_handle());
}
