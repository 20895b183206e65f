//! Open, write and close primitives shared by path and handle targets.

use std::io;
use std::path::Path;

use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::trace;

use crate::config::OpenFlag;

pub(crate) async fn open_file(path: &Path, flag: OpenFlag, mode: u32) -> io::Result<File> {
    trace!(path = %path.display(), %flag, mode, "open");
    flag.to_open_options(mode).open(path).await
}

/// Write every byte and wait for the write to reach the OS.
pub(crate) async fn write_bytes(file: &mut File, bytes: &[u8], sync: bool) -> io::Result<()> {
    file.write_all(bytes).await?;
    // tokio completes writes in the background; flush surfaces their result
    file.flush().await?;
    if sync {
        file.sync_data().await?;
    }
    Ok(())
}

/// Release the descriptor, reporting the result of `close(2)` on Unix.
pub(crate) async fn close_file(mut file: File) -> io::Result<()> {
    file.flush().await?;
    let file = file.into_std().await;
    release(file)
}

#[cfg(unix)]
fn release(file: std::fs::File) -> io::Result<()> {
    use std::os::fd::IntoRawFd;

    nix::unistd::close(file.into_raw_fd()).map_err(io::Error::from)
}

#[cfg(not(unix))]
fn release(file: std::fs::File) -> io::Result<()> {
    drop(file);
    Ok(())
}
