//! The append operation and its calling conventions.
//!
//! Every entry point funnels into one internal sequence:
//! resolve options, encode the payload, open (path targets only), write,
//! close what was opened. The entry points only differ in how the result
//! is delivered:
//!
//! - [`append_file`] spawns the sequence on the ambient tokio runtime and
//!   hands the result to a callback.
//! - [`append_file_async`] returns a future resolving to the result.
//! - [`append_file_blocking`] drives the sequence on a private runtime.
//!
//! Once started, an append runs to completion even if the caller stops
//! waiting for it.

use std::future::Future;
use std::path::Path;

use serde_json::Value;
use tokio::runtime::Handle;
use tracing::{debug, instrument};

use crate::config::{IntoOptions, WriteOptions, value_kind};
use crate::error::{AppendError, IoFailure, Stage};
use crate::io::{Target, close_file, open_file, write_bytes};
use crate::payload::{IntoPayload, Payload};

/// Completion callback of [`append_file`]. Called exactly once.
pub type Callback = Box<dyn FnOnce(Result<(), AppendError>) + Send + 'static>;

/// The value passed in the callback position of [`append_file`].
pub enum Completion {
    Callback(Callback),
    /// Something that cannot be invoked; carries a description of it.
    NotCallable(String),
}

impl std::fmt::Debug for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Completion::Callback(_) => f.write_str("Completion::Callback(..)"),
            Completion::NotCallable(received) => {
                f.debug_tuple("Completion::NotCallable").field(received).finish()
            }
        }
    }
}

/// Conversion into a [`Completion`].
///
/// Implemented for closures taking the append result, and for dynamic
/// values, which are never callable.
pub trait IntoCompletion {
    fn into_completion(self) -> Completion;
}

impl<F> IntoCompletion for F
where
    F: FnOnce(Result<(), AppendError>) + Send + 'static,
{
    fn into_completion(self) -> Completion {
        Completion::Callback(Box::new(self))
    }
}

impl IntoCompletion for Completion {
    fn into_completion(self) -> Completion {
        self
    }
}

impl IntoCompletion for Value {
    fn into_completion(self) -> Completion {
        Completion::NotCallable(value_kind(&self).to_string())
    }
}

/// Append `payload` to `target`, reporting the outcome to `callback`.
///
/// Returns an error immediately, before touching the filesystem, when
/// `callback` is not callable or no tokio runtime is running. Every other
/// failure, including invalid payloads and options, goes to the callback.
pub fn append_file<T, P, O, C>(
    target: T,
    payload: P,
    options: O,
    callback: C,
) -> Result<(), AppendError>
where
    T: Into<Target>,
    P: IntoPayload,
    O: IntoOptions,
    C: IntoCompletion,
{
    let callback = match callback.into_completion() {
        Completion::Callback(callback) => callback,
        Completion::NotCallable(received) => {
            return Err(AppendError::InvalidCallback { received });
        }
    };
    let runtime = Handle::try_current().map_err(|_| AppendError::NoRuntime)?;

    let op = run_append(target.into(), payload.into_payload(), options.into_options());
    runtime.spawn(async move {
        callback(op.await);
    });
    Ok(())
}

/// Append `payload` to `target` and wait for the outcome.
pub async fn append_file_async<T, P, O>(target: T, payload: P, options: O) -> Result<(), AppendError>
where
    T: Into<Target>,
    P: IntoPayload,
    O: IntoOptions,
{
    let op = run_append(target.into(), payload.into_payload(), options.into_options());
    run_detached(op).await
}

/// Append `payload` to `target` from synchronous code.
///
/// Uses a private current-thread runtime, so it must not be called from
/// within a tokio runtime.
pub fn append_file_blocking<T, P, O>(target: T, payload: P, options: O) -> Result<(), AppendError>
where
    T: Into<Target>,
    P: IntoPayload,
    O: IntoOptions,
{
    if Handle::try_current().is_ok() {
        return Err(AppendError::BlockingInRuntime);
    }
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|_| AppendError::NoRuntime)?;

    runtime.block_on(run_append(
        target.into(),
        payload.into_payload(),
        options.into_options(),
    ))
}

/// Run `op` as its own task when a runtime is available so dropping the
/// caller's future does not abort an append halfway.
async fn run_detached<F>(op: F) -> Result<(), AppendError>
where
    F: Future<Output = Result<(), AppendError>> + Send + 'static,
{
    let Ok(runtime) = Handle::try_current() else {
        return op.await;
    };
    match runtime.spawn(op).await {
        Ok(result) => result,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(_) => Err(AppendError::NoRuntime),
    }
}

#[instrument(level = "debug", skip_all, fields(target_id = %target.id()))]
async fn run_append(
    target: Target,
    payload: Result<Payload, AppendError>,
    options: Result<WriteOptions, AppendError>,
) -> Result<(), AppendError> {
    let options = options?;
    let bytes = payload?.into_bytes(options.encoding)?;

    match target {
        Target::Handle(handle) => {
            handle.write(&bytes, options.flush).await?;
            debug!(len = bytes.len(), "appended through handle");
            Ok(())
        }
        Target::Path(path) => append_to_path(&path, &bytes, &options).await,
    }
}

async fn append_to_path(
    path: &Path,
    bytes: &[u8],
    options: &WriteOptions,
) -> Result<(), AppendError> {
    let id = path.to_string_lossy().into_owned();

    let mut file = open_file(path, options.flag, options.mode)
        .await
        .map_err(|e| AppendError::io(Stage::Open, id.clone(), e))?;

    let written = write_bytes(&mut file, bytes, options.flush).await;
    let closed = close_file(file).await;

    match (written, closed) {
        (Ok(()), Ok(())) => {
            debug!(len = bytes.len(), "appended to path");
            Ok(())
        }
        (Err(write_err), Ok(())) => Err(AppendError::io(Stage::Write, id, write_err)),
        (Err(write_err), Err(close_err)) => Err(IoFailure::new(Stage::Write, id, write_err)
            .with_close_error(close_err)
            .into()),
        (Ok(()), Err(close_err)) => Err(AppendError::io(Stage::Close, id, close_err)),
    }
}
