//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::{AppendError, ErrorClass};

/// A diagnostic wrapper for append errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct IoDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

impl From<AppendError> for IoDiagnostic {
    fn from(e: AppendError) -> Self {
        let help = match e.class() {
            ErrorClass::Usage => "Check the data, options and callback passed to append",
            ErrorClass::Resource => "Check that the path exists and is a writable file",
            ErrorClass::Io => "The file was opened but could not be written; retry or free space",
        };

        match e {
            AppendError::Io(failure) => IoDiagnostic {
                message: format!("[{}] on '{}' ({})", failure.stage, failure.target, failure.code()),
                source: Some(Box::new(failure.error)),
                help: Some(help.into()),
                severity: Severity::Error,
            },
            other => IoDiagnostic {
                message: format!("{} ({})", other, other.code()),
                source: None,
                help: Some(help.into()),
                severity: Severity::Error,
            },
        }
    }
}

impl From<AppendError> for miette::Report {
    fn from(e: AppendError) -> Self {
        miette::Report::new(IoDiagnostic::from(e))
    }
}
