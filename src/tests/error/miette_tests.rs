//! Tests for miette diagnostics.

use std::io;

use miette::Severity;

use crate::error::{AppendError, IoDiagnostic, Stage};

#[test]
fn io_failure_becomes_diagnostic_with_code() {
    let err = AppendError::io(Stage::Open, "missing.txt", io::ErrorKind::NotFound.into());

    let diag = IoDiagnostic::from(err);
    assert!(diag.message.contains("[Open]"));
    assert!(diag.message.contains("missing.txt"));
    assert!(diag.message.contains("ENOENT"));
    assert!(diag.source.is_some());
    assert_eq!(diag.severity, Severity::Error);
}

#[test]
fn usage_error_becomes_report() {
    let err = AppendError::InvalidCallback {
        received: "null".into(),
    };

    let report = miette::Report::from(err);
    assert!(report.to_string().contains("ERR_INVALID_CALLBACK"));
}
