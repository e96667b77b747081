//! Error types surfaced by the loader and the report exporter.
//!
//! Per-line parse failures are not errors: they are collected as
//! [`LineDiagnostic`](crate::audit::loader::LineDiagnostic) values on the
//! loaded log and never abort a run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    /// The source log does not exist or could not be opened.
    #[error("Audit log file not found at {}", path.display())]
    LogFileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source log was opened but reading it failed part way through.
    #[error("Failed to read audit log {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The export destination could not be created or written.
    #[error("Error exporting report to {}: {source}", path.display())]
    ExportWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
