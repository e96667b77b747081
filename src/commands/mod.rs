//! Query commands over a loaded audit log.
//!
//! Each command takes the immutable [`LoadedLog`](crate::audit::loader::LoadedLog)
//! by reference and writes to the sink it is given, so standard output and
//! the report exporter share the same rendering code.
//!
//! - [`summary`] - totals, time range and count breakdowns
//! - [`entries`] - most recent entries, optionally filtered by operation type
//! - [`search`] - case-(in)sensitive full-text search over complete records
//! - [`export`] - summary plus recent entries written to a report file
//! - [`render`] - single-entry rendering shared by listing and search

pub mod entries;
pub mod export;
pub mod render;
pub mod search;
pub mod summary;

/// Output format for the query commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Formatted plain text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}
