//! Text report export.
//!
//! The report is the summary followed by the 50 most recent entries, behind
//! a header naming the source log and generation time. It is written to a
//! temporary file in the destination directory and renamed into place, so
//! a failed export never leaves a truncated report at the destination.
//!
//! # Usage
//!
//! ```bash
//! audit-view --export audit-report.txt
//! ```

use crate::audit::loader::LoadedLog;
use crate::commands::entries::{list_entries, render_listing, EntryLimit};
use crate::commands::summary::{render_summary, Summary};
use crate::error::ViewerError;
use crate::utils::format::{format_number, rule};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Number of recent entries included in a report
pub const REPORT_ENTRIES: usize = 50;

pub const REPORT_TITLE: &str = "OpenBao Audit Log Report";

/// Write the complete report to `out`.
pub fn write_report<W: Write>(out: &mut W, log: &LoadedLog, generated_at: &str) -> io::Result<()> {
    writeln!(out, "{}", REPORT_TITLE)?;
    writeln!(out, "{}", rule('=', 60))?;
    writeln!(out, "Generated: {}", generated_at)?;
    writeln!(out, "Log file: {}", log.source.display())?;
    writeln!(out, "Total entries: {}", format_number(log.len()))?;
    writeln!(out)?;

    render_summary(out, &Summary::compute(&log.records))?;

    writeln!(out, "\n\nRECENT ENTRIES:")?;
    let listing = list_entries(&log.records, EntryLimit::Count(REPORT_ENTRIES), None);
    render_listing(out, &listing)
}

/// Export the report to `destination`, replacing any existing file atomically.
pub fn export_report(
    log: &LoadedLog,
    destination: impl AsRef<Path>,
    generated_at: &str,
) -> Result<(), ViewerError> {
    let destination = destination.as_ref();
    let export_error = |source: io::Error| ViewerError::ExportWrite {
        path: destination.to_path_buf(),
        source,
    };

    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp = NamedTempFile::new_in(dir).map_err(export_error)?;
    let mut writer = BufWriter::new(temp);
    write_report(&mut writer, log, generated_at).map_err(export_error)?;
    let temp = writer
        .into_inner()
        .map_err(|e| export_error(e.into_error()))?;
    temp.as_file().sync_all().map_err(export_error)?;
    temp.persist(destination).map_err(|e| export_error(e.error))?;

    tracing::debug!(path = %destination.display(), "report exported");
    Ok(())
}

pub fn run(log: &LoadedLog, destination: &str) -> Result<(), ViewerError> {
    export_report(log, destination, &crate::utils::time::now_display())
}
