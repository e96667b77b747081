//! Single-entry rendering shared by the listing and search commands.

use crate::audit::category::OperationCategory;
use crate::audit::types::AuditRecord;
use crate::utils::format::rule;
use crate::utils::time::format_timestamp;
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};

/// Width of the rule under each entry heading
const ENTRY_RULE_WIDTH: usize = 40;

/// Serializable view of one displayed entry, used by `--format json`.
#[derive(Debug, Serialize)]
pub struct EntryView<'a> {
    pub position: usize,
    pub line: usize,
    pub category: OperationCategory,
    pub record: &'a Value,
}

impl<'a> EntryView<'a> {
    pub fn new(position: usize, record: &'a AuditRecord) -> Self {
        Self {
            position,
            line: record.line,
            category: record.category(),
            record: &record.raw,
        }
    }
}

/// SUCCESS for 2xx codes, ERROR otherwise.
pub fn status_label(status_code: i64) -> &'static str {
    if (200..300).contains(&status_code) {
        "SUCCESS"
    } else {
        "ERROR"
    }
}

/// Write one record in human-readable form.
///
/// Optional fields that are absent are left out entirely rather than shown
/// blank. Method and path fall back to `N/A` only when the record has a
/// request block that lacks them.
pub fn render_entry<W: Write>(out: &mut W, record: &AuditRecord, position: usize) -> io::Result<()> {
    writeln!(out, "\n[{}] Entry", position)?;
    writeln!(out, "{}", rule('-', ENTRY_RULE_WIDTH))?;

    if let Some(ts) = record.timestamp() {
        writeln!(out, "Time:      {}", format_timestamp(ts))?;
    }

    if record.request.is_some() {
        writeln!(out, "Method:    {}", record.method().unwrap_or("N/A"))?;
        writeln!(out, "Path:      {}", record.path().unwrap_or("N/A"))?;
        writeln!(out, "Type:      {}", record.category())?;

        if let Some(addr) = record.remote_address() {
            writeln!(out, "Client:    {}", addr)?;
        }
        if let Some(id) = record.request_id() {
            writeln!(out, "Request ID: {}", id)?;
        }
    }

    if let Some(code) = record.status_code() {
        writeln!(out, "Status:    {} ({})", code, status_label(code))?;
    }

    if let Some(error) = record.error() {
        writeln!(out, "Error:     {}", error)?;
    }

    Ok(())
}

/// Write any serializable value as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}
