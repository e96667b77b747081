//! Best-effort loader for line-delimited JSON audit logs.
//!
//! Every non-blank line is expected to hold one JSON object. Lines that fail
//! to parse are reported as [`LineDiagnostic`]s and skipped; loading always
//! continues with the next line. Only failing to open or read the file at all
//! is an error.
//!
//! # Examples
//!
//! ```no_run
//! use audit_log_viewer::audit::loader::load_log;
//!
//! let log = load_log("./openbao/logs/audit.log").unwrap();
//! println!("Loaded {} audit log entries", log.len());
//! for diag in &log.diagnostics {
//!     eprintln!("line {}: {}", diag.line, diag.message);
//! }
//! ```

use crate::audit::types::AuditRecord;
use crate::error::ViewerError;
use crate::utils::progress::ProgressBar;
use crate::utils::reader::{is_compressed, open_file};
use serde_json::Value;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Files smaller than this load without a progress bar.
const PROGRESS_MIN_BYTES: u64 = 8 * 1024 * 1024;
const PROGRESS_EVERY_LINES: usize = 10_000;

/// A line that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiagnostic {
    /// 1-based line number
    pub line: usize,
    pub message: String,
}

/// Records and diagnostics parsed from a stream of lines.
#[derive(Debug, Default)]
pub struct ParsedLines {
    pub records: Vec<AuditRecord>,
    pub diagnostics: Vec<LineDiagnostic>,
    /// Total physical lines read, blank ones included
    pub lines_read: usize,
}

/// An audit log loaded into memory. Immutable once built.
#[derive(Debug)]
pub struct LoadedLog {
    pub source: PathBuf,
    /// Records in file order
    pub records: Vec<AuditRecord>,
    pub diagnostics: Vec<LineDiagnostic>,
    pub lines_read: usize,
}

impl LoadedLog {
    /// Build a log from already-parsed lines.
    pub fn from_parsed(source: impl Into<PathBuf>, parsed: ParsedLines) -> Self {
        Self {
            source: source.into(),
            records: parsed.records,
            diagnostics: parsed.diagnostics,
            lines_read: parsed.lines_read,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load an audit log file into memory.
///
/// Returns [`ViewerError::LogFileNotFound`] if the file cannot be opened and
/// [`ViewerError::Read`] if reading fails part way through. Unparsable lines
/// never produce an error.
pub fn load_log(path: impl AsRef<Path>) -> Result<LoadedLog, ViewerError> {
    let path = path.as_ref();
    let reader = BufReader::new(open_file(path)?);

    let file_size = std::fs::metadata(path).ok().map(|m| m.len());
    let progress = match file_size {
        Some(size) if size >= PROGRESS_MIN_BYTES && !is_compressed(path) => {
            Some((ProgressBar::new(size as usize, "Loading"), Some(size as usize)))
        }
        Some(size) if size >= PROGRESS_MIN_BYTES => Some((ProgressBar::new_spinner("Loading"), None)),
        _ => None,
    };

    let result = parse_lines_with_progress(reader, |bytes, lines| {
        if let Some((bar, total)) = &progress {
            match total {
                Some(total) => bar.update(bytes.min(*total)),
                None => bar.update(lines),
            }
        }
    });

    // Clear the bar before any error reaches stderr
    if let Some((bar, _)) = progress {
        bar.finish();
    }

    let parsed = result.map_err(|source| ViewerError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        path = %path.display(),
        records = parsed.records.len(),
        skipped = parsed.diagnostics.len(),
        lines = parsed.lines_read,
        "audit log loaded"
    );

    Ok(LoadedLog::from_parsed(path, parsed))
}

/// Parse line-delimited JSON records from any buffered reader.
pub fn parse_lines<R: BufRead>(reader: R) -> io::Result<ParsedLines> {
    parse_lines_with_progress(reader, |_, _| {})
}

fn parse_lines_with_progress<R, F>(reader: R, mut on_progress: F) -> io::Result<ParsedLines>
where
    R: BufRead,
    F: FnMut(usize, usize),
{
    let mut parsed = ParsedLines::default();
    let mut bytes_read = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = idx + 1;
        parsed.lines_read = line_number;
        bytes_read += line.len() + 1;

        if line_number % PROGRESS_EVERY_LINES == 0 {
            on_progress(bytes_read, line_number);
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match parse_record(line_number, trimmed) {
            Ok(record) => parsed.records.push(record),
            Err(message) => {
                tracing::warn!("Could not parse line {}: {}", line_number, message);
                parsed.diagnostics.push(LineDiagnostic {
                    line: line_number,
                    message,
                });
            }
        }
    }

    on_progress(bytes_read, parsed.lines_read);
    Ok(parsed)
}

fn parse_record(line_number: usize, text: &str) -> Result<AuditRecord, String> {
    let value: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
    let kind = json_kind(&value);
    AuditRecord::from_value(line_number, value)
        .ok_or_else(|| format!("expected a JSON object, found {}", kind))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
