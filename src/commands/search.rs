//! Full-text search over complete audit records.
//!
//! Each record is serialized back to compact JSON and tested for the term
//! as a contiguous substring, so keys the viewer never interprets (auth
//! metadata, request data, custom headers) are searchable too.
//!
//! # Usage
//!
//! ```bash
//! audit-view --search patient-key
//! audit-view --search "Permission Denied" --case-sensitive
//! ```

use crate::audit::loader::LoadedLog;
use crate::audit::types::AuditRecord;
use crate::commands::render::{render_entry, write_json, EntryView};
use crate::commands::OutputFormat;
use crate::utils::format::{format_number, rule};
use serde::Serialize;
use std::io::{self, Write};

/// Maximum matches rendered in text output
pub const DISPLAY_CAP: usize = 20;

const SEARCH_RULE_WIDTH: usize = 80;

#[derive(Debug)]
pub struct SearchResults<'a> {
    pub term: String,
    pub case_sensitive: bool,
    /// Matching records in file order
    pub matches: Vec<&'a AuditRecord>,
    /// Number of records searched
    pub searched: usize,
}

impl<'a> SearchResults<'a> {
    /// Matches newest first.
    pub fn newest_first(&self) -> impl Iterator<Item = &'a AuditRecord> + '_ {
        self.matches.iter().rev().copied()
    }
}

#[derive(Serialize)]
struct SearchReport<'a> {
    term: &'a str,
    case_sensitive: bool,
    total_matches: usize,
    entries: Vec<EntryView<'a>>,
}

/// Find every record whose JSON serialization contains `term`.
pub fn search<'a>(records: &'a [AuditRecord], term: &str, case_sensitive: bool) -> SearchResults<'a> {
    let needle = if case_sensitive {
        term.to_string()
    } else {
        term.to_lowercase()
    };

    let matches = records
        .iter()
        .filter(|record| {
            let haystack = record.to_json_string();
            if case_sensitive {
                haystack.contains(&needle)
            } else {
                haystack.to_lowercase().contains(&needle)
            }
        })
        .collect();

    SearchResults {
        term: term.to_string(),
        case_sensitive,
        matches,
        searched: records.len(),
    }
}

pub fn render_search<W: Write>(out: &mut W, results: &SearchResults<'_>) -> io::Result<()> {
    if results.searched == 0 {
        return writeln!(out, "No audit log entries to search");
    }

    writeln!(out, "\n{}", rule('=', SEARCH_RULE_WIDTH))?;
    writeln!(out, "SEARCH RESULTS for: '{}'", results.term)?;
    writeln!(out, "{}", rule('=', SEARCH_RULE_WIDTH))?;

    if results.matches.is_empty() {
        return writeln!(out, "No entries found containing '{}'", results.term);
    }

    writeln!(out, "Found {} matching entries", format_number(results.matches.len()))?;

    for (i, record) in results.newest_first().take(DISPLAY_CAP).enumerate() {
        render_entry(out, record, i + 1)?;
    }

    if results.matches.len() > DISPLAY_CAP {
        writeln!(
            out,
            "\n... and {} more matches",
            format_number(results.matches.len() - DISPLAY_CAP)
        )?;
    }

    Ok(())
}

pub fn run<W: Write>(
    out: &mut W,
    log: &LoadedLog,
    term: &str,
    case_sensitive: bool,
    format: OutputFormat,
) -> io::Result<()> {
    let results = search(&log.records, term, case_sensitive);
    match format {
        OutputFormat::Text => render_search(out, &results),
        OutputFormat::Json => {
            let report = SearchReport {
                term: &results.term,
                case_sensitive,
                total_matches: results.matches.len(),
                entries: results
                    .newest_first()
                    .enumerate()
                    .map(|(i, record)| EntryView::new(i + 1, record))
                    .collect(),
            };
            write_json(out, &report)
        }
    }
}
