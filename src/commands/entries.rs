//! Listing of the most recent audit entries.
//!
//! "Most recent" means last in the file: entries are shown in reverse file
//! order. Timestamps are not used for ordering, so a log whose lines were
//! written out of time order is listed as written.
//!
//! # Usage
//!
//! ```bash
//! audit-view --entries 25
//! audit-view --all --filter "Key Management"
//! ```

use crate::audit::category::OperationCategory;
use crate::audit::loader::LoadedLog;
use crate::audit::types::AuditRecord;
use crate::commands::render::{render_entry, write_json, EntryView};
use crate::commands::OutputFormat;
use crate::utils::format::{format_number, rule};
use std::io::{self, Write};

const LISTING_RULE_WIDTH: usize = 80;

/// How many entries a listing may show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryLimit {
    /// The default page of [`EntryLimit::DEFAULT_COUNT`] entries
    #[default]
    Default,
    Count(usize),
    /// No limit
    All,
}

impl EntryLimit {
    pub const DEFAULT_COUNT: usize = 10;

    /// Interpret a user-supplied count; zero means the default page.
    pub fn from_count(count: usize) -> Self {
        if count == 0 {
            Self::Default
        } else {
            Self::Count(count)
        }
    }

    /// Maximum number of entries, or `None` for no limit.
    pub fn max(self) -> Option<usize> {
        match self {
            Self::Default => Some(Self::DEFAULT_COUNT),
            Self::Count(n) => Some(n),
            Self::All => None,
        }
    }
}

/// An entry selected for display.
#[derive(Debug, Clone, Copy)]
pub struct ListedEntry<'a> {
    /// 1-based position counting back from the end of the file
    pub position: usize,
    pub record: &'a AuditRecord,
}

#[derive(Debug)]
pub struct Listing<'a> {
    pub filter: Option<OperationCategory>,
    pub entries: Vec<ListedEntry<'a>>,
    /// Number of records in the log, before filtering
    pub total: usize,
}

/// Select up to `limit` entries, newest first, optionally restricted to one category.
///
/// Only entries that pass the filter count against the limit.
pub fn list_entries(
    records: &[AuditRecord],
    limit: EntryLimit,
    filter: Option<OperationCategory>,
) -> Listing<'_> {
    let max = limit.max().unwrap_or(usize::MAX);

    let entries = records
        .iter()
        .rev()
        .enumerate()
        .filter(|(_, record)| filter.map_or(true, |wanted| record.category() == wanted))
        .take(max)
        .map(|(i, record)| ListedEntry {
            position: i + 1,
            record,
        })
        .collect();

    Listing {
        filter,
        entries,
        total: records.len(),
    }
}

pub fn render_listing<W: Write>(out: &mut W, listing: &Listing<'_>) -> io::Result<()> {
    if listing.total == 0 {
        return writeln!(out, "No audit log entries to display");
    }

    writeln!(out, "\n{}", rule('=', LISTING_RULE_WIDTH))?;
    match listing.filter {
        Some(filter) => writeln!(out, "AUDIT LOG ENTRIES - {}", filter)?,
        None => writeln!(out, "AUDIT LOG ENTRIES")?,
    }
    writeln!(out, "{}", rule('=', LISTING_RULE_WIDTH))?;

    for entry in &listing.entries {
        render_entry(out, entry.record, entry.position)?;
    }

    if listing.entries.is_empty() {
        match listing.filter {
            Some(filter) => writeln!(out, "No entries found matching filter: {}", filter)?,
            None => writeln!(out, "No entries found")?,
        }
    } else {
        writeln!(
            out,
            "\nDisplayed {} of {} total entries",
            format_number(listing.entries.len()),
            format_number(listing.total)
        )?;
    }

    Ok(())
}

pub fn run<W: Write>(
    out: &mut W,
    log: &LoadedLog,
    limit: EntryLimit,
    filter: Option<OperationCategory>,
    format: OutputFormat,
) -> io::Result<()> {
    let listing = list_entries(&log.records, limit, filter);
    match format {
        OutputFormat::Text => render_listing(out, &listing),
        OutputFormat::Json => {
            let views: Vec<EntryView<'_>> = listing
                .entries
                .iter()
                .map(|e| EntryView::new(e.position, e.record))
                .collect();
            write_json(out, &views)
        }
    }
}
