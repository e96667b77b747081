//! Aggregate summary of a loaded audit log.
//!
//! # Usage
//!
//! ```bash
//! audit-view --summary
//! audit-view --file /var/log/openbao/audit.log.gz --summary --format json
//! ```
//!
//! # Output
//!
//! - Total entries
//! - Time range covered (raw timestamp min/max, with the elapsed span)
//! - Operation type breakdown
//! - HTTP method breakdown
//! - Top 10 client addresses
//!
//! Every percentage is relative to the total number of records, including
//! in the client breakdown where many records carry no address.

use crate::audit::loader::LoadedLog;
use crate::audit::types::AuditRecord;
use crate::commands::render::write_json;
use crate::commands::OutputFormat;
use crate::utils::format::{format_number, percentage, rule};
use crate::utils::time::{duration_human, format_timestamp, parse_timestamp};
use serde::Serialize;
use std::collections::HashMap;
use std::io::{self, Write};

/// Number of client addresses listed
pub const TOP_CLIENTS: usize = 10;

const SUMMARY_RULE_WIDTH: usize = 60;
const SECTION_RULE_WIDTH: usize = 40;

/// One row of a breakdown table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub label: String,
    pub count: usize,
    /// Share of the grand total, rounded to one decimal place
    pub percentage: f64,
}

/// Count table ordered by descending count, ties in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Breakdown {
    pub rows: Vec<BreakdownRow>,
}

impl Breakdown {
    /// Tally `keys` against `total`.
    pub fn tally<I, K>(keys: I, total: usize) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut counts: Vec<(String, usize)> = Vec::new();

        for key in keys {
            let key = key.into();
            match index.get(&key) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(key.clone(), counts.len());
                    counts.push((key, 1));
                }
            }
        }

        // Stable sort keeps first-seen order among equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let rows = counts
            .into_iter()
            .map(|(label, count)| BreakdownRow {
                percentage: (percentage(count, total) * 10.0).round() / 10.0,
                label,
                count,
            })
            .collect();

        Self { rows }
    }

    /// Keep only the first `n` rows.
    #[must_use]
    pub fn top(mut self, n: usize) -> Self {
        self.rows.truncate(n);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&BreakdownRow> {
        self.rows.iter().find(|r| r.label == label)
    }
}

/// Earliest and latest raw timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSpan {
    pub first: String,
    pub last: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub time_span: Option<TimeSpan>,
    pub categories: Breakdown,
    pub methods: Breakdown,
    pub clients: Breakdown,
}

impl Summary {
    pub fn compute(records: &[AuditRecord]) -> Self {
        let total = records.len();

        // ISO-8601 strings of one format order lexicographically
        let timestamps = || records.iter().filter_map(AuditRecord::timestamp);
        let time_span = timestamps().min().zip(timestamps().max()).map(|(first, last)| TimeSpan {
            first: first.to_string(),
            last: last.to_string(),
        });

        let categories = Breakdown::tally(records.iter().map(|r| r.category().label()), total);
        let methods = Breakdown::tally(
            records.iter().map(|r| r.method().unwrap_or("UNKNOWN")),
            total,
        );
        let clients = Breakdown::tally(records.iter().filter_map(AuditRecord::remote_address), total)
            .top(TOP_CLIENTS);

        Self {
            total,
            time_span,
            categories,
            methods,
            clients,
        }
    }
}

/// Write the summary as formatted text.
pub fn render_summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    if summary.total == 0 {
        return writeln!(out, "No audit log entries to analyze");
    }

    writeln!(out, "\n{}", rule('=', SUMMARY_RULE_WIDTH))?;
    writeln!(out, "AUDIT LOG SUMMARY")?;
    writeln!(out, "{}", rule('=', SUMMARY_RULE_WIDTH))?;
    writeln!(out, "Total entries: {}", format_number(summary.total))?;

    if let Some(span) = &summary.time_span {
        write!(
            out,
            "Time range: {} to {}",
            format_timestamp(&span.first),
            format_timestamp(&span.last)
        )?;
        match (parse_timestamp(&span.first), parse_timestamp(&span.last)) {
            (Some(first), Some(last)) if last >= first => {
                writeln!(out, " ({})", duration_human(&first, &last))?
            }
            _ => writeln!(out)?,
        }
    }

    writeln!(out, "\nOperation Type Breakdown:")?;
    writeln!(out, "{}", rule('-', SECTION_RULE_WIDTH))?;
    render_rows(out, &summary.categories, 20)?;

    writeln!(out, "\nHTTP Method Breakdown:")?;
    writeln!(out, "{}", rule('-', SECTION_RULE_WIDTH))?;
    render_rows(out, &summary.methods, 10)?;

    writeln!(out, "\nClient IP Statistics (top {}):", TOP_CLIENTS)?;
    writeln!(out, "{}", rule('-', SECTION_RULE_WIDTH))?;
    if summary.clients.is_empty() {
        writeln!(out, "  No client IP information available")?;
    } else {
        render_rows(out, &summary.clients, 20)?;
    }

    Ok(())
}

fn render_rows<W: Write>(out: &mut W, breakdown: &Breakdown, label_width: usize) -> io::Result<()> {
    for row in &breakdown.rows {
        writeln!(
            out,
            "  {:<width$} {:>5} ({:.1}%)",
            row.label,
            format_number(row.count),
            row.percentage,
            width = label_width
        )?;
    }
    Ok(())
}

pub fn run<W: Write>(out: &mut W, log: &LoadedLog, format: OutputFormat) -> io::Result<()> {
    let summary = Summary::compute(&log.records);
    match format {
        OutputFormat::Text => render_summary(out, &summary),
        OutputFormat::Json => write_json(out, &summary),
    }
}
