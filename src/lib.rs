//! # Audit Log Viewer
//!
//! Read-only analysis of OpenBao / `HashiCorp Vault` file audit device logs.
//!
//! ## Overview
//!
//! An audit log is line-delimited JSON: one object per line, appended by the
//! server for every request and response. This crate loads such a file into
//! memory, tolerating malformed lines, and answers four kinds of query over
//! the loaded records:
//!
//! - **Summary** - totals, time range, operation type, HTTP method and client breakdowns
//! - **Listing** - most recent entries, optionally restricted to one operation type
//! - **Search** - substring search over the complete JSON of every record
//! - **Export** - summary plus recent entries written atomically to a report file
//!
//! ## Architecture
//!
//! - [`audit`] - record model, operation taxonomy and the loader
//! - [`commands`] - query commands, all writing to a caller-supplied sink
//! - [`utils`] - shared helpers (decompression, progress, time, formatting)
//! - [`error`] - error types
//!
//! ## Example Usage
//!
//! ```bash
//! # Summary followed by the 10 most recent entries
//! audit-view
//!
//! # Every key management operation in a rotated, compressed log
//! audit-view --file audit.log.1.gz --all --filter "Key Management"
//!
//! # Search, then write a report
//! audit-view --search patient-key --export report.txt
//! ```
//!
//! ## Library Usage
//!
//! ```no_run
//! use audit_log_viewer::audit::loader::load_log;
//! use audit_log_viewer::commands::summary::{render_summary, Summary};
//!
//! let log = load_log("./openbao/logs/audit.log").unwrap();
//! let summary = Summary::compute(&log.records);
//! render_summary(&mut std::io::stdout(), &summary).unwrap();
//! ```

pub mod audit;
pub mod commands;
pub mod error;
pub mod utils;
