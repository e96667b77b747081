//! Utility functions and helpers.
//!
//! - [`format`] - number and rule formatting for text output
//! - [`progress`] - load progress display
//! - [`reader`] - file reader with automatic decompression
//! - [`time`] - timestamp parsing and formatting helpers
//!
//! # Examples
//!
//! ```
//! use audit_log_viewer::utils::time::format_timestamp;
//!
//! assert_eq!(format_timestamp("2025-10-20T10:30:00.000Z"), "2025-10-20 10:30:00");
//! assert_eq!(format_timestamp("garbled"), "garbled");
//! ```

pub mod format;
pub mod progress;
pub mod reader;
pub mod time;
