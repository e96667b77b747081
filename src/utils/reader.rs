//! Audit log file opening with transparent decompression.
//!
//! Rotated audit logs are commonly archived compressed, so the viewer reads
//! them directly:
//!
//! - Plain text files
//! - Gzip compressed files (.gz)
//! - Zstandard compressed files (.zst)
//!
//! # Examples
//!
//! ```no_run
//! use audit_log_viewer::utils::reader::open_file;
//! use std::io::{BufRead, BufReader};
//!
//! let reader = open_file("audit.log.gz").unwrap();
//! for line in BufReader::new(reader).lines() {
//!     let line = line.unwrap();
//!     // Process line...
//! }
//! ```

use crate::error::ViewerError;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Opens a file with automatic decompression based on extension.
///
/// - `.gz` → Gzip decompression (multi-member archives included)
/// - `.zst` → Zstandard decompression
/// - Otherwise → Plain file
///
/// A file that cannot be opened yields [`ViewerError::LogFileNotFound`].
pub fn open_file(path: impl AsRef<Path>) -> Result<Box<dyn Read + Send>, ViewerError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ViewerError::LogFileNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
        "gz" => Ok(Box::new(MultiGzDecoder::new(file))),
        "zst" => {
            let decoder = zstd::Decoder::new(file).map_err(|source| ViewerError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Box::new(decoder))
        }
        _ => Ok(Box::new(file)),
    }
}

/// Whether the file at `path` will be decompressed by [`open_file`].
pub fn is_compressed(path: impl AsRef<Path>) -> bool {
    matches!(
        path.as_ref().extension().and_then(|e| e.to_str()),
        Some("gz" | "zst")
    )
}
