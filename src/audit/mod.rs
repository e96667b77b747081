//! Audit log model and ingestion.
//!
//! - [`types`] - interpreted view of a single audit record
//! - [`category`] - operation taxonomy derived from the request path
//! - [`loader`] - line-delimited JSON loader with per-line diagnostics

pub mod category;
pub mod loader;
pub mod types;
