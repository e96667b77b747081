//! Data structures representing OpenBao / Vault audit log records.
//!
//! Audit devices emit heterogeneous JSON: a record may carry any number of
//! keys the viewer never interprets, and the interpreted keys themselves may
//! be missing or carry an unexpected type. Each record therefore keeps the
//! complete parsed [`Value`] for full-text search, next to a small typed view
//! of the handful of fields that summaries and listings read.

use crate::audit::category::{classify, OperationCategory};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::ser::Formatter;
use serde_json::Value;
use std::io::{self, Write};

/// One successfully parsed line of the audit log.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRecord {
    /// 1-based line number in the source file
    pub line: usize,
    /// The record exactly as it was parsed
    pub raw: Value,
    pub time: Option<String>,
    pub request: Option<RequestInfo>,
    pub response: Option<ResponseInfo>,
    pub error: Option<String>,
}

/// Request details from the audit log.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RequestInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    /// HTTP verb (e.g. "GET", "POST", "LIST")
    #[serde(default, deserialize_with = "lenient")]
    pub method: Option<String>,
    /// Path being accessed (e.g. "transit/encrypt/patient-key")
    #[serde(default, deserialize_with = "lenient")]
    pub path: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub remote_address: Option<String>,
}

/// Response details from the audit log.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ResponseInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub status_code: Option<i64>,
}

/// Interpreted top-level keys. Anything else stays in `AuditRecord::raw`.
#[derive(Debug, Default, Deserialize)]
struct InterpretedFields {
    #[serde(default, deserialize_with = "lenient")]
    time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    request: Option<RequestInfo>,
    #[serde(default, deserialize_with = "lenient")]
    response: Option<ResponseInfo>,
    #[serde(default, deserialize_with = "lenient")]
    error: Option<String>,
}

/// Deserializes an optional field, treating a value of the wrong shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl AuditRecord {
    /// Build a record from a parsed JSON value.
    ///
    /// Returns `None` when the value is not a JSON object; every audit device
    /// line is an object, so anything else is treated as unparsable.
    pub fn from_value(line: usize, raw: Value) -> Option<Self> {
        if !raw.is_object() {
            return None;
        }
        let fields = InterpretedFields::deserialize(&raw).unwrap_or_default();
        Some(Self {
            line,
            time: fields.time.or(fields.timestamp),
            request: fields.request,
            response: fields.response,
            error: fields.error.filter(|e| !e.is_empty()),
            raw,
        })
    }

    /// Get the raw timestamp string of this record
    pub fn timestamp(&self) -> Option<&str> {
        self.time.as_deref()
    }

    /// Get the request path of this record
    pub fn path(&self) -> Option<&str> {
        self.request.as_ref()?.path.as_deref()
    }

    pub fn method(&self) -> Option<&str> {
        self.request.as_ref()?.method.as_deref()
    }

    /// Client address, ignoring empty strings
    pub fn remote_address(&self) -> Option<&str> {
        self.request
            .as_ref()?
            .remote_address
            .as_deref()
            .filter(|a| !a.is_empty())
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request
            .as_ref()?
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
    }

    /// HTTP status of the response. A zero status is treated as absent.
    pub fn status_code(&self) -> Option<i64> {
        self.response.as_ref()?.status_code.filter(|c| *c != 0)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Operation category derived from the request path.
    pub fn category(&self) -> OperationCategory {
        classify(self.path().unwrap_or(""))
    }

    /// Single-line JSON serialization of the complete record, keys in file
    /// order with `", "` and `": "` separators.
    pub fn to_json_string(&self) -> String {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
        match self.raw.serialize(&mut ser) {
            Ok(()) => String::from_utf8(buf).unwrap_or_else(|_| self.raw.to_string()),
            Err(_) => self.raw.to_string(),
        }
    }
}

/// Compact formatter with a space after each `,` and `:`.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> AuditRecord {
        AuditRecord::from_value(1, value).unwrap()
    }

    #[test]
    fn test_parse_transit_request() {
        let entry = record(json!({
            "time": "2025-10-07T12:00:00.000Z",
            "type": "request",
            "request": {
                "id": "7f3c1a2e",
                "method": "POST",
                "path": "transit/encrypt/patient-key",
                "remote_address": "10.0.0.5",
                "operation": "update"
            },
            "response": {"status_code": 200}
        }));

        assert_eq!(entry.timestamp(), Some("2025-10-07T12:00:00.000Z"));
        assert_eq!(entry.method(), Some("POST"));
        assert_eq!(entry.path(), Some("transit/encrypt/patient-key"));
        assert_eq!(entry.remote_address(), Some("10.0.0.5"));
        assert_eq!(entry.request_id(), Some("7f3c1a2e"));
        assert_eq!(entry.status_code(), Some(200));
        assert_eq!(entry.category(), OperationCategory::KeyManagement);
    }

    #[test]
    fn test_timestamp_key_fallback() {
        let entry = record(json!({"timestamp": "2025-10-07T12:00:00Z"}));
        assert_eq!(entry.timestamp(), Some("2025-10-07T12:00:00Z"));

        let entry = record(json!({"time": "a", "timestamp": "b"}));
        assert_eq!(entry.timestamp(), Some("a"));
    }

    #[test]
    fn test_missing_sections() {
        let entry = record(json!({"type": "request"}));
        assert_eq!(entry.timestamp(), None);
        assert!(entry.request.is_none());
        assert_eq!(entry.path(), None);
        assert_eq!(entry.status_code(), None);
        assert_eq!(entry.category(), OperationCategory::Unknown);
    }

    #[test]
    fn test_wrong_types_degrade_to_absent() {
        let entry = record(json!({
            "time": 1696680000,
            "request": "not-an-object",
            "response": {"status_code": "200"},
            "error": {"code": 1}
        }));

        assert_eq!(entry.timestamp(), None);
        assert!(entry.request.is_none());
        assert!(entry.response.is_some());
        assert_eq!(entry.status_code(), None);
        assert_eq!(entry.error(), None);
        // Raw value is untouched
        assert_eq!(entry.raw["request"], json!("not-an-object"));
    }

    #[test]
    fn test_partially_typed_request() {
        let entry = record(json!({
            "request": {"method": 5, "path": "sys/health"}
        }));
        assert_eq!(entry.method(), None);
        assert_eq!(entry.path(), Some("sys/health"));
    }

    #[test]
    fn test_empty_values_are_absent() {
        let entry = record(json!({
            "request": {"remote_address": "", "id": ""},
            "response": {"status_code": 0},
            "error": ""
        }));
        assert_eq!(entry.remote_address(), None);
        assert_eq!(entry.request_id(), None);
        assert_eq!(entry.status_code(), None);
        assert_eq!(entry.error(), None);
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(AuditRecord::from_value(1, json!([1, 2, 3])).is_none());
        assert!(AuditRecord::from_value(1, json!("text")).is_none());
        assert!(AuditRecord::from_value(1, Value::Null).is_none());
    }

    #[test]
    fn test_serialization_keeps_unknown_fields() {
        let entry = record(json!({
            "request": {"path": "secret/data/x"},
            "auth": {"metadata": {"department": "cardiology"}}
        }));
        assert!(entry.to_json_string().contains("cardiology"));
    }

    #[test]
    fn test_serialization_keeps_file_key_order() {
        let raw: Value = serde_json::from_str(
            r#"{"time":"t","response":{"status_code":403},"request":{"path":"sys/x","tags":[1,"a"]}}"#,
        )
        .unwrap();
        let entry = record(raw);
        assert_eq!(
            entry.to_json_string(),
            r#"{"time": "t", "response": {"status_code": 403}, "request": {"path": "sys/x", "tags": [1, "a"]}}"#
        );
    }
}
