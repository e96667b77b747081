//! Operation taxonomy derived from a record's request path.
//!
//! Classification is prefix based and case-insensitive. Rules are evaluated
//! in a fixed order and the first match wins:
//!
//! | Path                          | Category             |
//! |-------------------------------|----------------------|
//! | empty                         | Unknown              |
//! | `auth/...`                    | Authentication       |
//! | `transit/...`                 | Key Management       |
//! | `sys/...` with policy or acl  | Policy Management    |
//! | `sys/...` with audit          | Audit Management     |
//! | other `sys/...`               | System Operations    |
//! | `secret/...`, `kv/...`        | Secrets Management   |
//! | `identity/...`                | Identity Management  |
//! | anything else                 | Other Operations     |

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationCategory {
    Authentication,
    KeyManagement,
    PolicyManagement,
    AuditManagement,
    SystemOperations,
    SecretsManagement,
    IdentityManagement,
    OtherOperations,
    Unknown,
}

impl OperationCategory {
    /// The eight categories a path can be filtered by.
    pub const FILTERABLE: [Self; 8] = [
        Self::Authentication,
        Self::KeyManagement,
        Self::PolicyManagement,
        Self::SystemOperations,
        Self::SecretsManagement,
        Self::IdentityManagement,
        Self::AuditManagement,
        Self::OtherOperations,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Authentication => "Authentication",
            Self::KeyManagement => "Key Management",
            Self::PolicyManagement => "Policy Management",
            Self::AuditManagement => "Audit Management",
            Self::SystemOperations => "System Operations",
            Self::SecretsManagement => "Secrets Management",
            Self::IdentityManagement => "Identity Management",
            Self::OtherOperations => "Other Operations",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for OperationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for OperationCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl FromStr for OperationCategory {
    type Err = String;

    /// Accepts the display label in any case, with spaces, hyphens or
    /// underscores as separators ("Key Management", "key-management").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Self::FILTERABLE
            .iter()
            .chain(std::iter::once(&Self::Unknown))
            .copied()
            .find(|c| normalize_label(c.label()) == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::FILTERABLE.iter().map(|c| c.label()).collect();
                format!(
                    "unknown operation type '{}' (expected one of: {})",
                    s,
                    valid.join(", ")
                )
            })
    }
}

fn normalize_label(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '-' | '_' => ' ',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Categorize an operation based on its API path.
pub fn classify(path: &str) -> OperationCategory {
    if path.is_empty() {
        return OperationCategory::Unknown;
    }

    let path = path.to_lowercase();

    if path.starts_with("auth/") {
        OperationCategory::Authentication
    } else if path.starts_with("transit/") {
        OperationCategory::KeyManagement
    } else if path.starts_with("sys/") {
        if path.contains("policy") || path.contains("acl") {
            OperationCategory::PolicyManagement
        } else if path.contains("audit") {
            OperationCategory::AuditManagement
        } else {
            OperationCategory::SystemOperations
        }
    } else if path.starts_with("secret/") || path.starts_with("kv/") {
        OperationCategory::SecretsManagement
    } else if path.starts_with("identity/") {
        OperationCategory::IdentityManagement
    } else {
        OperationCategory::OtherOperations
    }
}
