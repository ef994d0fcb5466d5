//! The verdict record and its tri-state boolean fields.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A three-valued boolean: `Yes`, `No`, or genuinely `Unknown`. Never
/// conflate `No` with "not determined" — that is what `Unknown` is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "Option<bool>")]
pub enum Tri {
    Yes,
    No,
    Unknown,
}

impl Tri {
    pub fn from_bool(b: bool) -> Self {
        if b { Self::Yes } else { Self::No }
    }

    pub fn is_yes(self) -> bool {
        matches!(self, Self::Yes)
    }

    pub fn is_no(self) -> bool {
        matches!(self, Self::No)
    }

    pub fn as_option(self) -> Option<bool> {
        match self {
            Self::Yes => Some(true),
            Self::No => Some(false),
            Self::Unknown => None,
        }
    }
}

impl From<Option<bool>> for Tri {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::Yes,
            Some(false) => Self::No,
            None => Self::Unknown,
        }
    }
}

impl Serialize for Tri {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_option().serialize(serializer)
    }
}

impl fmt::Display for Tri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => f.write_str("yes"),
            Self::No => f.write_str("no"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// Final verdict bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Deliverable,
    Undeliverable,
    Unknown,
    InvalidSyntax,
    InvalidDomain,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Deliverable => "deliverable",
            Self::Undeliverable => "undeliverable",
            Self::Unknown => "unknown",
            Self::InvalidSyntax => "invalid_syntax",
            Self::InvalidDomain => "invalid_domain",
        };
        f.write_str(s)
    }
}

/// The verdict record for one address. Field names and `snake_case`
/// serialization match the documented contract exactly.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ValidationResult {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    pub is_valid_syntax: bool,
    pub domain_has_mx: bool,
    pub smtp_connectable: bool,
    pub is_deliverable: Tri,
    pub is_catch_all: Tri,
    pub is_disposable: Tri,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub mx_hosts: Vec<String>,
    pub logs: Vec<String>,
}

impl ValidationResult {
    /// Builds the terminal `invalid_syntax` result. No network work may
    /// have occurred by this point.
    pub(crate) fn invalid_syntax(email: &str, reason: &str, logs: Vec<String>) -> Self {
        Self {
            email: email.to_string(),
            normalized_email: None,
            domain: None,
            is_valid_syntax: false,
            domain_has_mx: false,
            smtp_connectable: false,
            is_deliverable: Tri::Unknown,
            is_catch_all: Tri::Unknown,
            is_disposable: Tri::Unknown,
            status: Status::InvalidSyntax,
            reason: Some(reason.to_string()),
            mx_hosts: Vec::new(),
            logs,
        }
    }

    /// Built when a worker panics mid-pipeline. Internal errors are caught
    /// at the batch worker boundary and must never poison the batch.
    pub(crate) fn panicked(email: &str) -> Self {
        Self {
            email: email.to_string(),
            normalized_email: None,
            domain: None,
            is_valid_syntax: true,
            domain_has_mx: false,
            smtp_connectable: false,
            is_deliverable: Tri::Unknown,
            is_catch_all: Tri::Unknown,
            is_disposable: Tri::Unknown,
            status: Status::Unknown,
            reason: Some("internal_error".to_string()),
            mx_hosts: Vec::new(),
            logs: vec!["worker panicked mid-pipeline".to_string()],
        }
    }
}

/// A compact serialization view that always drops `logs`, for compact
/// tabular output forms.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CompactResult<'a> {
    pub email: &'a str,
    pub normalized_email: Option<&'a str>,
    pub domain: Option<&'a str>,
    pub is_valid_syntax: bool,
    pub domain_has_mx: bool,
    pub smtp_connectable: bool,
    pub is_deliverable: Tri,
    pub is_catch_all: Tri,
    pub is_disposable: Tri,
    pub status: Status,
    pub reason: Option<&'a str>,
    pub mx_hosts: &'a [String],
}

impl<'a> From<&'a ValidationResult> for CompactResult<'a> {
    fn from(r: &'a ValidationResult) -> Self {
        Self {
            email: &r.email,
            normalized_email: r.normalized_email.as_deref(),
            domain: r.domain.as_deref(),
            is_valid_syntax: r.is_valid_syntax,
            domain_has_mx: r.domain_has_mx,
            smtp_connectable: r.smtp_connectable,
            is_deliverable: r.is_deliverable,
            is_catch_all: r.is_catch_all,
            is_disposable: r.is_disposable,
            status: r.status,
            reason: r.reason.as_deref(),
            mx_hosts: &r.mx_hosts,
        }
    }
}
