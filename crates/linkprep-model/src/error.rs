use serde::Serialize;
use thiserror::Error;

/// Fatal, per-record transformation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// A required column is absent from the record (an empty value is fine).
    #[error("required field '{field}' is missing from the record")]
    MissingField { field: String },
}

pub type Result<T> = std::result::Result<T, TransformError>;

/// Non-fatal conditions noticed while preparing a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum RecordIssue {
    /// A month or year value failed validation and was emitted empty.
    InvalidNumericField { field: String, value: String },
}

impl RecordIssue {
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidNumericField { field, .. } => field,
        }
    }

    /// The raw value that caused the issue.
    pub fn value(&self) -> &str {
        match self {
            Self::InvalidNumericField { value, .. } => value,
        }
    }
}
