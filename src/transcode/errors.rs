//! Transcoding error types

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One validation failure at a field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Field path, e.g. `$.address.city` or `$.tags[1]`.
    pub path: String,
    /// Expected type or condition.
    pub expected: String,
    /// Actual value kind or condition found.
    pub actual: String,
}

impl Issue {
    pub fn new(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            expected: "field to be present".into(),
            actual: "missing".into(),
        }
    }

    pub fn type_mismatch(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(path, expected, actual)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, got {}",
            self.path, self.expected, self.actual
        )
    }
}

/// A document does not conform to its expected shape.
///
/// Carries the full field-path-qualified issue list, never just the first
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    issues: Vec<Issue>,
}

impl ValidationError {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    pub fn single(issue: Issue) -> Self {
        Self {
            issues: vec![issue],
        }
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.issues.as_slice() {
            [] => write!(f, "document does not conform"),
            [only] => write!(f, "{}", only),
            [first, rest @ ..] => write!(f, "{} (+{} more)", first, rest.len()),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Transcoding errors.
#[derive(Debug, Clone, Error)]
pub enum TranscodeError {
    /// Wire or runtime document does not conform to its expected shape.
    #[error("document validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A codec transform rejected a value.
    #[error("codec '{name}' failed at {path}: {message}")]
    Codec {
        name: String,
        path: String,
        message: String,
    },

    /// A transcoding call referenced a collection absent from the schema
    /// map.
    #[error("unknown collection '{0}'")]
    UnknownCollection(String),

    /// A collection name was registered twice.
    #[error("collection already registered: '{0}'")]
    AlreadyRegistered(String),
}

/// Result type for transcoding operations.
pub type TranscodeResult<T> = Result<T, TranscodeError>;
