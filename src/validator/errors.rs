//! Validator derivation errors

use thiserror::Error;

/// A schema node has no faithful target-validator equivalent.
///
/// Raised only by the strict derivation entry point; the lenient entry
/// points fall back to the `any` validator instead, so registration never
/// breaks on edge-case schemas.
#[derive(Debug, Clone, Error)]
#[error("unsupported schema node '{kind}' at {path}")]
pub struct UnsupportedSchemaError {
    /// Path of the offending node, e.g. `$.profile.settings`.
    pub path: String,
    /// Kind name of the offending node.
    pub kind: String,
}

impl UnsupportedSchemaError {
    pub fn new(path: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: kind.into(),
        }
    }
}
