//! Invocation errors

use thiserror::Error;

use crate::transcode::{TranscodeError, ValidationError};

/// Result type for invocation operations.
pub type InvokeResult<T> = Result<T, InvokeError>;

/// Invocation errors.
///
/// A hook vetoing an operation is not an error: the facade surfaces it as
/// an absent result, so handler code treats denial and absence identically.
#[derive(Debug, Clone, Error)]
pub enum InvokeError {
    /// Wire arguments failed to decode. Raised before the handler runs.
    #[error("invalid arguments: {0}")]
    InvalidArguments(ValidationError),

    /// The handler's return value failed to validate against the declared
    /// return schema. Raised after the handler ran; its side effects are
    /// not rolled back here.
    #[error("invalid handler result: {0}")]
    InvalidResult(ValidationError),

    /// A transcoding failure outside the argument/result boundary.
    #[error(transparent)]
    Transcode(#[from] TranscodeError),

    /// The handler itself failed.
    #[error("handler failed: {0}")]
    Handler(String),

    /// The storage backend failed.
    #[error("storage error: {0}")]
    Store(String),

    /// No handler registered under the requested name.
    #[error("unknown handler: {0}")]
    UnknownHandler(String),
}

impl InvokeError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            InvokeError::InvalidArguments(_) => 400,
            InvokeError::InvalidResult(_) => 500,
            InvokeError::Transcode(TranscodeError::Validation(_)) => 400,
            InvokeError::Transcode(TranscodeError::UnknownCollection(_)) => 404,
            InvokeError::Transcode(_) => 500,
            InvokeError::Handler(_) => 500,
            InvokeError::Store(_) => 500,
            InvokeError::UnknownHandler(_) => 404,
        }
    }
}
