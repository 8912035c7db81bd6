//! Error types for the tasklist API client

use crate::envelope::FieldError;
use crate::validation::ValidationError;
use tasklist_core::lifecycle::{ErrorKind, RequestError};
use thiserror::Error;

/// Errors that can occur when talking to the backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// The response body did not have the expected shape
    #[error("Response parsing failed: {0}")]
    Decode(String),

    /// The response failed schema validation
    #[error("Response failed validation: {0}")]
    Validation(#[from] ValidationError),

    /// Success status, but the envelope reported a failure
    #[error("Application error (result code {result_code}): {}", messages.join("; "))]
    Application {
        /// Non-zero `resultCode`
        result_code: i64,
        /// Envelope `messages`
        messages: Vec<String>,
        /// Envelope `fieldsErrors`
        field_errors: Vec<FieldError>,
    },
}

impl ApiError {
    /// Failure category
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Network,
            Self::Status { .. } => ErrorKind::Status,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Application { .. } => ErrorKind::Application,
        }
    }

    /// Metric label for the failure category
    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Status { .. } => "status",
            Self::Decode(_) => "decode",
            Self::Validation(_) => "validation",
            Self::Application { .. } => "application",
        }
    }

    /// The validation details, if this is a validation failure
    #[must_use]
    pub const fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(error) => Some(error),
            _ => None,
        }
    }
}

impl From<&ApiError> for RequestError {
    fn from(error: &ApiError) -> Self {
        let message = match error {
            // Envelope messages are already user-facing
            ApiError::Application { messages, .. } if !messages.is_empty() => messages.join("; "),
            other => other.to_string(),
        };
        Self::new(error.kind(), message)
    }
}
