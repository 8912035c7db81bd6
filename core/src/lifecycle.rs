//! Request lifecycle for state-mutating async operations.
//!
//! Every slice operation that talks to the backend goes through three phases:
//!
//! - **Pending**: the request is in flight; the collection is untouched
//! - **Fulfilled**: the validated response has been merged into the collection
//! - **Rejected**: the failure has been recorded; the collection is untouched
//!
//! [`RequestStatus`] is the per-slice record of those phases. It counts
//! requests in flight rather than holding a single flag, because a slice can
//! have several operations outstanding at once (fetching tasks for three
//! lists, say).

use serde::Serialize;
use thiserror::Error;

/// Phase of one asynchronous operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Request in flight
    Pending,
    /// Response merged into state
    Fulfilled,
    /// Failure recorded, state unchanged
    Rejected,
}

/// The four collection operations every slice exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    /// Replace the whole collection with the backend's view
    FetchAll,
    /// Append one entity
    Add,
    /// Remove one entity by id
    Remove,
    /// Shallow-merge a patch into one entity
    Update,
}

impl Operation {
    /// Stable name used in logs and error messages
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FetchAll => "fetchAll",
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Update => "update",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure category of a rejected request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// The request never produced a response (connection, DNS, TLS)
    Network,
    /// The backend answered with a non-success HTTP status
    Status,
    /// The response did not have the expected shape
    Decode,
    /// The response (or the command input) failed validation
    Validation,
    /// Success status, but the envelope flagged a business-logic failure
    Application,
}

/// A rejected request, as recorded in slice state
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind:?} error: {message}")]
pub struct RequestError {
    /// Failure category
    pub kind: ErrorKind,
    /// Human-readable description
    pub message: String,
}

impl RequestError {
    /// Create a new request error
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// A command rejected before any request was made
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }
}

/// Per-slice request status
///
/// ```
/// use tasklist_core::lifecycle::{Phase, RequestError, RequestStatus};
///
/// let mut status = RequestStatus::default();
/// status.begin();
/// assert_eq!(status.phase(), Some(Phase::Pending));
///
/// status.reject(RequestError::invalid("Title is required"));
/// assert_eq!(status.phase(), Some(Phase::Rejected));
/// assert!(status.error().is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestStatus {
    in_flight: usize,
    last: Option<Phase>,
    error: Option<RequestError>,
}

impl RequestStatus {
    /// A request was dispatched
    pub const fn begin(&mut self) {
        self.in_flight += 1;
    }

    /// A request completed and its result was merged
    pub fn fulfill(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.last = Some(Phase::Fulfilled);
        self.error = None;
    }

    /// A request failed; the error is kept until the next fulfilled request
    pub fn reject(&mut self, error: RequestError) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.last = Some(Phase::Rejected);
        self.error = Some(error);
    }

    /// Whether any request is still in flight
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.in_flight > 0
    }

    /// Number of requests in flight
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Current phase: `Pending` while anything is in flight, otherwise the
    /// outcome of the most recent request (`None` before the first one)
    #[must_use]
    pub const fn phase(&self) -> Option<Phase> {
        if self.in_flight > 0 {
            Some(Phase::Pending)
        } else {
            self.last
        }
    }

    /// The last recorded error, if the most recent outcome was a rejection
    #[must_use]
    pub const fn error(&self) -> Option<&RequestError> {
        self.error.as_ref()
    }
}
