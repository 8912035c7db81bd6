//! State slices
//!
//! Each slice owns one partition of [`RootState`](crate::state::RootState)
//! and the only mutations allowed on it. Backend operations run through the
//! request lifecycle: the command marks the slice pending and returns an
//! effect; the effect resolves to a fulfilled action (merged into the
//! collection) or a rejected one (recorded, collection untouched).

pub mod app;
pub mod films;
pub mod tasks;
pub mod todolists;

use tasklist_core::async_effect;
use tasklist_core::effect::Effect;
use tasklist_core::lifecycle::RequestError;

/// Longest title accepted for todo lists and tasks
pub const MAX_TITLE_LENGTH: usize = 100;

/// Trim `title` and check it against the backend's rules
///
/// # Errors
///
/// Returns a validation [`RequestError`] for blank or overlong titles.
pub fn validate_title(title: &str) -> Result<String, RequestError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(RequestError::invalid("Title is required"));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(RequestError::invalid(format!(
            "Title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(title.to_string())
}

/// An effect that yields `action` without doing any I/O
///
/// Used to reject a command that failed local validation, so it still goes
/// through pending then rejected.
pub(crate) fn immediately<A: Send + 'static>(action: A) -> Effect<A> {
    async_effect! { Some(action) }
}
