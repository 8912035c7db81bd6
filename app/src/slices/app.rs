//! Application-wide status
//!
//! The app slice does not talk to the backend. It follows the lifecycle of
//! every other slice's requests: the root reducer shows it each pending,
//! fulfilled and rejected action as an [`AppAction`], and it keeps the
//! global loading status, the last error and the most recent notices.

use crate::environment::AppEnvironment;
use serde::Serialize;
use tasklist_core::environment::Notice;
use tasklist_core::{effect::Effect, reducer::Reducer, SmallVec};
use tasklist_macros::Action;

/// Notices kept in [`AppState::notices`]; older ones are dropped first
pub const MAX_NOTICES: usize = 20;

/// Global request status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    /// At least one request in flight
    Loading,
    /// Everything settled and the last request succeeded
    Succeeded,
    /// Everything settled and the last request failed
    Failed,
}

impl AppStatus {
    /// Lower-case name used by the renderer
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

/// State of the app slice
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Global status
    pub status: AppStatus,
    /// Requests in flight across all slices
    pub in_flight: usize,
    /// Last error message, kept until dismissed
    pub error: Option<String>,
    /// Most recent notices, oldest first, at most [`MAX_NOTICES`]
    pub notices: Vec<Notice>,
}

/// App slice actions
#[derive(Action, Clone, Debug, PartialEq)]
#[action(slice = "app")]
pub enum AppAction {
    /// A slice started a request
    RequestStarted,
    /// A slice request was fulfilled
    RequestSucceeded,
    /// A slice request was rejected
    RequestFailed {
        /// User-facing message
        message: String,
        /// Notice raised for the failure, if any
        notice: Option<Notice>,
    },
    /// Clear the last error
    ErrorDismissed,
}

/// Reducer for the app slice
#[derive(Clone, Copy, Debug, Default)]
pub struct AppReducer;

impl AppReducer {
    fn settle(state: &mut AppState, outcome: AppStatus) {
        state.in_flight = state.in_flight.saturating_sub(1);
        state.status = if state.in_flight > 0 {
            AppStatus::Loading
        } else {
            outcome
        };
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::RequestStarted => {
                state.in_flight += 1;
                state.status = AppStatus::Loading;
            },
            AppAction::RequestSucceeded => Self::settle(state, AppStatus::Succeeded),
            AppAction::RequestFailed { message, notice } => {
                Self::settle(state, AppStatus::Failed);
                state.error = Some(message);
                state.notices.extend(notice);
                let overflow = state.notices.len().saturating_sub(MAX_NOTICES);
                state.notices.drain(..overflow);
            },
            AppAction::ErrorDismissed => state.error = None,
        }
        SmallVec::new()
    }
}
