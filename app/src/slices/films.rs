//! Films slice
//!
//! Read-only: one validated fetch populates the collection. A response that
//! fails schema validation is rejected like any other failure, and the user
//! is additionally notified once.

use crate::environment::AppEnvironment;
use serde::Serialize;
use tasklist_api::{ApiError, Film, FilmsResponse};
use tasklist_core::environment::Notice;
use tasklist_core::lifecycle::{Operation, Phase, RequestError, RequestStatus};
use tasklist_core::{async_effect, effect::Effect, reducer::Reducer, smallvec, Collection, SmallVec};
use tasklist_macros::Action;
use tasklist_runtime::metrics::SliceMetrics;

const SLICE: &str = "films";

/// Page information of the last successful fetch
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmsPage {
    /// Total number of films on the service
    pub total: i64,
    /// Current page
    pub page: i64,
    /// Number of pages
    pub page_count: i64,
    /// Service messages
    pub messages: Vec<String>,
}

/// State of the films slice
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FilmsState {
    /// Films in service order
    pub items: Collection<Film>,
    /// Page information, once fetched
    pub page: Option<FilmsPage>,
    /// Request lifecycle
    pub status: RequestStatus,
}

/// Commands and results for films
#[derive(Action, Clone, Debug, PartialEq)]
#[action(slice = "films")]
pub enum FilmsAction {
    /// Fetch the films page
    #[command]
    FetchFilms,

    /// A valid films page arrived
    #[fulfilled]
    FilmsFetched {
        /// The validated response
        response: FilmsResponse,
    },

    /// The fetch failed
    #[rejected]
    FetchFailed {
        /// What went wrong
        error: RequestError,
        /// Notice shown to the user, for validation failures
        notice: Option<Notice>,
    },
}

impl FilmsAction {
    /// The recorded failure, for rejected actions
    #[must_use]
    pub const fn error(&self) -> Option<&RequestError> {
        match self {
            Self::FetchFailed { error, .. } => Some(error),
            Self::FetchFilms | Self::FilmsFetched { .. } => None,
        }
    }
}

/// Reducer for the films slice
#[derive(Clone, Copy, Debug, Default)]
pub struct FilmsReducer;

impl FilmsReducer {
    /// Log every validation issue and notify the user once
    fn notify_invalid(error: &ApiError, env: &AppEnvironment) -> Option<Notice> {
        let validation = error.validation()?;
        for issue in &validation.issues {
            tracing::warn!(path = %issue.path, message = %issue.message, "Films response failed validation");
        }
        let notice = Notice {
            title: "Films response failed validation".to_string(),
            details: validation.issues.iter().map(ToString::to_string).collect(),
            raised_at: env.clock.now(),
        };
        env.notifier.notify(&notice);
        Some(notice)
    }
}

impl Reducer for FilmsReducer {
    type State = FilmsState;
    type Action = FilmsAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if let Some(phase @ (Phase::Fulfilled | Phase::Rejected)) = action.phase() {
            SliceMetrics::record_settled(SLICE, phase);
        }

        match action {
            FilmsAction::FetchFilms => {
                state.status.begin();
                let env = env.clone();
                smallvec![async_effect! {
                    Some(match env.films.list().await {
                        Ok(response) => FilmsAction::FilmsFetched { response },
                        Err(error) => FilmsAction::FetchFailed {
                            notice: Self::notify_invalid(&error, &env),
                            error: RequestError::from(&error),
                        },
                    })
                }]
            },

            FilmsAction::FilmsFetched { response } => {
                state.items.replace_all(response.data);
                state.page = Some(FilmsPage {
                    total: response.total,
                    page: response.page,
                    page_count: response.page_count,
                    messages: response.messages,
                });
                state.status.fulfill();
                SmallVec::new()
            },

            FilmsAction::FetchFailed { error, .. } => {
                tracing::warn!(slice = SLICE, operation = %Operation::FetchAll, error = %error, "Request rejected");
                state.status.reject(error);
                SmallVec::new()
            },
        }
    }
}
