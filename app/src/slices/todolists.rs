//! Todo lists slice

use super::{immediately, validate_title};
use crate::environment::AppEnvironment;
use serde::Serialize;
use tasklist_api::{Todolist, TodolistId, TodolistPatch};
use tasklist_core::lifecycle::{Operation, Phase, RequestError, RequestStatus};
use tasklist_core::{async_effect, effect::Effect, reducer::Reducer, smallvec, Collection, SmallVec};
use tasklist_macros::Action;
use tasklist_runtime::metrics::SliceMetrics;

const SLICE: &str = "todolists";

/// State of the todo lists slice
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TodolistsState {
    /// Todo lists in display order
    pub items: Collection<Todolist>,
    /// Request lifecycle
    pub status: RequestStatus,
}

/// Commands and results for todo lists
#[derive(Action, Clone, Debug, PartialEq)]
#[action(slice = "todolists")]
pub enum TodolistsAction {
    /// Fetch every todo list
    #[command]
    FetchTodolists,

    /// Create a todo list
    #[command]
    CreateTodolist {
        /// Title of the new list
        title: String,
    },

    /// Rename a todo list
    #[command]
    RenameTodolist {
        /// List to rename
        id: TodolistId,
        /// New title
        title: String,
    },

    /// Delete a todo list
    #[command]
    DeleteTodolist {
        /// List to delete
        id: TodolistId,
    },

    /// The backend's todo lists arrived
    #[fulfilled]
    TodolistsFetched {
        /// Every list, in backend order
        todolists: Vec<Todolist>,
    },

    /// A todo list was created
    #[fulfilled]
    TodolistCreated {
        /// The stored list, with its backend id
        todolist: Todolist,
    },

    /// A todo list was renamed
    #[fulfilled]
    TodolistRenamed {
        /// Renamed list
        id: TodolistId,
        /// Its new title
        title: String,
    },

    /// A todo list was deleted
    #[fulfilled]
    TodolistDeleted {
        /// Deleted list
        id: TodolistId,
    },

    /// A request failed
    #[rejected]
    RequestFailed {
        /// Operation that failed
        operation: Operation,
        /// What went wrong
        error: RequestError,
    },
}

impl TodolistsAction {
    /// The recorded failure, for rejected actions
    #[must_use]
    pub const fn error(&self) -> Option<&RequestError> {
        match self {
            Self::RequestFailed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Reducer for the todo lists slice
#[derive(Clone, Copy, Debug, Default)]
pub struct TodolistsReducer;

impl Reducer for TodolistsReducer {
    type State = TodolistsState;
    type Action = TodolistsAction;
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
            // ========== Commands ==========
            TodolistsAction::FetchTodolists => {
                state.status.begin();
                let api = env.todolists.clone();
                smallvec![async_effect! {
                    Some(match api.list().await {
                        Ok(todolists) => TodolistsAction::TodolistsFetched { todolists },
                        Err(error) => TodolistsAction::RequestFailed {
                            operation: Operation::FetchAll,
                            error: RequestError::from(&error),
                        },
                    })
                }]
            },

            TodolistsAction::CreateTodolist { title } => {
                state.status.begin();
                let title = match validate_title(&title) {
                    Ok(title) => title,
                    Err(error) => {
                        return smallvec![immediately(TodolistsAction::RequestFailed {
                            operation: Operation::Add,
                            error,
                        })];
                    },
                };
                let api = env.todolists.clone();
                smallvec![async_effect! {
                    Some(match api.create(&title).await {
                        Ok(todolist) => TodolistsAction::TodolistCreated { todolist },
                        Err(error) => TodolistsAction::RequestFailed {
                            operation: Operation::Add,
                            error: RequestError::from(&error),
                        },
                    })
                }]
            },

            TodolistsAction::RenameTodolist { id, title } => {
                state.status.begin();
                let title = match validate_title(&title) {
                    Ok(title) => title,
                    Err(error) => {
                        return smallvec![immediately(TodolistsAction::RequestFailed {
                            operation: Operation::Update,
                            error,
                        })];
                    },
                };
                let api = env.todolists.clone();
                smallvec![async_effect! {
                    Some(match api.rename(&id, &title).await {
                        Ok(()) => TodolistsAction::TodolistRenamed { id, title },
                        Err(error) => TodolistsAction::RequestFailed {
                            operation: Operation::Update,
                            error: RequestError::from(&error),
                        },
                    })
                }]
            },

            TodolistsAction::DeleteTodolist { id } => {
                state.status.begin();
                let api = env.todolists.clone();
                smallvec![async_effect! {
                    Some(match api.remove(&id).await {
                        Ok(()) => TodolistsAction::TodolistDeleted { id },
                        Err(error) => TodolistsAction::RequestFailed {
                            operation: Operation::Remove,
                            error: RequestError::from(&error),
                        },
                    })
                }]
            },

            // ========== Results ==========
            TodolistsAction::TodolistsFetched { todolists } => {
                state.items.replace_all(todolists);
                state.status.fulfill();
                SmallVec::new()
            },

            TodolistsAction::TodolistCreated { todolist } => {
                state.items.append(todolist);
                state.status.fulfill();
                SmallVec::new()
            },

            TodolistsAction::TodolistRenamed { id, title } => {
                state.items.update(&id, TodolistPatch { title: Some(title) });
                state.status.fulfill();
                SmallVec::new()
            },

            TodolistsAction::TodolistDeleted { id } => {
                state.items.remove(&id);
                state.status.fulfill();
                SmallVec::new()
            },

            TodolistsAction::RequestFailed { operation, error } => {
                tracing::warn!(slice = SLICE, %operation, error = %error, "Request rejected");
                state.status.reject(error);
                SmallVec::new()
            },
        }
    }
}
