//! Tasks slice
//!
//! Tasks are kept per todo list. Each list's tasks are fetched separately,
//! so the slice tracks one collection per list id and a single request
//! status for all of them.

use super::{immediately, validate_title};
use crate::environment::AppEnvironment;
use serde::Serialize;
use std::collections::BTreeMap;
use tasklist_api::{Task, TaskId, TaskPatch, TodolistId, UpdateTaskModel};
use tasklist_core::lifecycle::{Operation, Phase, RequestError, RequestStatus};
use tasklist_core::{async_effect, effect::Effect, reducer::Reducer, smallvec, Collection, SmallVec};
use tasklist_macros::Action;
use tasklist_runtime::metrics::SliceMetrics;

const SLICE: &str = "tasks";

/// State of the tasks slice
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TasksState {
    /// Tasks indexed by owning todo list
    pub by_list: BTreeMap<TodolistId, Collection<Task>>,
    /// Request lifecycle
    pub status: RequestStatus,
}

impl TasksState {
    /// Tasks of one list, if any were loaded
    #[must_use]
    pub fn list(&self, todolist_id: &TodolistId) -> Option<&Collection<Task>> {
        self.by_list.get(todolist_id)
    }

    /// A task by list and id
    #[must_use]
    pub fn get(&self, todolist_id: &TodolistId, id: &TaskId) -> Option<&Task> {
        self.by_list.get(todolist_id).and_then(|tasks| tasks.get(id))
    }

    /// Total number of tasks across lists
    #[must_use]
    pub fn count(&self) -> usize {
        self.by_list.values().map(Collection::len).sum()
    }
}

/// Commands and results for tasks
#[derive(Action, Clone, Debug, PartialEq)]
#[action(slice = "tasks")]
pub enum TasksAction {
    /// Fetch the tasks of one list
    #[command]
    FetchTasks {
        /// Owning list
        todolist_id: TodolistId,
    },

    /// Create a task
    #[command]
    CreateTask {
        /// Owning list
        todolist_id: TodolistId,
        /// Title of the new task
        title: String,
    },

    /// Change some fields of a task
    #[command]
    UpdateTask {
        /// Owning list
        todolist_id: TodolistId,
        /// Task to change
        id: TaskId,
        /// Fields to change
        patch: TaskPatch,
    },

    /// Delete a task
    #[command]
    DeleteTask {
        /// Owning list
        todolist_id: TodolistId,
        /// Task to delete
        id: TaskId,
    },

    /// A list's tasks arrived
    #[fulfilled]
    TasksFetched {
        /// Owning list
        todolist_id: TodolistId,
        /// Its tasks, in backend order
        tasks: Vec<Task>,
    },

    /// A task was created
    #[fulfilled]
    TaskCreated {
        /// The stored task
        task: Task,
    },

    /// A task update was accepted
    #[fulfilled]
    TaskUpdated {
        /// Owning list
        todolist_id: TodolistId,
        /// Changed task
        id: TaskId,
        /// The fields that changed
        patch: TaskPatch,
    },

    /// A task was deleted
    #[fulfilled]
    TaskDeleted {
        /// Owning list
        todolist_id: TodolistId,
        /// Deleted task
        id: TaskId,
    },

    /// Drop every task of a list that no longer exists
    TodolistRemoved {
        /// Removed list
        todolist_id: TodolistId,
    },

    /// A request failed
    #[rejected]
    RequestFailed {
        /// Operation that failed
        operation: Operation,
        /// List the request was about
        todolist_id: TodolistId,
        /// What went wrong
        error: RequestError,
    },
}

impl TasksAction {
    /// The recorded failure, for rejected actions
    #[must_use]
    pub const fn error(&self) -> Option<&RequestError> {
        match self {
            Self::RequestFailed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Reducer for the tasks slice
#[derive(Clone, Copy, Debug, Default)]
pub struct TasksReducer;

impl TasksReducer {
    fn failed(operation: Operation, todolist_id: TodolistId, error: RequestError) -> TasksAction {
        TasksAction::RequestFailed {
            operation,
            todolist_id,
            error,
        }
    }
}

impl Reducer for TasksReducer {
    type State = TasksState;
    type Action = TasksAction;
    type Environment = AppEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per lifecycle step
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
            TasksAction::FetchTasks { todolist_id } => {
                state.status.begin();
                let api = env.tasks.clone();
                smallvec![async_effect! {
                    Some(match api.list(&todolist_id).await {
                        Ok(tasks) => TasksAction::TasksFetched { todolist_id, tasks },
                        Err(error) => Self::failed(Operation::FetchAll, todolist_id, RequestError::from(&error)),
                    })
                }]
            },

            TasksAction::CreateTask { todolist_id, title } => {
                state.status.begin();
                let title = match validate_title(&title) {
                    Ok(title) => title,
                    Err(error) => return smallvec![immediately(Self::failed(Operation::Add, todolist_id, error))],
                };
                let api = env.tasks.clone();
                smallvec![async_effect! {
                    Some(match api.create(&todolist_id, &title).await {
                        Ok(task) => TasksAction::TaskCreated { task },
                        Err(error) => Self::failed(Operation::Add, todolist_id, RequestError::from(&error)),
                    })
                }]
            },

            TasksAction::UpdateTask {
                todolist_id,
                id,
                mut patch,
            } => {
                state.status.begin();
                if let Some(title) = patch.title.take() {
                    match validate_title(&title) {
                        Ok(trimmed) => patch.title = Some(trimmed),
                        Err(error) => {
                            return smallvec![immediately(Self::failed(Operation::Update, todolist_id, error))];
                        },
                    }
                }
                // The backend replaces every field, so the request carries the
                // whole task with the patch applied.
                let Some(task) = state.get(&todolist_id, &id) else {
                    let error = RequestError::invalid(format!("Task {id} is not loaded"));
                    return smallvec![immediately(Self::failed(Operation::Update, todolist_id, error))];
                };
                let model = UpdateTaskModel::patched(task, &patch);
                let api = env.tasks.clone();
                smallvec![async_effect! {
                    Some(match api.update(&todolist_id, &id, &model).await {
                        Ok(_) => TasksAction::TaskUpdated { todolist_id, id, patch },
                        Err(error) => Self::failed(Operation::Update, todolist_id, RequestError::from(&error)),
                    })
                }]
            },

            TasksAction::DeleteTask { todolist_id, id } => {
                state.status.begin();
                let api = env.tasks.clone();
                smallvec![async_effect! {
                    Some(match api.remove(&todolist_id, &id).await {
                        Ok(()) => TasksAction::TaskDeleted { todolist_id, id },
                        Err(error) => Self::failed(Operation::Remove, todolist_id, RequestError::from(&error)),
                    })
                }]
            },

            // ========== Results ==========
            TasksAction::TasksFetched { todolist_id, tasks } => {
                state.by_list.entry(todolist_id).or_default().replace_all(tasks);
                state.status.fulfill();
                SmallVec::new()
            },

            TasksAction::TaskCreated { task } => {
                state
                    .by_list
                    .entry(task.todo_list_id.clone())
                    .or_default()
                    .append(task);
                state.status.fulfill();
                SmallVec::new()
            },

            TasksAction::TaskUpdated {
                todolist_id,
                id,
                patch,
            } => {
                if let Some(tasks) = state.by_list.get_mut(&todolist_id) {
                    tasks.update(&id, patch);
                }
                state.status.fulfill();
                SmallVec::new()
            },

            TasksAction::TaskDeleted { todolist_id, id } => {
                if let Some(tasks) = state.by_list.get_mut(&todolist_id) {
                    tasks.remove(&id);
                }
                state.status.fulfill();
                SmallVec::new()
            },

            TasksAction::TodolistRemoved { todolist_id } => {
                if let Some(tasks) = state.by_list.remove(&todolist_id) {
                    tracing::debug!(todolist = %todolist_id, dropped = tasks.len(), "Dropped tasks of removed list");
                }
                SmallVec::new()
            },

            TasksAction::RequestFailed {
                operation,
                todolist_id,
                error,
            } => {
                tracing::warn!(slice = SLICE, %operation, todolist = %todolist_id, error = %error, "Request rejected");
                state.status.reject(error);
                SmallVec::new()
            },
        }
    }
}
