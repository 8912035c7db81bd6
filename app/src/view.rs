//! Text view
//!
//! [`mount`] starts the initial fetches, [`render`] turns state into text,
//! and [`Interaction`] maps CLI arguments to the actions a user can trigger.

use crate::selectors::{
    select_app_error, select_app_status, select_films, select_progress, select_tasks_for,
    select_todolists,
};
use crate::slices::films::FilmsAction;
use crate::slices::tasks::TasksAction;
use crate::slices::todolists::TodolistsAction;
use crate::state::{AppStore, RootAction, RootState};
use std::fmt::Write as _;
use tasklist_api::{TaskId, TaskPatch, TaskStatus, TodolistId};
use tasklist_runtime::{EffectHandle, StoreError};
use thiserror::Error;

/// Dispatch the initial fetches: todo lists (and, once they arrive, their
/// tasks) and films
///
/// # Errors
///
/// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
pub async fn mount(store: &AppStore) -> Result<Vec<EffectHandle>, StoreError> {
    tracing::debug!("Mounting view");
    Ok(vec![
        store
            .send(RootAction::Todolists(TodolistsAction::FetchTodolists))
            .await?,
        store.send(RootAction::Films(FilmsAction::FetchFilms)).await?,
    ])
}

/// Debug snapshot of the whole state as JSON
///
/// # Errors
///
/// Returns the serialization error, if any.
pub async fn inspect(store: &AppStore) -> Result<serde_json::Value, serde_json::Error> {
    store.state(|state| serde_json::to_value(state)).await
}

/// Render the state as text
#[must_use]
pub fn render(state: &RootState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Status: {}", select_app_status(state).as_str());
    if let Some(error) = select_app_error(state) {
        let _ = writeln!(out, "Error: {error}");
    }
    for notice in &state.app.notices {
        let _ = writeln!(out, "Notice: {}", notice.title);
        for detail in &notice.details {
            let _ = writeln!(out, "  - {detail}");
        }
    }

    let todolists = select_todolists(state);
    let _ = writeln!(out, "\nTodo lists ({})", todolists.len());
    if todolists.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for todolist in todolists {
        let (completed, total) = select_progress(state, &todolist.id);
        let _ = writeln!(out, "  {} [{}] {completed}/{total}", todolist.title, todolist.id);
        for task in select_tasks_for(state, &todolist.id) {
            let mark = if task.status == TaskStatus::Completed { 'x' } else { ' ' };
            let _ = writeln!(
                out,
                "    [{mark}] {} ({}) [{}]",
                task.title,
                task.status.as_str(),
                task.id
            );
        }
    }

    let films = select_films(state);
    let _ = writeln!(out, "\nFilms ({})", films.len());
    for film in films {
        let _ = writeln!(out, "  {} ({:.1})", film.name_original, film.rating_imdb);
    }

    out
}

/// A user interaction given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    /// `add-list <title>`
    AddList {
        /// Title
        title: String,
    },
    /// `rename-list <id> <title>`
    RenameList {
        /// List
        id: TodolistId,
        /// New title
        title: String,
    },
    /// `delete-list <id>`
    DeleteList {
        /// List
        id: TodolistId,
    },
    /// `add-task <list-id> <title>`
    AddTask {
        /// Owning list
        todolist_id: TodolistId,
        /// Title
        title: String,
    },
    /// `set-status <list-id> <task-id> <status>`
    SetStatus {
        /// Owning list
        todolist_id: TodolistId,
        /// Task
        id: TaskId,
        /// New status
        status: TaskStatus,
    },
    /// `delete-task <list-id> <task-id>`
    DeleteTask {
        /// Owning list
        todolist_id: TodolistId,
        /// Task
        id: TaskId,
    },
}

/// Errors parsing an [`Interaction`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteractionError {
    /// Unknown command word
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// Wrong number of arguments
    #[error("usage: {0}")]
    Usage(&'static str),

    /// Status that does not name a task status
    #[error("{0}")]
    InvalidStatus(String),
}

impl Interaction {
    /// Parse CLI arguments (without the program name)
    ///
    /// Titles may span several arguments; they are joined with spaces.
    /// Returns `Ok(None)` when there are no arguments.
    ///
    /// # Errors
    ///
    /// Returns an [`InteractionError`] for unknown commands, missing
    /// arguments and unknown statuses.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Option<Self>, InteractionError> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        let Some((command, rest)) = args.split_first() else {
            return Ok(None);
        };

        let interaction = match (*command, rest) {
            ("add-list", [_, ..]) => Self::AddList { title: rest.join(" ") },
            ("add-list", []) => return Err(InteractionError::Usage("add-list <title>")),
            ("rename-list", [id, title @ ..]) if !title.is_empty() => Self::RenameList {
                id: TodolistId::new(*id),
                title: title.join(" "),
            },
            ("rename-list", _) => return Err(InteractionError::Usage("rename-list <id> <title>")),
            ("delete-list", [id]) => Self::DeleteList { id: TodolistId::new(*id) },
            ("delete-list", _) => return Err(InteractionError::Usage("delete-list <id>")),
            ("add-task", [list, title @ ..]) if !title.is_empty() => Self::AddTask {
                todolist_id: TodolistId::new(*list),
                title: title.join(" "),
            },
            ("add-task", _) => return Err(InteractionError::Usage("add-task <list-id> <title>")),
            ("set-status", [list, id, status]) => Self::SetStatus {
                todolist_id: TodolistId::new(*list),
                id: TaskId::new(*id),
                status: status.parse().map_err(InteractionError::InvalidStatus)?,
            },
            ("set-status", _) => {
                return Err(InteractionError::Usage("set-status <list-id> <task-id> <status>"));
            },
            ("delete-task", [list, id]) => Self::DeleteTask {
                todolist_id: TodolistId::new(*list),
                id: TaskId::new(*id),
            },
            ("delete-task", _) => return Err(InteractionError::Usage("delete-task <list-id> <task-id>")),
            (other, _) => return Err(InteractionError::UnknownCommand(other.to_string())),
        };
        Ok(Some(interaction))
    }

    /// The action this interaction dispatches
    #[must_use]
    pub fn into_action(self) -> RootAction {
        match self {
            Self::AddList { title } => TodolistsAction::CreateTodolist { title }.into(),
            Self::RenameList { id, title } => TodolistsAction::RenameTodolist { id, title }.into(),
            Self::DeleteList { id } => TodolistsAction::DeleteTodolist { id }.into(),
            Self::AddTask { todolist_id, title } => TasksAction::CreateTask { todolist_id, title }.into(),
            Self::SetStatus {
                todolist_id,
                id,
                status,
            } => TasksAction::UpdateTask {
                todolist_id,
                id,
                patch: TaskPatch::status(status),
            }
            .into(),
            Self::DeleteTask { todolist_id, id } => TasksAction::DeleteTask { todolist_id, id }.into(),
        }
    }
}

/// Dispatch an interaction
///
/// # Errors
///
/// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
pub async fn interact(store: &AppStore, interaction: Interaction) -> Result<EffectHandle, StoreError> {
    let action = interaction.into_action();
    tracing::info!(action = action.action_type(), "Dispatching interaction");
    metrics::counter!("view.interactions.total", "action" => action.action_type()).increment(1);
    store.send(action).await
}
