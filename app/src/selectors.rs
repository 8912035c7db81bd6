//! Read-only views over [`RootState`].

use crate::slices::app::AppStatus;
use crate::state::RootState;
use tasklist_api::{Film, Task, TaskStatus, Todolist, TodolistId};
use tasklist_core::lifecycle::RequestStatus;

/// Every todo list, in display order
#[must_use]
pub fn select_todolists(state: &RootState) -> &[Todolist] {
    state.todolists.items.as_slice()
}

/// One todo list by id
#[must_use]
pub fn select_todolist<'a>(state: &'a RootState, id: &TodolistId) -> Option<&'a Todolist> {
    state.todolists.items.get(id)
}

/// Tasks belonging to `todolist_id`, matched on each task's `todoListId`
#[must_use]
pub fn select_tasks_for<'a>(state: &'a RootState, todolist_id: &TodolistId) -> Vec<&'a Task> {
    state
        .tasks
        .by_list
        .values()
        .flat_map(|tasks| tasks.iter())
        .filter(|task| task.todo_list_id == *todolist_id)
        .collect()
}

/// `(completed, total)` task counts of one list
#[must_use]
pub fn select_progress(state: &RootState, todolist_id: &TodolistId) -> (usize, usize) {
    let tasks = select_tasks_for(state, todolist_id);
    let completed = tasks
        .iter()
        .filter(|task| task.status == TaskStatus::Completed)
        .count();
    (completed, tasks.len())
}

/// Every film, in service order
#[must_use]
pub fn select_films(state: &RootState) -> &[Film] {
    state.films.items.as_slice()
}

/// Global request status
#[must_use]
pub fn select_app_status(state: &RootState) -> AppStatus {
    state.app.status
}

/// Last error message, if not dismissed
#[must_use]
pub fn select_app_error(state: &RootState) -> Option<&str> {
    state.app.error.as_deref()
}

/// Whether any slice has a request in flight
#[must_use]
pub fn select_is_loading(state: &RootState) -> bool {
    [&state.todolists.status, &state.tasks.status, &state.films.status]
        .into_iter()
        .any(RequestStatus::is_pending)
}
