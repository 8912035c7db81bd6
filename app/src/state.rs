//! Root state, root action and the root reducer.
//!
//! The root reducer routes each action to the one slice that owns it and
//! lifts the slice's effects back into [`RootAction`]. The app slice also
//! sees the lifecycle of every request, so the global status follows the
//! other slices within the same dispatch.
//!
//! Two follow-ups cross slice boundaries, each as a separate action:
//!
//! - fetched todo lists trigger a task fetch per list
//! - a deleted todo list triggers [`TasksAction::TodolistRemoved`]
//!
//! Tasks that arrive for a list that is no longer loaded settle the request
//! but are not kept.

use crate::environment::AppEnvironment;
use crate::slices::app::{AppAction, AppReducer, AppState};
use crate::slices::films::{FilmsAction, FilmsReducer, FilmsState};
use crate::slices::tasks::{TasksAction, TasksReducer, TasksState};
use crate::slices::todolists::{TodolistsAction, TodolistsReducer, TodolistsState};
use serde::Serialize;
use std::sync::Arc;
use tasklist_api::TodolistId;
use tasklist_core::composition::{combine_reducers, scope_reducer, BoxedReducer, CombinedReducer};
use tasklist_core::lifecycle::{Phase, RequestError};
use tasklist_core::{async_effect, effect::Effect, reducer::Reducer, SmallVec};
use tasklist_runtime::{Store, StoreConfig};

/// The whole client state
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RootState {
    /// Global status, errors and notices
    pub app: AppState,
    /// Todo lists
    pub todolists: TodolistsState,
    /// Tasks, per todo list
    pub tasks: TasksState,
    /// Films
    pub films: FilmsState,
}

/// Every action the store accepts, one variant per slice
#[derive(Clone, Debug, PartialEq)]
pub enum RootAction {
    /// App slice
    App(AppAction),
    /// Todo lists slice
    Todolists(TodolistsAction),
    /// Tasks slice
    Tasks(TasksAction),
    /// Films slice
    Films(FilmsAction),
}

impl RootAction {
    /// `"<slice>/<Variant>"`
    #[must_use]
    pub const fn action_type(&self) -> &'static str {
        match self {
            Self::App(action) => action.action_type(),
            Self::Todolists(action) => action.action_type(),
            Self::Tasks(action) => action.action_type(),
            Self::Films(action) => action.action_type(),
        }
    }

    /// Lifecycle phase of a slice request action
    #[must_use]
    pub const fn phase(&self) -> Option<Phase> {
        match self {
            Self::App(action) => action.phase(),
            Self::Todolists(action) => action.phase(),
            Self::Tasks(action) => action.phase(),
            Self::Films(action) => action.phase(),
        }
    }

    /// Whether this action ends a request (fulfilled or rejected)
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self.phase(), Some(Phase::Fulfilled | Phase::Rejected))
    }
}

impl From<TodolistsAction> for RootAction {
    fn from(action: TodolistsAction) -> Self {
        Self::Todolists(action)
    }
}

impl From<TasksAction> for RootAction {
    fn from(action: TasksAction) -> Self {
        Self::Tasks(action)
    }
}

impl From<FilmsAction> for RootAction {
    fn from(action: FilmsAction) -> Self {
        Self::Films(action)
    }
}

impl From<AppAction> for RootAction {
    fn from(action: AppAction) -> Self {
        Self::App(action)
    }
}

// ========== Scoping ==========

fn app_state(state: &mut RootState) -> &mut AppState {
    &mut state.app
}

fn todolists_state(state: &mut RootState) -> &mut TodolistsState {
    &mut state.todolists
}

fn tasks_state(state: &mut RootState) -> &mut TasksState {
    &mut state.tasks
}

fn films_state(state: &mut RootState) -> &mut FilmsState {
    &mut state.films
}

fn todolists_action(action: RootAction) -> Option<TodolistsAction> {
    match action {
        RootAction::Todolists(action) => Some(action),
        _ => None,
    }
}

fn tasks_action(action: RootAction) -> Option<TasksAction> {
    match action {
        RootAction::Tasks(action) => Some(action),
        _ => None,
    }
}

fn films_action(action: RootAction) -> Option<FilmsAction> {
    match action {
        RootAction::Films(action) => Some(action),
        _ => None,
    }
}

/// What the app slice sees of an action
fn app_action(action: RootAction) -> Option<AppAction> {
    fn lifecycle(phase: Option<Phase>, error: Option<&RequestError>) -> Option<AppAction> {
        match phase? {
            Phase::Pending => Some(AppAction::RequestStarted),
            Phase::Fulfilled => Some(AppAction::RequestSucceeded),
            Phase::Rejected => Some(AppAction::RequestFailed {
                message: error.map(|e| e.message.clone()).unwrap_or_default(),
                notice: None,
            }),
        }
    }

    match action {
        RootAction::App(action) => Some(action),
        RootAction::Todolists(action) => lifecycle(action.phase(), action.error()),
        RootAction::Tasks(action) => lifecycle(action.phase(), action.error()),
        RootAction::Films(FilmsAction::FetchFailed { error, notice }) => Some(AppAction::RequestFailed {
            message: error.message,
            notice,
        }),
        RootAction::Films(action) => lifecycle(action.phase(), action.error()),
    }
}

/// Root reducer over [`RootState`]
#[derive(Clone)]
pub struct RootReducer {
    slices: Arc<CombinedReducer<RootState, RootAction, AppEnvironment>>,
}

impl Default for RootReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl RootReducer {
    /// Creates the root reducer over every slice
    #[must_use]
    pub fn new() -> Self {
        let slices: Vec<BoxedReducer<RootState, RootAction, AppEnvironment>> = vec![
            Box::new(scope_reducer(
                TodolistsReducer,
                todolists_state,
                todolists_action,
                RootAction::Todolists,
            )),
            Box::new(scope_reducer(TasksReducer, tasks_state, tasks_action, RootAction::Tasks)),
            Box::new(scope_reducer(FilmsReducer, films_state, films_action, RootAction::Films)),
            Box::new(scope_reducer(AppReducer, app_state, app_action, RootAction::App)),
        ];

        Self {
            slices: Arc::new(combine_reducers(slices)),
        }
    }

    /// Actions dispatched after `action` settles, across slice boundaries
    fn follow_ups(action: &RootAction) -> Vec<RootAction> {
        match action {
            RootAction::Todolists(TodolistsAction::TodolistsFetched { todolists }) => todolists
                .iter()
                .map(|todolist| {
                    RootAction::Tasks(TasksAction::FetchTasks {
                        todolist_id: todolist.id.clone(),
                    })
                })
                .collect(),
            RootAction::Todolists(TodolistsAction::TodolistDeleted { id }) => {
                vec![RootAction::Tasks(TasksAction::TodolistRemoved {
                    todolist_id: id.clone(),
                })]
            },
            _ => Vec::new(),
        }
    }

    /// The list a task fetch result belongs to, when that list is not loaded
    fn orphaned_fetch(state: &RootState, action: &RootAction) -> Option<TodolistId> {
        match action {
            RootAction::Tasks(TasksAction::TasksFetched { todolist_id, .. })
                if !state.todolists.items.contains(todolist_id) =>
            {
                Some(todolist_id.clone())
            },
            _ => None,
        }
    }
}

impl Reducer for RootReducer {
    type State = RootState;
    type Action = RootAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::trace!(action = action.action_type(), "Reducing");
        let follow_ups = Self::follow_ups(&action);
        let orphaned = Self::orphaned_fetch(state, &action);

        let mut effects = self.slices.reduce(state, action, env);
        if let Some(todolist_id) = orphaned {
            tracing::debug!(todolist_id = %todolist_id, "Dropping tasks of a list that is not loaded");
            state.tasks.by_list.remove(&todolist_id);
        }
        if !follow_ups.is_empty() {
            effects.push(Effect::Parallel(
                follow_ups
                    .into_iter()
                    .map(|follow_up| async_effect! { Some(follow_up) })
                    .collect(),
            ));
        }
        effects
    }
}

/// The client's store
pub type AppStore = Store<RootState, RootAction, AppEnvironment, RootReducer>;

/// Create a store with empty state over `environment`
#[must_use]
pub fn app_store(environment: AppEnvironment) -> AppStore {
    Store::with_config(
        RootState::default(),
        RootReducer::new(),
        environment,
        StoreConfig::default().with_broadcast_capacity(256),
    )
}
