//! End-to-end tests: the root store over the in-memory backend.
//!
//! Each test mounts the view (or sends actions directly), waits for the
//! store to settle and then checks the state and the backend.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tasklist_api::{ApiError, Method, TaskId, TaskPatch, TaskPriority, TaskStatus, TodolistId};
use tasklist_app::{
    app_store, view, AppEnvironment, AppStatus, AppStore, FilmsAction, Interaction, RootState, TasksAction,
    TodolistsAction,
};
use tasklist_testing::{fixtures, properties, test_clock, MockTransport, RecordingNotifier};

// ============================================================================
// Test Fixtures
// ============================================================================

struct Harness {
    store: AppStore,
    backend: Arc<MockTransport>,
    notifier: Arc<RecordingNotifier>,
}

impl Harness {
    fn new(backend: MockTransport) -> Self {
        let backend = Arc::new(backend);
        let notifier = Arc::new(RecordingNotifier::new());
        let environment = AppEnvironment::new(
            backend.clone(),
            backend.clone(),
            notifier.clone(),
            Arc::new(test_clock()),
        );
        Self {
            store: app_store(environment),
            backend,
            notifier,
        }
    }

    /// Two lists, three tasks
    fn seeded() -> Self {
        Self::new(
            MockTransport::new()
                .with_todolists(vec![fixtures::todolist("l1", "Work"), fixtures::todolist("l2", "Home")])
                .with_tasks(vec![
                    fixtures::task("t1", "l1", "Report"),
                    fixtures::task("t2", "l1", "Slides"),
                    fixtures::task("t3", "l2", "Dishes"),
                ]),
        )
    }

    async fn mounted(self) -> Self {
        view::mount(&self.store).await.unwrap();
        self.store.settled().await;
        self
    }

    async fn dispatch(&self, action: impl Into<tasklist_app::RootAction>) {
        self.store.send(action.into()).await.unwrap();
        self.store.settled().await;
    }

    async fn snapshot(&self) -> RootState {
        self.store.state(Clone::clone).await
    }
}

// ============================================================================
// Mounting
// ============================================================================

#[tokio::test]
async fn test_mount_loads_lists_tasks_and_films() {
    let harness = Harness::seeded().mounted().await;
    let state = harness.snapshot().await;

    assert_eq!(state.todolists.items.len(), 2);
    assert_eq!(state.tasks.count(), 3);
    assert_eq!(state.films.items.len(), 2);
    assert_eq!(state.app.status, AppStatus::Succeeded);
    assert_eq!(state.app.in_flight, 0);
    assert!(state.app.error.is_none());

    assert_eq!(harness.backend.count_of(Method::Get, "/todo-lists"), 1);
    assert_eq!(harness.backend.count_of(Method::Get, "/todo-lists/l1/tasks"), 1);
    assert_eq!(harness.backend.count_of(Method::Get, "/todo-lists/l2/tasks"), 1);
    assert_eq!(harness.backend.count_of(Method::Get, "films"), 1);
}

#[tokio::test]
async fn test_app_stays_loading_while_requests_are_in_flight() {
    let harness = Harness::new(MockTransport::new().with_latency(Duration::from_millis(20)));

    view::mount(&harness.store).await.unwrap();
    let during = harness.snapshot().await;
    assert_eq!(during.app.status, AppStatus::Loading);
    assert_eq!(during.app.in_flight, 2);

    harness.store.settled().await;
    let after = harness.snapshot().await;
    assert_eq!(after.app.status, AppStatus::Succeeded);
    assert_eq!(after.app.in_flight, 0);
}

#[tokio::test]
async fn test_render_after_mount() {
    let harness = Harness::seeded().mounted().await;
    let text = harness.store.state(view::render).await;

    assert!(text.starts_with("Status: succeeded\n"));
    assert!(text.contains("  Work [l1] 0/2\n"));
    assert!(text.contains("    [ ] Dishes (new) [t3]\n"));
    assert!(text.contains("Films (2)\n"));
}

#[tokio::test]
async fn test_inspect_serializes_state() {
    let harness = Harness::seeded().mounted().await;
    let value = view::inspect(&harness.store).await.unwrap();

    assert_eq!(value["app"]["status"], json!("succeeded"));
    assert_eq!(value["todolists"]["items"][0]["id"], json!("l1"));
}

// ============================================================================
// Todo lists
// ============================================================================

#[tokio::test]
async fn test_create_uses_id_from_envelope() {
    let harness = Harness::seeded().mounted().await;

    harness
        .dispatch(TodolistsAction::CreateTodolist {
            title: "Groceries".to_string(),
        })
        .await;

    let state = harness.snapshot().await;
    let created = state.todolists.items.get(&TodolistId::new("todolist-1")).unwrap();
    assert_eq!(created.title, "Groceries");
    assert_eq!(state.todolists.items.len(), 3);
    assert_eq!(harness.backend.todolists()[0].id, TodolistId::new("todolist-1"));
}

#[tokio::test]
async fn test_add_then_remove_restores_collection() {
    let harness = Harness::seeded().mounted().await;
    let before = harness.snapshot().await.todolists.items;

    harness
        .dispatch(TodolistsAction::CreateTodolist {
            title: "Temporary".to_string(),
        })
        .await;
    harness
        .dispatch(TodolistsAction::DeleteTodolist {
            id: TodolistId::new("todolist-1"),
        })
        .await;

    assert_eq!(harness.snapshot().await.todolists.items, before);
}

#[tokio::test]
async fn test_fetch_all_is_idempotent() {
    let harness = Harness::seeded().mounted().await;
    let once = harness.snapshot().await;

    harness.dispatch(TodolistsAction::FetchTodolists).await;
    let twice = harness.snapshot().await;

    assert_eq!(twice.todolists.items, once.todolists.items);
    assert_eq!(twice.tasks.by_list, once.tasks.by_list);
}

#[tokio::test]
async fn test_rejected_fetch_leaves_collection_identical() {
    let harness = Harness::seeded().mounted().await;
    let before = harness.snapshot().await;

    harness.backend.fail_next(ApiError::Transport("connection reset".to_string()));
    harness.dispatch(TodolistsAction::FetchTodolists).await;

    let after = harness.snapshot().await;
    assert_eq!(after.todolists.items, before.todolists.items);
    assert!(after.todolists.status.error().is_some());
    assert_eq!(after.app.status, AppStatus::Failed);
    assert!(after.app.error.is_some());
}

#[tokio::test]
async fn test_delete_unknown_list_is_not_an_error() {
    let harness = Harness::seeded().mounted().await;

    harness
        .dispatch(TodolistsAction::DeleteTodolist {
            id: TodolistId::new("missing"),
        })
        .await;

    let state = harness.snapshot().await;
    assert!(state.app.error.is_none());
    assert_eq!(state.app.status, AppStatus::Succeeded);
    assert_eq!(state.todolists.items.len(), 2);
}

#[tokio::test]
async fn test_delete_list_cascades_to_its_tasks() {
    let harness = Harness::seeded().mounted().await;

    harness
        .dispatch(TodolistsAction::DeleteTodolist {
            id: TodolistId::new("l1"),
        })
        .await;

    let state = harness.snapshot().await;
    assert!(state.tasks.list(&TodolistId::new("l1")).is_none());
    assert_eq!(state.tasks.count(), 1);
    assert_eq!(harness.backend.tasks().len(), 1);
}

#[tokio::test]
async fn test_blank_title_is_rejected_without_a_request() {
    let harness = Harness::seeded().mounted().await;

    harness
        .dispatch(TodolistsAction::CreateTodolist {
            title: "   ".to_string(),
        })
        .await;

    let state = harness.snapshot().await;
    assert_eq!(harness.backend.count_of(Method::Post, "/todo-lists"), 0);
    assert_eq!(state.todolists.items.len(), 2);
    assert_eq!(state.app.status, AppStatus::Failed);
}

// ============================================================================
// Tasks
// ============================================================================

#[tokio::test]
async fn test_update_changes_only_patched_fields() {
    let harness = Harness::seeded().mounted().await;
    let list = TodolistId::new("l1");
    let id = TaskId::new("t1");
    let before = harness.snapshot().await.tasks.get(&list, &id).cloned().unwrap();

    harness
        .dispatch(TasksAction::UpdateTask {
            todolist_id: list.clone(),
            id: id.clone(),
            patch: TaskPatch::status(TaskStatus::Completed),
        })
        .await;

    let state = harness.snapshot().await;
    let after = state.tasks.get(&list, &id).unwrap();
    assert_eq!(after.status, TaskStatus::Completed);
    assert_eq!(after.title, before.title);
    assert_eq!(after.priority, TaskPriority::Low);
    assert_eq!(after.added_date, before.added_date);
    assert_eq!(
        state.tasks.get(&list, &TaskId::new("t2")).unwrap().status,
        TaskStatus::New
    );

    let stored = harness.backend.tasks();
    assert_eq!(stored[0].status, TaskStatus::Completed);
}

#[tokio::test]
async fn test_interactions_round_trip_through_backend() {
    let harness = Harness::seeded().mounted().await;

    let interaction = Interaction::parse(&["add-task", "l2", "Laundry"]).unwrap().unwrap();
    view::interact(&harness.store, interaction).await.unwrap();
    harness.store.settled().await;

    let state = harness.snapshot().await;
    let home = state.tasks.list(&TodolistId::new("l2")).unwrap();
    assert_eq!(home.len(), 2);
    assert!(home.iter().any(|task| task.title == "Laundry"));

    let interaction = Interaction::parse(&["delete-task", "l2", "t3"]).unwrap().unwrap();
    view::interact(&harness.store, interaction).await.unwrap();
    harness.store.settled().await;

    let state = harness.snapshot().await;
    assert!(state.tasks.get(&TodolistId::new("l2"), &TaskId::new("t3")).is_none());
    assert!(state.app.error.is_none());
}

#[tokio::test]
async fn test_delete_unknown_task_reports_backend_message() {
    let harness = Harness::seeded().mounted().await;

    harness
        .dispatch(TasksAction::DeleteTask {
            todolist_id: TodolistId::new("l1"),
            id: TaskId::new("missing"),
        })
        .await;

    let state = harness.snapshot().await;
    assert_eq!(state.app.error.as_deref(), Some("Task not found"));
    assert_eq!(state.tasks.count(), 3);
}

// ============================================================================
// Films
// ============================================================================

#[tokio::test]
async fn test_invalid_films_page_notifies_once() {
    let harness = Harness::new(MockTransport::new().with_films_response(json!({
        "total": 10,
        "messages": [],
        "page": -1,
        "pageCount": 1,
        "data": [fixtures::film("1", "Heat", 8.3)]
    })));

    harness.dispatch(FilmsAction::FetchFilms).await;

    let state = harness.snapshot().await;
    assert!(state.films.items.is_empty());
    assert!(state.films.page.is_none());
    assert_eq!(harness.notifier.count(), 1);
    assert_eq!(state.app.notices.len(), 1);
    assert_eq!(state.app.status, AppStatus::Failed);
}

#[tokio::test]
async fn test_films_response_with_custom_data() {
    let films = [fixtures::film("7", "Alien", 8.5)];
    let harness = Harness::new(MockTransport::new().with_films_response(fixtures::films_body(&films)));

    harness.dispatch(FilmsAction::FetchFilms).await;

    let state = harness.snapshot().await;
    assert_eq!(state.films.items.as_slice(), films.as_slice());
    assert_eq!(state.films.page.as_ref().map(|page| page.page), Some(1));
    assert_eq!(harness.notifier.count(), 0);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_mount_mirrors_backend(
        todolists in properties::todolists(6),
        tasks in properties::tasks(6, 12),
    ) {
        let tasks: Vec<_> = tasks
            .into_iter()
            .filter(|task| todolists.iter().any(|list| list.id == task.todo_list_id))
            .collect();
        let expected_lists = todolists.clone();
        let expected_tasks = tasks.len();

        let state = tokio_test::block_on(async move {
            let harness = Harness::new(MockTransport::new().with_todolists(todolists).with_tasks(tasks))
                .mounted()
                .await;
            harness.snapshot().await
        });

        prop_assert_eq!(state.todolists.items.as_slice(), expected_lists.as_slice());
        prop_assert_eq!(state.tasks.count(), expected_tasks);
        prop_assert_eq!(state.app.in_flight, 0);
        prop_assert_eq!(state.app.status, AppStatus::Succeeded);
    }
}
