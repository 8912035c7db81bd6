//! # Tasklist Testing
//!
//! Testing utilities and helpers for the tasklist client.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given/When/Then harness for slice reducers
//! - [`MockTransport`]: in-memory backend speaking the todo-list and films API
//! - [`RecordingNotifier`]: captures user notices
//! - [`fixtures`] and [`properties`]: entity builders and proptest strategies
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_testing::{MockTransport, RecordingNotifier};
//!
//! #[tokio::test]
//! async fn creates_a_list() {
//!     let backend = Arc::new(MockTransport::new());
//!     let store = app_store(backend.clone(), Arc::new(RecordingNotifier::new()));
//!
//!     store.send(RootAction::Todolists(TodolistsAction::CreateTodolist {
//!         title: "Groceries".into(),
//!     })).await?;
//!     store.settled().await;
//!
//!     assert_eq!(backend.todolists().len(), 1);
//! }
//! ```

use chrono::{DateTime, Utc};
use std::sync::{Mutex, PoisonError};
use tasklist_core::environment::{Clock, Notice, Notifier};

pub mod mock_transport;
pub mod reducer_test;

pub use mock_transport::MockTransport;
pub use reducer_test::{assertions, ReducerTest};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Mutex, Notice, Notifier, PoisonError, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use tasklist_testing::mocks::FixedClock;
    /// use tasklist_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Notifier that records every notice instead of showing it
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        notices: Mutex<Vec<Notice>>,
    }

    impl RecordingNotifier {
        /// Create an empty recorder
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Notices delivered so far
        #[must_use]
        pub fn notices(&self) -> Vec<Notice> {
            self.notices
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Number of notices delivered so far
        #[must_use]
        pub fn count(&self) -> usize {
            self.notices.lock().unwrap_or_else(PoisonError::into_inner).len()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: &Notice) {
            self.notices
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(notice.clone());
        }
    }
}

/// Entity builders for tests
pub mod fixtures {
    use serde_json::{json, Value};
    use tasklist_api::{Film, Task, TaskId, TaskPriority, TaskStatus, Todolist, TodolistId};

    /// Timestamp every fixture is created at
    pub const ADDED_DATE: &str = "2025-01-01T00:00:00";

    /// A todo list
    #[must_use]
    pub fn todolist(id: &str, title: &str) -> Todolist {
        Todolist {
            id: TodolistId::new(id),
            title: title.to_string(),
            order: 0,
            added_date: ADDED_DATE.to_string(),
        }
    }

    /// A new task in `todolist_id`
    #[must_use]
    pub fn task(id: &str, todolist_id: &str, title: &str) -> Task {
        Task {
            id: TaskId::new(id),
            todo_list_id: TodolistId::new(todolist_id),
            title: title.to_string(),
            description: None,
            status: TaskStatus::New,
            priority: TaskPriority::Low,
            order: 0,
            added_date: ADDED_DATE.to_string(),
            start_date: None,
            deadline: None,
        }
    }

    /// A film
    #[must_use]
    pub fn film(id: &str, name: &str, rating: f64) -> Film {
        Film {
            id: id.to_string(),
            name_original: name.to_string(),
            description: format!("{name} description"),
            rating_imdb: rating,
        }
    }

    /// A valid films response body holding `films`
    #[must_use]
    pub fn films_body(films: &[Film]) -> Value {
        json!({
            "total": films.len().max(1),
            "messages": [],
            "page": 1,
            "pageCount": 1,
            "data": films,
        })
    }
}

/// Property-based testing utilities
pub mod properties {
    use proptest::prelude::*;
    use tasklist_api::{Task, Todolist};

    /// A title the backend accepts (1 to 100 characters, not blank)
    pub fn valid_title() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z0-9 ]{0,40}"
    }

    /// Todo lists with unique ids
    pub fn todolists(max: usize) -> impl Strategy<Value = Vec<Todolist>> {
        prop::collection::vec(valid_title(), 0..max).prop_map(|titles| {
            titles
                .into_iter()
                .enumerate()
                .map(|(index, title)| super::fixtures::todolist(&format!("list-{index}"), &title))
                .collect()
        })
    }

    /// Tasks with unique ids spread over `lists` todo lists
    pub fn tasks(lists: usize, max: usize) -> impl Strategy<Value = Vec<Task>> {
        prop::collection::vec((valid_title(), 0..lists.max(1)), 0..max).prop_map(|entries| {
            entries
                .into_iter()
                .enumerate()
                .map(|(index, (title, list))| {
                    super::fixtures::task(&format!("task-{index}"), &format!("list-{list}"), &title)
                })
                .collect()
        })
    }
}

/// Install a `tracing` subscriber that writes through the test harness
///
/// Safe to call from every test; only the first call installs.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{test_clock, FixedClock, RecordingNotifier};
