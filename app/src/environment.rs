//! Injected dependencies for the slice reducers.

use crate::config::Config;
use std::sync::Arc;
use tasklist_api::{FilmsApi, HttpTransport, TasksApi, TodolistsApi, Transport};
use tasklist_core::environment::{Clock, Notice, Notifier, SystemClock};

/// Environment dependencies for every slice
#[derive(Clone)]
pub struct AppEnvironment {
    /// Todo-list endpoints
    pub todolists: TodolistsApi,
    /// Task endpoints
    pub tasks: TasksApi,
    /// Films endpoint
    pub films: FilmsApi,
    /// Delivers user-facing notices
    pub notifier: Arc<dyn Notifier>,
    /// Clock for notice timestamps
    pub clock: Arc<dyn Clock>,
}

impl AppEnvironment {
    /// Creates an environment over a todo-list transport and a films transport
    #[must_use]
    pub fn new(
        api: Arc<dyn Transport>,
        films: Arc<dyn Transport>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            todolists: TodolistsApi::new(Arc::clone(&api)),
            tasks: TasksApi::new(api),
            films: FilmsApi::new(films),
            notifier,
            clock,
        }
    }

    /// Production environment: HTTP transports, console notices, system clock
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(HttpTransport::new(config.api_config())),
            Arc::new(HttpTransport::new(config.films_api_config())),
            Arc::new(ConsoleNotifier),
            Arc::new(SystemClock),
        )
    }
}

/// Prints notices to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        eprintln!("! {}", notice.title);
        for detail in &notice.details {
            eprintln!("  - {detail}");
        }
    }
}
