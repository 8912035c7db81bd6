//! Task-list client.
//!
//! State lives in one store made of four slices:
//!
//! - `todolists` and `tasks` mirror the todo-list backend
//! - `films` holds one validated page of the films service
//! - `app` follows every request and keeps the global status, the last
//!   error and the notices raised so far
//!
//! Each backend request moves its slice through pending, then fulfilled or
//! rejected. The [`view`] module mounts the store, renders it as text and
//! turns CLI arguments into actions.
//!
//! # Quick Start
//!
//! ```no_run
//! use tasklist_app::{app_store, view, AppEnvironment, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env();
//! let store = app_store(AppEnvironment::from_config(&config));
//!
//! view::mount(&store).await?;
//! store.settled().await;
//!
//! let text = store.state(view::render).await;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod environment;
pub mod selectors;
pub mod slices;
pub mod state;
pub mod view;

pub use config::Config;
pub use environment::{AppEnvironment, ConsoleNotifier};
pub use slices::app::{AppAction, AppState, AppStatus};
pub use slices::films::{FilmsAction, FilmsState};
pub use slices::tasks::{TasksAction, TasksState};
pub use slices::todolists::{TodolistsAction, TodolistsState};
pub use state::{app_store, AppStore, RootAction, RootReducer, RootState};
pub use view::{Interaction, InteractionError};
