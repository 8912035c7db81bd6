//! # Tasklist API Client
//!
//! REST client for the todo-list backend and the films service.
//!
//! ## Layers
//!
//! - [`client`]: the [`Transport`] trait and its reqwest implementation
//! - [`envelope`]: the generic `{resultCode, messages, fieldsErrors, data}` wrapper
//! - [`validation`]: schema checks on decoded responses
//! - [`resources`]: one module per entity, one HTTP call per operation
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tasklist_api::{ApiConfig, HttpTransport, TodolistsApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::new("https://social-network.samuraijs.com/api/1.1")
//!         .with_token(std::env::var("TASKLIST_TOKEN").ok());
//!     let todolists = TodolistsApi::new(Arc::new(HttpTransport::new(config)));
//!
//!     let created = todolists.create("Groceries").await?;
//!     println!("Created {} ({})", created.title, created.id);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod envelope;
pub mod error;
pub mod resources;
pub mod types;
pub mod validation;

// Re-export main types for convenience
pub use client::{ApiConfig, ApiRequest, HttpTransport, Method, Transport};
pub use envelope::{BaseResponse, FieldError, ItemData};
pub use error::ApiError;
pub use resources::{FilmsApi, TasksApi, TodolistsApi};
pub use types::{
    Film, FilmsResponse, Task, TaskId, TaskPatch, TaskPriority, TaskStatus, Todolist, TodolistId,
    TodolistPatch, UpdateTaskModel,
};
pub use validation::{Validate, ValidationError, ValidationIssue};
