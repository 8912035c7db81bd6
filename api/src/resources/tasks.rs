//! Tasks of a todo list

use crate::client::{ApiRequest, Transport};
use crate::envelope;
use crate::error::ApiError;
use crate::types::{GetTasksResponse, Task, TaskId, TodolistId, UpdateTaskModel};
use serde_json::json;
use std::sync::Arc;

/// `/todo-lists/{id}/tasks` endpoints
#[derive(Clone)]
pub struct TasksApi {
    transport: Arc<dyn Transport>,
}

impl TasksApi {
    /// Create the module over `transport`
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// `GET /todo-lists/{todolist_id}/tasks`
    ///
    /// # Errors
    ///
    /// Transport, status and decode failures; an `error` field in the
    /// response is reported as an application failure.
    pub async fn list(&self, todolist_id: &TodolistId) -> Result<Vec<Task>, ApiError> {
        let body = self
            .transport
            .request(ApiRequest::get(format!("/todo-lists/{todolist_id}/tasks")))
            .await?;
        let response: GetTasksResponse = envelope::decode(body)?;
        match response.error {
            Some(error) => Err(ApiError::Application {
                result_code: 1,
                messages: vec![error],
                field_errors: Vec::new(),
            }),
            None => Ok(response.items),
        }
    }

    /// `POST /todo-lists/{todolist_id}/tasks` with `{title}`
    ///
    /// # Errors
    ///
    /// Transport, status, decode and application failures.
    pub async fn create(&self, todolist_id: &TodolistId, title: &str) -> Result<Task, ApiError> {
        let body = self
            .transport
            .request(ApiRequest::post(
                format!("/todo-lists/{todolist_id}/tasks"),
                json!({ "title": title }),
            ))
            .await?;
        envelope::item(body)
    }

    /// `DELETE /todo-lists/{todolist_id}/tasks/{id}`
    ///
    /// # Errors
    ///
    /// Transport, status, decode and application failures.
    pub async fn remove(&self, todolist_id: &TodolistId, id: &TaskId) -> Result<(), ApiError> {
        let body = self
            .transport
            .request(ApiRequest::delete(format!("/todo-lists/{todolist_id}/tasks/{id}")))
            .await?;
        envelope::ack(body)
    }

    /// `PUT /todo-lists/{todolist_id}/tasks/{id}` with the full model; returns the stored task
    ///
    /// # Errors
    ///
    /// Transport, status, decode and application failures.
    pub async fn update(
        &self,
        todolist_id: &TodolistId,
        id: &TaskId,
        model: &UpdateTaskModel,
    ) -> Result<Task, ApiError> {
        let model = serde_json::to_value(model).map_err(|e| ApiError::Decode(e.to_string()))?;
        let body = self
            .transport
            .request(ApiRequest::put(format!("/todo-lists/{todolist_id}/tasks/{id}"), model))
            .await?;
        envelope::item(body)
    }
}
