//! Todo lists

use crate::client::{ApiRequest, Transport};
use crate::envelope;
use crate::error::ApiError;
use crate::types::{Todolist, TodolistId};
use serde_json::json;
use std::sync::Arc;

/// `/todo-lists` endpoints
#[derive(Clone)]
pub struct TodolistsApi {
    transport: Arc<dyn Transport>,
}

impl TodolistsApi {
    /// Create the module over `transport`
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// `GET /todo-lists`
    ///
    /// # Errors
    ///
    /// Transport, status and decode failures.
    pub async fn list(&self) -> Result<Vec<Todolist>, ApiError> {
        let body = self.transport.request(ApiRequest::get("/todo-lists")).await?;
        envelope::decode(body)
    }

    /// `POST /todo-lists` with `{title}`; returns the created list
    ///
    /// # Errors
    ///
    /// Transport, status, decode and application failures.
    pub async fn create(&self, title: &str) -> Result<Todolist, ApiError> {
        let body = self
            .transport
            .request(ApiRequest::post("/todo-lists", json!({ "title": title })))
            .await?;
        envelope::item(body)
    }

    /// `DELETE /todo-lists/{id}`
    ///
    /// # Errors
    ///
    /// Transport, status, decode and application failures.
    pub async fn remove(&self, id: &TodolistId) -> Result<(), ApiError> {
        let body = self
            .transport
            .request(ApiRequest::delete(format!("/todo-lists/{id}")))
            .await?;
        envelope::ack(body)
    }

    /// `PUT /todo-lists/{id}` with `{title}`
    ///
    /// # Errors
    ///
    /// Transport, status, decode and application failures.
    pub async fn rename(&self, id: &TodolistId, title: &str) -> Result<(), ApiError> {
        let body = self
            .transport
            .request(ApiRequest::put(format!("/todo-lists/{id}"), json!({ "title": title })))
            .await?;
        envelope::ack(body)
    }
}
