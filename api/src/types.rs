//! Entity types exchanged with the backend

use serde::{Deserialize, Serialize};
use tasklist_core::{Identified, Patchable};

/// Identifier of a todo list
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodolistId(pub String);

impl TodolistId {
    /// Create an id from any string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TodolistId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodolistId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of a task
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl TaskId {
    /// Create an id from any string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A todo list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todolist {
    /// Identifier
    pub id: TodolistId,
    /// Title
    pub title: String,
    /// Backend ordering hint
    pub order: i64,
    /// Creation timestamp, as sent by the backend
    pub added_date: String,
}

/// Partial update of a todo list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodolistPatch {
    /// New title
    pub title: Option<String>,
}

impl Identified for Todolist {
    type Id = TodolistId;

    fn id(&self) -> &TodolistId {
        &self.id
    }
}

impl Patchable for Todolist {
    type Patch = TodolistPatch;

    fn apply_patch(&mut self, patch: TodolistPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
    }
}

/// Task status, sent as an integer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskStatus {
    /// Not started
    #[default]
    New,
    /// Being worked on
    InProgress,
    /// Done
    Completed,
    /// Not ready to start
    Draft,
}

impl TaskStatus {
    /// Lower-case name used by the CLI and the renderer
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Draft => "draft",
        }
    }
}

impl TryFrom<u8> for TaskStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::New),
            1 => Ok(Self::InProgress),
            2 => Ok(Self::Completed),
            3 => Ok(Self::Draft),
            other => Err(format!("unknown task status {other}")),
        }
    }
}

impl From<TaskStatus> for u8 {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::New => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Completed => 2,
            TaskStatus::Draft => 3,
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" | "0" => Ok(Self::New),
            "in-progress" | "1" => Ok(Self::InProgress),
            "completed" | "done" | "2" => Ok(Self::Completed),
            "draft" | "3" => Ok(Self::Draft),
            other => Err(format!("unknown task status '{other}'")),
        }
    }
}

/// Task priority, sent as an integer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskPriority {
    /// Low
    #[default]
    Low,
    /// Middle
    Middle,
    /// High
    High,
    /// Urgent
    Urgently,
    /// Postponed
    Later,
}

impl TryFrom<u8> for TaskPriority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Low),
            1 => Ok(Self::Middle),
            2 => Ok(Self::High),
            3 => Ok(Self::Urgently),
            4 => Ok(Self::Later),
            other => Err(format!("unknown task priority {other}")),
        }
    }
}

impl From<TaskPriority> for u8 {
    fn from(priority: TaskPriority) -> Self {
        match priority {
            TaskPriority::Low => 0,
            TaskPriority::Middle => 1,
            TaskPriority::High => 2,
            TaskPriority::Urgently => 3,
            TaskPriority::Later => 4,
        }
    }
}

/// A task inside a todo list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Identifier
    pub id: TaskId,
    /// Owning todo list
    pub todo_list_id: TodolistId,
    /// Title
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Status
    #[serde(default)]
    pub status: TaskStatus,
    /// Priority
    #[serde(default)]
    pub priority: TaskPriority,
    /// Backend ordering hint
    #[serde(default)]
    pub order: i64,
    /// Creation timestamp, as sent by the backend
    pub added_date: String,
    /// Planned start
    #[serde(default)]
    pub start_date: Option<String>,
    /// Deadline
    #[serde(default)]
    pub deadline: Option<String>,
}

/// Partial update of a task; `None` fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New status
    pub status: Option<TaskStatus>,
    /// New priority
    pub priority: Option<TaskPriority>,
    /// New start date
    pub start_date: Option<String>,
    /// New deadline
    pub deadline: Option<String>,
}

impl TaskPatch {
    /// A patch that only changes the status
    #[must_use]
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// A patch that only changes the title
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

impl Identified for Task {
    type Id = TaskId;

    fn id(&self) -> &TaskId {
        &self.id
    }
}

impl Patchable for Task {
    type Patch = TaskPatch;

    fn apply_patch(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = Some(start_date);
        }
        if let Some(deadline) = patch.deadline {
            self.deadline = Some(deadline);
        }
    }
}

/// Body of a task update: the backend replaces every field, so the model is
/// the current task with the patch applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskModel {
    /// Title
    pub title: String,
    /// Description
    pub description: Option<String>,
    /// Status
    pub status: TaskStatus,
    /// Priority
    pub priority: TaskPriority,
    /// Start date
    pub start_date: Option<String>,
    /// Deadline
    pub deadline: Option<String>,
}

impl UpdateTaskModel {
    /// Model for `task` with `patch` applied
    #[must_use]
    pub fn patched(task: &Task, patch: &TaskPatch) -> Self {
        let mut next = task.clone();
        next.apply_patch(patch.clone());
        Self::from(&next)
    }
}

impl From<&Task> for UpdateTaskModel {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            start_date: task.start_date.clone(),
            deadline: task.deadline.clone(),
        }
    }
}

/// Response of the task list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTasksResponse {
    /// Tasks of the list
    pub items: Vec<Task>,
    /// Total number of tasks on the backend
    pub total_count: i64,
    /// Error text, set when the request failed
    #[serde(default)]
    pub error: Option<String>,
}

/// A film from the films service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    /// Identifier
    pub id: String,
    /// Original title
    pub name_original: String,
    /// Synopsis
    pub description: String,
    /// IMDb rating
    pub rating_imdb: f64,
}

impl Identified for Film {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

/// Response of the films endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmsResponse {
    /// Total number of films
    pub total: i64,
    /// Service messages
    pub messages: Vec<String>,
    /// Current page, starting at 1
    pub page: i64,
    /// Number of pages
    pub page_count: i64,
    /// Films on this page
    pub data: Vec<Film>,
}
