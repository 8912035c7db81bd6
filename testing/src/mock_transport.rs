//! In-memory backend speaking the todo-list and films API
//!
//! [`MockTransport`] implements [`Transport`] over plain collections so store
//! level tests can run the real resource modules without a network. It
//! answers with the same envelopes the real backend sends, records every
//! request, and can be told to fail the next call.

use crate::mocks::test_clock;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tasklist_api::{
    ApiError, ApiRequest, BaseResponse, Film, ItemData, Method, Task, TaskId, TaskPriority, TaskStatus,
    Todolist, TodolistId, Transport,
};
use tasklist_core::environment::Clock;

/// Longest title the backend accepts
pub const MAX_TITLE_LEN: usize = 100;

/// Body of a task update as the backend reads it
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskModel {
    title: String,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    start_date: Option<String>,
    deadline: Option<String>,
}

struct Backend {
    todolists: Vec<Todolist>,
    tasks: Vec<Task>,
    films: Value,
    next_id: u64,
    failures: VecDeque<ApiError>,
    requests: Vec<ApiRequest>,
}

impl Backend {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    fn handle(&mut self, request: &ApiRequest) -> Result<Value, ApiError> {
        let path = request.path.trim_matches('/');
        let segments: Vec<&str> = path.split('/').collect();

        match (request.method, segments.as_slice()) {
            (Method::Get, ["films"]) => Ok(self.films.clone()),
            (Method::Get, ["todo-lists"]) => to_value(&self.todolists),
            (Method::Post, ["todo-lists"]) => self.create_todolist(request.body.as_ref()),
            (Method::Put, ["todo-lists", id]) => self.rename_todolist(id, request.body.as_ref()),
            (Method::Delete, ["todo-lists", id]) => {
                self.todolists.retain(|list| list.id.as_str() != *id);
                self.tasks.retain(|task| task.todo_list_id.as_str() != *id);
                to_value(&BaseResponse::success(json!({})))
            },
            (Method::Get, ["todo-lists", list, "tasks"]) => Ok(self.list_tasks(list)),
            (Method::Post, ["todo-lists", list, "tasks"]) => self.create_task(list, request.body.as_ref()),
            (Method::Put, ["todo-lists", list, "tasks", id]) => {
                self.update_task(list, id, request.body.as_ref())
            },
            (Method::Delete, ["todo-lists", list, "tasks", id]) => {
                let before = self.tasks.len();
                self.tasks
                    .retain(|task| !(task.todo_list_id.as_str() == *list && task.id.as_str() == *id));
                if self.tasks.len() == before {
                    return failure("Task not found");
                }
                to_value(&BaseResponse::success(json!({})))
            },
            _ => Err(ApiError::Status {
                status: 404,
                message: format!("No route for {} /{path}", request.method),
            }),
        }
    }

    fn create_todolist(&mut self, body: Option<&Value>) -> Result<Value, ApiError> {
        let title = match checked_title(body) {
            Ok(title) => title,
            Err(message) => return failure(message),
        };
        let list = Todolist {
            id: TodolistId::new(self.next_id("todolist")),
            title,
            order: 0,
            added_date: added_date(),
        };
        self.todolists.insert(0, list.clone());
        to_value(&BaseResponse::success(ItemData { item: list }))
    }

    fn rename_todolist(&mut self, id: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        let title = match checked_title(body) {
            Ok(title) => title,
            Err(message) => return failure(message),
        };
        match self.todolists.iter_mut().find(|list| list.id.as_str() == id) {
            Some(list) => {
                list.title = title;
                to_value(&BaseResponse::success(json!({})))
            },
            None => failure("Todolist not found"),
        }
    }

    fn list_tasks(&self, list: &str) -> Value {
        if !self.todolists.iter().any(|l| l.id.as_str() == list) {
            return json!({ "items": [], "totalCount": 0, "error": "Todolist not found" });
        }
        let items: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|task| task.todo_list_id.as_str() == list)
            .collect();
        json!({ "items": items, "totalCount": items.len(), "error": null })
    }

    fn create_task(&mut self, list: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        let title = match checked_title(body) {
            Ok(title) => title,
            Err(message) => return failure(message),
        };
        if !self.todolists.iter().any(|l| l.id.as_str() == list) {
            return failure("Todolist not found");
        }
        let task = Task {
            id: TaskId::new(self.next_id("task")),
            todo_list_id: TodolistId::new(list),
            title,
            description: None,
            status: TaskStatus::New,
            priority: TaskPriority::Low,
            order: 0,
            added_date: added_date(),
            start_date: None,
            deadline: None,
        };
        self.tasks.insert(0, task.clone());
        to_value(&BaseResponse::success(ItemData { item: task }))
    }

    fn update_task(&mut self, list: &str, id: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        let model: TaskModel = body
            .cloned()
            .and_then(|body| serde_json::from_value(body).ok())
            .ok_or_else(|| ApiError::Status {
                status: 400,
                message: "Malformed task model".to_string(),
            })?;
        if let Err(message) = check_title(&model.title) {
            return failure(message);
        }
        let Some(task) = self
            .tasks
            .iter_mut()
            .find(|task| task.todo_list_id.as_str() == list && task.id.as_str() == id)
        else {
            return failure("Task not found");
        };
        task.title = model.title;
        task.description = model.description;
        task.status = model.status;
        task.priority = model.priority;
        task.start_date = model.start_date;
        task.deadline = model.deadline;
        let item = task.clone();
        to_value(&BaseResponse::success(ItemData { item }))
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

fn failure(message: &str) -> Result<Value, ApiError> {
    to_value(&BaseResponse::failure(1, vec![message.to_string()]))
}

fn added_date() -> String {
    test_clock().now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn check_title(title: &str) -> Result<(), &'static str> {
    if title.trim().is_empty() {
        Err("The Title field is required.")
    } else if title.chars().count() > MAX_TITLE_LEN {
        Err("The field Title must be a string with a maximum length of 100.")
    } else {
        Ok(())
    }
}

fn checked_title(body: Option<&Value>) -> Result<String, &'static str> {
    let title = body
        .and_then(|body| body.get("title"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    check_title(title)?;
    Ok(title.to_string())
}

/// A valid two-film response
fn default_films() -> Value {
    let films = [
        Film {
            id: "1".to_string(),
            name_original: "Heat".to_string(),
            description: "A group of professional bank robbers".to_string(),
            rating_imdb: 8.3,
        },
        Film {
            id: "2".to_string(),
            name_original: "Ronin".to_string(),
            description: "A freelancing former US intelligence agent".to_string(),
            rating_imdb: 7.2,
        },
    ];
    json!({ "total": 2, "messages": [], "page": 1, "pageCount": 1, "data": films })
}

/// In-memory [`Transport`]
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tasklist_api::TodolistsApi;
/// use tasklist_testing::MockTransport;
///
/// # tokio_test::block_on(async {
/// let backend = Arc::new(MockTransport::new());
/// let api = TodolistsApi::new(backend.clone());
///
/// let created = api.create("Groceries").await.unwrap();
/// assert_eq!(created.id.as_str(), "todolist-1");
/// assert_eq!(backend.todolists().len(), 1);
/// # });
/// ```
pub struct MockTransport {
    backend: Mutex<Backend>,
    latency: Option<Duration>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// An empty backend serving the default films page
    #[must_use]
    pub fn new() -> Self {
        Self {
            backend: Mutex::new(Backend {
                todolists: Vec::new(),
                tasks: Vec::new(),
                films: default_films(),
                next_id: 0,
                failures: VecDeque::new(),
                requests: Vec::new(),
            }),
            latency: None,
        }
    }

    /// Seed the stored todo lists
    #[must_use]
    pub fn with_todolists(self, todolists: Vec<Todolist>) -> Self {
        self.lock().todolists = todolists;
        self
    }

    /// Seed the stored tasks
    #[must_use]
    pub fn with_tasks(self, tasks: Vec<Task>) -> Self {
        self.lock().tasks = tasks;
        self
    }

    /// Serve `body` from `GET films`, valid or not
    #[must_use]
    pub fn with_films_response(self, body: Value) -> Self {
        self.lock().films = body;
        self
    }

    /// Delay every response by `latency`
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Fail the next request with `error` instead of handling it
    ///
    /// Queued failures are consumed one per request, in order.
    pub fn fail_next(&self, error: ApiError) {
        self.lock().failures.push_back(error);
    }

    /// Todo lists currently stored
    #[must_use]
    pub fn todolists(&self) -> Vec<Todolist> {
        self.lock().todolists.clone()
    }

    /// Tasks currently stored
    #[must_use]
    pub fn tasks(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    /// Every request received, in arrival order
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().requests.clone()
    }

    /// Number of requests received
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Number of requests received with `method` on `path`
    #[must_use]
    pub fn count_of(&self, method: Method, path: &str) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path.trim_matches('/') == path.trim_matches('/'))
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Backend> {
        self.backend.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for MockTransport {
    fn request(
        &self,
        request: ApiRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Value, ApiError>> + Send + '_>> {
        Box::pin(async move {
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            let mut backend = self.lock();
            backend.requests.push(request.clone());
            if let Some(error) = backend.failures.pop_front() {
                return Err(error);
            }
            backend.handle(&request)
        })
    }
}
