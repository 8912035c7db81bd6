//! HTTP transport and resource modules against a mock server

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use serde_json::{json, Value};
use std::sync::Arc;
use tasklist_api::{
    ApiConfig, ApiError, ApiRequest, FilmsApi, HttpTransport, TaskId, TaskPatch, TaskStatus, TasksApi,
    TodolistId, TodolistsApi, Transport, UpdateTaskModel,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn todolist(id: &str, title: &str) -> Value {
    json!({ "id": id, "title": title, "order": 0, "addedDate": "2024-05-01T10:00:00" })
}

fn task(id: &str, list: &str, title: &str, status: u8) -> Value {
    json!({
        "id": id,
        "todoListId": list,
        "title": title,
        "description": null,
        "status": status,
        "priority": 1,
        "order": 0,
        "addedDate": "2024-05-01T10:00:00",
        "startDate": null,
        "deadline": null
    })
}

fn envelope(data: Value) -> Value {
    json!({ "resultCode": 0, "messages": [], "fieldsErrors": [], "data": data })
}

async fn server_and_config() -> (MockServer, ApiConfig) {
    let server = MockServer::start().await;
    let config = ApiConfig::new(format!("{}/api/1.1", server.uri()));
    (server, config)
}

#[tokio::test]
async fn test_auth_headers_sent_when_configured() {
    let (server, config) = server_and_config().await;
    Mock::given(method("GET"))
        .and(path("/api/1.1/todo-lists"))
        .and(header("API-KEY", "key-123"))
        .and(header("Authorization", "Bearer token-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([todolist("1", "Work")])))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(
        config
            .with_token(Some("token-abc".to_string()))
            .with_api_key(Some("key-123".to_string())),
    );
    let api = TodolistsApi::new(Arc::new(transport));

    let lists = api.list().await.unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].title, "Work");
}

#[tokio::test]
async fn test_no_auth_headers_without_token() {
    let (server, config) = server_and_config().await;
    Mock::given(method("GET"))
        .and(path("/api/1.1/todo-lists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let api = TodolistsApi::new(Arc::new(HttpTransport::new(config)));
    assert!(api.list().await.unwrap().is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
    assert!(requests[0].headers.get("api-key").is_none());
}

#[tokio::test]
async fn test_create_todolist_unwraps_item() {
    let (server, config) = server_and_config().await;
    Mock::given(method("POST"))
        .and(path("/api/1.1/todo-lists"))
        .and(body_json(json!({ "title": "Groceries" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!({ "item": todolist("list-42", "Groceries") }))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = TodolistsApi::new(Arc::new(HttpTransport::new(config)));
    let created = api.create("Groceries").await.unwrap();

    assert_eq!(created.id, TodolistId::new("list-42"));
    assert_eq!(created.title, "Groceries");
}

#[tokio::test]
async fn test_rename_and_remove_acknowledge() {
    let (server, config) = server_and_config().await;
    Mock::given(method("PUT"))
        .and(path("/api/1.1/todo-lists/list-1"))
        .and(body_json(json!({ "title": "Errands" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/1.1/todo-lists/list-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .expect(1)
        .mount(&server)
        .await;

    let api = TodolistsApi::new(Arc::new(HttpTransport::new(config)));
    let id = TodolistId::new("list-1");

    api.rename(&id, "Errands").await.unwrap();
    api.remove(&id).await.unwrap();
}

#[tokio::test]
async fn test_envelope_failure_is_application_error() {
    let (server, config) = server_and_config().await;
    Mock::given(method("POST"))
        .and(path("/api/1.1/todo-lists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultCode": 1,
            "messages": ["Todolist title is too long"],
            "fieldsErrors": [],
            "data": {}
        })))
        .mount(&server)
        .await;

    let api = TodolistsApi::new(Arc::new(HttpTransport::new(config)));
    let result = api.create(&"x".repeat(150)).await;

    assert!(matches!(
        result,
        Err(ApiError::Application { result_code: 1, ref messages, .. }) if messages[0] == "Todolist title is too long"
    ));
}

#[tokio::test]
async fn test_error_statuses_map_to_status_error() {
    let (server, config) = server_and_config().await;
    Mock::given(method("GET"))
        .and(path("/api/1.1/todo-lists"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/1.1/todo-lists/boom"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = TodolistsApi::new(Arc::new(HttpTransport::new(config)));

    assert_eq!(
        api.list().await,
        Err(ApiError::Status {
            status: 401,
            message: "Unauthorized".to_string(),
        })
    );
    assert!(matches!(
        api.remove(&TodolistId::new("boom")).await,
        Err(ApiError::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_empty_body_decodes_as_null() {
    let (server, config) = server_and_config().await;
    Mock::given(method("DELETE"))
        .and(path("/api/1.1/anything"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(config);
    let body = transport.request(ApiRequest::delete("/anything")).await.unwrap();
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let (server, config) = server_and_config().await;
    Mock::given(method("GET"))
        .and(path("/api/1.1/todo-lists"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let api = TodolistsApi::new(Arc::new(HttpTransport::new(config)));
    assert!(matches!(api.list().await, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Port 9 (discard) on localhost is closed in test environments
    let transport = HttpTransport::new(ApiConfig::new("http://127.0.0.1:9"));
    let result = transport.request(ApiRequest::get("/todo-lists")).await;
    assert!(matches!(result, Err(ApiError::Transport(_))));
}

#[tokio::test]
async fn test_task_endpoints() {
    let (server, config) = server_and_config().await;
    Mock::given(method("GET"))
        .and(path("/api/1.1/todo-lists/l1/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [task("t1", "l1", "Milk", 0), task("t2", "l1", "Bread", 2)],
            "totalCount": 2,
            "error": null
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/1.1/todo-lists/l1/tasks/t1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(json!({ "item": task("t1", "l1", "Milk", 2) }))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = TasksApi::new(Arc::new(HttpTransport::new(config)));
    let list = TodolistId::new("l1");

    let tasks = api.list(&list).await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[1].status, TaskStatus::Completed);

    let model = UpdateTaskModel::patched(&tasks[0], &TaskPatch::status(TaskStatus::Completed));
    let updated = api.update(&list, &TaskId::new("t1"), &model).await.unwrap();
    assert_eq!(updated.status, TaskStatus::Completed);

    let requests = server.received_requests().await.unwrap();
    let put: Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(put["status"], json!(2));
    assert_eq!(put["title"], json!("Milk"));
}

#[tokio::test]
async fn test_task_list_error_field() {
    let (server, config) = server_and_config().await;
    Mock::given(method("GET"))
        .and(path("/api/1.1/todo-lists/l9/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [],
            "totalCount": 0,
            "error": "Todolist not found"
        })))
        .mount(&server)
        .await;

    let api = TasksApi::new(Arc::new(HttpTransport::new(config)));
    assert!(matches!(
        api.list(&TodolistId::new("l9")).await,
        Err(ApiError::Application { .. })
    ));
}

#[tokio::test]
async fn test_films_validation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/films"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 10,
            "messages": [],
            "page": -1,
            "pageCount": 1,
            "data": []
        })))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(ApiConfig::new(format!("{}/api/", server.uri())));
    let api = FilmsApi::new(Arc::new(transport));

    let error = api.list().await.unwrap_err();
    let issues = &error.validation().expect("validation error").issues;
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].path, "page");
}
