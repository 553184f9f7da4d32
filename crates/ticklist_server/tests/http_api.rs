use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use ticklist_core::{SqliteTaskStore, TaskService};
use ticklist_server::config::Config;
use ticklist_server::routes;
use ticklist_server::state::AppState;
use tower::ServiceExt;

fn test_app() -> Router {
    let store = SqliteTaskStore::open_in_memory().unwrap();
    let state = Arc::new(AppState::new(Config::from_env(), TaskService::new(store)));
    routes::build(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn full_crud_scenario() {
    let app = test_app();

    let (status, created) = send(
        &app,
        "POST",
        "/todos",
        Some(json!({ "title": "buy milk" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], json!(1));
    assert_eq!(created["title"], json!("buy milk"));
    assert_eq!(created["completed"], json!(false));
    assert!(created["createdAt"].as_str().unwrap().contains('T'));

    let (status, updated) = send(
        &app,
        "PATCH",
        "/todos/1",
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["completed"], json!(true));
    assert_eq!(updated["title"], json!("buy milk"));

    let (status, deleted) = send(&app, "DELETE", "/todos/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], json!(1));
    assert!(deleted["message"].as_str().is_some());

    let (status, listed) = send(&app, "GET", "/todos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn list_orders_newest_first() {
    let app = test_app();

    for title in ["a", "b", "c"] {
        let (status, _) = send(&app, "POST", "/todos", Some(json!({ "title": title }))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, listed) = send(&app, "GET", "/todos", None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["c", "b", "a"]);
}

#[tokio::test]
async fn create_rejects_missing_or_empty_title() {
    let app = test_app();

    let (status, body) = send(&app, "POST", "/todos", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some());

    let (status, body) = send(&app, "POST", "/todos", Some(json!({ "title": "   " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("title"));
}

#[tokio::test]
async fn create_rejects_malformed_json() {
    let app = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/todos")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not valid json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn patch_rejects_bad_payloads() {
    let app = test_app();
    send(&app, "POST", "/todos", Some(json!({ "title": "anchor" }))).await;

    // No fields at all.
    let (status, body) = send(&app, "PATCH", "/todos/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some());

    // Non-boolean completed is a type error, not a truthy value.
    let (status, _) = send(
        &app,
        "PATCH",
        "/todos/1",
        Some(json!({ "completed": "yes" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown fields are rejected by the schema.
    let (status, _) = send(&app, "PATCH", "/todos/1", Some(json!({ "done": true }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Empty title after trimming.
    let (status, _) = send(&app, "PATCH", "/todos/1", Some(json!({ "title": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The anchor task is untouched by any of the rejected patches.
    let (_, listed) = send(&app, "GET", "/todos", None).await;
    assert_eq!(listed[0]["title"], json!("anchor"));
    assert_eq!(listed[0]["completed"], json!(false));
}

#[tokio::test]
async fn unknown_ids_map_to_not_found() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "PATCH",
        "/todos/999",
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("999"));

    let (status, _) = send(&app, "DELETE", "/todos/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "POST", "/todos/999/toggle", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_is_not_idempotent() {
    let app = test_app();
    send(&app, "POST", "/todos", Some(json!({ "title": "once" }))).await;

    let (status, _) = send(&app, "DELETE", "/todos/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "DELETE", "/todos/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn toggle_flips_completed_in_one_call() {
    let app = test_app();
    send(&app, "POST", "/todos", Some(json!({ "title": "flip" }))).await;

    let (status, toggled) = send(&app, "POST", "/todos/1/toggle", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["completed"], json!(true));

    let (status, toggled) = send(&app, "POST", "/todos/1/toggle", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["completed"], json!(false));
}

#[tokio::test]
async fn patch_renames_without_touching_completed() {
    let app = test_app();
    send(&app, "POST", "/todos", Some(json!({ "title": "before" }))).await;
    send(&app, "POST", "/todos/1/toggle", None).await;

    let (status, renamed) = send(
        &app,
        "PATCH",
        "/todos/1",
        Some(json!({ "title": "after" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["title"], json!("after"));
    assert_eq!(renamed["completed"], json!(true));
}

#[tokio::test]
async fn health_reports_status_and_version() {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
    assert!(body["version"].as_str().is_some());
}
