//! Task CRUD endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use log::info;
use ticklist_core::{Task, TaskId, TaskPatch};

use crate::error::ApiError;
use crate::schemas::{CreateTodoRequest, DeleteTodoResponse, UpdateTodoRequest};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", patch(update_todo).delete(delete_todo))
        .route("/todos/{id}/toggle", post(toggle_todo))
}

pub async fn list_todos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let service = state.service.lock().await;
    Ok(Json(service.list_tasks()?))
}

pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(request) = payload?;
    let service = state.service.lock().await;
    let task = service.add_task(request.title)?;
    info!("event=todo_created module=http status=ok id={}", task.id);
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let Json(request) = payload?;
    let id = TaskId::parse(&id);
    let patch = TaskPatch::from(request);
    let service = state.service.lock().await;
    let task = service.update_task(&id, &patch)?;
    info!("event=todo_updated module=http status=ok id={}", task.id);
    Ok(Json(task))
}

/// Atomic completion flip: one statement server-side, so two clients
/// toggling the same task never race a read against a write.
pub async fn toggle_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let id = TaskId::parse(&id);
    let service = state.service.lock().await;
    let task = service.toggle_task(&id)?;
    info!(
        "event=todo_toggled module=http status=ok id={} completed={}",
        task.id, task.completed
    );
    Ok(Json(task))
}

pub async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteTodoResponse>, ApiError> {
    let id = TaskId::parse(&id);
    let service = state.service.lock().await;
    let deleted = service.delete_task(&id)?;
    info!("event=todo_deleted module=http status=ok id={deleted}");
    Ok(Json(DeleteTodoResponse {
        message: "task deleted".to_string(),
        id: deleted,
    }))
}
