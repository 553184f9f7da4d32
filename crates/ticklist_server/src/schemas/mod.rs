//! Request and response schemas for the HTTP surface.
//!
//! Request bodies are strict serde types: unknown fields and wrong
//! field types are rejected at the extractor boundary, before any
//! service call runs.

use serde::{Deserialize, Serialize};
use ticklist_core::{TaskId, TaskPatch};

/// Body for `POST /todos`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTodoRequest {
    pub title: String,
}

/// Body for `PATCH /todos/{id}`; each field is optional-with-presence.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl From<UpdateTodoRequest> for TaskPatch {
    fn from(request: UpdateTodoRequest) -> Self {
        Self {
            title: request.title,
            completed: request.completed,
        }
    }
}

/// Response body for `DELETE /todos/{id}`.
#[derive(Debug, Serialize)]
pub struct DeleteTodoResponse {
    pub message: String,
    pub id: TaskId,
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
