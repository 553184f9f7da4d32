//! Storage backends and the backend-agnostic task store contract.
//!
//! # Responsibility
//! - Define the CRUD contract every task backend satisfies.
//! - Return semantic errors (`NotFound`, `Validation`) in addition to
//!   medium transport errors, so callers can map them deterministically.
//!
//! # Invariants
//! - `list` is ordered by `created_at` descending on every backend.
//! - Write paths validate titles before touching the medium.

use crate::db::DbError;
use crate::model::task::{Task, TaskId, TaskPatch, TaskValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod local;
pub mod sqlite;

pub type StoreResult<T> = Result<T, StoreError>;

/// Generic store error for task persistence operations.
#[derive(Debug)]
pub enum StoreError {
    /// Input failed a field constraint.
    Validation(TaskValidationError),
    /// No task carries the given id.
    NotFound(TaskId),
    /// The relational medium failed.
    Db(DbError),
    /// The local medium is unreachable.
    Unavailable(String),
    /// Persisted state violates model invariants.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "task store unavailable: {message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::Unavailable(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Backend-agnostic task store contract.
pub trait TaskStore {
    /// Lists every task, newest first.
    fn list(&self) -> StoreResult<Vec<Task>>;
    /// Creates a task with `completed = false`, assigning id and
    /// creation timestamp.
    fn insert(&self, title: &str) -> StoreResult<Task>;
    /// Applies the present patch fields to an existing task.
    fn update(&self, id: &TaskId, patch: &TaskPatch) -> StoreResult<Task>;
    /// Atomically inverts `completed` and returns the new state.
    fn toggle(&self, id: &TaskId) -> StoreResult<Task>;
    /// Removes a task and returns its id.
    fn delete(&self, id: &TaskId) -> StoreResult<TaskId>;
}
