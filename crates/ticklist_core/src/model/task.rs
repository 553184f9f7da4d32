//! Task record, identity and field validation.
//!
//! # Responsibility
//! - Define the canonical task record shared by all storage backends.
//! - Own the title constraints applied before any write.
//!
//! # Invariants
//! - `id` is stable and never reused for another task within a store.
//! - `title` is never empty or whitespace-only after a successful write.
//! - `created_at` never changes after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum title length enforced by the SQLite backend.
///
/// The local backend carries no length bound. Callers must not rely on
/// the limit being uniform across backends.
pub const MAX_TITLE_LEN: usize = 500;

/// Stable task identity.
///
/// The SQLite backend assigns sequential integers; the local backend
/// generates UUID strings client-side. The untagged serde shape keeps
/// the wire form a plain JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    /// Store-assigned autoincrement id (SQLite backend).
    Serial(i64),
    /// Client-generated string id (local backend).
    Key(String),
}

impl TaskId {
    /// Reads a caller-supplied id. All-digit input is a serial id;
    /// anything else is treated as a string key.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(serial) => Self::Serial(serial),
            Err(_) => Self::Key(raw.to_string()),
        }
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serial(serial) => write!(f, "{serial}"),
            Self::Key(key) => write!(f, "{key}"),
        }
    }
}

impl From<i64> for TaskId {
    fn from(value: i64) -> Self {
        Self::Serial(value)
    }
}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable id assigned by the store at creation.
    pub id: TaskId,
    /// Trimmed, non-empty title.
    pub title: String,
    /// Completion flag. Starts as `false`.
    pub completed: bool,
    /// Creation timestamp; the only sort key (descending, newest first).
    pub created_at: DateTime<Utc>,
}

/// Partial update where each field is optional-with-presence.
///
/// An absent field leaves the stored value untouched. A patch carrying
/// no fields at all is rejected before it reaches any backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement title (trimmed and validated before persistence).
    pub title: Option<String>,
    /// Replacement completion flag.
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Returns whether the patch carries no fields.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }
}

/// Validation failures for task field constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title was empty or whitespace-only after trimming.
    EmptyTitle,
    /// Title exceeded the backend's storage bound.
    TitleTooLong { length: usize, max: usize },
    /// Patch carried neither `title` nor `completed`.
    EmptyPatch,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { length, max } => {
                write!(f, "title length {length} exceeds maximum of {max} characters")
            }
            Self::EmptyPatch => write!(f, "update must set at least one of title, completed"),
        }
    }
}

impl Error for TaskValidationError {}

/// Rejects empty or whitespace-only titles.
///
/// Length bounds are backend policy and checked by the stores that
/// enforce them.
pub fn validate_title(title: &str) -> Result<(), TaskValidationError> {
    if title.trim().is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(())
}
