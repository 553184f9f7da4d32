//! Single-file JSON task store.
//!
//! The client-local counterpart of the SQLite store: one JSON array of
//! task records under a fixed file path.
//!
//! # Responsibility
//! - Persist the whole collection on every mutation: load, mutate in
//!   memory, write back. There are no partial writes.
//!
//! # Invariants
//! - A corrupt or missing payload reads as an empty store, so a broken
//!   file never blocks the caller. The damage is logged; the previous
//!   content is lost on the next write.
//! - Single-writer assumption: concurrent writers overwrite each
//!   other's last write.
//! - Identity is a client-generated UUID string; there is no title
//!   length bound on this backend.

use crate::model::task::{validate_title, Task, TaskId, TaskPatch, TaskValidationError};
use crate::store::{StoreError, StoreResult, TaskStore};
use chrono::Utc;
use log::warn;
use std::cmp::Reverse;
use std::io::ErrorKind;
use std::path::PathBuf;
use uuid::Uuid;

/// JSON-file-backed task store.
pub struct LocalTaskStore {
    path: PathBuf,
}

impl LocalTaskStore {
    /// Creates a store over `path`. The file is created lazily on the
    /// first mutation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> StoreResult<Vec<Task>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(StoreError::Unavailable(format!(
                    "cannot read task store `{}`: {err}",
                    self.path.display()
                )));
            }
        };

        match serde_json::from_str(&raw) {
            Ok(tasks) => Ok(tasks),
            Err(err) => {
                warn!(
                    "event=store_load module=store backend=local status=corrupt path={} error={err}",
                    self.path.display()
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, tasks: &[Task]) -> StoreResult<()> {
        let payload = serde_json::to_string(tasks).map_err(|err| {
            StoreError::Unavailable(format!("cannot serialize task store: {err}"))
        })?;
        std::fs::write(&self.path, payload).map_err(|err| {
            StoreError::Unavailable(format!(
                "cannot write task store `{}`: {err}",
                self.path.display()
            ))
        })
    }

    fn index_of(tasks: &[Task], id: &TaskId) -> StoreResult<usize> {
        tasks
            .iter()
            .position(|task| task.id == *id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }
}

impl TaskStore for LocalTaskStore {
    fn list(&self) -> StoreResult<Vec<Task>> {
        let mut tasks = self.load()?;
        // Stable sort over the reversed insertion order keeps ties
        // newest-inserted-first.
        tasks.reverse();
        tasks.sort_by_key(|task| Reverse(task.created_at));
        Ok(tasks)
    }

    fn insert(&self, title: &str) -> StoreResult<Task> {
        let title = title.trim();
        validate_title(title)?;

        let mut tasks = self.load()?;
        let task = Task {
            id: TaskId::Key(Uuid::new_v4().to_string()),
            title: title.to_string(),
            completed: false,
            created_at: Utc::now(),
        };
        tasks.push(task.clone());
        self.save(&tasks)?;
        Ok(task)
    }

    fn update(&self, id: &TaskId, patch: &TaskPatch) -> StoreResult<Task> {
        if patch.is_empty() {
            return Err(TaskValidationError::EmptyPatch.into());
        }

        let mut tasks = self.load()?;
        let index = Self::index_of(&tasks, id)?;

        if let Some(title) = patch.title.as_deref() {
            let title = title.trim();
            validate_title(title)?;
            tasks[index].title = title.to_string();
        }
        if let Some(completed) = patch.completed {
            tasks[index].completed = completed;
        }

        let task = tasks[index].clone();
        self.save(&tasks)?;
        Ok(task)
    }

    fn toggle(&self, id: &TaskId) -> StoreResult<Task> {
        let mut tasks = self.load()?;
        let index = Self::index_of(&tasks, id)?;
        tasks[index].completed = !tasks[index].completed;

        let task = tasks[index].clone();
        self.save(&tasks)?;
        Ok(task)
    }

    fn delete(&self, id: &TaskId) -> StoreResult<TaskId> {
        let mut tasks = self.load()?;
        let index = Self::index_of(&tasks, id)?;
        tasks.remove(index);
        self.save(&tasks)?;
        Ok(id.clone())
    }
}
