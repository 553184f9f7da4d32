//! Task use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for HTTP and CLI callers.
//! - Normalize input (title trimming) before persistence.
//!
//! # Invariants
//! - Store errors are re-exposed unchanged; nothing is re-wrapped.
//! - The service remains storage-agnostic.

use crate::model::task::{Task, TaskId, TaskPatch, TaskValidationError};
use crate::store::{StoreResult, TaskStore};

/// Thin validation/shape layer in front of a [`TaskStore`].
///
/// `completed` is `bool` by construction everywhere in this crate, so
/// no truthy coercion can occur on any path.
pub struct TaskService<S: TaskStore> {
    store: S,
}

impl<S: TaskStore> TaskService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists tasks newest-first, in store order.
    pub fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        self.store.list()
    }

    /// Creates a task with `completed = false`.
    ///
    /// # Contract
    /// - Title is trimmed before it reaches the store.
    /// - Empty or whitespace-only titles fail validation.
    pub fn add_task(&self, title: impl Into<String>) -> StoreResult<Task> {
        let title = title.into();
        self.store.insert(title.trim())
    }

    /// Applies the present patch fields to an existing task.
    ///
    /// Returns store-level not-found or validation errors unchanged.
    /// An empty patch is rejected before the store is touched.
    pub fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> StoreResult<Task> {
        if patch.is_empty() {
            return Err(TaskValidationError::EmptyPatch.into());
        }
        let patch = TaskPatch {
            title: patch.title.as_deref().map(|title| title.trim().to_string()),
            completed: patch.completed,
        };
        self.store.update(id, &patch)
    }

    /// Atomically inverts `completed` and returns the new state.
    pub fn toggle_task(&self, id: &TaskId) -> StoreResult<Task> {
        self.store.toggle(id)
    }

    /// Deletes a task by id, returning the id on success.
    pub fn delete_task(&self, id: &TaskId) -> StoreResult<TaskId> {
        self.store.delete(id)
    }
}
