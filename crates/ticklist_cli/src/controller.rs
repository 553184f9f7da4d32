//! Client-side controller.
//!
//! # Responsibility
//! - Issue exactly one store/HTTP call per user action.
//! - Re-fetch the entire task list after every mutation and hand the
//!   renderer a fresh snapshot; no incremental or optimistic updates.
//!
//! # Invariants
//! - Actions return an explicit [`ViewState`] value; there is no
//!   module-level loading or error state.
//! - A failed action still produces a renderable state carrying the
//!   server-reported message when one was available.

use crate::http::ApiClient;
use std::path::PathBuf;
use ticklist_core::{LocalTaskStore, Task, TaskId, TaskPatch, TaskService};

/// Snapshot handed to the renderer after every action.
#[derive(Debug, Default)]
pub struct ViewState {
    /// Last successfully fetched task list, newest first.
    pub tasks: Vec<Task>,
    /// Error from the most recent action, if any.
    pub last_error: Option<String>,
}

/// Task backend selected at startup.
pub enum Controller {
    /// Talks to a ticklist server over HTTP.
    Remote(ApiClient),
    /// Talks to the single-file JSON store directly. Operations are
    /// synchronous, so there is no loading state to track.
    Local(TaskService<LocalTaskStore>),
}

impl Controller {
    pub fn remote(base_url: impl Into<String>) -> Self {
        Self::Remote(ApiClient::new(base_url))
    }

    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self::Local(TaskService::new(LocalTaskStore::new(path.into())))
    }

    /// Fetches the whole list without mutating anything.
    pub fn list(&self) -> ViewState {
        self.refresh(None)
    }

    pub fn add(&self, title: &str) -> ViewState {
        let outcome = match self {
            Self::Remote(client) => client.create(title).map(|_| ()),
            Self::Local(service) => service
                .add_task(title)
                .map(|_| ())
                .map_err(|err| err.to_string()),
        };
        self.refresh(outcome.err())
    }

    /// Single-round-trip completion flip; the backend inverts the
    /// current value atomically.
    pub fn toggle(&self, id: &TaskId) -> ViewState {
        let outcome = match self {
            Self::Remote(client) => client.toggle(id).map(|_| ()),
            Self::Local(service) => service
                .toggle_task(id)
                .map(|_| ())
                .map_err(|err| err.to_string()),
        };
        self.refresh(outcome.err())
    }

    pub fn rename(&self, id: &TaskId, title: &str) -> ViewState {
        let outcome = match self {
            Self::Remote(client) => client.rename(id, title).map(|_| ()),
            Self::Local(service) => {
                let patch = TaskPatch {
                    title: Some(title.to_string()),
                    ..TaskPatch::default()
                };
                service
                    .update_task(id, &patch)
                    .map(|_| ())
                    .map_err(|err| err.to_string())
            }
        };
        self.refresh(outcome.err())
    }

    pub fn remove(&self, id: &TaskId) -> ViewState {
        let outcome = match self {
            Self::Remote(client) => client.delete(id),
            Self::Local(service) => service
                .delete_task(id)
                .map(|_| ())
                .map_err(|err| err.to_string()),
        };
        self.refresh(outcome.err())
    }

    /// Health probe; remote asks `/health`, local answers from core.
    pub fn ping(&self) -> Result<String, String> {
        match self {
            Self::Remote(client) => client.health(),
            Self::Local(_) => Ok(ticklist_core::ping().to_string()),
        }
    }

    /// Unconditional full re-fetch. A mutation error takes precedence
    /// over a fetch error in the reported state.
    fn refresh(&self, action_error: Option<String>) -> ViewState {
        let fetched = match self {
            Self::Remote(client) => client.list(),
            Self::Local(service) => service.list_tasks().map_err(|err| err.to_string()),
        };

        match fetched {
            Ok(tasks) => ViewState {
                tasks,
                last_error: action_error,
            },
            Err(fetch_error) => ViewState {
                tasks: Vec::new(),
                last_error: Some(action_error.unwrap_or(fetch_error)),
            },
        }
    }
}
