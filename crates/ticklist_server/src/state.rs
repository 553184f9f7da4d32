//! Shared application state injected into every axum handler.

use crate::config::Config;
use std::sync::Arc;
use ticklist_core::{SqliteTaskStore, TaskService};
use tokio::sync::Mutex;

/// State shared across all HTTP handlers.
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Task service over the durable store. rusqlite connections are
    /// not `Sync`, so handlers serialize access through the mutex;
    /// every write is a single statement anyway.
    pub service: Mutex<TaskService<SqliteTaskStore>>,
}

impl AppState {
    pub fn new(config: Config, service: TaskService<SqliteTaskStore>) -> Self {
        Self {
            config: Arc::new(config),
            service: Mutex::new(service),
        }
    }
}
