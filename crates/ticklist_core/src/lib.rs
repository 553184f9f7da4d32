//! Core domain logic for ticklist.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging};
pub use model::task::{Task, TaskId, TaskPatch, TaskValidationError, MAX_TITLE_LEN};
pub use service::task_service::TaskService;
pub use store::local::LocalTaskStore;
pub use store::sqlite::SqliteTaskStore;
pub use store::{StoreError, StoreResult, TaskStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
