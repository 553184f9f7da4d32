//! Server configuration, loaded from environment variables at startup.

use std::path::PathBuf;

/// Runtime configuration for ticklist-server.
///
/// Every field has a default so the server works out-of-the-box without
/// any environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"127.0.0.1:3000"`).
    pub bind_address: String,

    /// SQLite database file path (default: `"ticklist.sqlite3"`).
    pub database_path: PathBuf,

    /// Comma-separated allowed CORS origins. Unset means wildcard,
    /// suitable for development.
    pub cors_allowed_origins: Option<String>,

    /// Log level passed to the core logging bootstrap.
    pub log_level: String,

    /// Directory for rolling log files. Unset resolves to `<cwd>/logs`
    /// at startup.
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Builds [`Config`] from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: env_or("TICKLIST_BIND", "127.0.0.1:3000"),
            database_path: PathBuf::from(env_or("TICKLIST_DB", "ticklist.sqlite3")),
            cors_allowed_origins: std::env::var("TICKLIST_CORS_ORIGINS").ok(),
            log_level: env_or("TICKLIST_LOG", ticklist_core::default_log_level()),
            log_dir: std::env::var("TICKLIST_LOG_DIR").ok().map(PathBuf::from),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
