//! ticklist-server – entry point.
//!
//! Startup order:
//! 1. Parse configuration from environment variables.
//! 2. Initialize rolling file logging via the core bootstrap.
//! 3. Open the SQLite database and run pending migrations.
//! 4. Build the axum router and serve with graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use log::info;
use ticklist_core::{SqliteTaskStore, TaskService};
use ticklist_server::config::Config;
use ticklist_server::routes;
use ticklist_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::from_env();

    let log_dir = match &cfg.log_dir {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => std::env::current_dir()?.join(dir),
        None => std::env::current_dir()?.join("logs"),
    };
    ticklist_core::init_logging(&cfg.log_level, &log_dir.to_string_lossy())
        .map_err(|err| anyhow::anyhow!(err))?;

    info!(
        "event=server_start module=main status=ok version={}",
        env!("CARGO_PKG_VERSION")
    );

    let store = SqliteTaskStore::open(&cfg.database_path).with_context(|| {
        format!(
            "cannot open task database at `{}`",
            cfg.database_path.display()
        )
    })?;
    let service = TaskService::new(store);

    let bind_address = cfg.bind_address.clone();
    let state = Arc::new(AppState::new(cfg, service));
    let app = routes::build(Arc::clone(&state));

    let addr: SocketAddr = bind_address
        .parse()
        .with_context(|| format!("invalid bind address `{bind_address}`"))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("event=server_listen module=main status=ok addr={addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=main status=ok");
    Ok(())
}

/// Resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            log::warn!("event=signal_handler module=main status=error error={err}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => log::warn!("event=signal_handler module=main status=error error={err}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("event=server_shutdown module=main status=start");
}
