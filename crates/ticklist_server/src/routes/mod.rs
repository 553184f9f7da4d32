//! Router composition.

use crate::middleware::cors::cors_layer;
use crate::state::AppState;
use axum::Router;
use std::sync::Arc;

pub mod health;
pub mod todos;

/// Builds the full application router with middleware applied.
pub fn build(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(todos::router())
        .merge(health::router())
        .layer(cors_layer(state.config.as_ref()))
        .with_state(state)
}
