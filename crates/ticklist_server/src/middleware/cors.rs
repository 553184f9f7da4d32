use crate::config::Config;
use tower_http::cors::{Any, CorsLayer};

/// Builds the CORS layer from configuration.
///
/// An unset or unparseable origin list falls back to a wildcard, which
/// is suitable for development; set TICKLIST_CORS_ORIGINS in production.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let wildcard = || {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_headers(Any)
            .allow_methods(Any)
    };

    match &config.cors_allowed_origins {
        Some(origins_str) => {
            let origins: Vec<axum::http::HeaderValue> = origins_str
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                wildcard()
            } else {
                CorsLayer::new()
                    .allow_origin(origins)
                    .allow_headers(Any)
                    .allow_methods(Any)
            }
        }
        None => wildcard(),
    }
}
