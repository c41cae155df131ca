use std::{path::PathBuf, sync::Arc};

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::any,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{config::Config, main_lib::AppState, proxy};

fn cors_layer(allowed: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ]);

    if allowed.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }
    let origins = allowed
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {}", o);
                None
            }
        })
        .collect::<Vec<_>>();
    cors.allow_origin(origins)
}

/// `/api/*` goes to the backend; every other path is served from the static
/// directory, falling back to `index.html` for client-side routes.
pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let static_dir = PathBuf::from(&config.static_dir);
    let index_file = static_dir.join("index.html");
    let static_service = ServeDir::new(static_dir).fallback(ServeFile::new(index_file));

    Router::new()
        .route("/api", any(proxy::forward))
        .route("/api/{*path}", any(proxy::forward))
        .with_state(state)
        .fallback_service(static_service)
        .layer(cors_layer(&config.cors_allow))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
