use std::sync::Arc;

use crate::config::Config;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub client: reqwest::Client,
    /// Backend origin, without a trailing slash. Request paths are appended
    /// unchanged.
    pub backend_url: String,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    // Redirects are relayed to the caller, not followed.
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(config.request_timeout)
        .build()?;
    tracing::info!("Proxying /api to {}", config.backend_url);
    Ok(Arc::new(AppState {
        client,
        backend_url: config.backend_url.clone(),
    }))
}
