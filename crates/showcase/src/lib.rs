//! M5 showcase library.
//!
//! This crate provides the showcase web application as a library, allowing
//! it to be tested and reused. The binary in `main.rs` adds configuration
//! loading, telemetry and the listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod view;

use axum::Router;
use axum::http::{HeaderValue, header};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::ShowcaseConfig;
use crate::services::Showcase;
use crate::state::AppState;
use crate::store::{FileStore, StoreError};

/// Load the showcase from the configured data directory.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created.
pub fn open_state(config: ShowcaseConfig) -> Result<AppState, StoreError> {
    let store = FileStore::open(&config.data_dir, Some(config.storage_quota))?;
    tracing::info!(data_dir = %config.data_dir.display(), "Opened data directory");
    let showcase = Showcase::load(Box::new(store));
    Ok(AppState::new(config, showcase))
}

/// Build the application router with sessions, tracing and response headers.
///
/// Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .merge(routes::routes())
        .layer(session_layer)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("same-origin"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
