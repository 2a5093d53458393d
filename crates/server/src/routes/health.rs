//! Health check endpoints.

use std::path::Path;

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the directory holding the data file
/// is missing or is not a directory.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    let dir = state
        .config()
        .data_file
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    match tokio::fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => StatusCode::OK,
        Ok(_) | Err(_) => {
            tracing::warn!(dir = %dir.display(), "Data directory unavailable");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
