// GET handlers: dashboard index, health, version

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use super::{ApiError, AppState};
use crate::report::html::{self, DashboardPanel};
use crate::version::{NAME, SERVICE_NAME, VERSION};

/// GET /: one panel per known source that has a latest snapshot; 503 when none does.
pub(super) async fn index_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let loaded = state
        .with_repo(|repo| {
            repo.known_sources()
                .iter()
                .filter_map(|source| repo.load_latest(source).map(|s| (source.clone(), s)))
                .collect::<Vec<_>>()
        })
        .await?;
    if loaded.is_empty() {
        return Ok((StatusCode::SERVICE_UNAVAILABLE, Html(html::no_data_page())).into_response());
    }
    let panels: Vec<DashboardPanel<'_>> = loaded
        .iter()
        .map(|(source, latest)| DashboardPanel { source, latest })
        .collect();
    Ok(Html(html::dashboard(&panels)).into_response())
}

/// GET /health: liveness check.
pub(super) async fn health_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME,
    }))
}

/// GET /version: returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}
