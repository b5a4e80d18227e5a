// HTTP routes

mod api;
mod http;
mod report;

use std::sync::Arc;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};

use crate::config::{self, AppConfig, Paths};
use crate::snapshot_repo::SnapshotRepo;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) repo: Arc<SnapshotRepo>,
    pub(crate) paths: Arc<Paths>,
    pub(crate) config: Arc<AppConfig>,
}

impl AppState {
    /// Runs synchronous file work on the blocking pool.
    pub(crate) async fn with_repo<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&SnapshotRepo) -> T + Send + 'static,
        T: Send + 'static,
    {
        let repo = self.repo.clone();
        Ok(tokio::task::spawn_blocking(move || f(&repo)).await?)
    }
}

pub fn app(config: AppConfig, repo: Arc<SnapshotRepo>) -> Router {
    let state = AppState {
        repo,
        paths: Arc::new(config.paths()),
        config: Arc::new(config),
    };
    Router::new()
        .route("/", get(http::index_handler)) // GET /
        .route("/health", get(http::health_handler)) // GET /health
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/latest", get(api::latest_handler)) // GET /api/latest
        .route("/api/historical/{hours}", get(api::historical_handler)) // GET /api/historical/24
        .route("/api/charts", get(api::charts_handler)) // GET /api/charts
        .route("/report/html", get(report::html_handler)) // GET /report/html
        .route("/report/markdown", get(report::markdown_handler)) // GET /report/markdown
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SourceQuery {
    source: Option<String>,
}

impl SourceQuery {
    /// Requested tag, or the configured default. Tags reach file names, so they are validated.
    pub(crate) fn resolve(self, config: &AppConfig) -> Result<String, ApiError> {
        let source = self.source.unwrap_or_else(|| config.sources.default.clone());
        if config::is_valid_source_tag(&source) {
            Ok(source)
        } else {
            Err(ApiError::InvalidSource(source))
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("No data available")]
    NoData,
    #[error("Insufficient data")]
    InsufficientData,
    #[error("Invalid source tag")]
    InvalidSource(String),
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("report write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NoData | ApiError::InsufficientData => StatusCode::NOT_FOUND,
            ApiError::InvalidSource(source) => {
                tracing::debug!(source, "rejected source tag");
                StatusCode::BAD_REQUEST
            }
            ApiError::Join(_) | ApiError::Io(_) => {
                tracing::error!(error = %self, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let message = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
