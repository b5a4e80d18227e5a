// JSON API: latest snapshot, history window, chart payloads

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::TimeDelta;

use super::{ApiError, AppState, SourceQuery};
use crate::charts::ChartSet;
use crate::models::CanonicalSnapshot;

/// GET /api/latest
pub(super) async fn latest_handler(
    State(state): State<AppState>,
    Query(query): Query<SourceQuery>,
) -> Result<Json<CanonicalSnapshot>, ApiError> {
    let source = query.resolve(&state.config)?;
    state
        .with_repo(move |repo| repo.load_latest(&source))
        .await?
        .map(Json)
        .ok_or(ApiError::NoData)
}

/// GET /api/historical/{hours}: empty array when nothing matches.
pub(super) async fn historical_handler(
    State(state): State<AppState>,
    Path(hours): Path<u32>,
    Query(query): Query<SourceQuery>,
) -> Result<Json<Vec<CanonicalSnapshot>>, ApiError> {
    let source = query.resolve(&state.config)?;
    let history = state
        .with_repo(move |repo| repo.load_history(&source, TimeDelta::hours(hours.into())))
        .await?;
    Ok(Json(history))
}

/// GET /api/charts: 404 unless both a latest snapshot and history exist.
pub(super) async fn charts_handler(
    State(state): State<AppState>,
    Query(query): Query<SourceQuery>,
) -> Result<Json<ChartSet>, ApiError> {
    let source = query.resolve(&state.config)?;
    let window = TimeDelta::hours(state.config.dashboard.chart_window_hours.into());
    let (latest, history) = state
        .with_repo(move |repo| {
            (
                repo.load_latest(&source),
                repo.load_history(&source, window),
            )
        })
        .await?;
    match latest {
        Some(latest) if !history.is_empty() => Ok(Json(ChartSet::build(&latest, &history))),
        _ => Err(ApiError::InsufficientData),
    }
}
