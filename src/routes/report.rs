// Rendered reports: HTML page and downloadable markdown

use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
};
use chrono::TimeDelta;

use super::{ApiError, AppState, SourceQuery};
use crate::report::{html, markdown};

/// GET /report/html
pub(super) async fn html_handler(
    State(state): State<AppState>,
    Query(query): Query<SourceQuery>,
) -> Result<Html<String>, ApiError> {
    let source = query.resolve(&state.config)?;
    let window = TimeDelta::hours(state.config.dashboard.chart_window_hours.into());
    let (latest, history, source) = state
        .with_repo(move |repo| {
            let latest = repo.load_latest(&source);
            let history = repo.load_history(&source, window);
            (latest, history, source)
        })
        .await?;
    let latest = latest.ok_or(ApiError::NoData)?;
    let now = chrono::Local::now().naive_local();
    Ok(Html(html::render(&latest, &history, &source, now)))
}

/// GET /report/markdown: persisted under reports_dir, served as an attachment.
pub(super) async fn markdown_handler(
    State(state): State<AppState>,
    Query(query): Query<SourceQuery>,
) -> Result<Response, ApiError> {
    let source = query.resolve(&state.config)?;
    let lookup = source.clone();
    let latest = state
        .with_repo(move |repo| repo.load_latest(&lookup))
        .await?
        .ok_or(ApiError::NoData)?;

    let now = chrono::Local::now().naive_local();
    let content = markdown::render(&latest, &source, now);
    let report_file = state.paths.reports_dir.join(format!(
        "report_{}_{}.md",
        source,
        now.format("%Y%m%d_%H%M%S")
    ));
    let body = content.clone();
    tokio::task::spawn_blocking(move || std::fs::write(&report_file, body)).await??;

    Ok((
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"system_report_{source}.md\""),
            ),
        ],
        content,
    )
        .into_response())
}
