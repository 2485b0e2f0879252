//! HTTP route handlers.
//!
//! Bodies of the two POST routes are taken as raw bytes and inspected by
//! hand, so malformed JSON yields the same 400 body as a missing field.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Datelike;
use serde_json::Value;
use tracing::{error, info, warn};

use super::types::{AppState, ExportResponse};
use crate::error::{ApiError, StorageError};
use crate::markdown::render_session;
use crate::metrics::MetricsSummary;
use crate::scenarios::ScenarioAggregate;
use crate::storage::SESSION_SLUG_FALLBACK;
use crate::timeline::{ExpansionNode, TimelineEvent};

pub(crate) const PROMPT_REQUIRED: &str = "Prompt is required.";
pub(crate) const EVENTS_REQUIRED: &str = "timelineEvents array required";
pub(crate) const EXPORT_FAILED: &str = "Failed to export session.";
pub(crate) const FILE_NOT_FOUND: &str = "File not found";
const PAGE_NOT_FOUND: &str = "Not found";

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/scenarios", get(get_scenarios).post(post_scenarios))
        .route("/api/export-session", post(export_session))
        .route("/api/download-log/:filename", get(download_log))
        .route("/api/metrics", get(metrics))
        .with_state(state)
}

/// `GET /api/scenarios`
pub(crate) async fn get_scenarios(State(state): State<AppState>) -> Json<Vec<ScenarioAggregate>> {
    Json(state.scenarios.current_or_sample())
}

/// `POST /api/scenarios`
pub(crate) async fn post_scenarios(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<TimelineEvent>>, ApiError> {
    let Some(prompt) = json_body(&body).as_ref().and_then(prompt_field) else {
        return Err(ApiError::bad_request(PROMPT_REQUIRED));
    };

    let parsed = state.timeline.generate(&prompt).await;
    Ok(Json(parsed.events))
}

fn prompt_field(body: &Value) -> Option<String> {
    body.get("prompt")
        .and_then(Value::as_str)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
}

/// `POST /api/export-session`
pub(crate) async fn export_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ExportResponse>, ApiError> {
    let body = json_body(&body).unwrap_or(Value::Null);
    let Some(raw_events) = body.get("timelineEvents").and_then(Value::as_array) else {
        return Err(ApiError::bad_request(EVENTS_REQUIRED));
    };

    let now = state.clock.now();
    let year = now.year();
    let title = body.get("sessionTitle").and_then(Value::as_str);
    let events = TimelineEvent::list_from_values_aligned(raw_events, year);
    let expansions = body
        .get("expandedNodes")
        .map(|nodes| ExpansionNode::list_from_value(nodes, year))
        .unwrap_or_default();

    let markdown = render_session(title, &events, &expansions);
    match state
        .logs
        .save(&now, title.unwrap_or_default(), SESSION_SLUG_FALLBACK, &markdown)
        .await
    {
        Ok(filename) => {
            state.metrics.record_export(true);
            info!(filename = %filename, events = events.len(), "Session exported");
            Ok(Json(ExportResponse {
                success: true,
                filename,
            }))
        }
        Err(e) => {
            state.metrics.record_export(false);
            error!(error = %e, "Session export failed");
            Err(ApiError::internal(EXPORT_FAILED))
        }
    }
}

/// `GET /api/download-log/:filename`
pub(crate) async fn download_log(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    match state.logs.read(&filename).await {
        Ok(bytes) => Ok((
            [
                (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}\""),
                ),
            ],
            bytes,
        )
            .into_response()),
        Err(StorageError::NotFound { .. }) => Err(ApiError::not_found(FILE_NOT_FOUND)),
        Err(e) => {
            warn!(error = %e, "Log download failed");
            Err(ApiError::not_found(FILE_NOT_FOUND))
        }
    }
}

/// `GET /api/metrics`
pub(crate) async fn metrics(State(state): State<AppState>) -> Json<MetricsSummary> {
    Json(state.metrics.summary())
}

/// `GET /`
pub(crate) async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let path = state.static_dir.join("index.html");
    tokio::fs::read_to_string(&path).await.map(Html).map_err(|e| {
        warn!(path = %path.display(), error = %e, "index.html unavailable");
        ApiError::not_found(PAGE_NOT_FOUND)
    })
}

fn json_body(body: &[u8]) -> Option<Value> {
    serde_json::from_slice(body).ok()
}
