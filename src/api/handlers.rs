//! HTTP API handlers.

use std::borrow::Cow;

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use percent_encoding::percent_decode_str;
use serde::Serialize;
use tracing::warn;
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::metrics::{self, LatencyTimer};
use crate::status::StatusHolder;

/// Application state shared with handlers.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// The status value served on /status.
    pub status: StatusHolder,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state around a status holder.
    pub fn new(status: StatusHolder) -> Self {
        Self {
            status,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle so /metrics can render it.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: String,
}

/// Query parameters for POST /status.
#[derive(Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SetStatusParams {
    /// New status value. May be empty.
    pub state: Option<String>,
}

/// Percent-decode one query component, treating `+` as a space.
fn decode_component(raw: &str) -> Result<String, ApiError> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| ApiError::InvalidQuery(format!("{raw:?} does not decode to UTF-8")))
}

/// Extract the `state` parameter from a raw query string.
///
/// `Ok(None)` when the parameter is absent. A repeated `state` or a
/// component that is not UTF-8 once decoded is an error.
fn state_param(query: Option<&str>) -> Result<Option<String>, ApiError> {
    let mut state = None;
    for pair in query.unwrap_or_default().split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if decode_component(key)? != "state" {
            continue;
        }
        if state.replace(decode_component(value)?).is_some() {
            return Err(ApiError::InvalidQuery("duplicate `state` parameter".to_string()));
        }
    }
    Ok(state)
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Return the current status as plain text.
#[utoipa::path(
    get,
    path = "/status",
    tag = "status",
    responses((status = 200, description = "Current status", body = String, content_type = "text/plain"))
)]
pub async fn get_status(State(state): State<AppState>) -> String {
    let _timer = LatencyTimer::new("get_status");
    metrics::inc_status_reads();
    state.status.get().await
}

/// Overwrite the status with the `state` query parameter and echo it back.
#[utoipa::path(
    post,
    path = "/status",
    tag = "status",
    params(SetStatusParams),
    responses(
        (status = 200, description = "Value just written", body = String, content_type = "text/plain"),
        (status = 400, description = "Missing or malformed `state` parameter", body = String, content_type = "text/plain")
    )
)]
pub async fn set_status(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<String, ApiError> {
    let _timer = LatencyTimer::new("set_status");
    let new_state = state_param(query.as_deref())
        .and_then(|value| value.ok_or(ApiError::MissingState))
        .inspect_err(|e| {
            warn!("Rejected status write: {}", e);
            metrics::inc_status_write_rejections();
        })?;

    metrics::inc_status_writes();
    Ok(state.status.set(new_state).await)
}

/// Prometheus exposition handler - 404 when metrics are disabled.
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "health",
    responses(
        (status = 200, description = "Prometheus text exposition", body = String, content_type = "text/plain"),
        (status = 404, description = "Metrics are disabled")
    )
)]
pub async fn render_metrics(State(state): State<AppState>) -> Response {
    match state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
