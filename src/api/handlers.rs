//! API Handlers
//!
//! HTTP request handlers binding the controller's event surface.

use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::Response,
    Json,
};
use serde_json::Value;

use crate::cache::StoredResponse;
use crate::controller::{CacheController, Event, Outcome};
use crate::error::{CacheError, Result};
use crate::models::{AssetRequest, HealthResponse, StatsResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide cache controller
    pub controller: CacheController,
}

impl AppState {
    /// Creates a new AppState around a controller.
    pub fn new(controller: CacheController) -> Self {
        Self { controller }
    }
}

/// Handler for POST /message
///
/// The precache channel. The body is arbitrary JSON; recognized
/// `CACHE_URLS` commands are ingested, anything else is ignored. The ack is
/// always 202 with no body and reports nothing about the outcome.
pub async fn message_handler(
    State(state): State<AppState>,
    Json(message): Json<Value>,
) -> StatusCode {
    let _ = state.controller.dispatch(Event::Message(message)).await;
    StatusCode::ACCEPTED
}

/// Handler for GET /fetch
///
/// The interception surface: serves the requested asset under the policy
/// chosen by the controller.
pub async fn fetch_handler(
    State(state): State<AppState>,
    Query(request): Query<AssetRequest>,
) -> Result<Response> {
    match state.controller.dispatch(Event::Fetch(request)).await? {
        Outcome::Served(response) => Ok(stored_to_http(response)),
        _ => Err(CacheError::Internal(
            "Fetch event produced a non-response outcome".to_string(),
        )),
    }
}

/// Handler for GET /stats
///
/// Returns statistics of the current generation's store.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.controller.stats().await;

    Json(StatsResponse::new(
        stats.hits,
        stats.misses,
        stats.evictions,
        stats.total_entries,
    ))
}

/// Handler for GET /health
///
/// Reports health plus the lifecycle phase clients wait on before posting
/// precache messages.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let phase = state.controller.phase().await;

    Json(HealthResponse::healthy(
        phase.as_str(),
        state.controller.config().generation_tag.clone(),
    ))
}

// == Response Conversion ==
/// Rebuilds an HTTP response from a stored one.
fn stored_to_http(stored: StoredResponse) -> Response {
    let status =
        StatusCode::from_u16(stored.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut response = Response::new(Body::from(stored.body));
    *response.status_mut() = status;

    for (name, value) in &stored.headers {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            response.headers_mut().insert(name, value);
        }
    }

    response
}
