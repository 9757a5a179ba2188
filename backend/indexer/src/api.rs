//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::db;
use crate::errors::IndexerError;
use crate::events::{replay_funder_totals, EventKind, EventRecord, FunderTotal};

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

/// Build the router with every route mounted.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/events", get(get_all_events))
        .route("/withdrawals", get(get_withdrawals))
        .route("/funders", get(get_funders))
        .route("/funders/:address/events", get(get_funder_events))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct FunderEventsResponse {
    pub address: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct FundersResponse {
    pub count: usize,
    pub funders: Vec<FunderTotal>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Any indexer error becomes a 500 with an `{error}` body.
pub struct ApiError(IndexerError);

impl From<IndexerError> for ApiError {
    fn from(err: IndexerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("API request failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /events`
///
/// Returns every indexed event.
pub async fn get_all_events(State(state): State<Arc<ApiState>>) -> ApiResult<EventsResponse> {
    let events = db::get_all_events(&state.pool).await?;
    Ok(Json(EventsResponse {
        count: events.len(),
        events,
    }))
}

/// `GET /withdrawals`
pub async fn get_withdrawals(State(state): State<Arc<ApiState>>) -> ApiResult<EventsResponse> {
    let events = db::get_events_of_kind(&state.pool, &EventKind::FundsWithdrawn).await?;
    Ok(Json(EventsResponse {
        count: events.len(),
        events,
    }))
}

/// `GET /funders`
///
/// Open contributions per funder since the latest withdrawal, replayed from
/// the indexed event stream.
pub async fn get_funders(State(state): State<Arc<ApiState>>) -> ApiResult<FundersResponse> {
    let events = db::get_all_events(&state.pool).await?;
    let funders = replay_funder_totals(&events);
    Ok(Json(FundersResponse {
        count: funders.len(),
        funders,
    }))
}

/// `GET /funders/:address/events`
pub async fn get_funder_events(
    State(state): State<Arc<ApiState>>,
    Path(address): Path<String>,
) -> ApiResult<FunderEventsResponse> {
    let events = db::get_events_for_actor(&state.pool, &address).await?;
    Ok(Json(FunderEventsResponse {
        address,
        count: events.len(),
        events,
    }))
}
