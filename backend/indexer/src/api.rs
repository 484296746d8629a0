//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::error;

use crate::db;
use crate::errors::IndexerError;
use crate::events::EventRecord;

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HackathonEventsResponse {
    pub hackathon_id: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct WaveEventsResponse {
    pub hackathon_id: String,
    pub wave_index: u32,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AllEventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
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

fn internal_error(e: IndexerError) -> Response {
    error!("API query failed: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

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

/// `GET /hackathons/:id/events`
///
/// Returns all indexed events for the given hackathon.
pub async fn get_hackathon_events(
    State(state): State<Arc<ApiState>>,
    Path(hackathon_id): Path<String>,
) -> Response {
    match db::get_events_for_hackathon(&state.pool, &hackathon_id).await {
        Ok(events) => (
            StatusCode::OK,
            Json(HackathonEventsResponse {
                hackathon_id,
                count: events.len(),
                events,
            }),
        )
            .into_response(),
        Err(e) => internal_error(e),
    }
}

/// `GET /hackathons/:id/waves/:index/events`
///
/// Submissions, the close, rewards and notifier failures of one wave.
pub async fn get_wave_events(
    State(state): State<Arc<ApiState>>,
    Path((hackathon_id, wave_index)): Path<(String, u32)>,
) -> Response {
    match db::get_events_for_wave(&state.pool, &hackathon_id, i64::from(wave_index)).await {
        Ok(events) => (
            StatusCode::OK,
            Json(WaveEventsResponse {
                hackathon_id,
                wave_index,
                count: events.len(),
                events,
            }),
        )
            .into_response(),
        Err(e) => internal_error(e),
    }
}

/// `GET /events`
///
/// Returns all indexed events across all hackathons.
pub async fn get_all_events(State(state): State<Arc<ApiState>>) -> Response {
    match db::get_all_events(&state.pool).await {
        Ok(events) => (
            StatusCode::OK,
            Json(AllEventsResponse {
                count: events.len(),
                events,
            }),
        )
            .into_response(),
        Err(e) => internal_error(e),
    }
}
