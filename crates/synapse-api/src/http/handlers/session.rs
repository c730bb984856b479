//! Session lifecycle HTTP handlers.
//!
//! Endpoints:
//! - GET    /api/v1/timeline             - Active timeline and session id
//! - GET    /api/v1/sessions             - Cached session list projection
//! - POST   /api/v1/sessions/new         - Start a new unpersisted session
//! - POST   /api/v1/sessions/refresh     - Refetch the session list
//! - POST   /api/v1/sessions/{id}/load   - Load a cached session
//! - DELETE /api/v1/sessions/{id}        - Delete a session
//! - POST   /api/v1/signout              - Drop the owner's controller

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use uuid::Uuid;

use synapse_types::session::{PromptSession, SessionId};
use synapse_types::turn::Turn;

use crate::http::error::AppError;
use crate::http::extractors::owner::OwnerIdentity;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// The active conversation state as the UI renders it.
#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub timeline: Vec<Turn>,
    pub session_id: Option<SessionId>,
    pub pending: bool,
}

/// Parse a session id from a path parameter, returning a 400 error on
/// invalid format.
fn parse_session_id(s: &str) -> Result<SessionId, AppError> {
    s.parse::<SessionId>()
        .map_err(|_| AppError::Validation(format!("Invalid session id: {s}")))
}

/// GET /api/v1/timeline - Active timeline, session id, and pending flag.
pub async fn get_timeline(
    State(state): State<AppState>,
    owner: OwnerIdentity,
) -> Result<Json<ApiResponse<TimelineResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let controller = state.controller_for(&owner.0).await?;
    let controller = controller.lock().await;

    let resp = TimelineResponse {
        timeline: controller.timeline().to_vec(),
        session_id: controller.active_session_id().cloned(),
        pending: controller.is_pending(),
    };

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(resp, request_id, elapsed)))
}

/// GET /api/v1/sessions - The cached session list, newest first.
pub async fn list_sessions(
    State(state): State<AppState>,
    owner: OwnerIdentity,
) -> Result<Json<ApiResponse<Vec<PromptSession>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let controller = state.controller_for(&owner.0).await?;
    let controller = controller.lock().await;

    let sessions = controller.sessions().to_vec();

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(sessions, request_id, elapsed)))
}

/// POST /api/v1/sessions/refresh - Explicitly refetch the session list.
pub async fn refresh_sessions(
    State(state): State<AppState>,
    owner: OwnerIdentity,
) -> Result<Json<ApiResponse<Vec<PromptSession>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let controller = state.controller_for(&owner.0).await?;
    let mut controller = controller.lock().await;

    controller.refresh_sessions().await?;
    let sessions = controller.sessions().to_vec();

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(sessions, request_id, elapsed)))
}

/// POST /api/v1/sessions/new - Reset to a new unpersisted session.
pub async fn new_session(
    State(state): State<AppState>,
    owner: OwnerIdentity,
) -> Result<Json<ApiResponse<TimelineResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let controller = state.controller_for(&owner.0).await?;
    let mut controller = controller.lock().await;

    controller.start_new_session();

    let resp = TimelineResponse {
        timeline: Vec::new(),
        session_id: None,
        pending: controller.is_pending(),
    };

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(resp, request_id, elapsed)))
}

/// POST /api/v1/sessions/{id}/load - Load a session from the cache.
pub async fn load_session(
    State(state): State<AppState>,
    owner: OwnerIdentity,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<TimelineResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_session_id(&session_id)?;

    let controller = state.controller_for(&owner.0).await?;
    let mut controller = controller.lock().await;

    controller.load_session(&sid)?;

    let resp = TimelineResponse {
        timeline: controller.timeline().to_vec(),
        session_id: controller.active_session_id().cloned(),
        pending: controller.is_pending(),
    };

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(resp, request_id, elapsed)))
}

/// DELETE /api/v1/sessions/{id} - Delete a session.
pub async fn delete_session(
    State(state): State<AppState>,
    owner: OwnerIdentity,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_session_id(&session_id)?;

    let controller = state.controller_for(&owner.0).await?;
    let mut controller = controller.lock().await;

    controller.delete_session(&sid).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        serde_json::json!({"deleted": true}),
        request_id,
        elapsed,
    )))
}

/// POST /api/v1/signout - Drop the owner's controller and cached state.
pub async fn sign_out(
    State(state): State<AppState>,
    owner: OwnerIdentity,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    state.sign_out(&owner.0).await;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        serde_json::json!({"signed_out": true}),
        request_id,
        elapsed,
    )))
}
