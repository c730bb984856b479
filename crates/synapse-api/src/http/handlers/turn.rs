//! Turn submission HTTP handler.
//!
//! Endpoint:
//! - POST /api/v1/turns - submit a user turn to the active session

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use synapse_core::session::controller::SubmitOutcome;
use synapse_types::session::SessionId;
use synapse_types::turn::Turn;

use crate::http::error::AppError;
use crate::http::extractors::owner::OwnerIdentity;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitTurnRequest {
    pub text: String,
}

/// What a submit produced. `outcome` is `"reply"` when the model
/// answered and `"error"` when an error turn took its place; either way
/// `turn` is already the last entry of `timeline`. The UI's celebratory
/// feedback keys off `"reply"`.
#[derive(Debug, Serialize)]
pub struct SubmitTurnResponse {
    pub outcome: String,
    pub turn: Turn,
    pub session_id: Option<SessionId>,
    pub timeline: Vec<Turn>,
}

/// POST /api/v1/turns - Submit a user turn.
pub async fn submit_turn(
    State(state): State<AppState>,
    owner: OwnerIdentity,
    Json(req): Json<SubmitTurnRequest>,
) -> Result<Json<ApiResponse<SubmitTurnResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let controller = state.controller_for(&owner.0).await?;
    let mut controller = controller.lock().await;

    let outcome = controller.submit_turn(&req.text).await?;
    let (outcome_kind, turn) = match outcome {
        SubmitOutcome::Reply(turn) => ("reply", turn),
        SubmitOutcome::Failed(turn) => ("error", turn),
    };

    let resp = SubmitTurnResponse {
        outcome: outcome_kind.to_string(),
        turn,
        session_id: controller.active_session_id().cloned(),
        timeline: controller.timeline().to_vec(),
    };

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(resp, request_id, elapsed)))
}
