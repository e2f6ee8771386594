//! Routes for the Playback bounded context.
//!
//! Every handler follows the same shape: resolve the session slot, lock
//! it, run the command on the session, then re-arm the reveal timer when
//! the command left the controller revealing. The timer holds only a weak
//! reference to the slot, so a dropped session silently stops its timer.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use casevault_core::ids::CaseId;
use casevault_playback::controller::RenderState;
use casevault_session::session::lock_session;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /{session_id}/playback/choice.
#[derive(Debug, Deserialize)]
pub struct SelectChoiceRequest {
    /// Zero-based index into the current node's choice list.
    pub index: usize,
}

/// Response body returned after an ending is acknowledged.
#[derive(Debug, Serialize)]
pub struct AcknowledgeResponse {
    /// The case just completed.
    pub case_id: CaseId,
    /// Reward label unlocked by the ending.
    pub unlock_reward: String,
    /// Total cases this session has completed.
    pub completed_count: usize,
}

/// POST /{session_id}/cases/{case_id}/open
#[instrument(skip(state))]
async fn open_case(
    State(state): State<AppState>,
    Path((session_id, case_id)): Path<(Uuid, u32)>,
) -> Result<Json<RenderState>, ApiError> {
    let case_id = CaseId(case_id);
    info!(%session_id, %case_id, "handling open_case command");

    let slot = state.registry.get(session_id)?;
    let mut session = lock_session(&slot);

    session.open_case(&state.pack, case_id)?;
    session.arm_reveal(&state.scheduler, Arc::downgrade(&slot));

    Ok(Json(session.render()?))
}

/// GET /{session_id}/playback
#[instrument(skip(state))]
async fn playback_state(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<RenderState>, ApiError> {
    let slot = state.registry.get(session_id)?;
    let session = lock_session(&slot);
    Ok(Json(session.render()?))
}

/// POST /{session_id}/playback/choice
#[instrument(skip(state, request), fields(index = request.index))]
async fn select_choice(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SelectChoiceRequest>,
) -> Result<Json<RenderState>, ApiError> {
    info!(%session_id, index = request.index, "handling select_choice command");

    let slot = state.registry.get(session_id)?;
    let mut session = lock_session(&slot);

    session.select_choice(request.index)?;
    session.arm_reveal(&state.scheduler, Arc::downgrade(&slot));

    Ok(Json(session.render()?))
}

/// POST /{session_id}/playback/acknowledge
#[instrument(skip(state))]
async fn acknowledge_ending(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<AcknowledgeResponse>, ApiError> {
    info!(%session_id, "handling acknowledge_ending command");

    let slot = state.registry.get(session_id)?;
    let mut session = lock_session(&slot);

    let completed = session.acknowledge_ending(state.unlock_sink.as_ref())?;

    Ok(Json(AcknowledgeResponse {
        case_id: completed.case_id,
        unlock_reward: completed.unlock_reward,
        completed_count: session.completed_count(),
    }))
}

/// POST /{session_id}/playback/abort
#[instrument(skip(state))]
async fn abort_playback(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<RenderState>, ApiError> {
    info!(%session_id, "handling abort_playback command");

    let slot = state.registry.get(session_id)?;
    let mut session = lock_session(&slot);

    session.abort()?;

    Ok(Json(session.render()?))
}

/// Returns the router for the playback context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{session_id}/cases/{case_id}/open", post(open_case))
        .route("/{session_id}/playback", get(playback_state))
        .route("/{session_id}/playback/choice", post(select_choice))
        .route("/{session_id}/playback/acknowledge", post(acknowledge_ending))
        .route("/{session_id}/playback/abort", post(abort_playback))
}
