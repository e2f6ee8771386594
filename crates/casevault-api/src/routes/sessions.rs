//! Routes for the Session & Progress bounded context.

use axum::extract::{Path, State};
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use casevault_content::catalog::CaseEntry;
use casevault_session::progress::CaseStatus;
use casevault_session::session::lock_session;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body returned after a session is created.
#[derive(Debug, Serialize)]
pub struct SessionCreatedResponse {
    /// Identifier for the new session.
    pub session_id: Uuid,
}

/// One catalog entry with the session's derived status for it.
#[derive(Debug, Serialize)]
pub struct CaseListing {
    /// Static catalog fields from the pack.
    #[serde(flatten)]
    pub entry: CaseEntry,
    /// COMPLETED, AVAILABLE, or LOCKED for this session.
    pub status: CaseStatus,
}

/// Response body for the per-session case listing.
#[derive(Debug, Serialize)]
pub struct CaseListResponse {
    /// Cases this session has completed.
    pub completed: usize,
    /// Total cases in the catalog.
    pub total: usize,
    /// Catalog entries in pack order.
    pub cases: Vec<CaseListing>,
}

/// Response body for the unlocked-rewards listing.
#[derive(Debug, Serialize)]
pub struct UnlocksResponse {
    /// Reward labels in the order they were earned.
    pub unlocked: Vec<String>,
}

/// POST /
#[instrument(skip(state))]
async fn create_session(State(state): State<AppState>) -> Json<SessionCreatedResponse> {
    info!("handling create_session command");
    let (session_id, _) = state.registry.create(state.clock.as_ref());
    Json(SessionCreatedResponse { session_id })
}

/// GET /{session_id}/cases
#[instrument(skip(state))]
async fn list_cases(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CaseListResponse>, ApiError> {
    let slot = state.registry.get(session_id)?;
    let session = lock_session(&slot);

    let cases = state
        .pack
        .cases()
        .iter()
        .map(|case| CaseListing {
            entry: case.entry.clone(),
            status: session.status_of(case.entry.id),
        })
        .collect();

    Ok(Json(CaseListResponse {
        completed: session.completed_count(),
        total: state.pack.case_count(),
        cases,
    }))
}

/// GET /{session_id}/unlocks
#[instrument(skip(state))]
async fn list_unlocks(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<UnlocksResponse>, ApiError> {
    let slot = state.registry.get(session_id)?;
    let session = lock_session(&slot);

    Ok(Json(UnlocksResponse {
        unlocked: session.unlocked_rewards().to_vec(),
    }))
}

/// Returns the router for the session context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_session))
        .route("/{session_id}/cases", get(list_cases))
        .route("/{session_id}/unlocks", get(list_unlocks))
}
