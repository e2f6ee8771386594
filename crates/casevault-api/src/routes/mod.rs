//! Route modules organized by bounded context.

pub mod archive;
pub mod health;
pub mod playback;
pub mod sessions;
pub mod site;

use axum::Router;

use crate::state::AppState;

/// Assembles the full API router.
///
/// Shared by `main.rs` and the integration-test harness so both always
/// serve the same route tree.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(site::router())
        .nest(
            "/api/v1/sessions",
            sessions::router().merge(playback::router()),
        )
        .nest("/api/v1/archive", archive::router())
}
