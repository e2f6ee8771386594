//! Site branding endpoint.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Branding and pack metadata for the single parameterized view.
#[derive(Debug, Serialize)]
pub struct SiteResponse {
    /// Brand name shown in the header.
    pub brand: String,
    /// Sub-brand line under the name.
    pub division: String,
    /// Tagline shown in the footer.
    pub tagline: String,
    /// Whether the view should offer the ambient-audio toggle.
    pub audio_enabled: bool,
    /// SHA-256 fingerprint of the loaded pack source.
    pub pack_digest: String,
    /// Number of cases in the catalog.
    pub case_count: usize,
}

/// GET /api/v1/site
async fn site_config(State(state): State<AppState>) -> Json<SiteResponse> {
    let site = state.pack.site();
    Json(SiteResponse {
        brand: site.brand.clone(),
        division: site.division.clone(),
        tagline: site.tagline.clone(),
        audio_enabled: site.audio_enabled,
        pack_digest: state.pack.digest().to_string(),
        case_count: state.pack.case_count(),
    })
}

/// Returns the site router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/v1/site", get(site_config))
}
