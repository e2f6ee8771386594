//! Routes for the document-archive listings.

use axum::extract::{Query, State};
use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};

use casevault_content::archive::{ArchiveCategory, RecentDocument};

use crate::state::AppState;

/// Query parameters for GET /categories.
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    /// Case-insensitive substring filter over category names.
    pub q: Option<String>,
}

/// Response body for the category listing.
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    /// Matching categories in pack order.
    pub categories: Vec<ArchiveCategory>,
}

/// Response body for the recent-documents listing.
#[derive(Debug, Serialize)]
pub struct RecentDocumentsResponse {
    /// Recent documents in pack order.
    pub documents: Vec<RecentDocument>,
}

/// GET /categories
async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Json<CategoriesResponse> {
    let categories = state
        .pack
        .search_categories(query.q.as_deref())
        .into_iter()
        .cloned()
        .collect();
    Json(CategoriesResponse { categories })
}

/// GET /recent
async fn list_recent(State(state): State<AppState>) -> Json<RecentDocumentsResponse> {
    Json(RecentDocumentsResponse {
        documents: state.pack.recent_documents().to_vec(),
    })
}

/// Returns the router for the archive listings.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/recent", get(list_recent))
}
