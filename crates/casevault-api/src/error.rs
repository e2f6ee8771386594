//! Casevault — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use casevault_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The case pack failed to load or validate.
    #[error("pack error: {0}")]
    Pack(#[from] DomainError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DomainError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "session_not_found"),
            DomainError::UnknownCase(_) => (StatusCode::NOT_FOUND, "unknown_case"),
            DomainError::InvalidChoice { .. } => (StatusCode::BAD_REQUEST, "invalid_choice"),
            DomainError::InvalidState { .. } => (StatusCode::CONFLICT, "invalid_state"),
            DomainError::CaseLocked(_) => (StatusCode::CONFLICT, "case_locked"),
            DomainError::UnknownNode(_) => (StatusCode::INTERNAL_SERVER_ERROR, "unknown_node"),
            DomainError::InvalidGraph(_) => (StatusCode::INTERNAL_SERVER_ERROR, "invalid_graph"),
            DomainError::Content(_) => (StatusCode::INTERNAL_SERVER_ERROR, "content_error"),
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use casevault_core::ids::{CaseId, NodeId};
    use uuid::Uuid;

    fn status_of(err: DomainError) -> StatusCode {
        let response = ApiError(err).into_response();
        response.status()
    }

    #[test]
    fn test_session_not_found_maps_to_404() {
        let id = Uuid::new_v4();
        assert_eq!(
            status_of(DomainError::SessionNotFound(id)),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_unknown_case_maps_to_404() {
        assert_eq!(
            status_of(DomainError::UnknownCase(CaseId(99))),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_invalid_choice_maps_to_400() {
        assert_eq!(
            status_of(DomainError::InvalidChoice {
                index: 4,
                available: 2,
            }),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_invalid_state_maps_to_409() {
        assert_eq!(
            status_of(DomainError::InvalidState {
                operation: "select_choice",
                state: "revealing",
            }),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_case_locked_maps_to_409() {
        assert_eq!(
            status_of(DomainError::CaseLocked(CaseId(3))),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_unknown_node_maps_to_500() {
        assert_eq!(
            status_of(DomainError::UnknownNode(NodeId::from("missing"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_content_error_maps_to_500() {
        assert_eq!(
            status_of(DomainError::Content("bad pack".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
