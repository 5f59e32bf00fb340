use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ai_client::AiError;
use crate::auth::AuthError;
use crate::render::TemplateError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// An empty-but-successful generation is deliberately NOT a variant here: the
/// pipeline surfaces it as a 200 with `success: false` (see
/// `generation::pipeline`).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Template '{0}' not found")]
    TemplateNotFound(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Malformed generation: {0}")]
    MalformedGeneration(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        AppError::UpstreamUnavailable(err.to_string())
    }
}

impl From<TemplateError> for AppError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::NotFound(name) => AppError::TemplateNotFound(name),
            TemplateError::Upstream(msg) => AppError::UpstreamUnavailable(msg),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Rejected => AppError::Unauthorized,
            AuthError::Upstream(msg) => AppError::UpstreamUnavailable(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::TemplateNotFound(name) => (
                StatusCode::NOT_FOUND,
                "TEMPLATE_NOT_FOUND",
                format!("Template '{name}' not found"),
            ),
            AppError::UpstreamUnavailable(msg) => {
                tracing::error!("Upstream failure: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM_UNAVAILABLE",
                    "An upstream service could not be reached".to_string(),
                )
            }
            AppError::MalformedGeneration(msg) => {
                tracing::error!("Malformed generation: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MALFORMED_GENERATION",
                    "Failed to parse AI resume JSON".to_string(),
                )
            }
            AppError::Persistence(err) => {
                tracing::error!("Store error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PERSISTENCE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(err) => {
                tracing::error!("Internal error: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_not_found_is_a_client_error() {
        let response = AppError::TemplateNotFound("template1.html".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn upstream_and_malformed_are_server_errors() {
        let upstream = AppError::UpstreamUnavailable("timeout".to_string()).into_response();
        assert_eq!(upstream.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let malformed = AppError::MalformedGeneration("bad json".to_string()).into_response();
        assert_eq!(malformed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn auth_rejection_maps_to_unauthorized() {
        let err: AppError = AuthError::Rejected.into();
        assert!(matches!(err, AppError::Unauthorized));
    }
}
