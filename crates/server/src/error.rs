//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side failures to
//! Sentry before responding to the client. All route handlers should return
//! `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::access::AccessError;
use crate::services::catalog::CatalogError;

/// Application-level error type for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Access operation failed.
    #[error("Access error: {0}")]
    Access(#[from] AccessError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture storage failures to Sentry
        if matches!(
            self,
            Self::Catalog(CatalogError::Storage(_)) | Self::Access(AccessError::Storage(_))
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Catalog(err) => match err {
                CatalogError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
                CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
                CatalogError::Conflict(_) => StatusCode::CONFLICT,
                CatalogError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Access(err) => match err {
                AccessError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
                AccessError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AccessError::Conflict(_) => StatusCode::CONFLICT,
                AccessError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        };

        // Don't expose storage details to clients
        let message = match &self {
            Self::Catalog(CatalogError::Storage(_)) | Self::Access(AccessError::Storage(_)) => {
                "Internal server error".to_string()
            }
            Self::Catalog(err) => err.to_string(),
            Self::Access(err) => err.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a username.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(username: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            username: Some(username.to_string()),
            ..Default::default()
        }));
    });
}
