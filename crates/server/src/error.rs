//! Unified error handling with Sentry integration.
//!
//! Declined requests and server faults take different paths: a
//! [`ServiceError`] becomes the `{"success": false}` envelope with status 200,
//! while a [`StoreError`] is captured to Sentry and answered with a bare 500.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use coinhall_core::Email;

use crate::services::ServiceError;
use crate::store::StoreError;

/// Application-level error type for the HTTP API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Persisting the store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The request was declined by a service.
    #[error("Rejected: {0}")]
    Rejected(#[from] ServiceError),
}

/// Failure envelope. `message` is omitted when the service gives none.
#[derive(Debug, Serialize)]
struct Declined {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Rejected(err) => {
                tracing::info!(reason = %err, "Request declined");
                let body = Declined {
                    success: false,
                    message: err.client_message(),
                };
                (StatusCode::OK, Json(body)).into_response()
            }
            Self::Store(_) => {
                let event_id = sentry::capture_error(&self);
                tracing::error!(
                    error = %self,
                    sentry_event_id = %event_id,
                    "Request error"
                );
                // Don't expose internal error details to clients
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Associate subsequent Sentry events on this scope with a player.
pub fn set_sentry_user(email: &Email) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;
    use coinhall_core::Coins;

    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(StoreError::from(std::io::Error::other("disk full")));
        assert!(err.to_string().starts_with("Store error: "));

        let err = AppError::from(ServiceError::InvalidAmount);
        assert_eq!(err.to_string(), "Rejected: invalid amount");
    }

    #[tokio::test]
    async fn test_declined_with_message() {
        let err = AppError::from(ServiceError::InsufficientFunds {
            balance: Coins::new(10),
            price: Coins::new(60),
        });
        let (status, json) = body_json(err).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Insufficient funds");
    }

    #[tokio::test]
    async fn test_declined_without_message() {
        let (status, json) = body_json(ServiceError::MissingField("email").into()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!({ "success": false }));
    }

    #[test]
    fn test_store_error_is_500() {
        let io = std::io::Error::other("disk full");
        let response = AppError::from(StoreError::from(io)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
