use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use core_types::{DomainError, ErrorKind};
use database::DbError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// A classified domain failure carried out of the core in an
    /// `Outcome` envelope.
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// A database failure on a path that bypasses the domain core
    /// (direct store access from a handler).
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

/// The published error-kind → status-code table.
///
/// This mapping is part of the external contract: clients observe these
/// statuses, so it must stay stable across transport implementations.
pub fn status_for_kind(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Provider => StatusCode::BAD_GATEWAY,
        ErrorKind::Calculator | ErrorKind::Application | ErrorKind::Unexpected => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Domain failures serialize their own message and detail map; they
/// are authored inside the core and safe to show. Lower-level failures
/// are logged in full and redacted on the wire.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Domain(err) => {
                let status = status_for_kind(err.kind());
                if status.is_server_error() {
                    tracing::error!(error = %err, kind = ?err.kind(), "domain failure");
                } else {
                    tracing::warn!(error = %err, kind = ?err.kind(), "request failed");
                }
                let body = Json(json!({ "error": err.message(), "details": err.details() }));
                (status, body).into_response()
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                let body = Json(json!({
                    "error": "An internal database error occurred",
                    "details": {},
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_table_is_the_published_contract() {
        assert_eq!(status_for_kind(ErrorKind::Validation), StatusCode::BAD_REQUEST);
        assert_eq!(status_for_kind(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for_kind(ErrorKind::Provider), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for_kind(ErrorKind::Calculator), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_for_kind(ErrorKind::Application), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_for_kind(ErrorKind::Unexpected), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
