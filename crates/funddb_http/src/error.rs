//! Transport error type with HTTP status mapping.

use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use funddb_core::{sanitize_log_field, RepoError};
use log::{error, warn};
use serde::Serialize;
use thiserror::Error;

/// Error returned by route handlers.
#[derive(Error, Debug)]
pub enum HttpError {
    /// Request body is not valid JSON or lacks a required field.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Core registry/ledger error.
    #[error("{0}")]
    Repo(#[from] RepoError),

    /// Path segment could not be decoded; treated like an unresolved campaign.
    #[error("Invalid path: {0}")]
    Path(#[from] PathRejection),

    /// Blocking store task panicked or was cancelled.
    #[error("Store task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// JSON error payload.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl HttpError {
    /// Maps the error to its HTTP status.
    ///
    /// Unresolved campaigns share 500 with store faults to stay compatible
    /// with existing clients; `RepoError::CampaignNotFound` remains distinct
    /// in the core should that mapping ever change.
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpError::Json(_) => StatusCode::BAD_REQUEST,
            HttpError::Repo(RepoError::Validation(_)) => StatusCode::BAD_REQUEST,
            HttpError::Repo(RepoError::CampaignNotFound(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::Repo(RepoError::Db(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::Repo(RepoError::InvalidData(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::Path(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        if status.is_server_error() {
            error!(
                "event=http_error module=http status={} error={}",
                status.as_u16(),
                sanitize_log_field(&message)
            );
        } else {
            warn!(
                "event=http_error module=http status={} error={}",
                status.as_u16(),
                sanitize_log_field(&message)
            );
        }

        let body = ErrorBody { error: message };
        (status, Json(body)).into_response()
    }
}
