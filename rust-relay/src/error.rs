//! Error types for the submission endpoint.
//!
//! Every variant renders as a status code plus a generic JSON body. Details
//! stay in the logs; the submitter never learns which step failed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Failure while handling a form submission.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// Request used a verb other than POST
    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),

    /// No webhook destination configured for the submission
    #[error("webhook not configured: {0}")]
    Configuration(String),

    /// Request body could not be decoded
    #[error("malformed submission: {0}")]
    Parse(String),

    /// Anything else, including webhook delivery failures
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// JSON error body.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}

impl SubmitError {
    pub fn status(&self) -> StatusCode {
        match self {
            SubmitError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            SubmitError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SubmitError::Parse(_) => StatusCode::BAD_REQUEST,
            SubmitError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the submitter.
    pub fn public_message(&self) -> &'static str {
        match self {
            SubmitError::MethodNotAllowed(_) => "Method Not Allowed",
            SubmitError::Configuration(_) => "Webhook URL not configured",
            SubmitError::Parse(_) => "Bad Request",
            SubmitError::Internal(_) => "Internal Server Error",
        }
    }
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = format!("{:#}", self);
        if status.is_server_error() {
            error!(status_code = status.as_u16(), error = %detail, "submission_failed");
        } else {
            warn!(status_code = status.as_u16(), error = %detail, "submission_rejected");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.public_message(),
            }),
        )
            .into_response()
    }
}
