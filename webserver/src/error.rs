//! WebServer-specific error types and HTTP mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use leads::LeadError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error(transparent)]
    Lead(#[from] LeadError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type WebServerResult<T> = Result<T, WebServerError>;

impl IntoResponse for WebServerError {
    fn into_response(self) -> Response {
        let lead_err = match self {
            WebServerError::Lead(err) => err,
            WebServerError::Io(err) => {
                tracing::error!(error = %err, "I/O failure in request handler");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "internal error" })),
                )
                    .into_response();
            }
        };

        let status = match &lead_err {
            LeadError::Unauthorized => StatusCode::UNAUTHORIZED,
            LeadError::Forbidden => StatusCode::FORBIDDEN,
            LeadError::NotFound { .. } => StatusCode::NOT_FOUND,
            LeadError::Conflict => StatusCode::CONFLICT,
            LeadError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            LeadError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            LeadError::BatchTooLarge { .. } => StatusCode::BAD_REQUEST,
            LeadError::ImportRejected { .. } => StatusCode::BAD_REQUEST,
            LeadError::InvalidCsv { .. } => StatusCode::BAD_REQUEST,
            LeadError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match lead_err {
            LeadError::ValidationFailed { errors } => {
                json!({ "message": "Invalid input", "errors": errors })
            }
            LeadError::ImportRejected { errors } => json!({ "errors": errors }),
            other => json!({ "message": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
