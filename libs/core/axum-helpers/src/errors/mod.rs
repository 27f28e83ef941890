pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body of every failure response.
///
/// ```json
/// { "message": "Os IDs informados são diferentes", "data": null }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    /// Always `null` on failures
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// The causes of server-side failures are logged and never sent to clients.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Path extraction error: {0}")]
    PathRejection(#[from] PathRejection),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    /// Business rule rejection (HTTP 406)
    #[error("Not Acceptable: {0}")]
    NotAcceptable(String),

    /// `message` goes to the client, `cause` only to the log.
    #[error("Internal Server Error: {message}: {cause}")]
    Internal { message: String, cause: String },
}

impl AppError {
    pub fn internal(message: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        AppError::Internal {
            message: message.into(),
            cause: cause.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::InvalidJson.code(),
                    "JSON extraction error: {}",
                    e.body_text()
                );
                json_rejection(&e)
            }
            AppError::PathRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::InvalidPath.code(),
                    "Path extraction error: {}",
                    e.body_text()
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::InvalidPath.default_message().to_string(),
                )
            }
            AppError::Validation(e) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Validation error: {}",
                    e
                );
                (StatusCode::BAD_REQUEST, validation_message(&e))
            }
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = ErrorCode::BadRequest.code(), "Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                (StatusCode::NOT_FOUND, msg)
            }
            AppError::NotAcceptable(msg) => {
                tracing::info!(
                    error_code = ErrorCode::NotAcceptable.code(),
                    "Not acceptable: {}",
                    msg
                );
                (StatusCode::NOT_ACCEPTABLE, msg)
            }
            AppError::Internal { message, cause } => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    cause = %cause,
                    "{}",
                    message
                );
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Body rejections are client errors (400). A missing field reads like a
/// failed `required` rule: `"<campo> não pode ser vazio"`.
fn json_rejection(rejection: &JsonRejection) -> (StatusCode, String) {
    match rejection {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            let text = rejection.body_text();
            if let Some(field) = missing_field(&text) {
                return (
                    StatusCode::BAD_REQUEST,
                    format!("{} não pode ser vazio", field),
                );
            }
            (StatusCode::BAD_REQUEST, text)
        }
        other => (other.status(), other.body_text()),
    }
}

/// Field name out of serde's "missing field `x`" message.
fn missing_field(text: &str) -> Option<&str> {
    let (_, rest) = text.split_once("missing field `")?;
    rest.split_once('`').map(|(field, _)| field)
}

/// Joins every field error into one line, fields sorted by name.
///
/// Errors without a custom message fall back to `"<field> não é válido"`.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(msg) => msg.to_string(),
                None => format!("{} não é válido", field),
            })
        })
        .collect();

    if messages.is_empty() {
        ErrorCode::ValidationError.default_message().to_string()
    } else {
        messages.join(", ")
    }
}
