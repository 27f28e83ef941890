//! Error codes attached to log events.
//!
//! Clients only ever see the envelope message; the integer code goes to the
//! `error_code` field of the tracing event so failures can be grouped.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::NotAcceptable;
//! assert_eq!(code.as_str(), "NOT_ACCEPTABLE");
//! assert_eq!(code.code(), 1005);
//! ```

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    ValidationError,
    InvalidJson,
    InvalidPath,
    NotFound,
    /// Request understood but refused by a business rule
    NotAcceptable,
    BadRequest,

    // Server errors (5000-5999)
    InternalError,
}

impl ErrorCode {
    pub const fn code(&self) -> i32 {
        match self {
            ErrorCode::ValidationError => 1001,
            ErrorCode::InvalidJson => 1002,
            ErrorCode::InvalidPath => 1003,
            ErrorCode::NotFound => 1004,
            ErrorCode::NotAcceptable => 1005,
            ErrorCode::BadRequest => 1006,
            ErrorCode::InternalError => 5000,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidJson => "INVALID_JSON",
            ErrorCode::InvalidPath => "INVALID_PATH",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::NotAcceptable => "NOT_ACCEPTABLE",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Message sent to the client when the error carries none of its own.
    pub const fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "Request validation failed",
            ErrorCode::InvalidJson => "Invalid JSON body",
            ErrorCode::InvalidPath => "Invalid path parameter",
            ErrorCode::NotFound => "The requested resource was not found",
            ErrorCode::NotAcceptable => "Request not acceptable",
            ErrorCode::BadRequest => "Bad request",
            ErrorCode::InternalError => "An internal server error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
