// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("An account with this email already exists")]
    DuplicateEmail,

    #[error("Fund is already saved")]
    AlreadySaved,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Session token is invalid")]
    InvalidToken,

    #[error("Session token has expired")]
    ExpiredToken,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::AlreadySaved => StatusCode::BAD_REQUEST,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::InvalidCredentials
            | AppError::Unauthenticated
            | AppError::InvalidToken
            | AppError::ExpiredToken => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VAL_001",
            AppError::DuplicateEmail => "CONFLICT_001",
            AppError::AlreadySaved => "CONFLICT_002",
            AppError::InvalidCredentials => "AUTH_001",
            AppError::Unauthenticated => "AUTH_002",
            AppError::InvalidToken => "AUTH_003",
            AppError::ExpiredToken => "AUTH_004",
            AppError::NotFound(_) => "NF_001",
            AppError::Internal(_) => "INT_001",
            AppError::Io(_) => "IO_001",
            AppError::Json(_) => "JSON_001",
        }
    }

    /// Get a sanitized message suitable for production use.
    ///
    /// Every identity failure collapses to the same two strings so a caller
    /// cannot distinguish a wrong password from a missing account, or an
    /// expired token from a forged one.
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::Validation(msg) => format!("Validation failed: {msg}"),
            AppError::DuplicateEmail => "An account with this email already exists".to_string(),
            AppError::AlreadySaved => "Fund is already saved".to_string(),
            AppError::InvalidCredentials => "Invalid email or password".to_string(),
            AppError::Unauthenticated | AppError::InvalidToken | AppError::ExpiredToken => {
                "Authentication required".to_string()
            },
            AppError::NotFound(what) => format!("{what} not found"),
            AppError::Internal(_) | AppError::Io(_) | AppError::Json(_) => {
                "Internal server error".to_string()
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        if status.is_server_error() {
            tracing::error!(code = error_code, error = %self, "request failed");
        }

        // Use detailed messages in development, sanitized in production
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        let body = serde_json::json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}
