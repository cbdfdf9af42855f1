//! Application error taxonomy and its HTTP mapping.
//!
//! Every failure that leaves a handler is an [`AppError`]. The [`ErrorKind`]
//! decides the status code; the wrapped [`anyhow::Error`] carries the message.
//! Server-side failures never expose their message to the client: the body is
//! always `{"success": false, "error": "Server Error"}` and the real error is
//! logged instead.

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error as ThisError;
use validator::ValidationErrors;

/// Message returned for every 5xx response.
pub const SERVER_ERROR_MESSAGE: &str = "Server Error";

/// Message for a missing or structurally wrong `Authorization` header.
pub const MALFORMED_CREDENTIAL: &str = "missing or malformed credential";

/// Message for a token that failed signature, structure or expiry checks.
pub const INVALID_CREDENTIAL: &str = "invalid or expired credential";

/// Message for a valid identity lacking the required role.
pub const INSUFFICIENT_PERMISSIONS: &str = "insufficient permissions";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthenticated,
    Forbidden,
    NotFound,
    InvalidQuery,
    BadRequest,
    Conflict,
    StoreFailure,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidQuery | ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::StoreFailure | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
        }
    }

    pub fn unauthorized(message: &str) -> Self {
        Self::new(ErrorKind::Unauthenticated, anyhow!("{message}"))
    }

    pub fn forbidden(message: &str) -> Self {
        Self::new(ErrorKind::Forbidden, anyhow!("{message}"))
    }

    pub fn not_found(message: &str) -> Self {
        Self::new(ErrorKind::NotFound, anyhow!("{message}"))
    }

    pub fn invalid_query(message: String) -> Self {
        Self::new(ErrorKind::InvalidQuery, anyhow!(message))
    }

    pub fn bad_request(message: String) -> Self {
        Self::new(ErrorKind::BadRequest, anyhow!(message))
    }

    pub fn conflict(message: String) -> Self {
        Self::new(ErrorKind::Conflict, anyhow!(message))
    }

    pub fn store_failure<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::StoreFailure, err)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }

    /// The message that is safe to show to the client.
    pub fn public_message(&self) -> String {
        if self.status().is_server_error() {
            SERVER_ERROR_MESSAGE.to_string()
        } else {
            self.error.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = ?self.kind, error = ?self.error, "request failed");
        }

        let body = Json(json!({
            "success": false,
            "error": self.public_message(),
        }));

        (status, body).into_response()
    }
}

/// Failure reported by a collection store.
#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(#[source] Error),

    #[error("{0}")]
    Conflict(String),
}

impl StoreError {
    pub fn backend<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        StoreError::Backend(err.into())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(message) => AppError::conflict(message),
            backend @ StoreError::Backend(_) => AppError::store_failure(backend),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::bad_request(format_validation_errors(&errors))
    }
}

/// Flattens validator output into one human-readable line.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}
