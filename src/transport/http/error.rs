//! Error translation for the HTTP layer.
//!
//! Every failure on the request path ends up here: validation-shaped errors become
//! field-keyed 400s, everything else is logged in full and answered with a generic 500.

use crate::domain::pagination::PaginationError;
use crate::domain::schema::ValidationErrors;
use crate::storage::RepositoryError;
use crate::transport::http::types::InternalErrorBody;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::any::Any;
use std::fmt;
use thiserror::Error;

pub const GENERIC_FAILURE_MESSAGE: &str =
    "Sorry, something went wrong on our side. Please try again later.";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Entity input failed schema validation (400).
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// Malformed request shape, e.g. pagination parameters (400).
    #[error(transparent)]
    Pagination(#[from] PaginationError),

    /// Repository failure (500, logged).
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            Self::Pagination(err) => (StatusCode::BAD_REQUEST, Json(err.fields)).into_response(),
            Self::Repository(err) => {
                let kind = match &err {
                    RepositoryError::Configuration { .. } => "configuration failure",
                    RepositoryError::Persistence(_) => "persistence failure",
                };
                internal_error(kind, &err)
            }
        }
    }
}

/// Logs `detail` and returns the generic 500 body tagged with `kind`.
pub fn internal_error(kind: &'static str, detail: &dyn fmt::Display) -> Response {
    tracing::error!(kind, error = %detail, "unhandled failure while serving request");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(InternalErrorBody {
            message: GENERIC_FAILURE_MESSAGE.to_string(),
            error: kind.to_string(),
        }),
    )
        .into_response()
}

/// Panic hook for `CatchPanicLayer`: a panic is one more unhandled failure.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "panic with non-string payload".to_string()
    };
    internal_error("internal failure", &format!("panic: {}", detail))
}
