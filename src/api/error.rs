//! Response envelope and error-to-status mapping.

use crate::breakdown::domain::BreakdownError;
use crate::task::domain::TaskDomainError;
use crate::task::services::TaskServiceError;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::error;

const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Status code and JSON body returned by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    status: StatusCode,
    body: Value,
}

impl ApiResponse {
    /// Serialises `payload` as the body of a response with `status`.
    ///
    /// # Errors
    ///
    /// Returns an internal [`ApiError`] when serialisation fails.
    pub fn json(status: StatusCode, payload: &impl Serialize) -> ApiResult {
        let body = serde_json::to_value(payload).map_err(|err| ApiError::internal(&err))?;
        Ok(Self { status, body })
    }

    /// Creates a response from an already built JSON body.
    #[must_use]
    pub const fn from_value(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    /// Creates a response with no body.
    #[must_use]
    pub const fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            body: Value::Null,
        }
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the JSON body.
    #[must_use]
    pub const fn body(&self) -> &Value {
        &self.body
    }
}

/// Result type returned by handlers.
pub type ApiResult = Result<ApiResponse, ApiError>;

/// Handler failure carrying the status and client-facing message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{status}: {message}")]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates a 400 error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Creates a 404 error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    /// Creates a 503 error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: message.into(),
        }
    }

    /// Logs `err` and creates a 500 error with a generic message.
    #[must_use]
    pub fn internal(err: &impl std::fmt::Display) -> Self {
        error!(error = %err, "request failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: INTERNAL_ERROR_MESSAGE.to_owned(),
        }
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the client-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ApiError> for ApiResponse {
    fn from(err: ApiError) -> Self {
        Self {
            status: err.status,
            body: json!({ "error": err.message }),
        }
    }
}

impl From<TaskDomainError> for ApiError {
    fn from(err: TaskDomainError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<BreakdownError> for ApiError {
    fn from(err: BreakdownError) -> Self {
        match err {
            BreakdownError::EmptyTitle => Self::bad_request(err.to_string()),
            BreakdownError::Prompt(_) => Self::internal(&err),
            BreakdownError::Parse
            | BreakdownError::Shape
            | BreakdownError::Field { .. }
            | BreakdownError::Empty
            | BreakdownError::ProviderUnavailable { .. } => Self::unavailable(err.to_string()),
        }
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::Validation(domain) => domain.into(),
            TaskServiceError::PositionTaken { .. } => Self::bad_request(err.to_string()),
            TaskServiceError::TaskNotFound(_) | TaskServiceError::SubtaskNotFound(_) => {
                Self::not_found(err.to_string())
            }
            TaskServiceError::Breakdown(breakdown) => breakdown.into(),
            TaskServiceError::Repository(_) => Self::internal(&err),
        }
    }
}
