//! Centralized error handling.
//!
//! Provides a unified error type for services, repositories and handlers,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

use crate::domain::Review;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Caller identity
    #[error("{0}")]
    Identity(String),

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("{0} already exists")]
    Conflict(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // Store and credential failures
    #[error("{operation}: {source}")]
    Persistence {
        operation: &'static str,
        #[source]
        source: DbErr,
    },

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    // Partial results: the first step succeeded, a follow-up step did not
    #[error("add photos to review {review_id}: {source}")]
    PhotosNotAttached {
        review_id: i32,
        #[source]
        source: Box<AppError>,
    },

    #[error("load review {}: {source}", .review.id)]
    ReviewIncomplete {
        review: Box<Review>,
        #[source]
        source: Box<AppError>,
    },

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    review_id: Option<i32>,
}

impl AppError {
    /// Get error code for client
    fn code(&self) -> &'static str {
        match self {
            AppError::Identity(_) => "UNAUTHORIZED",
            AppError::NotFound => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Persistence { .. } => "DATABASE_ERROR",
            AppError::Hashing(_) => "HASHING_ERROR",
            AppError::PhotosNotAttached { .. } => "PHOTOS_NOT_ATTACHED",
            AppError::ReviewIncomplete { .. } => "REVIEW_INCOMPLETE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Identity(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Persistence { .. }
            | AppError::Hashing(_)
            | AppError::PhotosNotAttached { .. }
            | AppError::ReviewIncomplete { .. }
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::Identity(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Conflict(msg) => format!("{} already exists", msg),

            // Hide details for internal errors
            AppError::Persistence { operation, source } => {
                tracing::error!(operation, "Database error: {:?}", source);
                format!("failed to {}", operation)
            }
            AppError::Hashing(msg) => {
                tracing::error!("Hashing error: {}", msg);
                "Failed to secure password".to_string()
            }
            AppError::PhotosNotAttached { review_id, source } => {
                format!(
                    "review {} was created but its photos were not attached: {}",
                    review_id,
                    source.user_message()
                )
            }
            AppError::ReviewIncomplete { review, source } => {
                format!(
                    "review {} was found but its photos or comments could not be loaded: {}",
                    review.id,
                    source.user_message()
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }

    /// Id of the review that was created before a follow-up step failed.
    pub fn review_id(&self) -> Option<i32> {
        match self {
            AppError::PhotosNotAttached { review_id, .. } => Some(*review_id),
            AppError::ReviewIncomplete { review, .. } => Some(review.id),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
                review_id: self.review_id(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Attaches the failed store operation to a `DbErr`.
pub trait DbResultExt<T> {
    fn context(self, operation: &'static str) -> AppResult<T>;
}

impl<T> DbResultExt<T> for Result<T, DbErr> {
    fn context(self, operation: &'static str) -> AppResult<T> {
        self.map_err(|source| AppError::persistence(operation, source))
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn identity(msg: impl Into<String>) -> Self {
        AppError::Identity(msg.into())
    }

    pub fn hashing(msg: impl Into<String>) -> Self {
        AppError::Hashing(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn persistence(operation: &'static str, source: DbErr) -> Self {
        AppError::Persistence { operation, source }
    }

    /// True when the store rejected a write because of a unique index.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            AppError::Persistence { source, .. } => {
                matches!(source.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
            }
            _ => false,
        }
    }
}
