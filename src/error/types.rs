/**
 * Application Error Types
 *
 * This module defines the error enum shared by the HTTP handlers and the
 * realtime dispatcher. Each variant maps to one HTTP status code via
 * `status_code()`.
 *
 * # Error Categories
 *
 * - `Validation` - a required field is missing or empty (400)
 * - `NotFound` - an unknown user/room/profile reference (404)
 * - `Conflict` - a uniqueness constraint was violated, e.g. duplicate room
 *   name or already-registered email (409)
 * - `Unauthorized` - missing or invalid bearer token (401)
 * - `Storage` - the persistence layer failed (500)
 * - `Serialization` - JSON encoding/decoding failed (500)
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Convenience alias used throughout the handlers and the dispatcher.
pub type AppResult<T> = Result<T, AppError>;

/// Application-wide error type
///
/// Storage errors wrap `sqlx::Error` directly so database calls can use `?`.
/// Unique-constraint violations should not be left as `Storage`; call sites
/// that can conflict translate them with [`AppError::conflict_on_unique`].
#[derive(Debug, Error)]
pub enum AppError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Validation {
        /// Name of the offending field
        field: String,
    },

    /// The referenced entity does not exist.
    #[error("{what} not found")]
    NotFound {
        /// What was looked up (e.g. "room", "user")
        what: String,
    },

    /// A store-level uniqueness constraint rejected the write.
    #[error("{what} already exists")]
    Conflict {
        /// What collided (e.g. "room name")
        what: String,
    },

    /// Missing or invalid credentials.
    #[error("unauthorized: {reason}")]
    Unauthorized {
        /// Why the request was rejected
        reason: String,
    },

    /// Persistence layer failure.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// Anything else that should not leak details to the client.
    #[error("internal error: {0}")]
    Internal(String),

    /// JSON serialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Create a validation error for a missing/empty field.
    pub fn validation(field: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Create a conflict error.
    pub fn conflict(what: impl Into<String>) -> Self {
        Self::Conflict { what: what.into() }
    }

    /// Create an unauthorized error.
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    /// Translate a unique-constraint violation into `Conflict`.
    ///
    /// Room name uniqueness (and email uniqueness at registration and on
    /// profile patches) is enforced
    /// by the store, not by a check-then-create sequence in application logic,
    /// so the constraint violation is the one place the conflict shows up.
    pub fn conflict_on_unique(err: sqlx::Error, what: impl Into<String>) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::Conflict {
                what: what.into(),
            },
            _ => Self::Storage(err),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation` - 400 Bad Request
    /// - `NotFound` - 404 Not Found
    /// - `Conflict` - 409 Conflict
    /// - `Unauthorized` - 401 Unauthorized
    /// - `Storage` / `Serialization` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Storage(_) | Self::Serialization(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the message reported to the client.
    ///
    /// Storage errors are reported generically; the underlying cause is logged
    /// server-side instead of being echoed back.
    pub fn message(&self) -> String {
        match self {
            Self::Storage(_) | Self::Serialization(_) | Self::Internal(_) => {
                "internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}
