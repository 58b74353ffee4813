use crate::models::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt;

/// Generic message returned for every failed submission.
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit email";

/// Failures from the lead store.
///
/// The distinction between variants is only used for logging; callers of the
/// HTTP endpoint see the same generic failure for all of them.
#[derive(Debug)]
pub enum StorageError {
    /// A lead with this normalized email already exists.
    Duplicate(String),
    /// Error reported by the database driver.
    Database(sqlx::Error),
    /// The store could not be reached or initialized.
    Unavailable(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Duplicate(email) => write!(f, "Lead already exists: {}", email),
            StorageError::Database(e) => write!(f, "Database error: {}", e),
            StorageError::Unavailable(msg) => write!(f, "Store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<sqlx::Error> for StorageError {
    /// Maps Postgres unique violations to [`StorageError::Duplicate`].
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StorageError::Duplicate(db_err.message().to_string())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StorageError::Unavailable(err.to_string())
            }
            _ => StorageError::Database(err),
        }
    }
}

/// Application-specific error types.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or missing email. Raised before any side effect.
    Validation(String),
    /// Lead could not be stored (duplicate, connectivity, driver error).
    Persistence(StorageError),
    /// Email provider rejected or never received the message.
    Dispatch(String),
    /// Internal server error.
    Internal(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Persistence(e) => write!(f, "Persistence error: {}", e),
            AppError::Dispatch(msg) => write!(f, "Dispatch error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Innermost error, with all context layers stripped.
    pub fn root(&self) -> &AppError {
        match self {
            AppError::WithContext { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.root() {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Persistence(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Dispatch(_) => StatusCode::BAD_GATEWAY,
            AppError::WithContext { .. } => unreachable!("root() strips context"),
        }
    }

    /// Logs the full error and converts it into the uniform failure response.
    ///
    /// With `legacy_status` the HTTP status is always 200 and the body carries
    /// `status: 400`, matching the first deployment of the endpoint.
    pub fn into_response_with_mode(self, legacy_status: bool) -> Response {
        match self.root() {
            AppError::Validation(msg) => {
                tracing::warn!("Rejected submission: {}", msg);
            }
            AppError::Persistence(StorageError::Duplicate(_)) => {
                tracing::error!("Email submission error (duplicate lead): {}", self);
            }
            _ => {
                tracing::error!("Email submission error: {}", self);
            }
        }

        let (http_status, body_status) = if legacy_status {
            (StatusCode::OK, StatusCode::BAD_REQUEST)
        } else {
            let status = self.status_code();
            (status, status)
        };

        let body = Json(ErrorResponse {
            error: SUBMIT_FAILED_MESSAGE.to_string(),
            status: body_status.as_u16(),
        });

        (http_status, body).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_response_with_mode(false)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Persistence(err)
    }
}

impl From<reqwest::Error> for AppError {
    /// Transport failures talking to the email provider.
    fn from(err: reqwest::Error) -> Self {
        AppError::Dispatch(format!("Resend request failed: {}", err))
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<AppError>,
{
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e.into()),
            context: context.into(),
        })
    }
}
