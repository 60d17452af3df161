//! Feedback Error Types
//!
//! Feedback-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use auth::AuthError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Feedback-specific result type alias
pub type FeedbackResult<T> = Result<T, FeedbackError>;

#[derive(Debug, Error)]
pub enum FeedbackError {
    /// Input failed validation; the message is safe to show
    #[error("{0}")]
    Validation(String),

    #[error("Invalid request body")]
    InvalidBody(#[from] JsonRejection),

    #[error("Invalid query string")]
    InvalidQuery(#[from] QueryRejection),

    /// No record for the tracking id or internal id
    #[error("Feedback not found")]
    NotFound,

    /// Session or capability failure from the admin gate
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FeedbackError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FeedbackError::Validation(_)
            | FeedbackError::InvalidBody(_)
            | FeedbackError::InvalidQuery(_) => ErrorKind::Validation,
            FeedbackError::NotFound => ErrorKind::NotFound,
            FeedbackError::Auth(e) => e.kind(),
            FeedbackError::Database(_) | FeedbackError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            FeedbackError::Auth(e) => e.code(),
            other => other.kind().code(),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    fn log(&self) {
        match self {
            FeedbackError::Database(e) => {
                tracing::error!(error = %e, "Feedback database error");
            }
            FeedbackError::Internal(msg) => {
                tracing::error!(message = %msg, "Feedback internal error");
            }
            FeedbackError::Auth(AuthError::Forbidden) => {
                tracing::warn!("Admin lacks capability for feedback action");
            }
            _ => {
                tracing::debug!(error = %self, "Feedback error");
            }
        }
    }
}

impl From<FeedbackError> for AppError {
    fn from(err: FeedbackError) -> Self {
        match err {
            FeedbackError::Auth(e) => AppError::from(e),
            FeedbackError::Database(e) => {
                let app = AppError::from(e);
                if app.kind() == ErrorKind::ServiceUnavailable {
                    return app;
                }
                let internal = AppError::internal("Internal server error");
                match app.detail() {
                    Some(detail) => internal.with_detail(detail),
                    None => internal,
                }
            }
            FeedbackError::Internal(msg) => {
                AppError::internal("Internal server error").with_detail(msg)
            }
            FeedbackError::InvalidBody(rejection) => {
                AppError::validation("Invalid request body").with_detail(rejection.body_text())
            }
            FeedbackError::InvalidQuery(rejection) => {
                AppError::validation("Invalid query string").with_detail(rejection.body_text())
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for FeedbackError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
