//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Input failed validation; the message is safe to show
    #[error("{0}")]
    Validation(String),

    /// Request body is not the expected JSON
    #[error("Invalid request body")]
    InvalidBody(#[from] JsonRejection),

    /// Unknown email or wrong password. One variant for both.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Current password did not match during a password change
    #[error("Current password is incorrect")]
    IncorrectCurrentPassword,

    /// Missing, malformed, forged or expired session token
    #[error("Not authorized to access this route")]
    Unauthorized,

    /// Authenticated, but the role lacks the capability
    #[error("Not authorized to perform this action")]
    Forbidden,

    #[error("Admin not found")]
    AdminNotFound,

    #[error("Admin with this email already exists")]
    DuplicateEmail,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::InvalidBody(_) => ErrorKind::Validation,
            AuthError::InvalidCredentials
            | AuthError::IncorrectCurrentPassword
            | AuthError::Unauthorized => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::AdminNotFound => ErrorKind::NotFound,
            AuthError::DuplicateEmail => ErrorKind::Conflict,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials | AuthError::IncorrectCurrentPassword => {
                "INVALID_CREDENTIALS"
            }
            AuthError::DuplicateEmail => "DUPLICATE_EMAIL",
            other => other.kind().code(),
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::Forbidden => {
                tracing::warn!("Admin lacks capability for requested action");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let code = err.code();
        match err {
            AuthError::Database(e) => {
                let app = AppError::from(e);
                // Pool exhaustion stays 503; everything else is an opaque 500
                if app.kind() == ErrorKind::ServiceUnavailable {
                    return app;
                }
                let internal = AppError::internal("Internal server error");
                match app.detail() {
                    Some(detail) => internal.with_detail(detail),
                    None => internal,
                }
            }
            AuthError::Internal(msg) => {
                AppError::internal("Internal server error").with_detail(msg)
            }
            AuthError::InvalidBody(rejection) => {
                AppError::validation("Invalid request body").with_detail(rejection.body_text())
            }
            other => AppError::new(other.kind(), other.to_string()).with_code(code),
        }
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::Validation("x".into()).status_code(), 400);
        assert_eq!(AuthError::InvalidCredentials.status_code(), 401);
        assert_eq!(AuthError::Unauthorized.status_code(), 401);
        assert_eq!(AuthError::Forbidden.status_code(), 403);
        assert_eq!(AuthError::AdminNotFound.status_code(), 404);
        assert_eq!(AuthError::DuplicateEmail.status_code(), 409);
        assert_eq!(AuthError::Internal("x".into()).status_code(), 500);
    }

    #[test]
    fn test_credential_errors_share_code() {
        assert_eq!(AuthError::InvalidCredentials.code(), "INVALID_CREDENTIALS");
        assert_eq!(AuthError::IncorrectCurrentPassword.code(), "INVALID_CREDENTIALS");
        assert_eq!(AuthError::DuplicateEmail.code(), "DUPLICATE_EMAIL");
        assert_eq!(AuthError::Forbidden.code(), "FORBIDDEN");
    }

    #[test]
    fn test_internal_detail_is_not_the_message() {
        let app: AppError = AuthError::Internal("argon2 exploded".into()).into();
        assert_eq!(app.message(), "Internal server error");
        assert_eq!(app.detail(), Some("argon2 exploded"));
        assert!(app.to_body(false).get("systemMessage").is_none());
    }

    #[test]
    fn test_pool_timeout_is_unavailable() {
        let app: AppError = AuthError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(app.status_code(), 503);
    }
}
