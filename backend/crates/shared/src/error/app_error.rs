//! Application Error
//!
//! [`AppError`] is what every context error turns into at the HTTP boundary.
//! It carries a safe, client-facing message plus an optional internal detail
//! that is only rendered in development builds.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// Unified application error
///
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::not_found("Feedback not found");
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// assert_eq!(err.code(), "NOT_FOUND");
///
/// let err = AppError::unauthorized("Invalid credentials").with_code("INVALID_CREDENTIALS");
/// assert_eq!(err.status_code(), 401);
/// assert_eq!(err.code(), "INVALID_CREDENTIALS");
/// ```
pub struct AppError {
    kind: ErrorKind,
    /// Machine-readable code; defaults to the kind's code
    code: Cow<'static, str>,
    /// Client-facing message
    message: Cow<'static, str>,
    /// Internal diagnostic (driver errors etc.), development builds only
    detail: Option<String>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            code: Cow::Borrowed(kind.code()),
            message: message.into(),
            detail: None,
            source: None,
        }
    }

    #[inline]
    pub fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    #[inline]
    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    #[inline]
    pub fn forbidden(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    #[inline]
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    #[inline]
    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    #[inline]
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    #[inline]
    pub fn service_unavailable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    /// Override the machine-readable code
    #[inline]
    pub fn with_code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        self.code = code.into();
        self
    }

    /// Attach an internal diagnostic
    #[inline]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        if self.detail.is_none() {
            self.detail = Some(source.to_string());
        }
        self.source = Some(Box::new(source));
        self
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }

    /// Response body. `expose_detail` is only true for development builds.
    pub fn to_body(&self, expose_detail: bool) -> serde_json::Value {
        let mut body = serde_json::json!({
            "success": false,
            "error": self.code(),
            "message": self.message(),
        });
        if expose_detail {
            if let Some(detail) = &self.detail {
                body["systemMessage"] = serde_json::Value::String(detail.clone());
            }
        }
        body
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("code", &self.code);
        builder.field("message", &self.message);
        if let Some(detail) = &self.detail {
            builder.field("detail", detail);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_map_to_status() {
        assert_eq!(AppError::validation("x").status_code(), 400);
        assert_eq!(AppError::unauthorized("x").status_code(), 401);
        assert_eq!(AppError::forbidden("x").status_code(), 403);
        assert_eq!(AppError::not_found("x").status_code(), 404);
        assert_eq!(AppError::conflict("x").status_code(), 409);
        assert_eq!(AppError::internal("x").status_code(), 500);
        assert_eq!(AppError::service_unavailable("x").status_code(), 503);
    }

    #[test]
    fn test_code_defaults_to_kind_and_can_be_overridden() {
        let err = AppError::conflict("Admin with this email already exists");
        assert_eq!(err.code(), "CONFLICT");
        let err = err.with_code("DUPLICATE_EMAIL");
        assert_eq!(err.code(), "DUPLICATE_EMAIL");
        assert_eq!(err.to_string(), "[DUPLICATE_EMAIL] Admin with this email already exists");
    }

    #[test]
    fn test_body_hides_detail_unless_exposed() {
        let err = AppError::internal("Failed to submit feedback")
            .with_detail("relation \"feedback\" does not exist");

        let hidden = err.to_body(false);
        assert_eq!(hidden["success"], false);
        assert_eq!(hidden["error"], "INTERNAL_ERROR");
        assert!(hidden.get("systemMessage").is_none());

        let shown = err.to_body(true);
        assert_eq!(shown["systemMessage"], "relation \"feedback\" does not exist");
    }

    #[test]
    fn test_with_source_fills_detail() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err = AppError::internal("Unexpected failure").with_source(io_err);
        assert!(err.source().is_some());
        assert_eq!(err.detail(), Some("disk on fire"));
    }
}
