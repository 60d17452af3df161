//! Auth Middleware
//!
//! Bearer-token gate for protected routes. On success the verified account
//! is stored in request extensions and read back with [`CurrentAdmin`].

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::{HeaderMap, Request, header, request::Parts};
use axum::middleware::Next;
use axum::response::Response;

use crate::application::VerifySessionUseCase;
use crate::domain::entity::admin_account::AdminAccount;
use crate::domain::repository::AdminRepository;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// The verified caller of a protected route
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub AdminAccount);

impl<S> FromRequestParts<S> for CurrentAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentAdmin>()
            .cloned()
            .ok_or(AuthError::Unauthorized)
    }
}

/// Token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Middleware that requires a valid session token
pub async fn require_admin<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    R: AdminRepository + Send + Sync + 'static,
{
    let token = bearer_token(req.headers())
        .ok_or(AuthError::Unauthorized)?
        .to_owned();

    let account = VerifySessionUseCase::new(state.repo.clone(), state.config.clone())
        .execute(&token)
        .await?;

    req.extensions_mut().insert(CurrentAdmin(account));

    Ok(next.run(req).await)
}
