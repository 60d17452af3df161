//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum_extra::extract::WithRejection;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    ChangePasswordInput, ChangePasswordUseCase, GetProfileUseCase, RegisterInput,
    RegisterUseCase, SignInInput, SignInUseCase, VerifySessionUseCase, authorize,
};
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::admin_role::Capability;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AdminProfile, ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse,
    ProfileResponse, RegisterRequest, RegisterResponse,
};
use crate::presentation::middleware::{CurrentAdmin, bearer_token};

/// Shared state for auth handlers and the bearer-token gate
pub struct AuthAppState<R> {
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R> {
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }
}

impl<R> Clone for AuthAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/admin/register
///
/// A bearer token is optional here; see `RegisterUseCase` for the guard.
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    WithRejection(Json(req), _): WithRejection<Json<RegisterRequest>, AuthError>,
) -> AuthResult<impl IntoResponse>
where
    R: AdminRepository + Send + Sync + 'static,
{
    // A presented token must be valid even though one is not always required
    let actor = match bearer_token(&headers) {
        Some(token) => Some(
            VerifySessionUseCase::new(state.repo.clone(), state.config.clone())
                .execute(token)
                .await?,
        ),
        None => None,
    };

    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        email: req.email,
        password: req.password,
        role: req.role,
    };

    let output = use_case.execute(input, actor.as_ref()).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "Admin account created successfully".to_string(),
            admin: (&output.admin).into(),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/admin/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, AuthError>,
) -> AuthResult<Json<LoginResponse>>
where
    R: AdminRepository + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        success: true,
        token: output.token,
        expires_at_ms: output.expires_at_ms,
        admin: (&output.admin).into(),
    }))
}

// ============================================================================
// Profile
// ============================================================================

/// GET /api/admin/profile
pub async fn profile<R>(
    State(state): State<AuthAppState<R>>,
    CurrentAdmin(admin): CurrentAdmin,
) -> AuthResult<Json<ProfileResponse>>
where
    R: AdminRepository + Send + Sync + 'static,
{
    authorize(&admin, Capability::ViewOwnProfile)?;

    let account = GetProfileUseCase::new(state.repo.clone())
        .execute(&admin.admin_id)
        .await?;

    Ok(Json(ProfileResponse {
        success: true,
        admin: AdminProfile::from(&account),
    }))
}

// ============================================================================
// Change Password
// ============================================================================

/// PUT /api/admin/change-password
pub async fn change_password<R>(
    State(state): State<AuthAppState<R>>,
    CurrentAdmin(admin): CurrentAdmin,
    WithRejection(Json(req), _): WithRejection<Json<ChangePasswordRequest>, AuthError>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AdminRepository + Send + Sync + 'static,
{
    authorize(&admin, Capability::ChangeOwnPassword)?;

    let use_case = ChangePasswordUseCase::new(state.repo.clone(), state.config.clone());

    use_case
        .execute(
            &admin.admin_id,
            ChangePasswordInput {
                current_password: req.current_password,
                new_password: req.new_password,
            },
        )
        .await?;

    Ok(Json(MessageResponse::ok("Password updated successfully")))
}
