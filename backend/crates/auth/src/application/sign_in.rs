//! Sign In Use Case
//!
//! Authenticates an admin by email and password and issues a session token.

use chrono::Utc;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::SessionIssuer;
use crate::domain::entity::admin_account::AdminAccount;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::{
    admin_password::{AdminPassword, RawPassword},
    email::Email,
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// Bearer token
    pub token: String,
    pub expires_at_ms: i64,
    pub admin: AdminAccount,
}

pub struct SignInUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignInUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation(
                "Please provide email and password".into(),
            ));
        }

        let candidate = RawPassword::candidate(input.password);

        // A malformed email cannot belong to an account
        let admin = match Email::new(input.email) {
            Ok(email) => self.repo.find_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(mut admin) = admin else {
            // Same verify cost as a known email with a wrong password
            self.config
                .decoy_password()?
                .verify(&candidate, self.config.pepper());
            return Err(AuthError::InvalidCredentials);
        };

        if !admin.password.verify(&candidate, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        // Transparent upgrade when the configured work factor changed
        if admin.password.needs_rehash(&self.config.hash_cost) {
            let upgraded =
                AdminPassword::from_raw(&candidate, self.config.pepper(), &self.config.hash_cost)?;
            let stored = self
                .repo
                .upgrade_password(&admin.admin_id, &admin.password, &upgraded, Utc::now())
                .await?;
            if stored {
                admin.set_password(upgraded);
                tracing::info!(admin_id = %admin.admin_id, "Password hash upgraded");
            } else {
                tracing::debug!(
                    admin_id = %admin.admin_id,
                    "Password changed during sign-in; hash upgrade skipped"
                );
            }
        }

        admin.record_login();
        self.repo
            .record_login(&admin.admin_id, admin.updated_at)
            .await?;

        let session = SessionIssuer::new(self.config.clone()).issue(&admin.admin_id);

        tracing::info!(
            admin_id = %admin.admin_id,
            role = %admin.role,
            "Admin signed in"
        );

        Ok(SignInOutput {
            token: session.token,
            expires_at_ms: session.expires_at_ms,
            admin,
        })
    }
}
