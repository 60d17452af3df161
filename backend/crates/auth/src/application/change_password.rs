//! Change Password Use Case

use std::sync::Arc;

use kernel::id::AdminId;

use crate::application::config::AuthConfig;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::admin_password::{AdminPassword, RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

pub struct ChangePasswordUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> ChangePasswordUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, admin_id: &AdminId, input: ChangePasswordInput) -> AuthResult<()> {
        if input.current_password.is_empty() {
            return Err(AuthError::Validation(
                "Please provide current and new password".into(),
            ));
        }

        let current = RawPassword::candidate(input.current_password);
        let new_password = RawPassword::new(input.new_password)?;

        let mut admin = self
            .repo
            .find_by_id(admin_id)
            .await?
            .ok_or(AuthError::AdminNotFound)?;

        if !admin.password.verify(&current, self.config.pepper()) {
            tracing::warn!(admin_id = %admin.admin_id, "Password change with wrong current password");
            return Err(AuthError::IncorrectCurrentPassword);
        }

        let hashed =
            AdminPassword::from_raw(&new_password, self.config.pepper(), &self.config.hash_cost)?;
        admin.set_password(hashed);
        self.repo
            .update_password(&admin.admin_id, &admin.password, admin.updated_at)
            .await?;

        tracing::info!(admin_id = %admin.admin_id, "Password changed");

        Ok(())
    }
}
