//! Verify Session Use Case
//!
//! Resolves a bearer token to the admin account it was issued for.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::SessionIssuer;
use crate::domain::entity::admin_account::AdminAccount;
use crate::domain::repository::AdminRepository;
use crate::error::{AuthError, AuthResult};

pub struct VerifySessionUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
    issuer: SessionIssuer,
}

impl<R> VerifySessionUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            issuer: SessionIssuer::new(config),
        }
    }

    /// `Unauthorized` for a bad signature, malformed or expired token, or an
    /// account that no longer exists.
    pub async fn execute(&self, token: &str) -> AuthResult<AdminAccount> {
        let claims = self.issuer.verify(token)?;

        match self.repo.find_by_id(&claims.admin_id).await? {
            Some(account) => Ok(account),
            None => {
                tracing::warn!(admin_id = %claims.admin_id, "Valid token for missing account");
                Err(AuthError::Unauthorized)
            }
        }
    }
}
