//! Get Profile Use Case

use std::sync::Arc;

use kernel::id::AdminId;

use crate::domain::entity::admin_account::AdminAccount;
use crate::domain::repository::AdminRepository;
use crate::error::{AuthError, AuthResult};

pub struct GetProfileUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
}

impl<R> GetProfileUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Fresh read; the account may have vanished since its token was verified.
    pub async fn execute(&self, admin_id: &AdminId) -> AuthResult<AdminAccount> {
        self.repo
            .find_by_id(admin_id)
            .await?
            .ok_or(AuthError::AdminNotFound)
    }
}
