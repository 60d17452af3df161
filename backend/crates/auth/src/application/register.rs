//! Register Admin Use Case
//!
//! Registration is guarded:
//! - With no accounts in the store, the first `admin` may register without a
//!   token (bootstrap). The emptiness check and insert are one atomic step.
//! - Afterwards the caller must hold `Capability::RegisterAdmin`.
//! - `AuthConfig::open_registration` lifts the guard entirely.

use std::sync::Arc;

use crate::application::authorize::authorize;
use crate::application::config::AuthConfig;
use crate::domain::entity::admin_account::AdminAccount;
use crate::domain::repository::AdminRepository;
use crate::domain::value_object::{
    admin_password::{AdminPassword, RawPassword},
    admin_role::{AdminRole, Capability},
    email::Email,
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    /// Role code; `admin` when absent
    pub role: Option<String>,
}

/// Register output
pub struct RegisterOutput {
    pub admin: AdminAccount,
}

pub struct RegisterUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// `actor` is the verified caller, if a bearer token was presented.
    pub async fn execute(
        &self,
        input: RegisterInput,
        actor: Option<&AdminAccount>,
    ) -> AuthResult<RegisterOutput> {
        let bootstrap = match actor {
            Some(actor) if !self.config.open_registration => {
                authorize(actor, Capability::RegisterAdmin)?;
                false
            }
            Some(_) => false,
            None if self.config.open_registration => false,
            None => {
                if self.repo.has_any().await? {
                    return Err(AuthError::Unauthorized);
                }
                true
            }
        };

        let email = Email::new(input.email)?;
        let raw_password = RawPassword::new(input.password)?;
        let role = parse_role(input.role.as_deref())?;

        if bootstrap && role != AdminRole::Admin {
            return Err(AuthError::Validation(
                "The first account must have the admin role".into(),
            ));
        }

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::DuplicateEmail);
        }

        let password =
            AdminPassword::from_raw(&raw_password, self.config.pepper(), &self.config.hash_cost)?;
        let admin = AdminAccount::new(email, password, role);

        if bootstrap {
            // Another bootstrap may have won the race since `has_any`
            if !self.repo.create_if_none_exist(&admin).await? {
                return Err(AuthError::Unauthorized);
            }
            tracing::info!(admin_id = %admin.admin_id, "Bootstrap admin registered");
        } else {
            self.repo.create(&admin).await?;
            tracing::info!(
                admin_id = %admin.admin_id,
                role = %admin.role,
                registered_by = ?actor.map(|a| a.admin_id),
                "Admin registered"
            );
        }

        Ok(RegisterOutput { admin })
    }
}

fn parse_role(role: Option<&str>) -> AuthResult<AdminRole> {
    match role.map(str::trim).filter(|r| !r.is_empty()) {
        None => Ok(AdminRole::default()),
        Some(code) => AdminRole::from_code(code).ok_or_else(|| {
            AuthError::Validation("Role must be either admin or supervisor".into())
        }),
    }
}
