//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::AdminId;

use crate::domain::entity::admin_account::AdminAccount;
use crate::domain::value_object::admin_password::AdminPassword;
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// Admin account repository trait
#[trait_variant::make(AdminRepository: Send)]
pub trait LocalAdminRepository {
    /// Insert a new account. `AuthError::DuplicateEmail` if the email is taken.
    async fn create(&self, admin: &AdminAccount) -> AuthResult<()>;

    /// Insert only while the store holds no accounts at all.
    ///
    /// The emptiness check and the insert are atomic. Returns `false` when
    /// some account already exists and nothing was written.
    async fn create_if_none_exist(&self, admin: &AdminAccount) -> AuthResult<bool>;

    /// Whether any account exists
    async fn has_any(&self) -> AuthResult<bool>;

    async fn find_by_id(&self, admin_id: &AdminId) -> AuthResult<Option<AdminAccount>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<AdminAccount>>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Set `last_login_at` and `updated_at` only
    async fn record_login(&self, admin_id: &AdminId, at: DateTime<Utc>) -> AuthResult<()>;

    /// Replace the password hash unconditionally
    async fn update_password(
        &self,
        admin_id: &AdminId,
        password: &AdminPassword,
        at: DateTime<Utc>,
    ) -> AuthResult<()>;

    /// Replace the password hash only while it still equals `current`.
    ///
    /// Returns `false` when the stored hash has changed since it was read.
    async fn upgrade_password(
        &self,
        admin_id: &AdminId,
        current: &AdminPassword,
        upgraded: &AdminPassword,
        at: DateTime<Utc>,
    ) -> AuthResult<bool>;
}
