//! Access Control Gate

use crate::domain::entity::admin_account::AdminAccount;
use crate::domain::value_object::admin_role::Capability;
use crate::error::{AuthError, AuthResult};

/// `Forbidden` unless the account's role holds `capability`.
pub fn authorize(account: &AdminAccount, capability: Capability) -> AuthResult<()> {
    if account.role.can(capability) {
        return Ok(());
    }

    tracing::warn!(
        admin_id = %account.admin_id,
        role = %account.role,
        capability = %capability,
        "Capability denied"
    );
    Err(AuthError::Forbidden)
}
