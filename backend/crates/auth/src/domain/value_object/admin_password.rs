//! Admin Password Value Object
//!
//! Domain wrapper over `platform::password`: policy violations become
//! [`AuthError::Validation`] with user-facing messages.

use platform::password::{ClearTextPassword, HashCost, HashedPassword, PasswordPolicyError};
use std::fmt;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input, zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// A newly chosen password; the password policy applies.
    pub fn new(raw: String) -> AuthResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| {
            let message = match e {
                PasswordPolicyError::TooShort { min, .. } => {
                    format!("Password must be at least {} characters", min)
                }
                PasswordPolicyError::TooLong { max, .. } => {
                    format!("Password must be at most {} characters", max)
                }
                PasswordPolicyError::EmptyOrWhitespace => {
                    "Password cannot be empty".to_string()
                }
                PasswordPolicyError::InvalidCharacter => {
                    "Password contains invalid characters".to_string()
                }
            };
            AuthError::Validation(message)
        })?;

        Ok(Self(clear_text))
    }

    /// A password presented as proof of identity; no policy applies.
    pub fn candidate(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Admin Password (Hashed, for storage)
// ============================================================================

/// Hashed admin password in Argon2id PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct AdminPassword(HashedPassword);

impl AdminPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>, cost: &HashCost) -> AuthResult<Self> {
        let hashed = raw.inner().hash(pepper, cost)?;
        Ok(Self(hashed))
    }

    pub fn from_phc_string(phc: impl Into<String>) -> AuthResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc)?;
        Ok(Self(hashed))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }

    pub fn needs_rehash(&self, cost: &HashCost) -> bool {
        self.0.needs_rehash(cost)
    }
}

impl fmt::Debug for AdminPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AdminPassword").field(&"[HASH]").finish()
    }
}
