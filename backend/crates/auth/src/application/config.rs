//! Application Configuration
//!
//! Configuration for the Auth application layer. Built once at startup and
//! shared as `Arc<AuthConfig>`.

use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use platform::crypto::{random_array, to_base64url};
pub use platform::password::HashCost;

use crate::domain::value_object::admin_password::{AdminPassword, RawPassword};
use crate::error::{AuthError, AuthResult};

/// Minimum session secret length in bytes
pub const MIN_SECRET_LEN: usize = 32;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Session secret key for HMAC signing (at least 32 bytes)
    session_secret: Vec<u8>,
    /// Session token lifetime
    pub session_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Argon2id work factor for new hashes
    pub hash_cost: HashCost,
    /// Anyone may register without a token
    pub open_registration: bool,
    /// Hash of a random password at `hash_cost`, built on first use
    decoy_password: OnceLock<AdminPassword>,
}

impl AuthConfig {
    /// Create config with an explicit session secret
    pub fn new(session_secret: Vec<u8>) -> AuthResult<Self> {
        if session_secret.len() < MIN_SECRET_LEN {
            return Err(AuthError::Internal(format!(
                "Session secret must be at least {} bytes",
                MIN_SECRET_LEN
            )));
        }

        Ok(Self {
            session_secret,
            session_ttl: Duration::from_secs(24 * 3600), // 24 hours
            password_pepper: None,
            hash_cost: HashCost::default(),
            open_registration: false,
            decoy_password: OnceLock::new(),
        })
    }

    /// Create config with a random session secret (for development)
    ///
    /// Tokens do not survive a restart.
    pub fn with_random_secret() -> Self {
        Self {
            session_secret: random_array::<MIN_SECRET_LEN>().to_vec(),
            session_ttl: Duration::from_secs(24 * 3600),
            password_pepper: None,
            hash_cost: HashCost::default(),
            open_registration: false,
            decoy_password: OnceLock::new(),
        }
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn with_pepper(mut self, pepper: Option<Vec<u8>>) -> Self {
        self.password_pepper = pepper.filter(|p| !p.is_empty());
        self.decoy_password = OnceLock::new();
        self
    }

    pub fn with_hash_cost(mut self, cost: HashCost) -> Self {
        self.hash_cost = cost;
        self.decoy_password = OnceLock::new();
        self
    }

    pub fn with_open_registration(mut self, open: bool) -> Self {
        self.open_registration = open;
        self
    }

    pub fn session_secret(&self) -> &[u8] {
        &self.session_secret
    }

    /// Get session TTL in milliseconds
    pub fn session_ttl_ms(&self) -> i64 {
        i64::try_from(self.session_ttl.as_millis()).unwrap_or(i64::MAX)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Stored-hash stand-in for sign-ins whose email matches no account.
    ///
    /// Verifying against it costs the same as verifying a real account
    /// hashed at the configured cost.
    pub(crate) fn decoy_password(&self) -> AuthResult<&AdminPassword> {
        if let Some(decoy) = self.decoy_password.get() {
            return Ok(decoy);
        }
        let raw = RawPassword::candidate(to_base64url(&random_array::<24>()));
        let decoy = AdminPassword::from_raw(&raw, self.pepper(), &self.hash_cost)?;
        Ok(self.decoy_password.get_or_init(|| decoy))
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_secret", &"[REDACTED]")
            .field("session_ttl", &self.session_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("hash_cost", &self.hash_cost)
            .field("open_registration", &self.open_registration)
            .finish()
    }
}
