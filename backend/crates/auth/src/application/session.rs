//! Session Tokens
//!
//! Stateless bearer tokens of the form
//! `<admin-uuid>.<expires-at-unix-ms>.<base64url(HMAC-SHA256(secret, payload))>`
//! where `payload` is everything before the last dot. The MAC is checked in
//! constant time before any field is parsed.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::AdminId;
use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};

use crate::application::config::AuthConfig;
use crate::error::{AuthError, AuthResult};

/// A freshly issued token
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at_ms: i64,
}

/// Verified token contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClaims {
    pub admin_id: AdminId,
    pub expires_at_ms: i64,
}

/// Issues and verifies signed session tokens
#[derive(Clone)]
pub struct SessionIssuer {
    config: Arc<AuthConfig>,
}

impl SessionIssuer {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    pub fn issue(&self, admin_id: &AdminId) -> IssuedSession {
        self.issue_at(admin_id, Utc::now().timestamp_millis())
    }

    pub fn verify(&self, token: &str) -> AuthResult<SessionClaims> {
        self.verify_at(token, Utc::now().timestamp_millis())
    }

    fn issue_at(&self, admin_id: &AdminId, now_ms: i64) -> IssuedSession {
        let expires_at_ms = now_ms.saturating_add(self.config.session_ttl_ms());
        let payload = format!("{}.{}", admin_id, expires_at_ms);
        let signature = hmac_sha256(self.config.session_secret(), payload.as_bytes());

        IssuedSession {
            token: format!("{}.{}", payload, to_base64url(&signature)),
            expires_at_ms,
        }
    }

    fn verify_at(&self, token: &str, now_ms: i64) -> AuthResult<SessionClaims> {
        let (payload, signature_b64) = token.rsplit_once('.').ok_or(AuthError::Unauthorized)?;

        let signature = from_base64url(signature_b64).map_err(|_| AuthError::Unauthorized)?;

        if !verify_hmac_sha256(self.config.session_secret(), payload.as_bytes(), &signature) {
            return Err(AuthError::Unauthorized);
        }

        let (admin_id, expires_at_ms) =
            payload.split_once('.').ok_or(AuthError::Unauthorized)?;

        let admin_id: AdminId = admin_id.parse().map_err(|_| AuthError::Unauthorized)?;
        let expires_at_ms: i64 = expires_at_ms.parse().map_err(|_| AuthError::Unauthorized)?;

        if now_ms >= expires_at_ms {
            tracing::debug!(admin_id = %admin_id, "Expired session token");
            return Err(AuthError::Unauthorized);
        }

        Ok(SessionClaims {
            admin_id,
            expires_at_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn issuer() -> SessionIssuer {
        let config = AuthConfig::new(vec![9u8; 32])
            .unwrap()
            .with_session_ttl(Duration::from_secs(60));
        SessionIssuer::new(Arc::new(config))
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = issuer();
        let admin_id = AdminId::new();

        let issued = issuer.issue_at(&admin_id, 1_000);
        assert_eq!(issued.expires_at_ms, 61_000);
        assert!(issued.token.starts_with(&admin_id.to_string()));

        let claims = issuer.verify_at(&issued.token, 2_000).unwrap();
        assert_eq!(claims.admin_id, admin_id);
        assert_eq!(claims.expires_at_ms, 61_000);
    }

    #[test]
    fn test_expired_token() {
        let issuer = issuer();
        let issued = issuer.issue_at(&AdminId::new(), 1_000);

        assert!(issuer.verify_at(&issued.token, 60_999).is_ok());
        assert!(matches!(
            issuer.verify_at(&issued.token, 61_000),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn test_tampered_expiry_rejected() {
        let issuer = issuer();
        let admin_id = AdminId::new();
        let issued = issuer.issue_at(&admin_id, 1_000);

        let signature = issued.token.rsplit('.').next().unwrap();
        let forged = format!("{}.{}.{}", admin_id, i64::MAX, signature);
        assert!(issuer.verify_at(&forged, 2_000).is_err());
    }

    #[test]
    fn test_other_secret_rejected() {
        let issued = issuer().issue_at(&AdminId::new(), 1_000);

        let other = SessionIssuer::new(Arc::new(AuthConfig::new(vec![8u8; 32]).unwrap()));
        assert!(other.verify_at(&issued.token, 2_000).is_err());
    }

    #[test]
    fn test_malformed_tokens() {
        let issuer = issuer();
        for token in ["", "abc", "a.b", "a.b.c", "...", "not-a-uuid.123.AAAA"] {
            assert!(
                matches!(issuer.verify_at(token, 0), Err(AuthError::Unauthorized)),
                "token {token:?} should be rejected"
            );
        }
    }
}
