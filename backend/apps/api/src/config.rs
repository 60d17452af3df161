//! Server Configuration
//!
//! Read once from the environment (after `.env` is loaded) at startup.

use anyhow::{Context, bail};
use auth::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    /// Decoded `SESSION_SECRET`; `None` means a random per-process secret
    pub session_secret: Option<Vec<u8>>,
    pub session_ttl: Duration,
    pub password_pepper: Option<Vec<u8>>,
    pub open_registration: bool,
    pub frontend_origins: Vec<String>,
    pub request_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;

        let session_secret = match get("SESSION_SECRET") {
            Some(encoded) => Some(
                general_purpose::STANDARD
                    .decode(&encoded)
                    .context("SESSION_SECRET must be base64")?,
            ),
            None if cfg!(debug_assertions) => None,
            None => bail!("SESSION_SECRET must be set in production"),
        };

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            database_url,
            database_max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", 5)?,
            port: parse_or(&get, "PORT", 5000)?,
            session_secret,
            session_ttl: Duration::from_secs(parse_or(&get, "SESSION_TTL_SECS", 86_400)?),
            password_pepper: get("PASSWORD_PEPPER").map(String::into_bytes),
            open_registration: parse_or(&get, "ALLOW_OPEN_REGISTRATION", false)?,
            frontend_origins,
            request_timeout: Duration::from_secs(parse_or(&get, "REQUEST_TIMEOUT_SECS", 30)?),
        })
    }

    /// Auth settings derived from this configuration
    pub fn auth_config(&self) -> anyhow::Result<AuthConfig> {
        let config = match &self.session_secret {
            Some(secret) => AuthConfig::new(secret.clone())
                .map_err(|e| anyhow::anyhow!("Invalid SESSION_SECRET: {e}"))?,
            None => {
                tracing::warn!("SESSION_SECRET not set; tokens will not survive a restart");
                AuthConfig::with_random_secret()
            }
        };

        Ok(config
            .with_session_ttl(self.session_ttl)
            .with_pepper(self.password_pepper.clone())
            .with_open_registration(self.open_registration))
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(value) => value
            .parse()
            .with_context(|| format!("{key} has an invalid value: {value}")),
        None => Ok(default),
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("database_url", &"[REDACTED]")
            .field("database_max_connections", &self.database_max_connections)
            .field("port", &self.port)
            .field("session_secret", &self.session_secret.as_ref().map(|_| "[REDACTED]"))
            .field("session_ttl", &self.session_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("open_registration", &self.open_registration)
            .field("frontend_origins", &self.frontend_origins)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
