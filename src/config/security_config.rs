use serde_derive::{Deserialize, Serialize};
use serde_with::{DurationSeconds, serde_as};
use std::time::Duration;

/// Configuration for the security functionality.
#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SecurityConfig {
    /// Secret key used to sign JWT session tokens. The server refuses to start without it.
    pub jwt_secret: Option<String>,
    /// Hex-encoded 32-byte key used to encrypt user secrets at rest. The server refuses to start
    /// without it.
    pub secrets_encryption_key: Option<String>,
    /// Lifetime of the session tokens issued on login. Default is 24 hours.
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_session_ttl")]
    pub session_ttl: Duration,
    /// Lifetime of the password reset tokens. Default is 1 hour.
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_password_reset_ttl")]
    pub password_reset_ttl: Duration,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            secrets_encryption_key: None,
            session_ttl: default_session_ttl(),
            password_reset_ttl: default_password_reset_ttl(),
        }
    }
}

const fn default_session_ttl() -> Duration {
    Duration::from_secs(24 * 60 * 60)
}

const fn default_password_reset_ttl() -> Duration {
    Duration::from_secs(60 * 60)
}
