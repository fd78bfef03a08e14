mod database_config;
mod raw_config;
mod security_config;
mod smtp_config;

use url::Url;

pub use self::{
    database_config::DatabaseConfig, raw_config::RawConfig, security_config::SecurityConfig,
    smtp_config::SmtpConfig,
};

/// Main server config.
#[derive(Clone, Debug)]
pub struct Config {
    /// External/public URL of the client application, used to construct share and reset links.
    pub public_url: Url,
    /// Database configuration.
    pub db: DatabaseConfig,
    /// Security configuration (session tokens, secrets encryption, reset tokens).
    pub security: SecurityConfig,
    /// Configuration for the SMTP functionality.
    pub smtp: Option<SmtpConfig>,
}

impl AsRef<Config> for Config {
    fn as_ref(&self) -> &Config {
        self
    }
}

impl From<RawConfig> for Config {
    fn from(raw_config: RawConfig) -> Self {
        Self {
            public_url: raw_config.public_url,
            db: raw_config.db,
            security: raw_config.security,
            smtp: raw_config.smtp,
        }
    }
}
