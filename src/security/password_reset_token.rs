use anyhow::Context;
use serde::Deserialize;
use std::fmt::{Display, Formatter};

/// Number of random bytes in a password reset token.
const TOKEN_SIZE: usize = 32;

/// Single-use password reset token, hex-encoded. Only its SHA-256 digest is persisted.
#[derive(Deserialize, Debug, Eq, PartialEq, Clone)]
#[serde(transparent)]
pub struct PasswordResetToken(String);

impl PasswordResetToken {
    /// Generates a new token using cryptographically secure randomness.
    pub fn generate() -> anyhow::Result<Self> {
        let mut bytes = [0u8; TOKEN_SIZE];
        openssl::rand::rand_bytes(&mut bytes)
            .with_context(|| "Failed to generate password reset token.")?;
        Ok(Self(hex::encode(bytes)))
    }

    pub fn digest(&self) -> [u8; 32] {
        openssl::sha::sha256(self.0.as_bytes())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PasswordResetToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for PasswordResetToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
