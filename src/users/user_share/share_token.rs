use anyhow::Context;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Number of random bytes in a share token (256 bits of entropy).
const TOKEN_SIZE: usize = 32;

/// Opaque share token, hex-encoded.
#[derive(Serialize, Debug, Eq, PartialEq, Clone)]
#[serde(transparent)]
pub struct ShareToken(String);

impl ShareToken {
    /// Generates a new token using cryptographically secure randomness.
    pub fn generate() -> anyhow::Result<Self> {
        let mut bytes = [0u8; TOKEN_SIZE];
        openssl::rand::rand_bytes(&mut bytes)
            .with_context(|| "Failed to generate share token.")?;
        Ok(Self(hex::encode(bytes)))
    }

    /// SHA-256 digest of the token, the only form that is persisted.
    pub fn digest(&self) -> [u8; 32] {
        openssl::sha::sha256(self.0.as_bytes())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ShareToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for ShareToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
