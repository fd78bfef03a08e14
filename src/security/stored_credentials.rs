use anyhow::anyhow;
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

/// Minimum number of characters in a user password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Password credentials as they are persisted: an Argon2id PHC string, never the password itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub password_hash: String,
}

impl StoredCredentials {
    /// Tries to create `StoredCredentials` with `password_hash` generated from the provided
    /// password, a fresh random salt is used every time.
    pub fn try_from_password(password: &str) -> anyhow::Result<Self> {
        Ok(Self {
            password_hash: Argon2::default()
                .hash_password(password.as_bytes(), &SaltString::generate(&mut OsRng))
                .map(|hash| hash.to_string())
                .map_err(|err| anyhow!("Failed to generate a password hash: {err}"))?,
        })
    }

    /// Checks whether the password matches the stored hash. Malformed hashes never match.
    pub fn verify_password(password_hash: &str, password: &str) -> bool {
        PasswordHash::new(password_hash)
            .and_then(|hash| Argon2::default().verify_password(password.as_bytes(), &hash))
            .is_ok()
    }
}
