use crate::{
    config::SecurityConfig,
    error::Error as SafeEnvError,
    security::{Session, SessionToken, jwt::Claims},
    users::UserId,
};
use anyhow::bail;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::time::Duration;
use time::OffsetDateTime;

/// Keys used to sign and verify stateless session tokens (HS256 JWT).
#[derive(Clone)]
pub struct SessionKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl SessionKeys {
    /// Creates keys from the security config, fails if JWT secret isn't configured.
    pub fn new(config: &SecurityConfig) -> anyhow::Result<Self> {
        let jwt_secret = match config.jwt_secret.as_deref() {
            Some(jwt_secret) if !jwt_secret.is_empty() => jwt_secret,
            _ => bail!("JWT secret is not configured."),
        };

        Ok(Self {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            ttl: config.session_ttl,
        })
    }

    /// Issues a new session token for the user.
    pub fn issue(&self, user_id: UserId) -> anyhow::Result<SessionToken> {
        let expires_at = OffsetDateTime::now_utc() + self.ttl;
        let token = encode(
            &Header::default(),
            &Claims {
                sub: user_id,
                exp: expires_at,
            },
            &self.encoding_key,
        )?;

        Ok(SessionToken {
            token,
            expires_at: expires_at.replace_nanosecond(0)?,
        })
    }

    /// Verifies signature and expiry of the session token. Any failure is `Unauthorized`.
    pub fn verify(&self, token: &str) -> anyhow::Result<Session> {
        let claims = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| SafeEnvError::unauthorized())?
            .claims;

        Ok(Session {
            user_id: claims.sub,
            expires_at: claims.exp,
        })
    }
}
