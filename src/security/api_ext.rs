use crate::{
    api::Api,
    error::Error as SafeEnvError,
    network::{EmailTransport, EmailTransportError},
    notifications::EmailNotification,
    security::{
        PasswordResetToken, Session, SessionKeys, SessionToken, StoredCredentials,
        stored_credentials::MIN_PASSWORD_LENGTH,
    },
    users::{User, UserId},
};
use time::OffsetDateTime;
use tracing::{error, info, warn};

/// API to register users, authenticate them and recover their credentials.
pub struct SecurityApiExt<'a, ET: EmailTransport> {
    api: &'a Api<ET>,
}

impl<'a, ET: EmailTransport> SecurityApiExt<'a, ET> {
    /// Creates Security API.
    pub fn new(api: &'a Api<ET>) -> Self {
        Self { api }
    }

    /// Registers a new user. Emails are stored lowercased, fails with `Conflict` if either
    /// username or email is taken.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> anyhow::Result<User> {
        let username = username.trim();
        let email = email.trim().to_lowercase();
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(
                SafeEnvError::invalid_input("Username, email and password are required.").into(),
            );
        }

        if !email.contains('@') {
            return Err(SafeEnvError::invalid_input("Email is not valid.").into());
        }

        validate_password(password)?;

        let user = User {
            id: UserId::new(),
            username: username.to_string(),
            email,
            password_hash: StoredCredentials::try_from_password(password)?.password_hash,
            created_at: OffsetDateTime::now_utc().replace_nanosecond(0)?,
        };
        self.api.db.insert_user(&user).await?;

        info!(user.id = %user.id, "Registered a new user.");
        Ok(user)
    }

    /// Authenticates the user with email and password and issues a session token.
    pub async fn login(&self, email: &str, password: &str) -> anyhow::Result<SessionToken> {
        let user = self
            .api
            .users()
            .get_by_email(email.trim())
            .await?
            .filter(|user| StoredCredentials::verify_password(&user.password_hash, password))
            .ok_or_else(SafeEnvError::unauthorized)?;

        let token = SessionKeys::new(&self.api.config.security)?.issue(user.id)?;

        info!(user.id = %user.id, "User logged in.");
        Ok(token)
    }

    /// Verifies the session token and returns the identity it carries.
    pub fn verify_session(&self, token: &str) -> anyhow::Result<Session> {
        SessionKeys::new(&self.api.config.security)?.verify(token)
    }

    /// Issues a password reset token for the user with the specified email. Returns `None` if
    /// there is no such user.
    pub async fn issue_password_reset(
        &self,
        email: &str,
    ) -> anyhow::Result<Option<(User, PasswordResetToken)>> {
        let Some(user) = self.api.users().get_by_email(email.trim()).await? else {
            return Ok(None);
        };

        let token = PasswordResetToken::generate()?;
        self.api
            .db
            .insert_password_reset_token(
                user.id,
                &token.digest(),
                OffsetDateTime::now_utc() + self.api.config.security.password_reset_ttl,
            )
            .await?;

        info!(user.id = %user.id, "Issued password reset token.");
        Ok(Some((user, token)))
    }

    /// Consumes the reset token and sets the new password. Unknown, expired or already used
    /// tokens fail with `InvalidOrExpiredToken`.
    pub async fn reset_password(
        &self,
        token: &PasswordResetToken,
        new_password: &str,
    ) -> anyhow::Result<()> {
        validate_password(new_password)?;

        let password_hash = StoredCredentials::try_from_password(new_password)?.password_hash;
        let user_id = self
            .api
            .db
            .consume_password_reset_token(&token.digest(), &password_hash, OffsetDateTime::now_utc())
            .await?
            .ok_or_else(SafeEnvError::invalid_or_expired_token)?;

        info!(user.id = %user_id, "User password has been reset.");
        Ok(())
    }
}

impl<ET: EmailTransport> SecurityApiExt<'_, ET>
where
    ET::Error: EmailTransportError,
{
    /// Sends password reset link to the user with the specified email. The outcome is never
    /// reported to the caller so that registered emails can't be enumerated, failures are logged.
    pub async fn request_password_reset(&self, email: &str) {
        let (user, token) = match self.issue_password_reset(email).await {
            Ok(Some(issued)) => issued,
            Ok(None) => {
                warn!("Password reset was requested for unknown email.");
                return;
            }
            Err(err) => {
                error!("Failed to issue password reset token: {err:?}");
                return;
            }
        };

        let email = EmailNotification::password_reset(&self.api.config.public_url, token.as_str());
        if let Err(err) = self
            .api
            .notifications()
            .send_email(&user.email, email, OffsetDateTime::now_utc())
            .await
        {
            error!(user.id = %user.id, "Failed to send password reset email: {err:?}");
        }
    }
}

fn validate_password(password: &str) -> anyhow::Result<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(SafeEnvError::invalid_input(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters."
        ))
        .into());
    }
    Ok(())
}

impl<ET: EmailTransport> Api<ET> {
    /// Returns an API to work with security related tasks.
    pub fn security(&self) -> SecurityApiExt<'_, ET> {
        SecurityApiExt::new(self)
    }
}
