use crate::{
    api::Api,
    error::Error as SafeEnvError,
    network::EmailTransport,
    users::{RevealedSecret, SharedSecretLink, ShareToken, UserId},
};
use tracing::info;
use uuid::Uuid;

pub struct SharesApiExt<'a, ET: EmailTransport> {
    api: &'a Api<ET>,
}

impl<'a, ET: EmailTransport> SharesApiExt<'a, ET> {
    /// Creates Shares API.
    pub fn new(api: &'a Api<ET>) -> Self {
        Self { api }
    }

    /// Creates a share link for the secret owned by the user.
    pub async fn create_share(
        &self,
        user_id: UserId,
        secret_id: Uuid,
    ) -> anyhow::Result<SharedSecretLink> {
        let token = ShareToken::generate()?;
        let share = self
            .api
            .db
            .insert_user_secret_share(user_id, secret_id, &token.digest())
            .await?
            .ok_or_else(SafeEnvError::not_found)?;

        info!(
            user.id = %user_id,
            secret.id = %secret_id,
            share.id = %share.id.as_hyphenated(),
            "Created secret share."
        );

        let link = self
            .api
            .config
            .public_url
            .join(&format!("share/retrieve/{token}"))?;
        Ok(SharedSecretLink { token, link })
    }

    /// Resolves the share token to the current value of the shared secret. Any authenticated user
    /// holding the token can resolve it.
    pub async fn resolve_share(
        &self,
        token: &ShareToken,
        requesting_user_id: UserId,
    ) -> anyhow::Result<RevealedSecret> {
        let secret = self
            .api
            .db
            .get_shared_user_secret(&token.digest())
            .await?
            .ok_or_else(SafeEnvError::not_found)?;

        info!(
            user.id = %requesting_user_id,
            secret.id = %secret.id,
            "Resolved secret share."
        );

        self.api.secrets(secret.user_id).reveal(secret)
    }
}

impl<ET: EmailTransport> Api<ET> {
    /// Returns an API to work with secret shares.
    pub fn shares(&self) -> SharesApiExt<'_, ET> {
        SharesApiExt::new(self)
    }
}
