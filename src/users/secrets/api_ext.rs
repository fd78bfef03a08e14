use crate::{
    api::Api,
    error::Error as SafeEnvError,
    network::EmailTransport,
    users::{
        UserId,
        secrets::{
            BulkImportSummary, RevealedSecret, SecretLookup, SecretsEncryption, UserSecret,
            database_ext::SecretUpsertOutcome,
        },
    },
};
use anyhow::Context;
use std::collections::BTreeMap;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Maximum length for a secret name.
const MAX_SECRET_NAME_LENGTH: usize = 128;
/// Maximum length for a secret value (10 KB).
const MAX_SECRET_VALUE_LENGTH: usize = 10 * 1024;

pub struct SecretsApiExt<'a, ET: EmailTransport> {
    api: &'a Api<ET>,
    user_id: UserId,
}

impl<'a, ET: EmailTransport> SecretsApiExt<'a, ET> {
    pub fn new(api: &'a Api<ET>, user_id: UserId) -> Self {
        Self { api, user_id }
    }

    /// Lists all secrets for the user (metadata only, no values).
    pub async fn list_secrets(&self) -> anyhow::Result<Vec<UserSecret>> {
        self.api.db.get_user_secrets(self.user_id, false).await
    }

    /// Creates a new secret. Fails with `Conflict` if a secret with the same name already exists.
    pub async fn store_secret(&self, name: &str, value: &str) -> anyhow::Result<UserSecret> {
        validate_name(name)?;
        validate_value(value)?;

        let encrypted_value = self.encryption()?.encrypt(value.as_bytes())?;
        let secret = self
            .api
            .db
            .insert_user_secret(self.user_id, name, &encrypted_value)
            .await?;

        info!(user.id = %self.user_id, secret.id = %secret.id, "Stored a new secret.");
        Ok(secret)
    }

    /// Renames a secret and/or replaces its value.
    pub async fn update_secret(
        &self,
        lookup: &SecretLookup,
        new_name: Option<&str>,
        new_value: Option<&str>,
    ) -> anyhow::Result<UserSecret> {
        if new_name.is_none() && new_value.is_none() {
            return Err(SafeEnvError::invalid_input("Either new name or new value is required.").into());
        }

        if let Some(new_name) = new_name {
            validate_name(new_name)?;
        }

        let encrypted_value = match new_value {
            Some(new_value) => {
                validate_value(new_value)?;
                Some(self.encryption()?.encrypt(new_value.as_bytes())?)
            }
            None => None,
        };

        let secret = self
            .api
            .db
            .update_user_secret(
                self.user_id,
                lookup,
                new_name,
                encrypted_value.as_deref(),
            )
            .await?
            .ok_or_else(SafeEnvError::not_found)?;

        info!(user.id = %self.user_id, secret.id = %secret.id, "Updated secret.");
        Ok(secret)
    }

    /// Deletes a secret, outstanding share links of the secret stop working.
    pub async fn delete_secret(&self, id: Uuid) -> anyhow::Result<UserSecret> {
        let secret = self
            .api
            .db
            .remove_user_secret(self.user_id, id)
            .await?
            .ok_or_else(SafeEnvError::not_found)?;

        info!(user.id = %self.user_id, secret.id = %secret.id, "Deleted secret.");
        Ok(secret)
    }

    /// Retrieves and decrypts a secret, this is the only operation that returns plaintext to the
    /// owner.
    pub async fn retrieve_secret(&self, id: Uuid) -> anyhow::Result<RevealedSecret> {
        let secret = self
            .api
            .db
            .get_user_secret(self.user_id, &SecretLookup::Id(id))
            .await?
            .ok_or_else(SafeEnvError::not_found)?;

        self.reveal(secret)
    }

    /// Imports every entry independently as create-or-update. Entries that fail validation or
    /// storage are reported in the summary and don't affect the rest.
    pub async fn import_secrets(
        &self,
        secrets: BTreeMap<String, String>,
    ) -> anyhow::Result<BulkImportSummary> {
        let encryption = self.encryption()?;
        let mut summary = BulkImportSummary::default();
        for (name, value) in secrets {
            let result = async {
                validate_name(&name)?;
                validate_value(&value)?;
                let encrypted_value = encryption.encrypt(value.as_bytes())?;
                self.api
                    .db
                    .upsert_user_secret(self.user_id, &name, &encrypted_value)
                    .await
            }
            .await;

            match result {
                Ok(SecretUpsertOutcome::Created(_)) => summary.created += 1,
                Ok(SecretUpsertOutcome::Updated(_)) => summary.updated += 1,
                Err(err) => {
                    warn!(user.id = %self.user_id, secret.name = %name, "Failed to import secret: {err:?}");
                    summary.failed.push(name);
                }
            }
        }

        info!(
            user.id = %self.user_id,
            created = summary.created,
            updated = summary.updated,
            failed = summary.failed.len(),
            "Imported secrets."
        );
        Ok(summary)
    }

    /// Decrypts the secret value. Integrity failures surface as `CorruptData`.
    pub(in crate::users) fn reveal(&self, secret: UserSecret) -> anyhow::Result<RevealedSecret> {
        let encrypted_value = secret
            .encrypted_value
            .as_deref()
            .with_context(|| format!("Secret ({}) was loaded without value.", secret.id))?;

        let value = self
            .encryption()?
            .decrypt(encrypted_value)
            .and_then(|plaintext| Ok(String::from_utf8(plaintext)?))
            .map_err(|err| {
                error!(
                    user.id = %secret.user_id,
                    secret.id = %secret.id,
                    "Failed to decrypt secret: {err:?}"
                );
                SafeEnvError::corrupt_data(err)
            })?;

        Ok(RevealedSecret {
            name: secret.name,
            value,
        })
    }

    fn encryption(&self) -> anyhow::Result<SecretsEncryption> {
        let key = self
            .api
            .config
            .security
            .secrets_encryption_key
            .as_deref()
            .with_context(|| "Secrets encryption key is not configured.")?;
        SecretsEncryption::new(key)
    }
}

fn validate_name(name: &str) -> anyhow::Result<()> {
    if !is_valid_secret_name(name) {
        return Err(SafeEnvError::invalid_input(format!(
            "Secret name must start with a letter or underscore, contain only alphanumeric \
             characters, underscores, hyphens or dots, and be at most {MAX_SECRET_NAME_LENGTH} \
             characters."
        ))
        .into());
    }
    Ok(())
}

fn validate_value(value: &str) -> anyhow::Result<()> {
    if value.len() > MAX_SECRET_VALUE_LENGTH {
        return Err(SafeEnvError::invalid_input(format!(
            "Secret value must be at most {MAX_SECRET_VALUE_LENGTH} bytes."
        ))
        .into());
    }
    Ok(())
}

fn is_valid_secret_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    name.chars().count() <= MAX_SECRET_NAME_LENGTH
        && (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

impl<ET: EmailTransport> Api<ET> {
    /// Returns an API to work with secrets of the specified user.
    pub fn secrets(&self, user_id: UserId) -> SecretsApiExt<'_, ET> {
        SecretsApiExt::new(self, user_id)
    }
}
