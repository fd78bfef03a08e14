use crate::{
    database::Database,
    error::Error as SafeEnvError,
    users::{
        UserId,
        secrets::{SecretLookup, UserSecret},
    },
};
use sqlx::{
    Sqlite,
    query::QueryAs,
    query_as,
    sqlite::SqliteArguments,
};
use time::OffsetDateTime;
use uuid::{Uuid, fmt::Hyphenated};

#[derive(sqlx::FromRow, Debug)]
pub(in crate::users) struct RawUserSecret {
    id: Hyphenated,
    user_id: Hyphenated,
    name: String,
    value: Vec<u8>,
    created_at: i64,
    updated_at: i64,
}

impl RawUserSecret {
    pub(in crate::users) fn into_user_secret(
        self,
        include_value: bool,
    ) -> anyhow::Result<UserSecret> {
        Ok(UserSecret {
            id: self.id.into_uuid(),
            user_id: self.user_id.into_uuid().into(),
            name: self.name,
            encrypted_value: include_value.then_some(self.value),
            created_at: OffsetDateTime::from_unix_timestamp(self.created_at)?,
            updated_at: OffsetDateTime::from_unix_timestamp(self.updated_at)?,
        })
    }
}

/// Result of the atomic insert-or-update of a secret.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SecretUpsertOutcome {
    Created(Uuid),
    Updated(Uuid),
}

fn bind_lookup<'q>(
    query: QueryAs<'q, Sqlite, RawUserSecret, SqliteArguments<'q>>,
    lookup: &'q SecretLookup,
) -> QueryAs<'q, Sqlite, RawUserSecret, SqliteArguments<'q>> {
    match lookup {
        SecretLookup::Id(id) => query.bind(id.hyphenated()),
        SecretLookup::Name(name) => query.bind(name.as_str()),
    }
}

fn lookup_column(lookup: &SecretLookup) -> &'static str {
    match lookup {
        SecretLookup::Id(_) => "id",
        SecretLookup::Name(_) => "name",
    }
}

fn map_unique_violation(err: sqlx::Error, name: &str) -> anyhow::Error {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            SafeEnvError::conflict(format!("Secret with name '{name}' already exists.")).into()
        }
        err => err.into(),
    }
}

/// Extends the primary database with user secrets CRUD methods. Every query filters by the owner,
/// so secrets of other users are indistinguishable from absent ones.
impl Database {
    /// Lists all secrets of the user in creation order. When `include_values` is true, each
    /// `UserSecret.encrypted_value` is populated (for internal decryption use).
    pub async fn get_user_secrets(
        &self,
        user_id: UserId,
        include_values: bool,
    ) -> anyhow::Result<Vec<UserSecret>> {
        query_as::<_, RawUserSecret>(
            r#"
SELECT id, user_id, name, value, created_at, updated_at
FROM user_secrets
WHERE user_id = ?1
ORDER BY created_at, rowid
            "#,
        )
        .bind(user_id.hyphenated())
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|raw| raw.into_user_secret(include_values))
        .collect()
    }

    /// Retrieves a single secret of the user, including its encrypted value.
    pub async fn get_user_secret(
        &self,
        user_id: UserId,
        lookup: &SecretLookup,
    ) -> anyhow::Result<Option<UserSecret>> {
        let sql = format!(
            r#"
SELECT id, user_id, name, value, created_at, updated_at
FROM user_secrets
WHERE user_id = ?1 AND {} = ?2
            "#,
            lookup_column(lookup)
        );

        bind_lookup(
            query_as::<_, RawUserSecret>(&sql).bind(user_id.hyphenated()),
            lookup,
        )
        .fetch_optional(&self.pool)
        .await?
        .map(|raw| raw.into_user_secret(true))
        .transpose()
    }

    /// Inserts a new secret. Fails with `Conflict` if the user already has a secret with the same
    /// name, the check relies on the unique `(user_id, name)` constraint.
    pub async fn insert_user_secret(
        &self,
        user_id: UserId,
        name: &str,
        encrypted_value: &[u8],
    ) -> anyhow::Result<UserSecret> {
        let id = Uuid::now_v7();
        let now = OffsetDateTime::now_utc().unix_timestamp();
        query_as::<_, RawUserSecret>(
            r#"
INSERT INTO user_secrets (id, user_id, name, value, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?5)
RETURNING id, user_id, name, value, created_at, updated_at
            "#,
        )
        .bind(id.hyphenated())
        .bind(user_id.hyphenated())
        .bind(name)
        .bind(encrypted_value)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| map_unique_violation(err, name))?
        .into_user_secret(false)
    }

    /// Updates name and/or encrypted value of an existing secret. Returns `None` if the user
    /// doesn't have such a secret, fails with `Conflict` if the new name is already taken.
    pub async fn update_user_secret(
        &self,
        user_id: UserId,
        lookup: &SecretLookup,
        new_name: Option<&str>,
        new_encrypted_value: Option<&[u8]>,
    ) -> anyhow::Result<Option<UserSecret>> {
        let sql = format!(
            r#"
UPDATE user_secrets
SET name = COALESCE(?3, name), value = COALESCE(?4, value), updated_at = ?5
WHERE user_id = ?1 AND {} = ?2
RETURNING id, user_id, name, value, created_at, updated_at
            "#,
            lookup_column(lookup)
        );

        bind_lookup(
            query_as::<_, RawUserSecret>(&sql).bind(user_id.hyphenated()),
            lookup,
        )
        .bind(new_name)
        .bind(new_encrypted_value)
        .bind(OffsetDateTime::now_utc().unix_timestamp())
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| map_unique_violation(err, new_name.unwrap_or_default()))?
        .map(|raw| raw.into_user_secret(false))
        .transpose()
    }

    /// Atomically creates a secret or replaces the value of the existing secret with the same name.
    pub async fn upsert_user_secret(
        &self,
        user_id: UserId,
        name: &str,
        encrypted_value: &[u8],
    ) -> anyhow::Result<SecretUpsertOutcome> {
        let id = Uuid::now_v7();
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let (stored_id,): (Hyphenated,) = sqlx::query_as(
            r#"
INSERT INTO user_secrets (id, user_id, name, value, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?5)
ON CONFLICT (user_id, name) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
RETURNING id
            "#,
        )
        .bind(id.hyphenated())
        .bind(user_id.hyphenated())
        .bind(name)
        .bind(encrypted_value)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        let stored_id = stored_id.into_uuid();
        Ok(if stored_id == id {
            SecretUpsertOutcome::Created(stored_id)
        } else {
            SecretUpsertOutcome::Updated(stored_id)
        })
    }

    /// Removes a secret by ID, shares of the secret are removed together with it.
    pub async fn remove_user_secret(
        &self,
        user_id: UserId,
        id: Uuid,
    ) -> anyhow::Result<Option<UserSecret>> {
        query_as::<_, RawUserSecret>(
            r#"
DELETE FROM user_secrets
WHERE user_id = ?1 AND id = ?2
RETURNING id, user_id, name, value, created_at, updated_at
            "#,
        )
        .bind(user_id.hyphenated())
        .bind(id.hyphenated())
        .fetch_optional(&self.pool)
        .await?
        .map(|raw| raw.into_user_secret(false))
        .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::SecretUpsertOutcome;
    use crate::{
        error::{Error as SafeEnvError, ErrorKind},
        tests::{mock_db, mock_user, mock_user_with_id},
        users::SecretLookup,
    };
    use uuid::uuid;

    #[actix_rt::test]
    async fn can_insert_and_list_secrets() -> anyhow::Result<()> {
        let db = mock_db().await?;
        let user = mock_user()?;
        db.insert_user(&user).await?;

        assert!(db.get_user_secrets(user.id, false).await?.is_empty());

        let secret = db
            .insert_user_secret(user.id, "ZETA", b"encrypted-value-1")
            .await?;
        assert_eq!(secret.name, "ZETA");
        assert_eq!(secret.user_id, user.id);
        assert!(secret.encrypted_value.is_none());

        db.insert_user_secret(user.id, "ALPHA", b"encrypted-value-2")
            .await?;

        // Creation order, not name order.
        let secrets = db.get_user_secrets(user.id, false).await?;
        assert_eq!(
            secrets.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            vec!["ZETA", "ALPHA"]
        );
        assert!(secrets.iter().all(|s| s.encrypted_value.is_none()));

        let secrets = db.get_user_secrets(user.id, true).await?;
        assert_eq!(
            secrets[1].encrypted_value.as_deref(),
            Some(b"encrypted-value-2".as_slice())
        );

        Ok(())
    }

    #[actix_rt::test]
    async fn can_get_secret_by_id_and_name() -> anyhow::Result<()> {
        let db = mock_db().await?;
        let user = mock_user()?;
        db.insert_user(&user).await?;

        let secret = db.insert_user_secret(user.id, "API_KEY", b"val").await?;
        for lookup in [SecretLookup::Id(secret.id), SecretLookup::from("API_KEY")] {
            let found = db.get_user_secret(user.id, &lookup).await?.unwrap();
            assert_eq!(found.id, secret.id);
            assert_eq!(found.encrypted_value.as_deref(), Some(b"val".as_slice()));
        }

        assert!(
            db.get_user_secret(user.id, &SecretLookup::from("MISSING"))
                .await?
                .is_none()
        );

        Ok(())
    }

    #[actix_rt::test]
    async fn duplicate_name_is_conflict() -> anyhow::Result<()> {
        let db = mock_db().await?;
        let user = mock_user()?;
        db.insert_user(&user).await?;

        db.insert_user_secret(user.id, "API_KEY", b"val-1").await?;
        let err = db
            .insert_user_secret(user.id, "API_KEY", b"val-2")
            .await
            .unwrap_err();
        assert_eq!(err.downcast::<SafeEnvError>()?.kind(), ErrorKind::Conflict);
        assert_eq!(db.get_user_secrets(user.id, false).await?.len(), 1);

        Ok(())
    }

    #[actix_rt::test]
    async fn can_update_secret() -> anyhow::Result<()> {
        let db = mock_db().await?;
        let user = mock_user()?;
        db.insert_user(&user).await?;

        assert!(
            db.update_user_secret(user.id, &"API_KEY".into(), None, Some(b"new".as_slice()))
                .await?
                .is_none()
        );

        let original = db.insert_user_secret(user.id, "API_KEY", b"old").await?;
        db.insert_user_secret(user.id, "OTHER", b"other").await?;

        let updated = db
            .update_user_secret(user.id, &"API_KEY".into(), None, Some(b"new".as_slice()))
            .await?
            .unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.name, "API_KEY");

        let renamed = db
            .update_user_secret(user.id, &original.id.into(), Some("RENAMED"), None)
            .await?
            .unwrap();
        assert_eq!(renamed.name, "RENAMED");

        let secret = db
            .get_user_secret(user.id, &"RENAMED".into())
            .await?
            .unwrap();
        assert_eq!(secret.encrypted_value.as_deref(), Some(b"new".as_slice()));

        let err = db
            .update_user_secret(user.id, &"RENAMED".into(), Some("OTHER"), None)
            .await
            .unwrap_err();
        assert_eq!(err.downcast::<SafeEnvError>()?.kind(), ErrorKind::Conflict);

        Ok(())
    }

    #[actix_rt::test]
    async fn can_upsert_secret() -> anyhow::Result<()> {
        let db = mock_db().await?;
        let user = mock_user()?;
        db.insert_user(&user).await?;

        let SecretUpsertOutcome::Created(id) =
            db.upsert_user_secret(user.id, "API_KEY", b"one").await?
        else {
            panic!("Secret should have been created.");
        };
        assert_eq!(
            db.upsert_user_secret(user.id, "API_KEY", b"two").await?,
            SecretUpsertOutcome::Updated(id)
        );

        let secrets = db.get_user_secrets(user.id, true).await?;
        assert_eq!(secrets.len(), 1);
        assert_eq!(secrets[0].encrypted_value.as_deref(), Some(b"two".as_slice()));

        Ok(())
    }

    #[actix_rt::test]
    async fn can_remove_secret() -> anyhow::Result<()> {
        let db = mock_db().await?;
        let user = mock_user()?;
        db.insert_user(&user).await?;

        let secret = db.insert_user_secret(user.id, "API_KEY", b"val").await?;
        let removed = db.remove_user_secret(user.id, secret.id).await?.unwrap();
        assert_eq!(removed.name, "API_KEY");
        assert!(db.get_user_secrets(user.id, false).await?.is_empty());
        assert!(db.remove_user_secret(user.id, secret.id).await?.is_none());

        Ok(())
    }

    #[actix_rt::test]
    async fn secrets_are_isolated_per_user() -> anyhow::Result<()> {
        let db = mock_db().await?;
        let user_a = mock_user()?;
        let user_b = mock_user_with_id(uuid!("00000000-0000-0000-0000-000000000002"))?;
        db.insert_user(&user_a).await?;
        db.insert_user(&user_b).await?;

        let secret_a = db.insert_user_secret(user_a.id, "SHARED_NAME", b"a").await?;
        db.insert_user_secret(user_b.id, "SHARED_NAME", b"b").await?;

        assert!(
            db.get_user_secret(user_b.id, &secret_a.id.into())
                .await?
                .is_none()
        );
        assert!(
            db.update_user_secret(user_b.id, &secret_a.id.into(), None, Some(b"x".as_slice()))
                .await?
                .is_none()
        );
        assert!(db.remove_user_secret(user_b.id, secret_a.id).await?.is_none());

        let secrets_a = db.get_user_secrets(user_a.id, true).await?;
        assert_eq!(secrets_a.len(), 1);
        assert_eq!(secrets_a[0].encrypted_value.as_deref(), Some(b"a".as_slice()));

        Ok(())
    }
}
