use crate::{
    database::Database,
    users::{UserId, UserSecret, UserSecretShare, secrets::RawUserSecret},
};
use sqlx::query_as;
use time::OffsetDateTime;
use uuid::{Uuid, fmt::Hyphenated};

#[derive(sqlx::FromRow, Debug)]
struct RawUserSecretShare {
    id: Hyphenated,
    user_id: Hyphenated,
    secret_id: Hyphenated,
    created_at: i64,
}

impl TryFrom<RawUserSecretShare> for UserSecretShare {
    type Error = anyhow::Error;

    fn try_from(raw: RawUserSecretShare) -> Result<Self, Self::Error> {
        Ok(UserSecretShare {
            id: raw.id.into_uuid().into(),
            user_id: raw.user_id.into_uuid().into(),
            secret_id: raw.secret_id.into_uuid(),
            created_at: OffsetDateTime::from_unix_timestamp(raw.created_at)?,
        })
    }
}

/// Extends primary database with the secret sharing methods.
impl Database {
    /// Inserts a share for the secret if it's owned by the specified user, returns `None`
    /// otherwise. The ownership check and the insert are a single statement.
    pub async fn insert_user_secret_share(
        &self,
        user_id: UserId,
        secret_id: Uuid,
        token_hash: &[u8],
    ) -> anyhow::Result<Option<UserSecretShare>> {
        query_as::<_, RawUserSecretShare>(
            r#"
INSERT INTO user_secret_shares (id, token_hash, secret_id, user_id, created_at)
SELECT ?1, ?2, id, user_id, ?5
FROM user_secrets
WHERE user_id = ?3 AND id = ?4
RETURNING id, user_id, secret_id, created_at
            "#,
        )
        .bind(Uuid::now_v7().hyphenated())
        .bind(token_hash)
        .bind(user_id.hyphenated())
        .bind(secret_id.hyphenated())
        .bind(OffsetDateTime::now_utc().unix_timestamp())
        .fetch_optional(&self.pool)
        .await?
        .map(UserSecretShare::try_from)
        .transpose()
    }

    /// Retrieves the live secret (with its encrypted value) referenced by the share with the
    /// specified token digest.
    pub async fn get_shared_user_secret(
        &self,
        token_hash: &[u8],
    ) -> anyhow::Result<Option<UserSecret>> {
        query_as::<_, RawUserSecret>(
            r#"
SELECT s.id, s.user_id, s.name, s.value, s.created_at, s.updated_at
FROM user_secret_shares AS sh
INNER JOIN user_secrets AS s
ON s.id = sh.secret_id
WHERE sh.token_hash = ?1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?
        .map(|raw| raw.into_user_secret(true))
        .transpose()
    }
}
