use crate::{database::Database, users::UserId};
use sqlx::{query, query_as};
use time::OffsetDateTime;
use uuid::{Uuid, fmt::Hyphenated};

/// Extends primary database with the password reset related methods.
impl Database {
    /// Stores digest of a new password reset token for the user.
    pub async fn insert_password_reset_token(
        &self,
        user_id: UserId,
        token_hash: &[u8],
        expires_at: OffsetDateTime,
    ) -> anyhow::Result<()> {
        query(
            r#"
INSERT INTO user_password_reset_tokens (id, token_hash, user_id, expires_at, created_at)
VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(Uuid::now_v7().hyphenated())
        .bind(token_hash)
        .bind(user_id.hyphenated())
        .bind(expires_at.unix_timestamp())
        .bind(OffsetDateTime::now_utc().unix_timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Consumes the unexpired password reset token and replaces the password hash of its owner in
    /// a single transaction. Returns `None` if the token is unknown, expired or already consumed.
    pub async fn consume_password_reset_token(
        &self,
        token_hash: &[u8],
        new_password_hash: &str,
        now: OffsetDateTime,
    ) -> anyhow::Result<Option<UserId>> {
        let mut tx = self.pool.begin().await?;

        let consumed: Option<(Hyphenated,)> = query_as(
            r#"
UPDATE user_password_reset_tokens
SET consumed_at = ?2
WHERE token_hash = ?1 AND consumed_at IS NULL AND expires_at > ?2
RETURNING user_id
            "#,
        )
        .bind(token_hash)
        .bind(now.unix_timestamp())
        .fetch_optional(&mut *tx)
        .await?;

        // Dropping the transaction rolls it back.
        let Some((user_id,)) = consumed else {
            return Ok(None);
        };

        query(
            r#"
UPDATE users
SET password_hash = ?2
WHERE id = ?1
            "#,
        )
        .bind(user_id)
        .bind(new_password_hash)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(user_id.into_uuid().into()))
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::{mock_db, mock_user};
    use std::time::Duration;
    use time::OffsetDateTime;

    #[actix_rt::test]
    async fn can_consume_reset_token_once() -> anyhow::Result<()> {
        let db = mock_db().await?;
        let user = mock_user()?;
        db.insert_user(&user).await?;

        let now = OffsetDateTime::now_utc();
        db.insert_password_reset_token(user.id, &[1; 32], now + Duration::from_secs(3600))
            .await?;

        assert_eq!(
            db.consume_password_reset_token(&[1; 32], "new-hash", now).await?,
            Some(user.id)
        );
        assert_eq!(
            db.get_user(user.id).await?.map(|user| user.password_hash),
            Some("new-hash".to_string())
        );

        assert_eq!(
            db.consume_password_reset_token(&[1; 32], "other-hash", now).await?,
            None
        );
        assert_eq!(
            db.get_user(user.id).await?.map(|user| user.password_hash),
            Some("new-hash".to_string())
        );

        Ok(())
    }

    #[actix_rt::test]
    async fn cannot_consume_expired_or_unknown_token() -> anyhow::Result<()> {
        let db = mock_db().await?;
        let user = mock_user()?;
        db.insert_user(&user).await?;

        let now = OffsetDateTime::now_utc();
        db.insert_password_reset_token(user.id, &[1; 32], now - Duration::from_secs(1))
            .await?;

        assert_eq!(
            db.consume_password_reset_token(&[1; 32], "new-hash", now).await?,
            None
        );
        assert_eq!(
            db.consume_password_reset_token(&[2; 32], "new-hash", now).await?,
            None
        );
        assert_eq!(
            db.get_user(user.id).await?.map(|user| user.password_hash),
            Some(user.password_hash)
        );

        Ok(())
    }
}
