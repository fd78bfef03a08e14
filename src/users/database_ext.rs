mod raw_user;

use self::raw_user::RawUser;
use crate::{
    database::Database,
    error::Error as SafeEnvError,
    users::{User, UserId},
};
use sqlx::{query, query_as};

/// Extends primary database with the user management-related methods.
impl Database {
    /// Retrieves user from the `users` table using user ID.
    pub async fn get_user(&self, id: UserId) -> anyhow::Result<Option<User>> {
        query_as::<_, RawUser>(
            r#"
SELECT id, username, email, password_hash, created_at
FROM users
WHERE id = ?1
            "#,
        )
        .bind(id.hyphenated())
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    /// Retrieves user from the `users` table using user email (case-insensitive).
    pub async fn get_user_by_email<T: AsRef<str>>(&self, email: T) -> anyhow::Result<Option<User>> {
        query_as::<_, RawUser>(
            r#"
SELECT id, username, email, password_hash, created_at
FROM users
WHERE email = ?1
            "#,
        )
        .bind(email.as_ref())
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    /// Inserts a new user. Fails with `Conflict` if username or email is already taken.
    pub async fn insert_user<U: AsRef<User>>(&self, user: U) -> anyhow::Result<()> {
        let user = user.as_ref();
        let result = query(
            r#"
INSERT INTO users (id, username, email, password_hash, created_at)
VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(user.id.hyphenated())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at.unix_timestamp())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => Err(
                SafeEnvError::conflict("User with such username or email already exists.").into(),
            ),
            Err(err) => Err(err.into()),
        }
    }
}
