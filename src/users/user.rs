use crate::users::UserId;
use serde_derive::Serialize;
use time::OffsetDateTime;

/// Registered SafeEnv user.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// Argon2 PHC string, never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
}

impl AsRef<User> for User {
    fn as_ref(&self) -> &User {
        self
    }
}
