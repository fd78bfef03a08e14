use crate::users::User;
use time::OffsetDateTime;
use uuid::fmt::Hyphenated;

#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone)]
pub(super) struct RawUser {
    pub id: Hyphenated,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: i64,
}

impl TryFrom<RawUser> for User {
    type Error = anyhow::Error;

    fn try_from(raw_user: RawUser) -> Result<Self, Self::Error> {
        Ok(User {
            id: raw_user.id.into_uuid().into(),
            username: raw_user.username,
            email: raw_user.email,
            password_hash: raw_user.password_hash,
            created_at: OffsetDateTime::from_unix_timestamp(raw_user.created_at)?,
        })
    }
}
