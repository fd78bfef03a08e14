use crate::users::UserId;
use serde::Serialize;
use time::OffsetDateTime;

/// Identity of the caller proven by a valid session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub expires_at: OffsetDateTime,
}

/// Signed session token issued on login.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionToken {
    pub token: String,
    #[serde(with = "time::serde::timestamp")]
    pub expires_at: OffsetDateTime,
}
