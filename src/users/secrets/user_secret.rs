use crate::users::UserId;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

/// Represents a user secret (name/value pair stored encrypted at rest).
/// The value is never serialized, plaintext is returned only by the dedicated retrieve operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSecret {
    /// Unique identifier for the secret.
    pub id: Uuid,
    /// The user who owns this secret.
    #[serde(skip)]
    pub user_id: UserId,
    /// The secret name, unique within the owner's namespace.
    pub name: String,
    /// The encrypted value, populated only for internal use.
    #[serde(skip)]
    pub encrypted_value: Option<Vec<u8>>,
    /// When the secret was first created.
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
    /// When the secret name or value was last updated.
    #[serde(with = "time::serde::timestamp")]
    pub updated_at: OffsetDateTime,
}
