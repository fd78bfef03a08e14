use crate::users::UserId;
use serde::{Deserialize, Serialize};
use serde_with::{TimestampSeconds, serde_as};
use time::OffsetDateTime;

/// JWT claims struct.
#[serde_as]
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct Claims {
    /// User ID.
    pub sub: UserId,
    /// Token expiration time (UTC timestamp).
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub exp: OffsetDateTime,
}
