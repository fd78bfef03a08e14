use serde::{Deserialize, Serialize};
use std::{ops::Deref, str::FromStr};
use uuid::Uuid;

/// Represents unique identifier of the secret share.
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Clone, Copy, Hash)]
pub struct UserShareId(Uuid);
impl UserShareId {
    /// Creates a new unique user share ID.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for UserShareId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserShareId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for UserShareId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Deref for UserShareId {
    type Target = Uuid;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
