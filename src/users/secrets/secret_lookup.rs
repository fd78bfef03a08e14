use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Identifies a secret within the owner's namespace, either by its ID or by its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretLookup {
    Id(Uuid),
    Name(String),
}

impl Display for SecretLookup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretLookup::Id(id) => write!(f, "id:{id}"),
            SecretLookup::Name(name) => write!(f, "name:{name}"),
        }
    }
}

impl From<Uuid> for SecretLookup {
    fn from(id: Uuid) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for SecretLookup {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}
