use serde::Serialize;

/// Decrypted secret returned to the owner or to the holder of a share link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealedSecret {
    pub name: String,
    pub value: String,
}
