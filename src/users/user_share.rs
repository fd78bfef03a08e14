mod api_ext;
mod database_ext;
mod share_token;
mod user_share_id;

use crate::users::UserId;
use serde::Serialize;
use time::OffsetDateTime;
use url::Url;
use uuid::Uuid;

pub use self::{api_ext::SharesApiExt, share_token::ShareToken, user_share_id::UserShareId};

/// Represents a link-based share of a single user secret. The share references the live secret,
/// so it follows value edits and disappears together with the secret.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct UserSecretShare {
    pub id: UserShareId,
    pub user_id: UserId,
    pub secret_id: Uuid,
    pub created_at: OffsetDateTime,
}

/// Returned to the share creator exactly once, only the digest of the token is persisted.
#[derive(Serialize, Debug, Eq, PartialEq, Clone)]
pub struct SharedSecretLink {
    pub token: ShareToken,
    pub link: Url,
}

#[cfg(test)]
mod tests {
    use super::{SharedSecretLink, ShareToken};
    use insta::assert_json_snapshot;
    use url::Url;

    #[test]
    fn serialization() -> anyhow::Result<()> {
        let token = ShareToken::from("0a1b2c3d".to_string());
        assert_json_snapshot!(SharedSecretLink {
            link: Url::parse("https://safeenv.dev/share/retrieve/0a1b2c3d")?,
            token,
        }, @r###"
        {
          "token": "0a1b2c3d",
          "link": "https://safeenv.dev/share/retrieve/0a1b2c3d"
        }
        "###);

        Ok(())
    }
}
