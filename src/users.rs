mod api_ext;
mod database_ext;
pub mod secrets;
mod user;
mod user_id;
mod user_share;

pub use self::{
    api_ext::UsersApi,
    secrets::{
        BulkImportSummary, RevealedSecret, SecretLookup, SecretsApiExt, SecretsEncryption,
        UserSecret, parse_bulk_text,
    },
    user::User,
    user_id::UserId,
    user_share::{SharedSecretLink, SharesApiExt, ShareToken, UserSecretShare, UserShareId},
};
