mod api_ext;
mod bulk_import;
mod database_ext;
mod encryption;
mod revealed_secret;
mod secret_lookup;
mod user_secret;

pub(in crate::users) use self::database_ext::RawUserSecret;
pub use self::{
    api_ext::SecretsApiExt,
    bulk_import::{BulkImportSummary, parse_bulk_text},
    encryption::SecretsEncryption,
    revealed_secret::RevealedSecret,
    secret_lookup::SecretLookup,
    user_secret::UserSecret,
};
