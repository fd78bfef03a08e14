mod api_ext;
mod database_ext;
mod jwt;
mod password_reset_token;
mod session;
mod session_keys;
mod stored_credentials;

pub use self::{
    api_ext::SecurityApiExt, password_reset_token::PasswordResetToken, session::Session,
    session::SessionToken, session_keys::SessionKeys, stored_credentials::StoredCredentials,
};
