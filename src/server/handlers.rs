mod secrets_delete;
mod secrets_import;
mod secrets_list;
mod secrets_retrieve;
mod secrets_store;
mod secrets_update;
mod security_login;
mod security_password_forgot;
mod security_password_reset;
mod security_register;
mod shares_create;
mod shares_resolve;
mod user_get;
mod welcome;

pub use self::{
    secrets_delete::secrets_delete, secrets_import::secrets_import, secrets_list::secrets_list,
    secrets_retrieve::secrets_retrieve, secrets_store::secrets_store,
    secrets_update::secrets_update, security_login::security_login,
    security_password_forgot::security_password_forgot,
    security_password_reset::security_password_reset, security_register::security_register,
    shares_create::shares_create, shares_resolve::shares_resolve, user_get::user_get,
    welcome::welcome,
};
