use crate::{
    api::Api,
    network::EmailTransport,
    users::{User, UserId},
};

pub struct UsersApi<'a, ET: EmailTransport> {
    api: &'a Api<ET>,
}

impl<'a, ET: EmailTransport> UsersApi<'a, ET> {
    /// Creates Users API.
    pub fn new(api: &'a Api<ET>) -> Self {
        Self { api }
    }

    /// Retrieves the user by the specified ID.
    pub async fn get(&self, id: UserId) -> anyhow::Result<Option<User>> {
        self.api.db.get_user(id).await
    }

    /// Retrieves the user using the specified email.
    pub async fn get_by_email<E: AsRef<str>>(&self, user_email: E) -> anyhow::Result<Option<User>> {
        self.api.db.get_user_by_email(user_email).await
    }
}

impl<ET: EmailTransport> Api<ET> {
    /// Returns an API to work with users.
    pub fn users(&self) -> UsersApi<'_, ET> {
        UsersApi::new(self)
    }
}
