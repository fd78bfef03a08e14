use crate::{api::Api, network::EmailTransport};

pub struct AppState<ET: EmailTransport> {
    pub api: Api<ET>,
}

impl<ET: EmailTransport> AppState<ET> {
    pub fn new(api: Api<ET>) -> Self {
        Self { api }
    }
}
