use crate::{
    config::Config,
    database::Database,
    network::{EmailTransport, Network},
};

/// Collection of the SafeEnv APIs, each module extends it with its own API.
pub struct Api<ET: EmailTransport> {
    pub db: Database,
    pub config: Config,
    pub network: Network<ET>,
}

impl<ET: EmailTransport> Api<ET> {
    /// Instantiates APIs collection with the specified config, database and email transport.
    pub fn new(config: Config, db: Database, email_transport: ET) -> Self {
        Self {
            config,
            db,
            network: Network::new(email_transport),
        }
    }
}

impl<ET: EmailTransport> AsRef<Api<ET>> for Api<ET> {
    fn as_ref(&self) -> &Self {
        self
    }
}
