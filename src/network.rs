mod email_transport;

pub use self::email_transport::{EmailTransport, EmailTransportError, smtp_transport};

/// Network utilities.
#[derive(Clone)]
pub struct Network<ET: EmailTransport> {
    pub email_transport: ET,
}

impl<ET: EmailTransport> Network<ET> {
    /// Creates a new `Network` instance.
    pub fn new(email_transport: ET) -> Self {
        Self { email_transport }
    }
}
