use serde_derive::{Deserialize, Serialize};

/// Configuration for the SMTP functionality.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SmtpConfig {
    /// Username to use to authenticate to the SMTP server.
    pub username: String,
    /// Password to use to authenticate to the SMTP server.
    pub password: String,
    /// Address of the SMTP server.
    pub address: String,
    /// Optional catch-all email recipient (used for troubleshooting only).
    pub catch_all_recipient: Option<String>,
}
