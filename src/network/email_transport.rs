use anyhow::Context;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Tokio1Executor,
    transport::{
        smtp::{Error as SmtpError, authentication::Credentials},
        stub::{AsyncStubTransport, Error as StubError},
    },
};
use std::error::Error as StdError;

use crate::config::SmtpConfig;

pub trait EmailTransport: AsyncTransport + Sync + Send + 'static {}
impl EmailTransport for AsyncSmtpTransport<Tokio1Executor> {}
impl EmailTransport for AsyncStubTransport {}

pub trait EmailTransportError: StdError + Sync + Send + 'static {}
impl EmailTransportError for SmtpError {}
impl EmailTransportError for StubError {}

/// Builds SMTP relay transport for the specified SMTP configuration.
pub fn smtp_transport(
    smtp_config: &SmtpConfig,
) -> anyhow::Result<AsyncSmtpTransport<Tokio1Executor>> {
    Ok(
        AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp_config.address)
            .with_context(|| format!("Cannot create SMTP relay for {}.", smtp_config.address))?
            .credentials(Credentials::new(
                smtp_config.username.clone(),
                smtp_config.password.clone(),
            ))
            .build(),
    )
}
