use crate::{
    api::Api,
    network::{EmailTransport, EmailTransportError},
    notifications::EmailNotification,
};
use anyhow::{Context, bail};
use lettre::{
    AsyncTransport, Message,
    message::{MultiPart, SinglePart, header::ContentType},
};
use time::OffsetDateTime;

/// Describes the API to send notifications.
pub struct NotificationsApi<'a, ET: EmailTransport> {
    api: &'a Api<ET>,
}

impl<'a, ET: EmailTransport> NotificationsApi<'a, ET>
where
    ET::Error: EmailTransportError,
{
    /// Creates Notifications API.
    pub fn new(api: &'a Api<ET>) -> Self {
        Self { api }
    }

    /// Send email notification using configured SMTP server.
    pub async fn send_email(
        &self,
        recipient: &str,
        email: EmailNotification,
        timestamp: OffsetDateTime,
    ) -> anyhow::Result<()> {
        let Some(ref smtp_config) = self.api.config.smtp else {
            bail!("SMTP is not configured.");
        };

        let recipient = if let Some(ref catch_all) = smtp_config.catch_all_recipient {
            catch_all.parse()?
        } else {
            recipient
                .parse()
                .with_context(|| format!("Cannot parse TO address: {recipient}"))?
        };

        let message_builder = Message::builder()
            .from(smtp_config.username.parse()?)
            .reply_to(smtp_config.username.parse()?)
            .to(recipient)
            .subject(&email.subject)
            .date(timestamp.into());

        let message = match email.html {
            Some(html) => message_builder.multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html),
                    ),
            )?,
            None => message_builder.body(email.text)?,
        };

        self.api.network.email_transport.send(message).await?;

        Ok(())
    }
}

impl<ET: EmailTransport> Api<ET>
where
    ET::Error: EmailTransportError,
{
    /// Returns an API to send notifications.
    pub fn notifications(&self) -> NotificationsApi<'_, ET> {
        NotificationsApi::new(self)
    }
}
