use url::Url;

/// Describes the content of the email notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailNotification {
    /// Email subject.
    pub subject: String,
    /// Email body in plain text (used as a fallback if `html` is specified).
    pub text: String,
    /// Email body in HTML.
    pub html: Option<String>,
}

impl EmailNotification {
    /// Creates a new plain-text email.
    #[cfg(test)]
    pub fn text<S: Into<String>, T: Into<String>>(subject: S, text: T) -> Self {
        Self {
            subject: subject.into(),
            text: text.into(),
            html: None,
        }
    }

    /// Create a new HTML email with a plain-text fallback.
    pub fn html<S: Into<String>, T: Into<String>, H: Into<String>>(
        subject: S,
        text: T,
        html: H,
    ) -> Self {
        Self {
            subject: subject.into(),
            text: text.into(),
            html: Some(html.into()),
        }
    }

    /// Email with a link to reset the account password.
    pub fn password_reset(public_url: &Url, reset_token: &str) -> Self {
        let encoded_reset_link = format!(
            "{}reset-password?token={}",
            public_url.as_str(),
            urlencoding::encode(reset_token)
        );

        Self::html(
            "Reset password for your SafeEnv account",
            format!(
                "To reset your SafeEnv password, please click the following link: {encoded_reset_link}"
            ),
            format!(
                r#"<p>To reset your SafeEnv password, please click the following link:</p><p><a href="{encoded_reset_link}">Reset password</a></p><p>If you didn't request a password reset, you can safely ignore this email.</p>"#
            ),
        )
    }
}
