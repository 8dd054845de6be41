//! SMTP transport using lettre

use std::time::Duration;

use lettre::{
    Message, SmtpTransport, Transport,
    message::{Mailbox, header},
    transport::smtp::authentication::Credentials,
};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_address: String,
    pub contact_address: String,
}

/// Sends plain-text mail from the configured sender address.
#[derive(Clone)]
pub struct EmailService {
    mailer: SmtpTransport,
    from: String,
}

impl EmailService {
    /// `timeout` caps each SMTP exchange, connect included.
    pub fn new(config: &EmailConfig, timeout: Duration) -> anyhow::Result<Self> {
        let authenticated = !config.smtp_username.is_empty() && !config.smtp_password.is_empty();

        let builder = if authenticated {
            SmtpTransport::relay(&config.smtp_host)?.credentials(Credentials::new(
                config.smtp_username.to_owned(),
                config.smtp_password.to_owned(),
            ))
        } else {
            SmtpTransport::builder_dangerous(&config.smtp_host)
        };

        tracing::info!(
            smtp_host = %config.smtp_host,
            smtp_port = config.smtp_port,
            authenticated,
            timeout = ?timeout,
            "SMTP transport configured"
        );

        Ok(Self {
            mailer: builder
                .port(config.smtp_port)
                .timeout(Some(timeout))
                .build(),
            from: config.from_address.to_owned(),
        })
    }

    pub fn build_plain(
        &self,
        to: &str,
        reply_to: Option<Mailbox>,
        subject: impl Into<String>,
        plain: impl Into<String>,
    ) -> anyhow::Result<Message> {
        let mut builder = Message::builder()
            .from(self.from.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .header(header::ContentType::TEXT_PLAIN);

        if let Some(reply_to) = reply_to {
            builder = builder.reply_to(reply_to);
        }

        Ok(builder.body(plain.into())?)
    }

    /// Sends on the blocking pool; the SMTP transport is synchronous.
    #[tracing::instrument(skip_all, fields(to, subject))]
    pub async fn send_plain(
        &self,
        to: impl Into<String>,
        reply_to: Option<Mailbox>,
        subject: impl Into<String>,
        plain: impl Into<String>,
    ) -> anyhow::Result<()> {
        let to = to.into();
        let subject = subject.into();

        tracing::Span::current()
            .record("to", &to)
            .record("subject", &subject);

        tracing::info!("Sending email text plain");

        let message = self.build_plain(&to, reply_to, subject, plain)?;
        let mailer = self.mailer.clone();

        tokio::task::spawn_blocking(move || mailer.send(&message)).await??;

        Ok(())
    }
}
