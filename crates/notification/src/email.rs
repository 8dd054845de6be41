use std::time::Duration;

use askama::Template;
use lettre::message::Mailbox;
use mclears_inquiry::{Deliver, InquiryDraft};
use time::{OffsetDateTime, format_description::well_known::Rfc2822};

use crate::{EmailConfig, EmailService};

#[derive(askama::Template)]
#[template(path = "inquiry.txt")]
pub struct InquiryPlainTemplate<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub preferred_dates: &'a str,
    pub accommodation: &'a str,
    pub message: &'a str,
    pub received_at: String,
}

impl<'a> InquiryPlainTemplate<'a> {
    pub fn new(draft: &'a InquiryDraft, received_at: OffsetDateTime) -> Self {
        fn or_dash(value: &str) -> &str {
            match value.trim() {
                "" => "-",
                value => value,
            }
        }

        Self {
            name: draft.name.trim(),
            email: draft.email.trim(),
            phone: or_dash(&draft.phone),
            preferred_dates: or_dash(&draft.preferred_dates),
            accommodation: draft.accommodation.as_ref().map_or("-", |a| a.as_ref()),
            message: draft.message.trim(),
            received_at: received_at
                .format(&Rfc2822)
                .unwrap_or_else(|_| received_at.unix_timestamp().to_string()),
        }
    }
}

pub fn inquiry_subject(draft: &InquiryDraft) -> String {
    format!("New inquiry from {}", draft.name.trim())
}

/// Mails inquiries to the business contact address.
#[derive(Clone)]
pub struct EmailDelivery {
    service: EmailService,
    contact_address: String,
}

impl EmailDelivery {
    pub fn new(config: &EmailConfig, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            service: EmailService::new(config, timeout)?,
            contact_address: config.contact_address.to_owned(),
        })
    }
}

#[async_trait::async_trait]
impl Deliver for EmailDelivery {
    async fn deliver(&self, draft: &InquiryDraft) -> anyhow::Result<()> {
        let plain = InquiryPlainTemplate::new(draft, OffsetDateTime::now_utc()).render()?;
        let reply_to = Mailbox::new(Some(draft.name.trim().to_owned()), draft.email.trim().parse()?);

        self.service
            .send_plain(
                &self.contact_address,
                Some(reply_to),
                inquiry_subject(draft),
                plain,
            )
            .await
    }
}
