use std::time::Duration;

use mclears_inquiry::{Deliver, InquiryDraft};
use serde::Serialize;

/// Body posted to a Formspree-style relay.
#[derive(Debug, Serialize)]
pub struct RelayPayload<'a> {
    #[serde(flatten)]
    pub draft: &'a InquiryDraft,
    #[serde(rename = "_replyto")]
    pub reply_to: &'a str,
    #[serde(rename = "_subject")]
    pub subject: String,
}

impl<'a> From<&'a InquiryDraft> for RelayPayload<'a> {
    fn from(draft: &'a InquiryDraft) -> Self {
        Self {
            draft,
            reply_to: draft.email.trim(),
            subject: crate::inquiry_subject(draft),
        }
    }
}

#[derive(Clone)]
pub struct RelayDelivery {
    client: reqwest::Client,
    endpoint: String,
}

impl RelayDelivery {
    /// `request_timeout` bounds a single HTTP exchange; the controller applies
    /// its own deadline on top.
    pub fn new(endpoint: impl Into<String>, request_timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!("mclears/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait::async_trait]
impl Deliver for RelayDelivery {
    #[tracing::instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn deliver(&self, draft: &InquiryDraft) -> anyhow::Result<()> {
        let resp = self
            .client
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .json(&RelayPayload::from(draft))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("relay responded {status}: {body}");
        }

        tracing::info!("Inquiry accepted by relay");

        Ok(())
    }
}
