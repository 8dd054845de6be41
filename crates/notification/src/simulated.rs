use std::time::Duration;

use mclears_inquiry::{Deliver, InquiryDraft};

pub const DEFAULT_SIMULATED_DELAY: Duration = Duration::from_millis(1500);

/// Development stand-in for a real relay: waits, then succeeds or fails.
#[derive(Debug, Clone)]
pub struct SimulatedDelivery {
    pub delay: Duration,
    pub fail: bool,
}

impl Default for SimulatedDelivery {
    fn default() -> Self {
        Self {
            delay: DEFAULT_SIMULATED_DELAY,
            fail: false,
        }
    }
}

#[async_trait::async_trait]
impl Deliver for SimulatedDelivery {
    async fn deliver(&self, draft: &InquiryDraft) -> anyhow::Result<()> {
        tracing::info!(name = %draft.name.trim(), delay = ?self.delay, "Simulating inquiry delivery");
        tokio::time::sleep(self.delay).await;

        if self.fail {
            anyhow::bail!("simulated delivery failure");
        }

        Ok(())
    }
}
