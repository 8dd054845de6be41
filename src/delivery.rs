use std::{sync::Arc, time::Duration};

use mclears_inquiry::Deliver;
use mclears_notification::{EmailDelivery, RelayDelivery, SimulatedDelivery};

use crate::config::{Config, DeliveryMode};

/// Builds the delivery mechanism selected by `delivery.mode`.
pub fn build_delivery(config: &Config) -> anyhow::Result<Arc<dyn Deliver>> {
    let delivery: Arc<dyn Deliver> = match config.delivery.mode {
        DeliveryMode::Smtp => Arc::new(EmailDelivery::new(
            &config.email,
            config.delivery.timeout(),
        )?),
        DeliveryMode::Relay => Arc::new(RelayDelivery::new(
            config.relay.endpoint.to_owned(),
            config.delivery.timeout(),
        )?),
        DeliveryMode::Simulated => Arc::new(SimulatedDelivery {
            delay: Duration::from_millis(config.delivery.simulated_delay_ms),
            fail: config.delivery.simulated_fail,
        }),
    };

    tracing::info!(mode = %config.delivery.mode, "Inquiry delivery configured");

    Ok(delivery)
}
