use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use mclears_notification::EmailConfig;
use serde::Deserialize;
use std::{env, time::Duration};
use strum::{Display, EnumString};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub business: BusinessConfig,
    pub delivery: DeliveryConfig,
    pub email: EmailConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    pub session: SessionConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Contact details shown next to the form and in failure banners.
#[derive(Debug, Deserialize, Clone)]
pub struct BusinessConfig {
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeliveryMode {
    Smtp,
    Relay,
    Simulated,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DeliveryConfig {
    pub mode: DeliveryMode,
    pub timeout_secs: u64,
    pub simulated_delay_ms: u64,
    #[serde(default)]
    pub simulated_fail: bool,
}

impl DeliveryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RelayConfig {
    #[serde(default)]
    pub endpoint: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub ttl_secs: u64,
    pub max_entries: usize,
    #[serde(default)]
    pub cookie_secure: bool,
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MCLEARS__DELIVERY__MODE, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("business.name", "McLear's Cottage Colony")?
            .set_default("business.phone", "(315) 375-6508")?
            .set_default("business.email", "gofishin@mclears.com")?
            .set_default("delivery.mode", "simulated")?
            .set_default("delivery.timeout_secs", 20)?
            .set_default("delivery.simulated_delay_ms", 1500)?
            .set_default("email.smtp_host", "localhost")?
            .set_default("email.smtp_port", 1025)?
            .set_default("email.smtp_username", "")?
            .set_default("email.smtp_password", "")?
            .set_default("email.from_address", "noreply@mclears.com")?
            .set_default("email.contact_address", "gofishin@mclears.com")?
            .set_default("session.ttl_secs", 1800)?
            .set_default("session.max_entries", 10_000)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MCLEARS")
                .separator("__")
                .try_parsing(true),
        );

        // Also support legacy environment variables without prefix
        if let Ok(smtp_password) = env::var("SMTP_PASSWORD") {
            builder = builder.set_override("email.smtp_password", smtp_password)?;
        }
        if let Ok(relay_endpoint) = env::var("RELAY_ENDPOINT") {
            builder = builder.set_override("relay.endpoint", relay_endpoint)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if !(1..=120).contains(&self.delivery.timeout_secs) {
            return Err("Delivery timeout must be between 1 and 120 seconds".to_string());
        }
        if self.session.ttl_secs == 0 {
            return Err("Session ttl must be greater than 0".to_string());
        }
        if self.session.max_entries == 0 {
            return Err("Session max_entries must be greater than 0".to_string());
        }
        match self.delivery.mode {
            DeliveryMode::Relay
                if !(self.relay.endpoint.starts_with("https://")
                    || self.relay.endpoint.starts_with("http://")) =>
            {
                return Err("Relay delivery requires an http(s) relay.endpoint".to_string());
            }
            DeliveryMode::Smtp if !mclears_inquiry::is_valid_email(&self.email.contact_address) => {
                return Err("SMTP delivery requires a valid email.contact_address".to_string());
            }
            _ => {}
        }
        Ok(())
    }
}
