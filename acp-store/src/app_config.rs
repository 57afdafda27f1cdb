use acp_catalog::{CatalogEntry, PricingConfig, StaticCatalog};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub checkout: CheckoutConfig,
    pub pricing: PricingConfig,
    pub payment: PaymentConfig,
    pub events: EventsConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CheckoutConfig {
    pub currency: String,
    pub terms_url: String,
    pub privacy_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaymentConfig {
    /// Largest amount (minor units) the mock authorizer approves.
    pub decline_ceiling: i64,
    pub authorization_timeout_ms: u64,
}

impl PaymentConfig {
    pub fn authorization_timeout(&self) -> Duration {
        Duration::from_millis(self.authorization_timeout_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EventsConfig {
    pub webhook_url: Option<String>,
    pub timeout_seconds: u64,
}

impl EventsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// Replaces the built-in SKU table when non-empty.
    #[serde(default)]
    pub products: Vec<CatalogEntry>,
}

impl CatalogConfig {
    pub fn build(&self) -> StaticCatalog {
        if self.products.is_empty() {
            StaticCatalog::default()
        } else {
            StaticCatalog::new(self.products.iter().cloned())
        }
    }
}

impl Config {
    /// Load configuration from `config/` and the environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load_from("config", &run_mode)
    }

    pub fn load_from(dir: &str, run_mode: &str) -> Result<Self, config::ConfigError> {
        let s = config::Config::builder()
            .set_default("server.port", 3000)?
            .set_default("checkout.currency", "usd")?
            .set_default("checkout.terms_url", "https://example.com/terms")?
            .set_default("checkout.privacy_url", "https://example.com/privacy")?
            .set_default("pricing.tax_rate_bps", 850)?
            .set_default("payment.decline_ceiling", 50_000)?
            .set_default("payment.authorization_timeout_ms", 5_000)?
            .set_default("events.timeout_seconds", 10)?
            // Every file layer is optional; later layers win
            .add_source(config::File::with_name(&format!("{}/default", dir)).required(false))
            .add_source(config::File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            .add_source(config::File::with_name(&format!("{}/local", dir)).required(false))
            // Eg.. `ACP__SERVER__PORT=8080` sets `server.port`
            .add_source(
                config::Environment::with_prefix("ACP")
                    .separator("__")
                    .try_parsing(true),
            )
            // Legacy variable names
            .set_override_option("server.port", env::var("PORT").ok())?
            .set_override_option("events.webhook_url", env::var("OPENAI_ORDER_WEBHOOK_URL").ok())?
            .build()?;

        s.try_deserialize()
    }
}
