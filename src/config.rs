use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;
use validator::Validate;

/// Default values for configuration
const DEFAULT_ENV: &str = "development";
const DEFAULT_LOG_LEVEL: &str = "info";
const CONFIG_DIR: &str = "config";
const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/storefront/v1";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CART_STORAGE_PATH: &str = "framecraft_cart.json";
const DEFAULT_CURRENCY: &str = "INR";
const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Application configuration with validation.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Base URL of the remote catalog/commerce backend
    #[validate(url)]
    pub api_base_url: String,

    /// Timeout applied to every outbound request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Path of the durable cart document
    #[serde(default = "default_cart_storage_path")]
    pub cart_storage_path: String,

    /// ISO currency code shown on carts
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Display symbol for the configured currency
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Public key id for the hosted payment widget (online payments only)
    pub gateway_key_id: Option<String>,

    /// Application environment
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Logging level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}
fn default_cart_storage_path() -> String {
    DEFAULT_CART_STORAGE_PATH.to_string()
}
fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}
fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}
fn default_environment() -> String {
    DEFAULT_ENV.to_string()
}
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl AppConfig {
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Load configuration from built-in defaults, optional `config/` profile
/// files, and `FRAMECRAFT_`-prefixed environment variables (highest
/// precedence).
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading configuration for environment: {}", run_env);

    if !Path::new(CONFIG_DIR).exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            CONFIG_DIR
        );
    }

    let builder = Config::builder()
        .set_default("api_base_url", DEFAULT_API_BASE_URL)?
        .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS)?
        .set_default("cart_storage_path", DEFAULT_CART_STORAGE_PATH)?
        .set_default("currency", DEFAULT_CURRENCY)?
        .set_default("currency_symbol", DEFAULT_CURRENCY_SYMBOL)?
        .set_default("environment", run_env.clone())?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .set_default("log_json", false)?
        .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false))
        .add_source(File::with_name(&format!("{}/{}", CONFIG_DIR, run_env)).required(false))
        .add_source(Environment::with_prefix("FRAMECRAFT").separator("__"));

    let config: AppConfig = builder.build()?.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Initializes the tracing subscriber. `RUST_LOG` overrides the configured
/// level when set.
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default_directive = format!("framecraft={}", level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);
    let filter =
        EnvFilter::try_new(filter_directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        let _ = registry.with(fmt::layer().json()).try_init();
    } else {
        let _ = registry.with(fmt::layer()).try_init();
    }
}
