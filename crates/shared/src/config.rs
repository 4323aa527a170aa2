//! Application configuration management.

use serde::Deserialize;

use crate::types::money::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Record store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Display configuration.
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Which record store backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// In-process store, lost on exit.
    #[default]
    Memory,
    /// Hosted record store reached over HTTP.
    Http,
}

/// Record store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Backend kind.
    #[serde(default)]
    pub kind: StoreKind,
    /// Base URL of the hosted record store (required for `http`).
    pub base_url: Option<String>,
    /// API key sent as a bearer token.
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: StoreKind::default(),
            base_url: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "fintrack=debug".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayConfig {
    /// Currency used when formatting amounts.
    #[serde(default)]
    pub currency: Currency,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FINTRACK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        let config = temp_env::with_vars_unset(
            ["FINTRACK__STORE__KIND", "FINTRACK__STORE__BASE_URL"],
            AppConfig::load,
        )
        .unwrap();

        assert_eq!(config.store.kind, StoreKind::Memory);
        assert!(config.store.base_url.is_none());
        assert_eq!(config.store.timeout_secs, 30);
        assert_eq!(config.logging.filter, "fintrack=debug");
        assert!(!config.logging.json);
        assert_eq!(config.display.currency, Currency::Usd);
    }

    #[test]
    fn test_environment_overrides() {
        let config = temp_env::with_vars(
            [
                ("FINTRACK__STORE__KIND", Some("http")),
                ("FINTRACK__STORE__BASE_URL", Some("https://records.example.com/v1")),
            ],
            AppConfig::load,
        )
        .unwrap();

        assert_eq!(config.store.kind, StoreKind::Http);
        assert_eq!(
            config.store.base_url.as_deref(),
            Some("https://records.example.com/v1")
        );
    }
}
