//! Application configuration management.

use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageSettings,
    /// Demo data configuration.
    #[serde(default)]
    pub demo: DemoSettings,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogSettings,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Directory backing the durable ("remember me") tier.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Prefix applied to every storage key.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            key_prefix: default_key_prefix(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".finops")
}

fn default_key_prefix() -> String {
    "finops".to_string()
}

/// Demo data configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DemoSettings {
    /// Provision baseline demo records when the onboarding route is visited
    /// without a session.
    #[serde(default = "default_auto_seed")]
    pub auto_seed: bool,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            auto_seed: default_auto_seed(),
        }
    }
}

fn default_auto_seed() -> bool {
    true
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// `tracing-subscriber` env-filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "finops=info".to_string()
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
            .add_source(config::Environment::with_prefix("FINOPS").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
