//! Configuration management for the Biblioteca Imperial client

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoansConfig {
    /// Simultaneous-loan limit as communicated by the backend
    pub max_simultaneous_loans: Option<u32>,
    pub default_loan_days: u32,
    pub default_renewal_days: u32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub loans: LoansConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Environment variables with prefix BIBLIOTECA_, e.g. BIBLIOTECA_API__BASE_URL
            .add_source(
                Environment::with_prefix("BIBLIOTECA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("api.base_url", env::var("API_BASE_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for LoansConfig {
    fn default() -> Self {
        Self {
            max_simultaneous_loans: None,
            default_loan_days: 14,
            default_renewal_days: 7,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
