//! Configuration management for the SGE client

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::{env, path::Path};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend base URL, e.g. `http://localhost:4000/api`
    pub base_url: String,
    /// Header carrying the session token on authorized requests
    pub token_header: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NotificationConfig {
    pub success_duration_ms: u64,
    pub error_duration_ms: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

impl AppConfig {
    /// Load configuration from `config/` and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("config"), env::var("API_URL").ok())
    }

    /// Load from the files in `dir`, then `SGE_*` variables, then `api_url`.
    ///
    /// Every file is optional; missing keys keep their defaults.
    pub fn load_from(dir: &Path, api_url: Option<String>) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let file = |name: &str| File::from(dir.join(name)).required(false);

        let config = Config::builder()
            // Start with default configuration
            .add_source(file("default"))
            // Layer on the environment-specific file
            .add_source(file(&run_mode))
            // Add environment variables (with prefix SGE_)
            .add_source(
                Environment::with_prefix("SGE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // The backend URL traditionally comes from API_URL
            .set_override_option("api.base_url", api_url)?
            .build()?;

        config.try_deserialize()
    }

    /// Configuration pointing at the given backend, defaults elsewhere
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
                ..ApiConfig::default()
            },
            ..Self::default()
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000/api".to_string(),
            token_header: "x-token".to_string(),
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

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            success_duration_ms: 1500,
            error_duration_ms: 1500,
        }
    }
}
