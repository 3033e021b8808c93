//! Application configuration structs
//!
//! Loads configuration from environment variables (with an optional .env file).

use serde::Deserialize;
use std::env;

/// Top-level configuration for the presence registry
#[derive(Debug, Clone, Deserialize)]
pub struct PresenceConfig {
    pub app: AppSettings,
    pub store: StoreSettings,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Presence store tuning
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    /// How many offline records to retain per user when pruning. At least
    /// one must survive so home-location fields carry over to the next login.
    #[serde(default = "default_retain_offline")]
    pub prune_retain_offline: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            prune_retain_offline: default_retain_offline(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "gridpresence".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_retain_offline() -> usize {
    1
}

impl PresenceConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is present but holds an invalid value
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: match env::var("APP_ENV") {
                    Ok(s) => match s.to_lowercase().as_str() {
                        "production" => Environment::Production,
                        "staging" => Environment::Staging,
                        "development" => Environment::Development,
                        other => {
                            return Err(ConfigError::InvalidValue("APP_ENV", other.to_string()))
                        }
                    },
                    Err(_) => Environment::default(),
                },
            },
            store: StoreSettings {
                prune_retain_offline: match env::var("PRESENCE_PRUNE_RETAIN_OFFLINE") {
                    Ok(s) => s.parse().map_err(|_| {
                        ConfigError::InvalidValue("PRESENCE_PRUNE_RETAIN_OFFLINE", s.clone())
                    })?,
                    Err(_) => default_retain_offline(),
                },
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
