#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::StoreSettings;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{validate_positive_number, validate_secret, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub const ENV_STORE_URL: &str = "SUPABASE_URL";
pub const ENV_ANON_KEY: &str = "SUPABASE_ANON_KEY";
pub const ENV_QUOTE_INTERVAL: &str = "HENNA_QUOTE_INTERVAL_SECS";
pub const ENV_REQUEST_TIMEOUT: &str = "HENNA_REQUEST_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_QUOTE_INTERVAL_SECS: u64 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub store: StoreConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub url: String,
    pub anon_key: String,
    pub timeout_seconds: Option<u64>,
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub quote_interval_seconds: Option<u64>,
}

fn parse_secs(field: &str, value: Option<String>) -> Result<Option<u64>> {
    value
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map_err(|e| SiteError::InvalidConfigValueError {
                    field: field.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                })
        })
        .transpose()
}

impl SiteConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Builds the config from a variable lookup; an absent URL or key is a
    /// fatal configuration error.
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| SiteError::MissingConfigError {
                    field: name.to_string(),
                })
        };

        Ok(Self {
            store: StoreConfig {
                url: required(ENV_STORE_URL)?,
                anon_key: required(ENV_ANON_KEY)?,
                timeout_seconds: parse_secs(ENV_REQUEST_TIMEOUT, lookup(ENV_REQUEST_TIMEOUT))?,
            },
            display: DisplayConfig {
                quote_interval_seconds: parse_secs(
                    ENV_QUOTE_INTERVAL,
                    lookup(ENV_QUOTE_INTERVAL),
                )?,
            },
        })
    }

    /// Config file when one is given, the environment otherwise. The result
    /// is validated either way.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.store.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn quote_interval(&self) -> Duration {
        Duration::from_secs(
            self.display
                .quote_interval_seconds
                .unwrap_or(DEFAULT_QUOTE_INTERVAL_SECS),
        )
    }
}

impl StoreSettings for SiteConfig {
    fn store_url(&self) -> &str {
        &self.store.url
    }

    fn anon_key(&self) -> &str {
        &self.store.anon_key
    }

    fn request_timeout_secs(&self) -> u64 {
        self.request_timeout().as_secs()
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        validate_secret("store.url", &self.store.url)?;
        validate_url("store.url", &self.store.url)?;
        validate_secret("store.anon_key", &self.store.anon_key)?;
        if let Some(timeout) = self.store.timeout_seconds {
            validate_positive_number("store.timeout_seconds", timeout, 1)?;
        }
        if let Some(interval) = self.display.quote_interval_seconds {
            validate_positive_number("display.quote_interval_seconds", interval, 1)?;
        }
        Ok(())
    }
}
