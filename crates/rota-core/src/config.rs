use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use chrono::NaiveDate;
use chrono_tz::Tz;
use config::{Config, Environment, File, Source};
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

const ENV_PREFIX: &str = "ROTA";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api: ApiConfig,
    pub display: DisplayConfig,
    pub polling: PollingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// IANA timezone the roster is laid out in
    pub timezone: String,
    /// Reference date for the rendered week; today when absent
    pub week_of: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollingConfig {
    pub enabled: bool,
    pub interval_secs: u64,
}

impl PollingConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, then the optional `config.toml`, then
    /// `ROTA_`-prefixed environment variables. Later sources win, so the
    /// environment overrides the file.
    ///
    /// Nested keys use a double underscore: `ROTA_API__BASE_URL` sets
    /// `api.base_url`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Self::from_sources(
            File::with_name("config.toml").required(false),
            Self::environment(),
        )
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .ignore_empty(true)
            .try_parsing(true)
    }

    fn from_sources<S>(file: S, env: Environment) -> Result<Self>
    where
        S: Source + Send + Sync + 'static,
    {
        Ok(Config::builder()
            .set_default("api.base_url", "http://localhost:3000")?
            .set_default("api.timeout_secs", 15)?
            .set_default("display.timezone", "UTC")?
            .set_default("polling.enabled", false)?
            .set_default("polling.interval_secs", 30)?
            .set_default("logging.level", "info")?
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Resolves the configured display timezone.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the name is not a known IANA timezone.
    pub fn timezone(&self) -> CoreResult<Tz> {
        Tz::from_str(&self.display.timezone).map_err(|e| {
            CoreError::ConfigError(format!(
                "unknown display timezone {:?}: {e}",
                self.display.timezone
            ))
        })
    }
}

/// ## Summary
/// Loads `.env` into the process environment, then [`Settings::load`].
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
