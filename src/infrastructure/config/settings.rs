//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Settings come from an optional TOML file; environment variables override
//! it, which is how most deployments configure the notifier.
//!
//! # Environment
//!
//! | Variable | Setting |
//! |---|---|
//! | `SEARCH_CONDITIONS` | `divar.search_conditions` |
//! | `DIVAR_SEARCH_URL` / `DIVAR_DETAIL_URL` | endpoint base URLs |
//! | `SEARCH_PAGES` | `divar.pages` |
//! | `BOT_TOKEN` / `BOT_CHATID` | `telegram.bot_token` / `telegram.chat_id` |
//! | `ALL_PROXY`, `HTTPS_PROXY`, `HTTP_PROXY` | `telegram.proxy` (first set wins) |
//! | `SLEEP_SEC` | `poll.interval_secs` |
//! | `TOKENS_PATH` | `store.path` |
//! | `DRY_RUN` | `dry_run` |
//! | `LOG_LEVEL` / `LOG_FORMAT` | `logging.level` / `logging.format` |
//!
//! # Example
//!
//! ```no_run
//! use divar_notifier::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::poll::{PollConfig, RetryConfig};
use super::store::StoreConfig;
use crate::adapter::outbound::divar::DivarConfig;
use crate::adapter::outbound::telegram::{TelegramConfig, TELEGRAM_MAX_ALBUM_SIZE};
use crate::error::{ConfigError, Result};
use crate::port::Destination;

const PROXY_VARS: [&str; 3] = ["ALL_PROXY", "HTTPS_PROXY", "HTTP_PROXY"];

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Divar endpoints and search conditions.
    #[serde(default)]
    pub divar: DivarConfig,

    /// Telegram bot credentials and destination.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Poll loop timing.
    #[serde(default)]
    pub poll: PollConfig,

    /// Retry behaviour for rate-limited sends.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Seen-token file location.
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Enable dry-run mode.
    ///
    /// When true, notifications are logged instead of sent to Telegram.
    #[serde(default)]
    pub dry_run: bool,
}

impl Config {
    /// Load configuration from a TOML file and the process environment.
    ///
    /// A missing file is not an error; every setting then comes from
    /// defaults and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The TOML content is malformed
    /// - An environment override cannot be parsed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Like [`Config::load`] with a custom environment lookup.
    pub fn load_with<P, F>(path: P, lookup: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => String::new(),
            Err(err) => return Err(ConfigError::ReadFile(err).into()),
        };
        Self::parse_with(&content, lookup)
    }

    /// Parse TOML content, apply environment overrides and validate.
    ///
    /// # Errors
    ///
    /// Malformed TOML, unparseable overrides, or failed validation.
    pub fn parse_with<F>(content: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay environment variables onto file settings.
    ///
    /// Blank values are treated as unset.
    fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("SEARCH_CONDITIONS") {
            self.divar.search_conditions = v;
        }
        if let Some(v) = get("DIVAR_SEARCH_URL") {
            self.divar.search_url = v;
        }
        if let Some(v) = get("DIVAR_DETAIL_URL") {
            self.divar.detail_url = v;
        }
        if let Some(v) = get("SEARCH_PAGES") {
            self.divar.pages = parse_env("SEARCH_PAGES", &v)?;
        }
        if let Some(v) = get("BOT_TOKEN") {
            self.telegram.bot_token = v;
        }
        if let Some(v) = get("BOT_CHATID") {
            self.telegram.chat_id = v;
        }
        if let Some(v) = PROXY_VARS.iter().find_map(|key| get(key)) {
            self.telegram.proxy = Some(v);
        }
        if let Some(v) = get("SLEEP_SEC") {
            self.poll.interval_secs = parse_env("SLEEP_SEC", &v)?;
        }
        if let Some(v) = get("TOKENS_PATH") {
            self.store.path = PathBuf::from(v);
        }
        if let Some(v) = get("DRY_RUN") {
            self.dry_run = matches!(v.trim(), "1" | "true" | "yes");
        }
        if let Some(v) = get("LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = get("LOG_FORMAT") {
            self.logging.format = v;
        }
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are present and values are within
    /// acceptable ranges.
    fn validate(&self) -> Result<()> {
        if self.divar.search_conditions.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "search_conditions",
            }
            .into());
        }
        if self.divar.search_url.is_empty() {
            return Err(ConfigError::MissingField { field: "search_url" }.into());
        }
        if self.divar.detail_url.is_empty() {
            return Err(ConfigError::MissingField { field: "detail_url" }.into());
        }
        if self.divar.pages == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pages",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if self.divar.description_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "description_limit",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.poll.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !(2..=TELEGRAM_MAX_ALBUM_SIZE).contains(&self.telegram.max_album_size) {
            return Err(ConfigError::InvalidValue {
                field: "max_album_size",
                reason: format!("must be between 2 and {TELEGRAM_MAX_ALBUM_SIZE}"),
            }
            .into());
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_attempts",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.retry.backoff_min_ms > self.retry.backoff_max_ms {
            return Err(ConfigError::InvalidValue {
                field: "backoff_max_ms",
                reason: "must be >= backoff_min_ms".to_string(),
            }
            .into());
        }

        if !self.dry_run {
            if self.telegram.bot_token.trim().is_empty() {
                return Err(ConfigError::MissingField { field: "bot_token" }.into());
            }
            if self.telegram.chat_id.trim().is_empty() {
                return Err(ConfigError::MissingField { field: "chat_id" }.into());
            }
        }
        if !self.telegram.chat_id.trim().is_empty() {
            Destination::from_str(&self.telegram.chat_id)?;
        }
        Ok(())
    }

    /// Notification destination.
    ///
    /// Dry runs without a configured chat fall back to chat `0`, which is
    /// only ever logged.
    ///
    /// # Errors
    ///
    /// Returns an error if the chat id is neither numeric nor `@channel`.
    pub fn destination(&self) -> Result<Destination> {
        if self.dry_run && self.telegram.chat_id.trim().is_empty() {
            return Ok(Destination::Chat(0));
        }
        Ok(Destination::from_str(&self.telegram.chat_id)?)
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn parse_env<T: FromStr>(field: &'static str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        ConfigError::InvalidValue {
            field,
            reason: format!("not a valid number: {value:?}"),
        }
        .into()
    })
}
