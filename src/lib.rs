//! Divar notifier - forwards new Divar listings to Telegram.
//!
//! The notifier polls a Divar search, remembers which ads it has already
//! handled in a flat JSON file, fetches details for new ads and posts them
//! to a Telegram chat or channel as text, a photo, or a photo album.
//!
//! # Architecture
//!
//! - **`domain`** - Ad tokens, ads, the seen-token set and text helpers
//! - **`port`** - Traits the application drives (search, details, messenger, store)
//! - **`adapter`** - Divar HTTP client, Telegram and log messengers, JSON token file
//! - **`application`** - Notification dispatch with retry, and the poll loop
//! - **`infrastructure`** - Configuration and runtime wiring
//!
//! # Features
//!
//! - `telegram` (default) - Send notifications through the Telegram Bot API
//! - `testkit` - Test fakes and fixtures for downstream tests
//!
//! # Example
//!
//! ```no_run
//! use divar_notifier::infrastructure::bootstrap;
//! use divar_notifier::infrastructure::config::Config;
//!
//! # async fn example() -> divar_notifier::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! config.init_logging();
//! bootstrap::run(config).await
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
