//! Telegram messenger adapter.
//!
//! Provides [`TelegramMessenger`] for delivering ad notifications through the
//! Bot API. The messenger itself requires the `telegram` feature; the
//! settings are always available so configuration parses either way.

#[cfg(feature = "telegram")]
mod messenger;
pub mod settings;

#[cfg(feature = "telegram")]
pub use messenger::TelegramMessenger;
pub use settings::{TelegramConfig, TELEGRAM_MAX_ALBUM_SIZE};
