//! Telegram messenger configuration.

use serde::Deserialize;

/// Telegram bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token obtained from BotFather.
    #[serde(default)]
    pub bot_token: String,
    /// Target chat: numeric id or `@channel` username.
    #[serde(default)]
    pub chat_id: String,
    /// Outbound proxy for Bot API calls (`http://`, `https://` or `socks5://`).
    #[serde(default)]
    pub proxy: Option<String>,
    /// Largest album sent in one go; Telegram accepts at most 10.
    #[serde(default = "default_max_album_size")]
    pub max_album_size: usize,
}

/// Telegram's own limit on media group size.
pub const TELEGRAM_MAX_ALBUM_SIZE: usize = 10;

const fn default_max_album_size() -> usize {
    TELEGRAM_MAX_ALBUM_SIZE
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            proxy: None,
            max_album_size: default_max_album_size(),
        }
    }
}
