//! Messenger port for delivering ad notifications.
//!
//! Message bodies and captions are HTML formatted. Implementations map their
//! backend failures onto [`SendError`] so the notifier can tell rate limits
//! and malformed requests apart from transport failures.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;

use crate::error::{ConfigError, SendError};

/// Where notifications are delivered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Destination {
    /// Numeric chat identifier (users, groups, channels).
    Chat(i64),
    /// Public channel username, including the leading `@`.
    Channel(String),
}

impl FromStr for Destination {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<i64>() {
            return Ok(Self::Chat(id));
        }
        if s.len() > 1 && s.starts_with('@') {
            return Ok(Self::Channel(s.to_string()));
        }
        Err(ConfigError::InvalidValue {
            field: "chat_id",
            reason: format!("expected a numeric id or an @channel name, got {s:?}"),
        })
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chat(id) => write!(f, "{id}"),
            Self::Channel(name) => write!(f, "{name}"),
        }
    }
}

/// Sends formatted content to a destination.
///
/// One handle is built at startup and shared with the notifier; it must be
/// cheap to call repeatedly.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Plain text message.
    async fn send_text(&self, to: &Destination, text: &str) -> Result<(), SendError>;

    /// Single photo with a caption.
    async fn send_photo(
        &self,
        to: &Destination,
        photo_url: &str,
        caption: &str,
    ) -> Result<(), SendError>;

    /// Photo album; the caption is attached to the first item.
    async fn send_album(
        &self,
        to: &Destination,
        photo_urls: &[String],
        caption: &str,
    ) -> Result<(), SendError>;

    /// Backend name for logging.
    fn name(&self) -> &'static str;
}
