//! Telegram delivery through the Bot API.
//!
//! Requires the `telegram` feature to be enabled.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InputFile, InputMedia, InputMediaPhoto, ParseMode, Recipient};
use teloxide::RequestError;
use tracing::{debug, info};
use url::Url;

use super::settings::TelegramConfig;
use crate::error::{ConfigError, Error, Result, SendError};
use crate::port::{Destination, Messenger};

/// Messenger backed by a single shared [`Bot`] handle.
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    /// Build the bot client, routing it through the configured proxy.
    ///
    /// # Errors
    ///
    /// Returns an error if the proxy URL is invalid or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &TelegramConfig) -> Result<Self> {
        let mut builder = teloxide::net::default_reqwest_settings();
        if let Some(proxy) = config.proxy.as_deref() {
            let proxy =
                telegram_reqwest::Proxy::all(proxy).map_err(|e| ConfigError::InvalidValue {
                    field: "proxy",
                    reason: e.to_string(),
                })?;
            builder = builder.proxy(proxy);
            info!(proxy = ?config.proxy, "Telegram client using proxy");
        }
        let client = builder
            .build()
            .map_err(|e| Error::Client(format!("telegram: {e}")))?;

        Ok(Self {
            bot: Bot::with_client(&config.bot_token, client),
        })
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_text(&self, to: &Destination, text: &str) -> std::result::Result<(), SendError> {
        self.bot
            .send_message(recipient(to), text)
            .parse_mode(ParseMode::Html)
            .await
            .map_err(map_request_error)?;
        debug!(to = %to, "Sent text message");
        Ok(())
    }

    async fn send_photo(
        &self,
        to: &Destination,
        photo_url: &str,
        caption: &str,
    ) -> std::result::Result<(), SendError> {
        let photo = InputFile::url(parse_photo_url(photo_url)?);
        self.bot
            .send_photo(recipient(to), photo)
            .caption(caption)
            .parse_mode(ParseMode::Html)
            .await
            .map_err(map_request_error)?;
        debug!(to = %to, "Sent photo");
        Ok(())
    }

    async fn send_album(
        &self,
        to: &Destination,
        photo_urls: &[String],
        caption: &str,
    ) -> std::result::Result<(), SendError> {
        let mut media = Vec::with_capacity(photo_urls.len());
        for (i, url) in photo_urls.iter().enumerate() {
            let mut photo = InputMediaPhoto::new(InputFile::url(parse_photo_url(url)?));
            if i == 0 {
                photo = photo.caption(caption).parse_mode(ParseMode::Html);
            }
            media.push(InputMedia::Photo(photo));
        }

        self.bot
            .send_media_group(recipient(to), media)
            .await
            .map_err(map_request_error)?;
        debug!(to = %to, photos = photo_urls.len(), "Sent album");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}

fn recipient(to: &Destination) -> Recipient {
    match to {
        Destination::Chat(id) => Recipient::Id(ChatId(*id)),
        Destination::Channel(name) => Recipient::ChannelUsername(name.clone()),
    }
}

fn parse_photo_url(raw: &str) -> std::result::Result<Url, SendError> {
    Url::parse(raw).map_err(|e| SendError::BadRequest(format!("invalid photo url {raw:?}: {e}")))
}

/// Sort Bot API failures into the kinds the notifier reacts to.
fn map_request_error(err: RequestError) -> SendError {
    match err {
        RequestError::RetryAfter(wait) => SendError::RateLimited {
            retry_after: Some(wait.duration()),
        },
        RequestError::Api(api) => SendError::BadRequest(api.to_string()),
        RequestError::MigrateToChatId(id) => {
            SendError::BadRequest(format!("group migrated to supergroup {id:?}"))
        }
        other => SendError::Transport(other.to_string()),
    }
}
