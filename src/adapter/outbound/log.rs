//! Log-only messenger for dry runs.

use async_trait::async_trait;
use tracing::info;

use crate::error::SendError;
use crate::port::{Destination, Messenger};

/// A messenger that logs each dispatch via tracing instead of sending it.
pub struct LogMessenger;

#[async_trait]
impl Messenger for LogMessenger {
    async fn send_text(&self, to: &Destination, text: &str) -> Result<(), SendError> {
        info!(to = %to, text = %text, "Dry run: text message");
        Ok(())
    }

    async fn send_photo(
        &self,
        to: &Destination,
        photo_url: &str,
        caption: &str,
    ) -> Result<(), SendError> {
        info!(to = %to, photo = %photo_url, caption = %caption, "Dry run: photo");
        Ok(())
    }

    async fn send_album(
        &self,
        to: &Destination,
        photo_urls: &[String],
        caption: &str,
    ) -> Result<(), SendError> {
        info!(
            to = %to,
            photos = photo_urls.len(),
            caption = %caption,
            "Dry run: album"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
