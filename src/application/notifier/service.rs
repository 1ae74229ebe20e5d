//! Formats an ad and dispatches it through a [`Messenger`].
//!
//! Dispatch rules:
//! - rate-limited sends are retried up to the policy's attempt budget, then
//!   dropped with a warning;
//! - requests the endpoint rejects as malformed are logged and dropped,
//!   since resending them cannot succeed;
//! - transport failures propagate to the poll loop.

use std::sync::Arc;

use tokio::time::sleep;
use tracing::{error, info, warn};

use super::delivery::Delivery;
use super::format::format_caption;
use super::retry::RetryPolicy;
use crate::domain::Ad;
use crate::error::{Result, SendError};
use crate::port::{Destination, Messenger};

/// Result of a notification that did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// The messenger accepted the message.
    Delivered,
    /// Given up on; the ad still counts as processed.
    Dropped { reason: SendError },
}

/// Sends ad notifications to one destination.
pub struct AdNotifier {
    messenger: Arc<dyn Messenger>,
    destination: Destination,
    retry: RetryPolicy,
    max_album_size: usize,
}

impl AdNotifier {
    #[must_use]
    pub fn new(
        messenger: Arc<dyn Messenger>,
        destination: Destination,
        retry: RetryPolicy,
        max_album_size: usize,
    ) -> Self {
        Self {
            messenger,
            destination,
            retry,
            max_album_size: max_album_size.max(2),
        }
    }

    /// Notify about one ad.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Send`](crate::error::Error::Send) for transport
    /// failures.
    pub async fn notify(&self, ad: &Ad) -> Result<NotifyOutcome> {
        let caption = format_caption(ad);
        let delivery = Delivery::plan(ad, self.max_album_size);
        let max_attempts = self.retry.max_attempts.max(1);

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.dispatch(delivery, &caption).await {
                Ok(()) => {
                    info!(
                        token = %ad.token,
                        kind = delivery.kind(),
                        messenger = self.messenger.name(),
                        "Notification sent"
                    );
                    return Ok(NotifyOutcome::Delivered);
                }
                Err(SendError::RateLimited { retry_after }) => {
                    let reason = SendError::RateLimited { retry_after };
                    if attempt >= max_attempts {
                        warn!(
                            token = %ad.token,
                            attempts = attempt,
                            "Still rate limited, dropping notification"
                        );
                        return Ok(NotifyOutcome::Dropped { reason });
                    }
                    let delay = self.retry.delay(attempt, retry_after);
                    warn!(
                        token = %ad.token,
                        attempt,
                        max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Rate limited, retrying"
                    );
                    sleep(delay).await;
                }
                Err(reason @ SendError::BadRequest(_)) => {
                    if delivery.is_album() {
                        error!(token = %ad.token, error = %reason, "Error sending photos");
                    } else {
                        error!(
                            token = %ad.token,
                            kind = delivery.kind(),
                            error = %reason,
                            "Error sending message"
                        );
                    }
                    return Ok(NotifyOutcome::Dropped { reason });
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    async fn dispatch(&self, delivery: Delivery<'_>, caption: &str) -> std::result::Result<(), SendError> {
        let to = &self.destination;
        match delivery {
            Delivery::Text => self.messenger.send_text(to, caption).await,
            Delivery::Photo(url) => self.messenger.send_photo(to, url, caption).await,
            Delivery::Album(urls) => self.messenger.send_album(to, urls, caption).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testkit::domain::ad_with_images;
    use crate::testkit::fakes::{RecordingMessenger, Sent};

    fn notifier(messenger: Arc<RecordingMessenger>, attempts: u32) -> AdNotifier {
        AdNotifier::new(
            messenger,
            Destination::Chat(42),
            RetryPolicy::immediate(attempts),
            10,
        )
    }

    #[tokio::test]
    async fn text_photo_and_album_dispatch() {
        let messenger = Arc::new(RecordingMessenger::new());
        let notifier = notifier(messenger.clone(), 3);

        for n in [0, 1, 2, 15] {
            let outcome = notifier.notify(&ad_with_images("a", n)).await.unwrap();
            assert_eq!(outcome, NotifyOutcome::Delivered);
        }

        let sent = messenger.sent();
        assert!(matches!(sent[0], Sent::Text { .. }));
        assert!(matches!(sent[1], Sent::Photo { .. }));
        match (&sent[2], &sent[3]) {
            (Sent::Album { urls: two, .. }, Sent::Album { urls: capped, .. }) => {
                assert_eq!(two.len(), 2);
                assert_eq!(capped.len(), 10);
            }
            other => panic!("expected two albums, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn caption_goes_with_every_delivery() {
        let messenger = Arc::new(RecordingMessenger::new());
        let notifier = notifier(messenger.clone(), 3);
        let ad = ad_with_images("cap", 1);

        notifier.notify(&ad).await.unwrap();

        match &messenger.sent()[0] {
            Sent::Photo { to, caption, .. } => {
                assert_eq!(to, &Destination::Chat(42));
                assert_eq!(caption, &format_caption(&ad));
            }
            other => panic!("expected photo, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rate_limit_is_retried_then_delivered() {
        let messenger = Arc::new(RecordingMessenger::new());
        messenger.push_response(Err(SendError::RateLimited { retry_after: None }));
        let notifier = notifier(messenger.clone(), 3);

        let outcome = notifier.notify(&ad_with_images("r", 0)).await.unwrap();

        assert_eq!(outcome, NotifyOutcome::Delivered);
        assert_eq!(messenger.attempts(), 2);
        assert_eq!(messenger.sent().len(), 1);
    }

    #[tokio::test]
    async fn rate_limit_retries_are_bounded() {
        let messenger = Arc::new(RecordingMessenger::new());
        for _ in 0..5 {
            messenger.push_response(Err(SendError::RateLimited { retry_after: None }));
        }
        let notifier = notifier(messenger.clone(), 3);

        let outcome = notifier.notify(&ad_with_images("r", 1)).await.unwrap();

        assert!(matches!(outcome, NotifyOutcome::Dropped { .. }));
        assert_eq!(messenger.attempts(), 3);
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test]
    async fn album_bad_request_is_swallowed() {
        let messenger = Arc::new(RecordingMessenger::new());
        messenger.push_response(Err(SendError::BadRequest("wrong file".into())));
        let notifier = notifier(messenger.clone(), 3);

        let outcome = notifier.notify(&ad_with_images("b", 4)).await.unwrap();

        assert_eq!(
            outcome,
            NotifyOutcome::Dropped {
                reason: SendError::BadRequest("wrong file".into())
            }
        );
        assert_eq!(messenger.attempts(), 1);
    }

    #[tokio::test]
    async fn text_and_photo_bad_requests_are_dropped() {
        let messenger = Arc::new(RecordingMessenger::new());
        messenger.push_response(Err(SendError::BadRequest("can't parse entities".into())));
        messenger.push_response(Err(SendError::BadRequest("wrong file identifier".into())));
        let notifier = notifier(messenger.clone(), 3);

        let text = notifier.notify(&ad_with_images("t", 0)).await.unwrap();
        let photo = notifier.notify(&ad_with_images("p", 1)).await.unwrap();

        assert!(matches!(text, NotifyOutcome::Dropped { reason: SendError::BadRequest(_) }));
        assert!(matches!(photo, NotifyOutcome::Dropped { reason: SendError::BadRequest(_) }));
        assert_eq!(messenger.attempts(), 2);
    }

    #[tokio::test]
    async fn transport_errors_propagate() {
        let messenger = Arc::new(RecordingMessenger::new());
        messenger.push_response(Err(SendError::Transport("connection reset".into())));
        let notifier = notifier(messenger.clone(), 3);

        let result = notifier.notify(&ad_with_images("t", 3)).await;

        assert!(matches!(result, Err(Error::Send(SendError::Transport(_)))));
        assert_eq!(messenger.attempts(), 1);
    }
}
