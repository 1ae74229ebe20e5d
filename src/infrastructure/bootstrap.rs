//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::divar::DivarClient;
use crate::adapter::outbound::file::JsonFileTokenStore;
use crate::adapter::outbound::log::LogMessenger;
#[cfg(feature = "telegram")]
use crate::adapter::outbound::telegram::TelegramMessenger;
use crate::application::{AdNotifier, Poller};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::Messenger;

/// Build the messenger from configuration.
///
/// Dry runs always log instead of sending.
#[cfg(feature = "telegram")]
pub fn build_messenger(config: &Config) -> Result<Arc<dyn Messenger>> {
    if config.dry_run {
        info!("Dry-run mode, notifications will be logged only");
        return Ok(Arc::new(LogMessenger));
    }
    let messenger = TelegramMessenger::from_config(&config.telegram)?;
    info!(proxy = config.telegram.proxy.is_some(), "Telegram messenger enabled");
    Ok(Arc::new(messenger))
}

/// Build the messenger from configuration (non-telegram variant).
#[cfg(not(feature = "telegram"))]
pub fn build_messenger(config: &Config) -> Result<Arc<dyn Messenger>> {
    if !config.dry_run {
        tracing::warn!("Built without the telegram feature, notifications will be logged only");
    }
    Ok(Arc::new(LogMessenger))
}

/// Wire every adapter into a ready poll loop.
///
/// # Errors
///
/// Returns an error if the destination or messenger cannot be built.
pub fn build_poller(config: &Config) -> Result<Poller> {
    let divar = Arc::new(DivarClient::from_config(&config.divar));
    let store = Arc::new(JsonFileTokenStore::new(config.store.path.clone()));
    let notifier = AdNotifier::new(
        build_messenger(config)?,
        config.destination()?,
        config.retry.policy(),
        config.telegram.max_album_size,
    );

    Ok(Poller::new(
        divar.clone(),
        divar,
        store,
        notifier,
        config.poll.settings(config.divar.pages),
    ))
}

/// Run the notifier until a cycle fails.
///
/// # Errors
///
/// Returns the error that stopped the poll loop.
pub async fn run(config: Config) -> Result<()> {
    info!(
        conditions = %config.divar.search_conditions,
        store = %config.store.path.display(),
        dry_run = config.dry_run,
        "Starting divar notifier"
    );
    build_poller(&config)?.run().await
}
