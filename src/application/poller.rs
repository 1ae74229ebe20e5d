//! Poll loop: list, diff, enrich, notify, persist, sleep, repeat.
//!
//! ```text
//! IDLE -> FETCH_LIST -> DIFF -> (FETCH_DETAIL -> NOTIFY)* -> PERSIST -> SLEEP
//!           ^                                                          |
//!           └──────────────────────────────────────────────────────────┘
//! ```
//!
//! A token is recorded as seen once it has been notified, dropped by the
//! notifier, or found to have no detail data. A token whose detail fetch or
//! send fails with an error stays unrecorded so the next run retries it.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use super::notifier::{AdNotifier, NotifyOutcome};
use crate::domain::{AdToken, SeenTokens};
use crate::error::Result;
use crate::port::{AdDetails, AdSearch, TokenStore};

/// Timing and paging of the poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSettings {
    /// Result pages fetched per cycle.
    pub pages: u32,
    /// Sleep between cycles.
    pub interval: Duration,
    /// Pause after each notification.
    pub send_interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            pages: 1,
            interval: Duration::from_secs(60),
            send_interval: Duration::from_secs(1),
        }
    }
}

/// Counters for one poll cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Listing rows returned by search, across pages.
    pub listed: usize,
    /// Rows not seen before.
    pub new: usize,
    /// Notifications the messenger accepted.
    pub notified: usize,
    /// Notifications given up on.
    pub dropped: usize,
    /// New tokens without detail data.
    pub skipped: usize,
}

/// Drives the search, detail, notifier and store collaborators.
pub struct Poller {
    search: Arc<dyn AdSearch>,
    details: Arc<dyn AdDetails>,
    store: Arc<dyn TokenStore>,
    notifier: AdNotifier,
    settings: PollSettings,
}

impl Poller {
    #[must_use]
    pub fn new(
        search: Arc<dyn AdSearch>,
        details: Arc<dyn AdDetails>,
        store: Arc<dyn TokenStore>,
        notifier: AdNotifier,
        settings: PollSettings,
    ) -> Self {
        Self {
            search,
            details,
            store,
            notifier,
            settings,
        }
    }

    /// Run cycles forever. Returns only when a cycle fails.
    ///
    /// # Errors
    ///
    /// Propagates the first error of any cycle.
    pub async fn run(&self) -> Result<()> {
        info!(
            pages = self.settings.pages,
            interval_secs = self.settings.interval.as_secs(),
            "Poll loop started"
        );

        loop {
            let report = self.run_cycle().await?;
            info!(
                listed = report.listed,
                new = report.new,
                notified = report.notified,
                dropped = report.dropped,
                skipped = report.skipped,
                "Cycle complete"
            );
            sleep(self.settings.interval).await;
        }
    }

    /// One cycle without the trailing sleep.
    ///
    /// The store is loaded at the start and written once at the end, also
    /// when processing fails part-way, so tokens already handled are kept.
    ///
    /// # Errors
    ///
    /// Search, detail, send and store failures.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let mut seen = self.store.load()?;
        info!(tokens = seen.len(), "Loaded seen tokens");

        let listed = self.list_tokens().await?;
        let fresh = seen.unseen(&listed);

        let mut report = CycleReport {
            listed: listed.len(),
            new: fresh.len(),
            ..CycleReport::default()
        };

        let processed = self.process(&fresh, &mut seen, &mut report).await;
        let saved = self.store.save(&seen);
        processed?;
        saved?;

        Ok(report)
    }

    async fn list_tokens(&self) -> Result<Vec<AdToken>> {
        let mut tokens = Vec::new();
        for page in page_numbers(self.settings.pages) {
            tokens.extend(self.search.search_page(page).await?);
        }
        Ok(tokens)
    }

    async fn process(
        &self,
        fresh: &[AdToken],
        seen: &mut SeenTokens,
        report: &mut CycleReport,
    ) -> Result<()> {
        for token in fresh {
            let Some(ad) = self.details.fetch_ad(token).await? else {
                info!(token = %token, "No detail data, skipping");
                seen.insert(token.clone());
                report.skipped += 1;
                continue;
            };

            info!(token = %token, "Sending notification");
            match self.notifier.notify(&ad).await? {
                NotifyOutcome::Delivered => report.notified += 1,
                NotifyOutcome::Dropped { reason } => {
                    warn!(token = %token, reason = %reason, "Notification dropped");
                    report.dropped += 1;
                }
            }
            seen.insert(token.clone());

            sleep(self.settings.send_interval).await;
        }
        Ok(())
    }
}

/// The first page carries no number; later pages are numbered from 1.
fn page_numbers(pages: u32) -> impl Iterator<Item = Option<u32>> {
    std::iter::once(None).chain((1..pages.max(1)).map(Some))
}
