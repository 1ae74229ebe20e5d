//! In-memory port implementations for tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Ad, AdToken, SeenTokens};
use crate::error::{Error, Result, SendError};
use crate::port::{AdDetails, AdSearch, Destination, Messenger, TokenStore};

/// Search fake serving fixed tokens per page.
#[derive(Default)]
pub struct StaticSearch {
    pages: HashMap<Option<u32>, Vec<AdToken>>,
    fail: bool,
    requested: Mutex<Vec<Option<u32>>>,
}

impl StaticSearch {
    /// Serve `first_page` for the unnumbered page; other pages are empty.
    pub fn new(first_page: Vec<AdToken>) -> Self {
        let mut pages = HashMap::new();
        pages.insert(None, first_page);
        Self {
            pages,
            ..Self::default()
        }
    }

    /// Every request fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_page(mut self, page: u32, tokens: Vec<AdToken>) -> Self {
        self.pages.insert(Some(page), tokens);
        self
    }

    pub fn requested_pages(&self) -> Vec<Option<u32>> {
        self.requested.lock().expect("lock search requests").clone()
    }
}

#[async_trait]
impl AdSearch for StaticSearch {
    async fn search_page(&self, page: Option<u32>) -> Result<Vec<AdToken>> {
        self.requested.lock().expect("lock search requests").push(page);
        if self.fail {
            return Err(Error::UnexpectedResponse("search unavailable".into()));
        }
        Ok(self.pages.get(&page).cloned().unwrap_or_default())
    }
}

/// Detail fake keyed by token. Unknown tokens have no data.
#[derive(Default)]
pub struct MapDetails {
    ads: HashMap<AdToken, Ad>,
    failing: HashSet<AdToken>,
    requested: Mutex<Vec<AdToken>>,
}

impl MapDetails {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ad(mut self, ad: Ad) -> Self {
        self.ads.insert(ad.token.clone(), ad);
        self
    }

    /// Explicitly mark a token as having no detail data.
    #[must_use]
    pub fn with_no_data(mut self, token: AdToken) -> Self {
        self.ads.remove(&token);
        self
    }

    #[must_use]
    pub fn with_failure(mut self, token: AdToken) -> Self {
        self.failing.insert(token);
        self
    }

    /// Tokens requested so far, in call order.
    pub fn requested(&self) -> Vec<AdToken> {
        self.requested.lock().expect("lock detail requests").clone()
    }
}

#[async_trait]
impl AdDetails for MapDetails {
    async fn fetch_ad(&self, token: &AdToken) -> Result<Option<Ad>> {
        self.requested
            .lock()
            .expect("lock detail requests")
            .push(token.clone());
        if self.failing.contains(token) {
            return Err(Error::UnexpectedResponse(format!("detail for {token} failed")));
        }
        Ok(self.ads.get(token).cloned())
    }
}

/// A delivered message captured by [`RecordingMessenger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text {
        to: Destination,
        text: String,
    },
    Photo {
        to: Destination,
        url: String,
        caption: String,
    },
    Album {
        to: Destination,
        urls: Vec<String>,
        caption: String,
    },
}

/// Messenger fake that records deliveries and replays scripted failures.
#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<Sent>>,
    responses: Mutex<VecDeque<std::result::Result<(), SendError>>>,
    attempts: AtomicUsize,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the response for the next send; once the queue is empty every
    /// send succeeds.
    pub fn push_response(&self, response: std::result::Result<(), SendError>) {
        self.responses
            .lock()
            .expect("lock messenger responses")
            .push_back(response);
    }

    /// Successful deliveries.
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().expect("lock messenger sent").clone()
    }

    /// All send calls, successful or not.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    fn record(&self, message: Sent) -> std::result::Result<(), SendError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let response = self
            .responses
            .lock()
            .expect("lock messenger responses")
            .pop_front()
            .unwrap_or(Ok(()));
        if response.is_ok() {
            self.sent.lock().expect("lock messenger sent").push(message);
        }
        response
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_text(&self, to: &Destination, text: &str) -> std::result::Result<(), SendError> {
        self.record(Sent::Text {
            to: to.clone(),
            text: text.to_string(),
        })
    }

    async fn send_photo(
        &self,
        to: &Destination,
        photo_url: &str,
        caption: &str,
    ) -> std::result::Result<(), SendError> {
        self.record(Sent::Photo {
            to: to.clone(),
            url: photo_url.to_string(),
            caption: caption.to_string(),
        })
    }

    async fn send_album(
        &self,
        to: &Destination,
        photo_urls: &[String],
        caption: &str,
    ) -> std::result::Result<(), SendError> {
        self.record(Sent::Album {
            to: to.clone(),
            urls: photo_urls.to_vec(),
            caption: caption.to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Token store kept in memory, counting saves.
#[derive(Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<SeenTokens>,
    saves: AtomicUsize,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(ids: &[&str]) -> Self {
        Self {
            tokens: Mutex::new(super::domain::tokens(ids).into_iter().collect()),
            saves: AtomicUsize::new(0),
        }
    }

    /// Current stored set.
    pub fn snapshot(&self) -> SeenTokens {
        self.tokens.lock().expect("lock token store").clone()
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<SeenTokens> {
        Ok(self.snapshot())
    }

    fn save(&self, tokens: &SeenTokens) -> Result<()> {
        *self.tokens.lock().expect("lock token store") = tokens.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
