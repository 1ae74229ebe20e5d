//! Normalized ad record.

use super::id::AdToken;

/// One classified listing, normalized from the detail endpoint.
///
/// Records are built per fetch and dropped after a single notification
/// attempt; nothing here outlives a poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ad {
    /// Stable listing identifier.
    pub token: AdToken,
    /// Listing headline.
    pub title: String,
    /// Asking price without currency. `None` when the seller left it open.
    pub price: Option<u64>,
    /// Free text, already truncated by the fetcher.
    pub description: String,
    /// Neighbourhood the listing is posted in.
    pub district: String,
    /// Image URLs in display order.
    pub images: Vec<String>,
}

impl Ad {
    /// Create an ad with only a token and title; other fields empty.
    #[must_use]
    pub fn new(token: AdToken, title: impl Into<String>) -> Self {
        Self {
            token,
            title: title.into(),
            price: None,
            description: String::new(),
            district: String::new(),
            images: Vec::new(),
        }
    }

    /// True when the price should be shown as negotiable.
    ///
    /// A zero price is how the search API marks "agreement" listings, so it
    /// is treated the same as a missing one.
    #[must_use]
    pub fn is_negotiable(&self) -> bool {
        matches!(self.price, None | Some(0))
    }
}
