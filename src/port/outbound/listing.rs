//! Listing ports for the search and detail endpoints.
//!
//! Both are plain request/response calls. Failures propagate to the caller;
//! there is no retry at this layer.

use async_trait::async_trait;

use crate::domain::{Ad, AdToken};
use crate::error::Result;

/// Fetches one page of search results.
#[async_trait]
pub trait AdSearch: Send + Sync {
    /// Tokens of listing rows on the given page, oldest first.
    ///
    /// `None` requests the first, unnumbered page.
    async fn search_page(&self, page: Option<u32>) -> Result<Vec<AdToken>>;
}

/// Fetches the full record for a single listing.
#[async_trait]
pub trait AdDetails: Send + Sync {
    /// Returns `Ok(None)` when the endpoint has no usable data for the token
    /// (removed or not yet published listings).
    async fn fetch_ad(&self, token: &AdToken) -> Result<Option<Ad>>;
}
