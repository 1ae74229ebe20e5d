//! Divar REST API client.
//!
//! Two endpoints are used:
//! - **web-search**: one page of listing rows for the configured conditions
//! - **posts-v2**: the sectioned detail document of a single listing
//!
//! The client connects directly and ignores any configured proxy.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, info, warn};

use super::dto::{PostDetailResponse, SearchResponse};
use super::settings::DivarConfig;
use crate::domain::{Ad, AdToken};
use crate::error::Result;
use crate::port::{AdDetails, AdSearch};

/// HTTP client for the Divar search and detail APIs.
pub struct DivarClient {
    http: HttpClient,
    search_url: String,
    detail_url: String,
    search_conditions: String,
    description_limit: usize,
}

impl DivarClient {
    #[must_use]
    pub fn from_config(config: &DivarConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.http.timeout_ms))
            .connect_timeout(Duration::from_millis(config.http.connect_timeout_ms))
            .no_proxy()
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            search_url: config.search_url.trim_end_matches('/').to_string(),
            detail_url: config.detail_url.trim_end_matches('/').to_string(),
            search_conditions: config.search_conditions.trim_start_matches('/').to_string(),
            description_limit: config.description_limit,
        }
    }

    /// Search URL for a page; the first page carries no page parameter.
    #[must_use]
    pub fn search_page_url(&self, page: Option<u32>) -> String {
        let mut url = format!("{}/{}", self.search_url, self.search_conditions);
        if let Some(page) = page {
            let separator = if url.contains('?') { '&' } else { '?' };
            url.push(separator);
            url.push_str(&format!("page={page}"));
        }
        url
    }

    #[must_use]
    pub fn detail_page_url(&self, token: &AdToken) -> String {
        format!("{}/{}", self.detail_url, token)
    }

    async fn get_json<T>(&self, url: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.http.get(url).send().await?;
        info!(url = %url, status = %response.status(), "Got response");
        let response = response.error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl AdSearch for DivarClient {
    async fn search_page(&self, page: Option<u32>) -> Result<Vec<AdToken>> {
        let url = self.search_page_url(page);
        let response: SearchResponse = self.get_json(&url).await?;
        let tokens = response.row_tokens();
        debug!(page = ?page, count = tokens.len(), "Fetched listing rows");
        Ok(tokens)
    }
}

#[async_trait]
impl AdDetails for DivarClient {
    async fn fetch_ad(&self, token: &AdToken) -> Result<Option<Ad>> {
        let url = self.detail_page_url(token);
        let response: PostDetailResponse = self.get_json(&url).await?;
        let ad = response.into_ad(token.clone(), self.description_limit);
        if ad.is_none() {
            info!(token = %token, "Detail response has no sections");
        }
        Ok(ad)
    }
}



// -------------------------------------------------------------------------
// Integration Tests (behind feature flag)
// -------------------------------------------------------------------------

#[cfg(all(test, feature = "divar-integration"))]
mod integration_tests {
    use super::*;
    use std::env;
    use tokio::time::timeout;

    fn live_client() -> DivarClient {
        DivarClient::from_config(&DivarConfig {
            search_conditions: env::var("SEARCH_CONDITIONS")
                .unwrap_or_else(|_| "tehran/buy-apartment".into()),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn integration_search_and_detail() {
        let client = live_client();

        let result = timeout(Duration::from_secs(30), client.search_page(None))
            .await
            .expect("Timed out fetching search page");

        match result {
            Ok(tokens) => {
                println!("Fetched {} listing rows", tokens.len());
                if let Some(token) = tokens.last() {
                    let ad = timeout(Duration::from_secs(30), client.fetch_ad(token))
                        .await
                        .expect("Timed out fetching detail");
                    match ad {
                        Ok(Some(ad)) => assert_eq!(&ad.token, token),
                        Ok(None) => println!("Listing {token} has no detail sections"),
                        Err(e) => eprintln!("Detail fetch failed (may be network issue): {e}"),
                    }
                }
            }
            Err(e) => {
                eprintln!("Integration test failed (may be network issue): {}", e);
            }
        }
    }
}
