//! Divar endpoint configuration.

use serde::Deserialize;

/// Divar API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DivarConfig {
    /// Base URL of the web search endpoint.
    #[serde(default = "default_search_url")]
    pub search_url: String,
    /// Base URL of the post detail endpoint.
    #[serde(default = "default_detail_url")]
    pub detail_url: String,
    /// City, category and filters, appended to the search URL as-is
    /// (e.g. `tehran/buy-apartment?price=-5000000000`).
    #[serde(default)]
    pub search_conditions: String,
    /// Result pages to walk per poll cycle.
    #[serde(default = "default_pages")]
    pub pages: u32,
    /// Maximum description length in characters.
    #[serde(default = "default_description_limit")]
    pub description_limit: usize,
    /// HTTP client settings.
    #[serde(default)]
    pub http: DivarHttpConfig,
}

fn default_search_url() -> String {
    "https://api.divar.ir/v8/web-search".into()
}

fn default_detail_url() -> String {
    "https://api.divar.ir/v8/posts-v2/web".into()
}

const fn default_pages() -> u32 {
    1
}

const fn default_description_limit() -> usize {
    500
}

impl Default for DivarConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            detail_url: default_detail_url(),
            search_conditions: String::new(),
            pages: default_pages(),
            description_limit: default_description_limit(),
            http: DivarHttpConfig::default(),
        }
    }
}

/// Divar HTTP client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DivarHttpConfig {
    /// Request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_http_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

const fn default_http_timeout_ms() -> u64 {
    10_000
}

const fn default_http_connect_timeout_ms() -> u64 {
    5_000
}

impl Default for DivarHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_http_timeout_ms(),
            connect_timeout_ms: default_http_connect_timeout_ms(),
        }
    }
}
