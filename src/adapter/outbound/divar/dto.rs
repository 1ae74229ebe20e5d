//! Divar API response types.
//!
//! Only the fields the notifier reads are modeled. Widget payloads vary by
//! widget type, so they stay as raw JSON and are read by path.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::text::truncate;
use crate::domain::{Ad, AdToken};

/// Widget type of a listing row in search results.
pub const POST_ROW: &str = "POST_ROW";

const TITLE_SECTION: &str = "TITLE";
const IMAGE_SECTION: &str = "IMAGE";
const DESCRIPTION_SECTION: &str = "DESCRIPTION";
const DESCRIPTION_ROW: &str = "DESCRIPTION_ROW";

/// Response from the web search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub web_widgets: WebWidgets,
}

/// Widget container of a search page.
#[derive(Debug, Clone, Deserialize)]
pub struct WebWidgets {
    /// Entries newest first, as served.
    pub post_list: Vec<WidgetEntry>,
}

/// One entry in a widget list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WidgetEntry {
    #[serde(default)]
    pub widget_type: String,
    #[serde(default)]
    pub data: Value,
}

impl WidgetEntry {
    /// Token of a listing row, if this entry is one.
    fn row_token(&self) -> Option<AdToken> {
        if self.widget_type != POST_ROW {
            return None;
        }
        let raw = self.data.get("token")?.as_str()?;
        AdToken::try_new(raw).ok()
    }
}

impl SearchResponse {
    /// Listing-row tokens, oldest first.
    #[must_use]
    pub fn row_tokens(self) -> Vec<AdToken> {
        self.web_widgets
            .post_list
            .iter()
            .rev()
            .filter_map(|entry| {
                let token = entry.row_token();
                if token.is_none() {
                    debug!(widget_type = %entry.widget_type, "Skipping non-listing widget");
                }
                token
            })
            .collect()
    }
}

/// Response from the post detail endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostDetailResponse {
    #[serde(default)]
    pub sections: Option<Vec<Section>>,
    #[serde(default)]
    pub webengage: Option<Webengage>,
}

/// A named block of the detail page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub section_name: String,
    #[serde(default)]
    pub widgets: Vec<WidgetEntry>,
}

/// Tracking metadata that carries the structured listing attributes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Webengage {
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub price: Option<Value>,
}

impl PostDetailResponse {
    /// Normalize into an [`Ad`].
    ///
    /// Returns `None` when the response carries no sections, which is how
    /// the endpoint answers for removed or unpublished listings.
    #[must_use]
    pub fn into_ad(self, token: AdToken, description_limit: usize) -> Option<Ad> {
        let sections = self.sections.filter(|s| !s.is_empty())?;

        let title = section(&sections, TITLE_SECTION)
            .and_then(|s| s.widgets.iter().find_map(|w| string_at(&w.data, "title")))
            .unwrap_or_default();

        let description = section(&sections, DESCRIPTION_SECTION)
            .and_then(description_text)
            .map(|text| truncate(text.trim(), description_limit))
            .unwrap_or_default();

        let images = section(&sections, IMAGE_SECTION)
            .map(image_urls)
            .unwrap_or_default();

        let webengage = self.webengage.unwrap_or_default();

        Some(Ad {
            token,
            title,
            price: webengage.price.as_ref().and_then(parse_price),
            description,
            district: webengage.district.unwrap_or_default(),
            images,
        })
    }
}

fn section<'a>(sections: &'a [Section], name: &str) -> Option<&'a Section> {
    sections.iter().find(|s| s.section_name == name)
}

fn string_at(data: &Value, key: &str) -> Option<String> {
    data.get(key)?.as_str().map(str::to_string)
}

fn description_text(section: &Section) -> Option<String> {
    section
        .widgets
        .iter()
        .find(|w| w.widget_type == DESCRIPTION_ROW)
        .and_then(|w| string_at(&w.data, "text"))
        .or_else(|| {
            section
                .widgets
                .iter()
                .find_map(|w| string_at(&w.data, "text"))
        })
}

fn image_urls(section: &Section) -> Vec<String> {
    section
        .widgets
        .iter()
        .filter_map(|w| w.data.get("items")?.as_array())
        .flatten()
        .filter_map(|item| {
            item.pointer("/image/url")
                .or_else(|| item.get("url"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .collect()
}

/// Prices arrive as integers, occasionally as digit strings.
fn parse_price(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
