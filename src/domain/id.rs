//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Base URL of the public listing page for an ad.
const LISTING_URL: &str = "https://divar.ir/v/a";

/// Ad token - the stable identifier of one classified listing.
///
/// The inner String is private so every token goes through [`AdToken::try_new`],
/// which rejects blank input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AdToken(String);

impl AdToken {
    /// Create a new `AdToken`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyToken`] if the token is blank.
    pub fn try_new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyToken);
        }
        if trimmed.len() == id.len() {
            Ok(Self(id))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// Get the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Public web page of the listing.
    #[must_use]
    pub fn listing_url(&self) -> String {
        format!("{LISTING_URL}/{}", self.0)
    }
}

impl fmt::Display for AdToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AdToken {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::try_new(s)
    }
}

impl TryFrom<&str> for AdToken {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::try_new(s)
    }
}

impl From<AdToken> for String {
    fn from(token: AdToken) -> Self {
        token.0
    }
}

impl AsRef<str> for AdToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
