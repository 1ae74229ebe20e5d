//! Dispatch policy: which send call an ad turns into.

use crate::domain::Ad;

/// How an ad is delivered, chosen by its image count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery<'a> {
    /// No images: plain text message.
    Text,
    /// Exactly one image: photo with caption.
    Photo(&'a str),
    /// Several images: album with the caption on the first item.
    Album(&'a [String]),
}

impl<'a> Delivery<'a> {
    /// Pick the delivery for an ad. Albums keep the first `max_album_size`
    /// images.
    #[must_use]
    pub fn plan(ad: &'a Ad, max_album_size: usize) -> Self {
        match ad.images.as_slice() {
            [] => Self::Text,
            [only] => Self::Photo(only),
            images => Self::Album(&images[..images.len().min(max_album_size)]),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Photo(_) => "photo",
            Self::Album(_) => "album",
        }
    }

    #[must_use]
    pub fn is_album(&self) -> bool {
        matches!(self, Self::Album(_))
    }
}
