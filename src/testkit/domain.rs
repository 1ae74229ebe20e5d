//! Builders for domain primitives used across tests.

use crate::domain::{Ad, AdToken};

/// Create an [`AdToken`], panicking on blank input.
pub fn token(id: &str) -> AdToken {
    AdToken::try_new(id).expect("test token must not be blank")
}

/// Create tokens in the given order.
pub fn tokens(ids: &[&str]) -> Vec<AdToken> {
    ids.iter().map(|id| token(id)).collect()
}

/// An ad with a title, district and price but no images.
pub fn ad(id: &str) -> Ad {
    Ad {
        token: token(id),
        title: format!("Listing {id}"),
        price: Some(2_000_000),
        description: "Test listing".into(),
        district: "Tajrish".into(),
        images: Vec::new(),
    }
}

/// Like [`ad`] with `n` image URLs.
pub fn ad_with_images(id: &str, n: usize) -> Ad {
    let mut ad = ad(id);
    ad.images = (0..n)
        .map(|i| format!("https://s100.divarcdn.com/{id}/{i}.jpg"))
        .collect();
    ad
}
