//! HTML caption for ad notifications.

use crate::domain::text::escape_html;
use crate::domain::Ad;

/// Label shown instead of a price the seller left open.
pub const NEGOTIABLE: &str = "توافقی";

/// Currency label appended to prices.
pub const CURRENCY: &str = "تومان";

/// Format an ad as a Telegram HTML caption.
#[must_use]
pub fn format_caption(ad: &Ad) -> String {
    format!(
        "🗄 <b>{}</b>\n\
         📌 محل آگهی : <i>{}</i>\n\
         💰 قیمت : {}\n\
         \n\
         📄 توضیحات :\n\
         {}\n\
         {}",
        escape_html(&ad.title),
        escape_html(&ad.district),
        format_price(ad.price),
        escape_html(&ad.description),
        ad.token.listing_url()
    )
}

/// Price with thousands separators and currency, or the negotiable label.
#[must_use]
pub fn format_price(price: Option<u64>) -> String {
    match price {
        Some(amount) if amount > 0 => format!("{} {CURRENCY}", group_thousands(amount)),
        _ => NEGOTIABLE.to_string(),
    }
}

/// `1234567` -> `1,234,567`.
#[must_use]
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
