//! Ad notifier: formats an ad and dispatches it through a
//! [`Messenger`](crate::port::Messenger).

mod delivery;
mod format;
mod retry;
mod service;

pub use delivery::Delivery;
pub use format::{format_caption, format_price, group_thousands, CURRENCY, NEGOTIABLE};
pub use retry::RetryPolicy;
pub use service::{AdNotifier, NotifyOutcome};
