//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │  (notifier, poll loop)  │
//!                    └─────────────────────────┘
//!                                 │
//!     ┌───────────────────────────┼───────────────────────────┐
//!     ▼                           ▼                           ▼
//! ┌─────────┐              ┌─────────────┐              ┌───────────┐
//! │  Divar  │              │ Token Store │              │ Messenger │
//! │ Adapter │              │   Adapter   │              │  Adapter  │
//! └─────────┘              └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`AdSearch`], [`AdDetails`] - Listing endpoints
//! - [`Messenger`] - Notification delivery (Telegram, logging)
//! - [`TokenStore`] - Persistence of already handled tokens

pub mod outbound;

pub use outbound::listing::{AdDetails, AdSearch};
pub use outbound::messenger::{Destination, Messenger};
pub use outbound::store::TokenStore;
