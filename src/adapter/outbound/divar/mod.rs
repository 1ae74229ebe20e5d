//! Divar listing adapter.
//!
//! Implements [`AdSearch`](crate::port::AdSearch) and
//! [`AdDetails`](crate::port::AdDetails) over the public web API.

mod client;
pub mod dto;
pub mod settings;

pub use client::DivarClient;
pub use settings::{DivarConfig, DivarHttpConfig};
