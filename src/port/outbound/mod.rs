//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the infrastructure the poll loop depends on:
//! the listing endpoints, the messaging endpoint and token persistence.

pub mod listing;
pub mod messenger;
pub mod store;
