//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters through
//! the ports in [`crate::port`].

pub mod notifier;
pub mod poller;

pub use notifier::{AdNotifier, NotifyOutcome, RetryPolicy};
pub use poller::{CycleReport, PollSettings, Poller};
