//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`fakes`] - In-memory port implementations: `StaticSearch`,
//!   `MapDetails`, `RecordingMessenger`, `MemoryTokenStore`.
//! - [`domain`] - Builders for tokens and ads.

pub mod domain;
pub mod fakes;
