//! Outbound adapters (driven side).

pub mod divar;
pub mod file;
pub mod log;
pub mod telegram;
