//! Exchange-free domain types: ads, tokens and the seen-token set.
//!
//! Nothing in here performs I/O; adapters translate wire formats into these
//! types and the application layer works only with them.

pub mod ad;
pub mod error;
pub mod id;
pub mod seen;
pub mod text;

pub use ad::Ad;
pub use error::DomainError;
pub use id::AdToken;
pub use seen::SeenTokens;
