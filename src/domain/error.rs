//! Domain validation errors.
//!
//! Returned by `try_new` constructors when an invariant of a domain type
//! would be violated.

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Ad tokens identify a listing and can never be blank.
    #[error("ad token cannot be empty")]
    EmptyToken,
}
