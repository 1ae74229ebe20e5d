//! Flat-file persistence adapters.

mod token_store;

pub use token_store::JsonFileTokenStore;
