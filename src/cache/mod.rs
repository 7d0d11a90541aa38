//! Cache Module
//!
//! Typed caching façade over a key-value store.

mod facade;
mod options;

// Re-export public types
pub use facade::Cache;
pub use options::{CacheOptions, NilPolicy, DEFAULT_TTL};
