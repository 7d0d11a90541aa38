//! transcache - A typed cache façade over a key-value store
//!
//! Values are converted to wire text by a transcoding pipeline (JSON →
//! Zstandard → Base64) before they reach the store, and converted back on
//! read.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod nil;
pub mod store;
pub mod tasks;
pub mod transcoder;

pub use api::AppState;
pub use cache::{Cache, CacheOptions, NilPolicy};
pub use config::Config;
pub use error::{CacheError, Result};
pub use store::{KvStore, MemoryStore};
pub use tasks::spawn_cleanup_task;
pub use transcoder::{PipelineTranscoder, Transcoder};
