//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::cache::{CacheOptions, NilPolicy};
use crate::transcoder::{max_level, TranscoderKind};

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of keys the memory store can hold
    pub max_entries: usize,
    /// Default TTL in seconds; 0 means the cache's built-in default (2h)
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Wire format for stored values
    pub transcoder: TranscoderKind,
    /// Zstandard level for the pipeline transcoder
    pub compression_level: i32,
    /// Handling of `null` values on set
    pub nil_policy: NilPolicy,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum stored keys (default: 1000)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 0, i.e. 2 hours)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `TRANSCODER` - `pipeline` or `json` (default: pipeline)
    /// - `COMPRESSION_LEVEL` - zstd level (default: maximum)
    /// - `NIL_POLICY` - `reject` or `store` (default: reject)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: env_or("MAX_ENTRIES", defaults.max_entries),
            default_ttl: env_or("DEFAULT_TTL", defaults.default_ttl),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            transcoder: env_or("TRANSCODER", defaults.transcoder),
            compression_level: env_or("COMPRESSION_LEVEL", defaults.compression_level),
            nil_policy: env_or("NIL_POLICY", defaults.nil_policy),
        }
    }

    /// Cache options derived from this configuration.
    pub fn cache_options(&self) -> CacheOptions {
        CacheOptions::default()
            .with_ttl(Duration::from_secs(self.default_ttl))
            .with_transcoder(self.transcoder)
            .with_compression_level(self.compression_level)
            .with_nil_policy(self.nil_policy)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            default_ttl: 0,
            server_port: 3000,
            cleanup_interval: 1,
            transcoder: TranscoderKind::Pipeline,
            compression_level: max_level(),
            nil_policy: NilPolicy::Reject,
        }
    }
}

/// Parses `name` from the environment, falling back to `default` when unset
/// or unparsable.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid value for {}: {:?}", name, raw);
            default
        }),
        Err(_) => default,
    }
}
