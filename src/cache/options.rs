//! Cache Options Module
//!
//! Per-cache settings: default TTL, nil-value policy and transcoder choice.

use std::str::FromStr;
use std::time::Duration;

use crate::transcoder::{max_level, TranscoderKind};

// == Public Constants ==
/// TTL applied when a caller passes zero.
pub const DEFAULT_TTL: Duration = Duration::from_secs(2 * 60 * 60);

// == Nil Policy ==
/// What `set` does with a nil-equivalent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NilPolicy {
    /// Fail with a validation error
    #[default]
    Reject,
    /// Serialize the absence representation (e.g. JSON `null`)
    Store,
}

impl FromStr for NilPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(NilPolicy::Reject),
            "store" => Ok(NilPolicy::Store),
            other => Err(format!("unknown nil policy '{}'", other)),
        }
    }
}

// == Cache Options ==
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheOptions {
    /// TTL used when `set` is called with a zero TTL
    pub default_ttl: Duration,
    /// Handling of nil-equivalent values on `set`
    pub nil_policy: NilPolicy,
    /// Transcoder built by [`Cache::new`](crate::cache::Cache::new)
    pub transcoder: TranscoderKind,
    /// Zstandard level for the pipeline transcoder
    pub compression_level: i32,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,
            nil_policy: NilPolicy::default(),
            transcoder: TranscoderKind::default(),
            compression_level: max_level(),
        }
    }
}

impl CacheOptions {
    /// Sets the default TTL. Zero keeps [`DEFAULT_TTL`].
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = if ttl.is_zero() { DEFAULT_TTL } else { ttl };
        self
    }

    pub fn with_nil_policy(mut self, policy: NilPolicy) -> Self {
        self.nil_policy = policy;
        self
    }

    pub fn with_transcoder(mut self, kind: TranscoderKind) -> Self {
        self.transcoder = kind;
        self
    }

    pub fn with_compression_level(mut self, level: i32) -> Self {
        self.compression_level = level;
        self
    }

    /// Maps a zero per-call TTL to the default.
    pub(crate) fn effective_ttl(&self, ttl: Duration) -> Duration {
        if ttl.is_zero() {
            self.default_ttl
        } else {
            ttl
        }
    }
}
