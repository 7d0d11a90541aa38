//! Stored Entry Module
//!
//! A single wire string held by the memory store, with its deadline.

use std::time::Duration;

use tokio::time::Instant;

use crate::store::Expiry;

// == Stored Entry ==
/// Wire text plus expiry metadata.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    /// Encoded value as produced by a transcoder
    pub value: String,
    /// When the entry was written
    pub created_at: Instant,
    /// Deadline, None = never expires
    pub expires_at: Option<Instant>,
}

impl StoredEntry {
    // == Constructor ==
    /// Creates an entry expiring after `ttl`. A zero `ttl`, or one whose
    /// deadline lies past what the clock can represent, never expires.
    pub fn new(value: String, ttl: Duration) -> Self {
        let now = Instant::now();
        let expires_at = if ttl.is_zero() {
            None
        } else {
            now.checked_add(ttl)
        };

        Self {
            value,
            created_at: now,
            expires_at,
        }
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its deadline.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub(crate) fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }

    // == Expiry ==
    /// Remaining lifetime, saturating at zero.
    pub fn expiry(&self) -> Expiry {
        match self.expires_at {
            Some(deadline) => Expiry::In(deadline.saturating_duration_since(Instant::now())),
            None => Expiry::Never,
        }
    }
}
