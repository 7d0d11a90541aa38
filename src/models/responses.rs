//! Response DTOs for the cache service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::store::{Expiry, StoreStats};

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub key: String,
    pub value: Value,
    /// Remaining TTL in seconds, null when the key never expires
    pub ttl: Option<u64>,
    /// Absolute expiry time (RFC 3339), null when the key never expires
    pub expires_at: Option<String>,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: Value, expiry: Expiry) -> Self {
        let remaining = expiry.remaining();
        let expires_at = remaining
            .and_then(|d| chrono::Duration::from_std(d).ok())
            .and_then(|d| Utc::now().checked_add_signed(d))
            .map(|at: DateTime<Utc>| at.to_rfc3339());

        Self {
            key: key.into(),
            value,
            ttl: remaining.map(|d| d.as_secs()),
            expires_at,
        }
    }
}

/// Response body for the SET operation (PUT /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    pub message: String,
    pub key: String,
}

impl SetResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for the EXISTS operation (GET /exists/:key)
#[derive(Debug, Clone, Serialize)]
pub struct ExistsResponse {
    pub key: String,
    pub exists: bool,
}

impl ExistsResponse {
    pub fn new(key: impl Into<String>, exists: bool) -> Self {
        Self {
            key: key.into(),
            exists,
        }
    }
}

/// Response body for the DELETE operation (DELETE /del/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub key: String,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
    /// Transcoder serving the cache ("json" or "pipeline")
    pub transcoder: String,
}

impl StatsResponse {
    pub fn new(stats: &StoreStats, transcoder: impl Into<String>) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            transcoder: transcoder.into(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_get_response_with_expiry() {
        let resp = GetResponse::new(
            "k1",
            serde_json::json!({"id": 1}),
            Expiry::In(Duration::from_secs(600)),
        );
        assert_eq!(resp.ttl, Some(600));
        assert!(resp.expires_at.is_some());

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["value"]["id"], 1);
    }

    #[test]
    fn test_get_response_without_expiry() {
        let resp = GetResponse::new("k1", Value::from("v"), Expiry::Never);
        assert!(resp.ttl.is_none());
        assert!(resp.expires_at.is_none());
    }

    #[test]
    fn test_set_and_delete_messages() {
        assert!(SetResponse::new("my_key").message.contains("my_key"));
        assert!(DeleteResponse::new("old_key").message.contains("deleted"));
    }

    #[test]
    fn test_stats_response_from_store_stats() {
        let stats = StoreStats {
            hits: 80,
            misses: 20,
            evictions: 5,
            expirations: 2,
            total_entries: 100,
        };
        let resp = StatsResponse::new(&stats, "pipeline");
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.expirations, 2);
        assert_eq!(resp.transcoder, "pipeline");
    }

    #[test]
    fn test_health_response_serialize() {
        let json = serde_json::to_string(&HealthResponse::healthy()).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let json = serde_json::to_string(&ErrorResponse::new("Something went wrong")).unwrap();
        assert!(json.contains("Something went wrong"));
    }
}
