//! Error types for the typed cache
//!
//! Provides unified error handling using thiserror. Each layer wraps the
//! layer below through `#[source]`, so callers can walk the chain down to
//! the root cause.

use std::error::Error as StdError;
use std::io;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Store Error ==
/// Failures reported by a key-value store implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Key rejected by the store
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Value rejected by the store
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Store is full and could not make room
    #[error("Store full: {0}")]
    Full(String),

    /// Connectivity, protocol or any other backend failure
    #[error("Backend error: {0}")]
    Backend(String),
}

// == Compression Error ==
/// Failures of the Zstandard compression stage.
#[derive(Error, Debug)]
pub enum CompressionError {
    /// Encoder or decoder could not be created
    #[error("failed to initialize zstd context")]
    Init(#[source] io::Error),

    /// Encoder rejected the input
    #[error("zstd compression failed")]
    Compress(#[source] io::Error),

    /// Frame is truncated, bit-corrupted or otherwise malformed
    #[error("corrupt zstd frame: {reason}")]
    Corrupt {
        reason: String,
        #[source]
        source: Option<io::Error>,
    },

    /// Frame declares more content than the codec accepts
    #[error("zstd frame declares {declared} bytes, limit is {limit}")]
    TooLarge { declared: u64, limit: usize },

    /// Codec resources were already released
    #[error("zstd codec has been released")]
    Released,
}

impl CompressionError {
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        CompressionError::Corrupt {
            reason: reason.into(),
            source: None,
        }
    }
}

// == Transcode Error ==
/// Pipeline stage that produced a [`TranscodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// JSON marshal / unmarshal
    Serialization,
    /// Zstandard compress / decompress
    Compression,
    /// Base64 decode
    Encoding,
}

/// Stage-identifying failure of a transcoder.
#[derive(Error, Debug)]
pub enum TranscodeError {
    #[error("failed to marshal JSON")]
    Marshal(#[source] serde_json::Error),

    #[error("failed to unmarshal JSON")]
    Unmarshal(#[source] serde_json::Error),

    #[error("failed to compress with Zstd")]
    Compress(#[source] CompressionError),

    #[error("failed to decompress Zstd")]
    Decompress(#[source] CompressionError),

    #[error("failed to decode Base64")]
    Decode(#[source] base64::DecodeError),
}

impl TranscodeError {
    /// Returns the pipeline stage this failure originated from.
    pub fn stage(&self) -> Stage {
        match self {
            TranscodeError::Marshal(_) | TranscodeError::Unmarshal(_) => Stage::Serialization,
            TranscodeError::Compress(_) | TranscodeError::Decompress(_) => Stage::Compression,
            TranscodeError::Decode(_) => Stage::Encoding,
        }
    }
}

// == Cache Error ==
/// Unified error type for the cache façade.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key absent from the store
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Rejected at the façade boundary (empty key, nil value)
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Transcoder failure, forwarded unchanged
    #[error(transparent)]
    Transcode(#[from] TranscodeError),

    /// Store failure, forwarded unchanged
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CacheError {
    /// Returns true for the key-absent condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound(_))
    }
}

/// Renders an error and all of its sources as `outer: inner: root`.
pub fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::Validation(_) => StatusCode::BAD_REQUEST,
            CacheError::Transcode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CacheError::Store(StoreError::InvalidKey(_) | StoreError::InvalidValue(_)) => {
                StatusCode::BAD_REQUEST
            }
            CacheError::Store(StoreError::Full(_)) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::Store(StoreError::Backend(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(error_chain(&self)));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache façade.
pub type Result<T> = std::result::Result<T, CacheError>;
