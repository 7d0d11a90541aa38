//! API Handlers
//!
//! HTTP request handlers for each cache service endpoint. Every handler
//! goes through the typed [`Cache`] façade, so values travel through the
//! configured transcoder before reaching the store.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::{Cache, CacheOptions};
use crate::error::{CacheError, CompressionError, Result};
use crate::models::{
    DeleteResponse, ExistsResponse, GetResponse, HealthResponse, SetRequest, SetResponse,
    StatsResponse,
};
use crate::store::MemoryStore;
use crate::transcoder::TranscoderKind;

/// Cache of arbitrary JSON documents served over HTTP.
pub type JsonCache = Cache<Value, MemoryStore>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Typed façade used by every endpoint
    pub cache: Arc<JsonCache>,
    /// Backing store, kept for stats and the cleanup task
    pub store: Arc<MemoryStore>,
}

impl AppState {
    /// Creates state over `store` with the given cache options.
    pub fn new(
        store: Arc<MemoryStore>,
        options: CacheOptions,
    ) -> std::result::Result<Self, CompressionError> {
        let cache = Cache::from_options(Arc::clone(&store), options)?;
        Ok(Self {
            cache: Arc::new(cache),
            store,
        })
    }

    /// Creates state from configuration.
    pub fn from_config(config: &crate::config::Config) -> std::result::Result<Self, CompressionError> {
        let store = Arc::new(MemoryStore::new(config.max_entries));
        Self::new(store, config.cache_options())
    }
}

/// Handler for PUT /set
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::Validation(error_msg));
    }

    let ttl = Duration::from_secs(req.ttl.unwrap_or(0));
    state.cache.set(&req.value, &req.key, ttl).await?;

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let (value, expiry) = state.cache.get_with_ttl(&key).await?;
    Ok(Json(GetResponse::new(key, value, expiry)))
}

/// Handler for GET /exists/:key
pub async fn exists_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ExistsResponse>> {
    let exists = state.cache.exists(&key).await?;
    Ok(Json(ExistsResponse::new(key, exists)))
}

/// Handler for DELETE /del/:key
///
/// Deleting a key that does not exist still succeeds.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.cache.delete(&key).await?;
    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.store.stats().await;
    let transcoder = match state.cache.transcoder().kind() {
        TranscoderKind::Json => "json",
        TranscoderKind::Pipeline => "pipeline",
    };

    Json(StatsResponse::new(&stats, transcoder))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
