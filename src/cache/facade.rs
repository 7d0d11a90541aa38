//! Cache Façade Module
//!
//! Typed get/set/exists/delete over any [`KvStore`], converting values with
//! a [`Transcoder`].

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::cache::{CacheOptions, NilPolicy};
use crate::error::{CacheError, CompressionError, Result};
use crate::nil::{is_nil, Nullable};
use crate::store::{Expiry, KvStore};
use crate::transcoder::{AnyTranscoder, Transcoder};

// == Cache ==
/// Typed view over a shared store.
///
/// The store handle is shared: callers keep their own `Arc` and decide when
/// the store goes away. The transcoder is owned and released by
/// [`close`](Cache::close).
pub struct Cache<T, S: ?Sized, X = AnyTranscoder<T>> {
    store: Arc<S>,
    transcoder: X,
    options: CacheOptions,
    _marker: PhantomData<fn() -> T>,
}

impl<T, S> Cache<T, S, AnyTranscoder<T>>
where
    S: KvStore + ?Sized,
{
    /// Creates a cache using the default pipeline transcoder.
    pub fn new(store: Arc<S>) -> std::result::Result<Self, CompressionError> {
        Self::from_options(store, CacheOptions::default())
    }

    /// Creates a cache whose transcoder is picked by `options.transcoder`.
    pub fn from_options(
        store: Arc<S>,
        options: CacheOptions,
    ) -> std::result::Result<Self, CompressionError> {
        let transcoder = AnyTranscoder::build(options.transcoder, options.compression_level)?;
        Ok(Self::with_transcoder(store, transcoder, options))
    }
}

impl<T, S, X> Cache<T, S, X>
where
    S: KvStore + ?Sized,
{
    /// Creates a cache around an explicit transcoder.
    pub fn with_transcoder(store: Arc<S>, transcoder: X, options: CacheOptions) -> Self {
        Self {
            store,
            transcoder,
            options,
            _marker: PhantomData,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn transcoder(&self) -> &X {
        &self.transcoder
    }

    pub fn options(&self) -> &CacheOptions {
        &self.options
    }
}

impl<T, S, X> Cache<T, S, X>
where
    T: Serialize + DeserializeOwned + Nullable,
    S: KvStore + ?Sized,
    X: Transcoder<T>,
{
    // == Set ==
    /// Encodes `value` and writes it under `key`. A zero `ttl` uses the
    /// cache's default TTL.
    pub async fn set(&self, value: &T, key: &str, ttl: Duration) -> Result<()> {
        validate_key(key)?;
        if self.options.nil_policy == NilPolicy::Reject && is_nil(value) {
            return Err(CacheError::Validation(format!(
                "value for key '{}' is nil",
                key
            )));
        }

        let text = self.transcoder.encode(value).map_err(|err| {
            warn!(key, error = %err, "failed to encode value");
            err
        })?;

        let ttl = self.options.effective_ttl(ttl);
        debug!(key, bytes = text.len(), ttl_secs = ttl.as_secs(), "cache set");
        self.store.set(key, text, ttl).await?;
        Ok(())
    }

    // == Get ==
    /// Reads and decodes the value under `key`.
    pub async fn get(&self, key: &str) -> Result<T> {
        validate_key(key)?;

        let text = self
            .store
            .get(key)
            .await?
            .ok_or_else(|| CacheError::NotFound(key.to_string()))?;

        debug!(key, bytes = text.len(), "cache get");
        self.decode(key, &text)
    }

    // == Get With TTL ==
    /// Like [`get`](Cache::get), also returning the remaining expiry.
    ///
    /// The value and the TTL are two separate store calls. A concurrent
    /// overwrite between them can pair the old value with the new TTL; a
    /// concurrent delete yields `NotFound`.
    pub async fn get_with_ttl(&self, key: &str) -> Result<(T, Expiry)> {
        let value = self.get(key).await?;
        let expiry = self
            .store
            .ttl(key)
            .await?
            .ok_or_else(|| CacheError::NotFound(key.to_string()))?;

        Ok((value, expiry))
    }

    // == Exists ==
    /// Returns whether `key` is present, without decoding it.
    pub async fn exists(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.store.exists(key).await? > 0)
    }

    // == Delete ==
    /// Removes `key`. Deleting an absent key succeeds.
    pub async fn delete(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        debug!(key, "cache delete");
        self.store.delete(key).await?;
        Ok(())
    }

    // == Close ==
    /// Releases the transcoder's resources. Calls after this fail.
    pub fn close(&self) {
        self.transcoder.release();
    }

    fn decode(&self, key: &str, text: &str) -> Result<T> {
        self.transcoder.decode(text).map_err(|err| {
            warn!(key, stage = ?err.stage(), error = %err, "failed to decode value");
            CacheError::from(err)
        })
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(CacheError::Validation(
            "cache key is empty or whitespace".to_string(),
        ));
    }
    Ok(())
}
