//! Integration Tests for the Cache Façade
//!
//! Drives the typed cache end to end over the in-process store.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use transcache::error::{CacheError, Stage};
use transcache::nil::Nullable;
use transcache::store::Expiry;
use transcache::transcoder::{JsonTranscoder, PipelineTranscoder, Transcoder, ZstdTranscoder};
use transcache::{Cache, CacheOptions, KvStore, MemoryStore, NilPolicy};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Record {
    id: u64,
    name: String,
}

impl Nullable for Record {}

fn record(id: u64, name: &str) -> Record {
    Record {
        id,
        name: name.to_string(),
    }
}

fn transcode_stage(err: CacheError) -> Stage {
    match err {
        CacheError::Transcode(err) => err.stage(),
        other => panic!("expected a transcode error, got {:?}", other),
    }
}

// == End-to-End Scenario ==

#[tokio::test]
async fn test_set_get_exists_delete_scenario() {
    let store = Arc::new(MemoryStore::new(100));
    let cache: Cache<Record, MemoryStore> = Cache::new(Arc::clone(&store)).unwrap();

    cache
        .set(&record(1, "a"), "k1", Duration::from_secs(600))
        .await
        .unwrap();

    assert_eq!(cache.get("k1").await.unwrap(), record(1, "a"));
    assert!(cache.exists("k1").await.unwrap());

    cache.delete("k1").await.unwrap();
    assert!(!cache.exists("k1").await.unwrap());

    let err = cache.get("k1").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_caches_share_one_store() {
    let store = Arc::new(MemoryStore::new(100));
    let writer: Cache<Record, MemoryStore> = Cache::new(Arc::clone(&store)).unwrap();
    let reader: Cache<Record, MemoryStore> = Cache::new(Arc::clone(&store)).unwrap();

    writer
        .set(&record(7, "shared"), "shared", Duration::ZERO)
        .await
        .unwrap();

    assert_eq!(reader.get("shared").await.unwrap(), record(7, "shared"));
    writer.close();
    assert_eq!(store.len().await, 1);
}

// == TTL ==

#[tokio::test(start_paused = true)]
async fn test_zero_ttl_uses_default() {
    let store = Arc::new(MemoryStore::new(100));
    let options = CacheOptions::default().with_ttl(Duration::from_secs(30));
    let cache: Cache<Record, MemoryStore> =
        Cache::from_options(Arc::clone(&store), options).unwrap();

    cache.set(&record(1, "a"), "k", Duration::ZERO).await.unwrap();

    let (_, expiry) = cache.get_with_ttl("k").await.unwrap();
    assert_eq!(expiry, Expiry::In(Duration::from_secs(30)));

    tokio::time::advance(Duration::from_secs(31)).await;
    assert!(cache.get("k").await.unwrap_err().is_not_found());
}

// == Transcoder Selection ==

#[tokio::test]
async fn test_json_transcoder_stores_plain_json() {
    let store = Arc::new(MemoryStore::new(100));
    let cache: Cache<Record, MemoryStore, JsonTranscoder<Record>> = Cache::with_transcoder(
        Arc::clone(&store),
        JsonTranscoder::new(),
        CacheOptions::default(),
    );

    cache
        .set(&record(2, "b"), "plain", Duration::ZERO)
        .await
        .unwrap();

    let raw = store.get("plain").await.unwrap().unwrap();
    assert_eq!(raw, r#"{"id":2,"name":"b"}"#);
    assert_eq!(cache.get("plain").await.unwrap(), record(2, "b"));
}

#[tokio::test]
async fn test_pipeline_output_is_smaller_for_repetitive_values() {
    let store = Arc::new(MemoryStore::new(100));
    let cache: Cache<Vec<String>, MemoryStore> = Cache::new(Arc::clone(&store)).unwrap();
    let value = vec!["repeat me".to_string(); 200];

    cache.set(&value, "big", Duration::ZERO).await.unwrap();

    let raw = store.get("big").await.unwrap().unwrap();
    let json_len = serde_json::to_string(&value).unwrap().len();
    assert!(raw.len() < json_len);
    assert_eq!(cache.get("big").await.unwrap(), value);
}

// == Stage Isolation ==

#[tokio::test]
async fn test_corrupt_text_reports_encoding_stage() {
    let store = Arc::new(MemoryStore::new(100));
    let cache: Cache<Record, MemoryStore> = Cache::new(Arc::clone(&store)).unwrap();

    store
        .set("bad", "not base64!!".to_string(), Duration::ZERO)
        .await
        .unwrap();

    let err = cache.get("bad").await.unwrap_err();
    assert_eq!(transcode_stage(err), Stage::Encoding);
}

#[tokio::test]
async fn test_non_zstd_bytes_report_compression_stage() {
    let store = Arc::new(MemoryStore::new(100));
    let cache: Cache<Record, MemoryStore> = Cache::new(Arc::clone(&store)).unwrap();

    // base64("hello"), not a Zstandard frame
    store
        .set("bad", "aGVsbG8=".to_string(), Duration::ZERO)
        .await
        .unwrap();

    let err = cache.get("bad").await.unwrap_err();
    assert_eq!(transcode_stage(err), Stage::Compression);
}

#[tokio::test]
async fn test_wrong_shape_reports_serialization_stage() {
    let store = Arc::new(MemoryStore::new(100));
    let cache: Cache<Record, MemoryStore> = Cache::new(Arc::clone(&store)).unwrap();

    let frame = ZstdTranscoder::new()
        .unwrap()
        .encode(&br#"{"id":"not a number"}"#.to_vec())
        .unwrap();
    store.set("bad", frame, Duration::ZERO).await.unwrap();

    let err = cache.get("bad").await.unwrap_err();
    assert_eq!(transcode_stage(err), Stage::Serialization);
}

#[tokio::test]
async fn test_pipeline_text_rejected_by_json_cache() {
    let store = Arc::new(MemoryStore::new(100));
    let pipeline: Cache<Record, MemoryStore> = Cache::new(Arc::clone(&store)).unwrap();
    let json: Cache<Record, MemoryStore, JsonTranscoder<Record>> = Cache::with_transcoder(
        Arc::clone(&store),
        JsonTranscoder::new(),
        CacheOptions::default(),
    );

    pipeline
        .set(&record(3, "c"), "k", Duration::ZERO)
        .await
        .unwrap();

    let err = json.get("k").await.unwrap_err();
    assert_eq!(transcode_stage(err), Stage::Serialization);
}

// == Nil Handling ==

#[tokio::test]
async fn test_nil_policy() {
    let store = Arc::new(MemoryStore::new(100));
    let rejecting: Cache<Option<Record>, MemoryStore> = Cache::new(Arc::clone(&store)).unwrap();

    let err = rejecting.set(&None, "nil", Duration::ZERO).await.unwrap_err();
    assert!(matches!(err, CacheError::Validation(_)));
    assert!(!rejecting.exists("nil").await.unwrap());

    let storing: Cache<Option<Record>, MemoryStore> = Cache::from_options(
        Arc::clone(&store),
        CacheOptions::default().with_nil_policy(NilPolicy::Store),
    )
    .unwrap();
    storing.set(&None, "nil", Duration::ZERO).await.unwrap();
    assert_eq!(storing.get("nil").await.unwrap(), None);
}

// == Close ==

#[tokio::test]
async fn test_operations_after_close_fail() {
    let store = Arc::new(MemoryStore::new(100));
    let cache: Cache<Record, MemoryStore, PipelineTranscoder<Record>> = Cache::with_transcoder(
        Arc::clone(&store),
        PipelineTranscoder::new().unwrap(),
        CacheOptions::default(),
    );

    cache.set(&record(1, "a"), "k", Duration::ZERO).await.unwrap();
    cache.close();
    cache.close();

    let err = cache.get("k").await.unwrap_err();
    assert_eq!(transcode_stage(err), Stage::Compression);

    let err = cache
        .set(&record(2, "b"), "k2", Duration::ZERO)
        .await
        .unwrap_err();
    assert_eq!(transcode_stage(err), Stage::Compression);
    assert!(cache.transcoder().codec().is_released());
}
