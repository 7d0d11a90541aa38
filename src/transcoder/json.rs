//! Structured Codec Module
//!
//! JSON serialization through serde. Field renames, skipped fields and
//! custom `Serialize`/`Deserialize` impls are honoured as-is.

use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::TranscodeError;
use crate::transcoder::Transcoder;

// == JSON Codec ==
/// Stateless value ↔ bytes codec for `T`.
#[derive(Debug)]
pub struct JsonCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonCodec<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonCodec<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T: Serialize + DeserializeOwned> JsonCodec<T> {
    /// Serializes `src` to UTF-8 JSON bytes.
    pub fn marshal(&self, src: &T) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(src)
    }

    /// Parses JSON bytes into a fresh `T`.
    ///
    /// `null` becomes `None` for optional types. Malformed input, type
    /// mismatches and failing custom impls return the serde error.
    pub fn unmarshal(&self, src: &[u8]) -> Result<T, serde_json::Error> {
        serde_json::from_slice(src)
    }
}

// == JSON Transcoder ==
/// Structured-only transcoder: the wire text is the JSON document itself.
#[derive(Debug)]
pub struct JsonTranscoder<T> {
    codec: JsonCodec<T>,
}

impl<T> JsonTranscoder<T> {
    pub fn new() -> Self {
        Self {
            codec: JsonCodec::new(),
        }
    }
}

impl<T> Default for JsonTranscoder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonTranscoder<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T: Serialize + DeserializeOwned> Transcoder<T> for JsonTranscoder<T> {
    fn encode(&self, value: &T) -> Result<String, TranscodeError> {
        let bytes = self.codec.marshal(value).map_err(TranscodeError::Marshal)?;
        String::from_utf8(bytes)
            .map_err(|err| TranscodeError::Marshal(serde::ser::Error::custom(err)))
    }

    fn decode(&self, text: &str) -> Result<T, TranscodeError> {
        self.codec
            .unmarshal(text.as_bytes())
            .map_err(TranscodeError::Unmarshal)
    }
}
