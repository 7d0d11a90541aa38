//! Transcoder Module
//!
//! Converts typed values to and from the text stored under a key.
//!
//! # Variants
//! - [`JsonTranscoder`] - structured only
//! - [`Base64Transcoder`] - text only, over raw bytes
//! - [`ZstdTranscoder`] - compression only, over raw bytes
//! - [`PipelineTranscoder`] - JSON → Zstandard → Base64
//! - [`DefaultTranscoder`] - JSON only, no compression
//!
//! [`AnyTranscoder`] closes the set of variants that can be picked from
//! configuration.

mod compression;
mod json;
mod pipeline;
mod text;


use std::str::FromStr;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{CompressionError, TranscodeError};

// Re-export public types
pub use compression::{max_level, ZstdCodec, ZstdTranscoder, DEFAULT_MAX_DECOMPRESSED_SIZE};
pub use json::{JsonCodec, JsonTranscoder};
pub use pipeline::PipelineTranscoder;
pub use text::{Base64Codec, Base64Transcoder};

/// Minimal transcoder used when nothing else is selected.
pub type DefaultTranscoder<T> = JsonTranscoder<T>;

// == Transcoder Trait ==
/// Converts between `T` and its wire text.
///
/// Implementations must be usable from several threads at once; transcoding
/// after [`release`](Transcoder::release) fails instead of panicking.
pub trait Transcoder<T>: Send + Sync {
    /// Encodes `value` into wire text.
    fn encode(&self, value: &T) -> Result<String, TranscodeError>;

    /// Decodes wire text back into a value.
    fn decode(&self, text: &str) -> Result<T, TranscodeError>;

    /// Releases any long-lived resources. Idempotent.
    fn release(&self) {}
}

impl<T, X: Transcoder<T> + ?Sized> Transcoder<T> for Box<X> {
    fn encode(&self, value: &T) -> Result<String, TranscodeError> {
        (**self).encode(value)
    }

    fn decode(&self, text: &str) -> Result<T, TranscodeError> {
        (**self).decode(text)
    }

    fn release(&self) {
        (**self).release()
    }
}

// == Transcoder Kind ==
/// Transcoder choices available from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranscoderKind {
    /// Plain JSON text
    Json,
    /// JSON → Zstandard → Base64
    #[default]
    Pipeline,
}

impl FromStr for TranscoderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(TranscoderKind::Json),
            "pipeline" | "zstd" => Ok(TranscoderKind::Pipeline),
            other => Err(format!("unknown transcoder '{}'", other)),
        }
    }
}

// == Any Transcoder ==
/// Closed set of transcoders selected at construction time.
#[derive(Debug)]
pub enum AnyTranscoder<T> {
    Json(JsonTranscoder<T>),
    Pipeline(PipelineTranscoder<T>),
}

impl<T> AnyTranscoder<T> {
    /// Builds the transcoder for `kind`, with the pipeline compressing at
    /// `level`.
    pub fn build(kind: TranscoderKind, level: i32) -> Result<Self, CompressionError> {
        Ok(match kind {
            TranscoderKind::Json => AnyTranscoder::Json(JsonTranscoder::new()),
            TranscoderKind::Pipeline => {
                AnyTranscoder::Pipeline(PipelineTranscoder::with_codec(ZstdCodec::with_level(level)?))
            }
        })
    }

    /// Returns which variant this is.
    pub fn kind(&self) -> TranscoderKind {
        match self {
            AnyTranscoder::Json(_) => TranscoderKind::Json,
            AnyTranscoder::Pipeline(_) => TranscoderKind::Pipeline,
        }
    }
}

impl<T> From<JsonTranscoder<T>> for AnyTranscoder<T> {
    fn from(transcoder: JsonTranscoder<T>) -> Self {
        AnyTranscoder::Json(transcoder)
    }
}

impl<T> From<PipelineTranscoder<T>> for AnyTranscoder<T> {
    fn from(transcoder: PipelineTranscoder<T>) -> Self {
        AnyTranscoder::Pipeline(transcoder)
    }
}

impl<T: Serialize + DeserializeOwned> Transcoder<T> for AnyTranscoder<T> {
    fn encode(&self, value: &T) -> Result<String, TranscodeError> {
        match self {
            AnyTranscoder::Json(t) => t.encode(value),
            AnyTranscoder::Pipeline(t) => t.encode(value),
        }
    }

    fn decode(&self, text: &str) -> Result<T, TranscodeError> {
        match self {
            AnyTranscoder::Json(t) => t.decode(text),
            AnyTranscoder::Pipeline(t) => t.decode(text),
        }
    }

    fn release(&self) {
        match self {
            AnyTranscoder::Json(t) => t.release(),
            AnyTranscoder::Pipeline(t) => t.release(),
        }
    }
}
