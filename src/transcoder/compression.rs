//! Compression Codec Module
//!
//! Whole-buffer Zstandard compression with a long-lived encoder and
//! decoder. Both contexts are created once per codec and reused for every
//! call; each sits behind its own lock so concurrent callers serialize on
//! the context instead of re-initialising it.

use std::io::Read;

use parking_lot::Mutex;
use tracing::{debug, warn};
use zstd::bulk::{Compressor, Decompressor};
use zstd::zstd_safe::{self, CParameter};

use crate::error::{CompressionError, TranscodeError};
use crate::transcoder::text::Base64Codec;
use crate::transcoder::Transcoder;

// == Public Constants ==
/// Largest decompressed payload accepted by default (64 MiB).
pub const DEFAULT_MAX_DECOMPRESSED_SIZE: usize = 64 * 1024 * 1024;

/// Highest compression level supported by the linked zstd.
pub fn max_level() -> i32 {
    *zstd::compression_level_range().end()
}

// == Zstd Codec ==
/// Reusable Zstandard encoder/decoder pair.
pub struct ZstdCodec {
    encoder: Mutex<Option<Compressor<'static>>>,
    decoder: Mutex<Option<Decompressor<'static>>>,
    level: i32,
    max_decompressed_size: usize,
}

impl std::fmt::Debug for ZstdCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZstdCodec")
            .field("level", &self.level)
            .field("max_decompressed_size", &self.max_decompressed_size)
            .field("released", &self.is_released())
            .finish()
    }
}

impl ZstdCodec {
    // == Constructors ==
    /// Creates a codec tuned for compression ratio (maximum level).
    pub fn new() -> Result<Self, CompressionError> {
        Self::with_level(max_level())
    }

    /// Creates a codec at the given level, clamped to the supported range.
    ///
    /// Frames carry a content checksum so corruption is caught on decode.
    pub fn with_level(level: i32) -> Result<Self, CompressionError> {
        let range = zstd::compression_level_range();
        let level = level.clamp(*range.start(), *range.end());

        let mut encoder = Compressor::new(level).map_err(CompressionError::Init)?;
        encoder
            .set_parameter(CParameter::ChecksumFlag(true))
            .map_err(CompressionError::Init)?;
        encoder
            .set_parameter(CParameter::ContentSizeFlag(true))
            .map_err(CompressionError::Init)?;

        let decoder = Decompressor::new().map_err(CompressionError::Init)?;

        debug!("zstd codec initialized at level {}", level);

        Ok(Self {
            encoder: Mutex::new(Some(encoder)),
            decoder: Mutex::new(Some(decoder)),
            level,
            max_decompressed_size: DEFAULT_MAX_DECOMPRESSED_SIZE,
        })
    }

    /// Sets the largest decompressed payload this codec will produce.
    /// `usize::MAX` leaves decoding unbounded.
    pub fn max_decompressed_size(mut self, limit: usize) -> Self {
        self.max_decompressed_size = limit;
        self
    }

    /// Returns the configured compression level.
    pub fn level(&self) -> i32 {
        self.level
    }

    // == Compress ==
    /// Compresses the whole input into a newly allocated frame.
    pub fn compress(&self, src: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let mut guard = self.encoder.lock();
        let encoder = guard.as_mut().ok_or(CompressionError::Released)?;
        encoder.compress(src).map_err(CompressionError::Compress)
    }

    // == Decompress ==
    /// Decompresses one complete frame.
    ///
    /// The declared content size and the frame checksum are both verified,
    /// so truncated or bit-flipped input is rejected rather than decoded
    /// into wrong bytes.
    pub fn decompress(&self, src: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let declared = match zstd_safe::get_frame_content_size(src) {
            Ok(size) => size,
            Err(_) => return Err(CompressionError::corrupt("invalid frame header")),
        };

        let Some(declared) = declared else {
            return self.decompress_unsized(src);
        };

        let capacity = usize::try_from(declared)
            .ok()
            .filter(|size| *size <= self.max_decompressed_size)
            .ok_or(CompressionError::TooLarge {
                declared,
                limit: self.max_decompressed_size,
            })?;

        let mut guard = self.decoder.lock();
        let decoder = guard.as_mut().ok_or(CompressionError::Released)?;

        let out = decoder
            .decompress(src, capacity)
            .map_err(|source| CompressionError::Corrupt {
                reason: source.to_string(),
                source: Some(source),
            })?;

        if out.len() != capacity {
            warn!(
                "zstd frame declared {} bytes but produced {}",
                capacity,
                out.len()
            );
            return Err(CompressionError::corrupt(format!(
                "frame declared {} bytes but produced {}",
                capacity,
                out.len()
            )));
        }

        Ok(out)
    }

    /// Frames written by streaming encoders may omit the content size; those
    /// go through a bounded stream decoder instead of the shared context.
    fn decompress_unsized(&self, src: &[u8]) -> Result<Vec<u8>, CompressionError> {
        if self.is_released() {
            return Err(CompressionError::Released);
        }

        let to_corrupt = |source: std::io::Error| CompressionError::Corrupt {
            reason: source.to_string(),
            source: Some(source),
        };

        let decoder = zstd::stream::read::Decoder::new(src).map_err(to_corrupt)?;
        let limit = u64::try_from(self.max_decompressed_size).unwrap_or(u64::MAX);
        let mut out = Vec::new();
        // One byte past the limit distinguishes "exactly at" from "over".
        decoder
            .take(limit.saturating_add(1))
            .read_to_end(&mut out)
            .map_err(to_corrupt)?;

        if out.len() as u64 > limit {
            return Err(CompressionError::TooLarge {
                declared: out.len() as u64,
                limit: self.max_decompressed_size,
            });
        }

        Ok(out)
    }

    // == Release ==
    /// Frees the encoder and decoder. Safe to call more than once; any
    /// later compress/decompress fails with [`CompressionError::Released`].
    pub fn release(&self) {
        let encoder = self.encoder.lock().take();
        let decoder = self.decoder.lock().take();
        if encoder.is_some() || decoder.is_some() {
            debug!("zstd codec released");
        }
    }

    /// Returns true once [`release`](Self::release) has run.
    pub fn is_released(&self) -> bool {
        self.encoder.lock().is_none()
    }
}

// == Zstd Transcoder ==
/// Compression-only transcoder over raw bytes. The frame is Base64-wrapped
/// so the result is still valid wire text.
#[derive(Debug)]
pub struct ZstdTranscoder {
    codec: ZstdCodec,
    text: Base64Codec,
}

impl ZstdTranscoder {
    pub fn new() -> Result<Self, CompressionError> {
        Ok(Self::from_codec(ZstdCodec::new()?))
    }

    pub fn from_codec(codec: ZstdCodec) -> Self {
        Self {
            codec,
            text: Base64Codec::new(),
        }
    }
}

impl Transcoder<Vec<u8>> for ZstdTranscoder {
    fn encode(&self, value: &Vec<u8>) -> Result<String, TranscodeError> {
        let frame = self.codec.compress(value).map_err(TranscodeError::Compress)?;
        Ok(self.text.encode(&frame))
    }

    fn decode(&self, text: &str) -> Result<Vec<u8>, TranscodeError> {
        let frame = self.text.decode(text).map_err(TranscodeError::Decode)?;
        self.codec.decompress(&frame).map_err(TranscodeError::Decompress)
    }

    fn release(&self) {
        self.codec.release();
    }
}
