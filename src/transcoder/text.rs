//! Text Codec Module
//!
//! Standard-alphabet Base64 (RFC 4648). Output is always padded; input is
//! accepted with or without padding.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};

use crate::error::TranscodeError;
use crate::transcoder::Transcoder;

/// Padded on encode, padding-indifferent on decode.
const TOLERANT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

// == Base64 Codec ==
/// Stateless byte ↔ text codec, freely shareable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Codec;

impl Base64Codec {
    pub fn new() -> Self {
        Self
    }

    /// Encodes bytes as padded standard Base64. Never fails.
    pub fn encode(&self, src: &[u8]) -> String {
        TOLERANT_STANDARD.encode(src)
    }

    /// Decodes padded or unpadded standard Base64.
    ///
    /// Fails on characters outside the alphabet or malformed padding.
    pub fn decode(&self, src: &str) -> Result<Vec<u8>, base64::DecodeError> {
        TOLERANT_STANDARD.decode(src)
    }
}

// == Base64 Transcoder ==
/// Text-only transcoder over raw bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Transcoder {
    codec: Base64Codec,
}

impl Base64Transcoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transcoder<Vec<u8>> for Base64Transcoder {
    fn encode(&self, value: &Vec<u8>) -> Result<String, TranscodeError> {
        Ok(self.codec.encode(value))
    }

    fn decode(&self, text: &str) -> Result<Vec<u8>, TranscodeError> {
        self.codec.decode(text).map_err(TranscodeError::Decode)
    }
}
