//! Transcoding Pipeline Module
//!
//! JSON → Zstandard → Base64 on encode, and the exact reverse on decode.

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::{CompressionError, TranscodeError};
use crate::transcoder::compression::ZstdCodec;
use crate::transcoder::json::JsonCodec;
use crate::transcoder::text::Base64Codec;
use crate::transcoder::Transcoder;

// == Pipeline Transcoder ==
/// Full wire transcoder. Owns its Zstandard contexts and releases them
/// exactly once, either through [`Transcoder::release`] or on drop.
#[derive(Debug)]
pub struct PipelineTranscoder<T> {
    json: JsonCodec<T>,
    zstd: ZstdCodec,
    text: Base64Codec,
}

impl<T> PipelineTranscoder<T> {
    /// Creates a pipeline compressing at the maximum level.
    pub fn new() -> Result<Self, CompressionError> {
        Ok(Self::with_codec(ZstdCodec::new()?))
    }

    /// Creates a pipeline around a preconfigured compression codec.
    pub fn with_codec(zstd: ZstdCodec) -> Self {
        Self {
            json: JsonCodec::new(),
            zstd,
            text: Base64Codec::new(),
        }
    }

    /// Returns the compression codec owned by this pipeline.
    pub fn codec(&self) -> &ZstdCodec {
        &self.zstd
    }
}

impl<T: Serialize + DeserializeOwned> Transcoder<T> for PipelineTranscoder<T> {
    fn encode(&self, value: &T) -> Result<String, TranscodeError> {
        let json = self.json.marshal(value).map_err(TranscodeError::Marshal)?;
        let frame = self.zstd.compress(&json).map_err(TranscodeError::Compress)?;
        let text = self.text.encode(&frame);

        debug!(
            json_bytes = json.len(),
            frame_bytes = frame.len(),
            text_bytes = text.len(),
            "encoded value"
        );

        Ok(text)
    }

    fn decode(&self, text: &str) -> Result<T, TranscodeError> {
        let frame = self.text.decode(text).map_err(TranscodeError::Decode)?;
        let json = self
            .zstd
            .decompress(&frame)
            .map_err(TranscodeError::Decompress)?;
        self.json.unmarshal(&json).map_err(TranscodeError::Unmarshal)
    }

    fn release(&self) {
        self.zstd.release();
    }
}

impl<T> Drop for PipelineTranscoder<T> {
    fn drop(&mut self) {
        self.zstd.release();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Stage;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct User {
        id: u64,
        name: String,
        email: String,
        age: u8,
    }

    fn sample_user() -> User {
        User {
            id: 1,
            name: "Name".to_string(),
            email: "email@gmail.com".to_string(),
            age: 11,
        }
    }

    #[test]
    fn test_round_trip_struct() {
        let pipeline = PipelineTranscoder::<User>::new().unwrap();
        let text = pipeline.encode(&sample_user()).unwrap();

        assert_eq!(pipeline.decode(&text).unwrap(), sample_user());
    }

    #[test]
    fn test_wire_format_layers() {
        let pipeline = PipelineTranscoder::<User>::new().unwrap();
        let text = pipeline.encode(&sample_user()).unwrap();

        let frame = Base64Codec::new().decode(&text).unwrap();
        assert_eq!(&frame[..4], &[0x28, 0xB5, 0x2F, 0xFD]);

        let json = zstd::stream::decode_all(&frame[..]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["email"], "email@gmail.com");
    }

    #[test]
    fn test_zero_values_round_trip() {
        let strings = PipelineTranscoder::<String>::new().unwrap();
        assert_eq!(strings.decode(&strings.encode(&String::new()).unwrap()).unwrap(), "");

        let numbers = PipelineTranscoder::<i64>::new().unwrap();
        assert_eq!(numbers.decode(&numbers.encode(&0).unwrap()).unwrap(), 0);

        let maps = PipelineTranscoder::<HashMap<String, u8>>::new().unwrap();
        let empty = HashMap::new();
        assert_eq!(maps.decode(&maps.encode(&empty).unwrap()).unwrap(), empty);

        let optionals = PipelineTranscoder::<Option<Vec<u8>>>::new().unwrap();
        assert_eq!(optionals.decode(&optionals.encode(&None).unwrap()).unwrap(), None);
    }

    #[test]
    fn test_text_layer_corruption_is_encoding_error() {
        let pipeline = PipelineTranscoder::<User>::new().unwrap();
        let mut text = pipeline.encode(&sample_user()).unwrap();
        text.insert(2, '!');

        let err = pipeline.decode(&text).unwrap_err();
        assert_eq!(err.stage(), Stage::Encoding);
        assert!(matches!(err, TranscodeError::Decode(_)));
    }

    #[test]
    fn test_frame_corruption_is_compression_error() {
        let pipeline = PipelineTranscoder::<User>::new().unwrap();
        let text = pipeline.encode(&sample_user()).unwrap();

        let codec = Base64Codec::new();
        let mut frame = codec.decode(&text).unwrap();
        let last = frame.len() - 1;
        frame[last] ^= 0x80;

        let err = pipeline.decode(&codec.encode(&frame)).unwrap_err();
        assert_eq!(err.stage(), Stage::Compression);
    }

    #[test]
    fn test_json_mismatch_is_serialization_error() {
        let writer = PipelineTranscoder::<String>::new().unwrap();
        let reader = PipelineTranscoder::<User>::new().unwrap();
        let text = writer.encode(&"not a user".to_string()).unwrap();

        let err = reader.decode(&text).unwrap_err();
        assert_eq!(err.stage(), Stage::Serialization);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_release_then_encode_fails() {
        let pipeline = PipelineTranscoder::<User>::new().unwrap();
        pipeline.release();
        pipeline.release();

        let err = pipeline.encode(&sample_user()).unwrap_err();
        assert!(matches!(
            err,
            TranscodeError::Compress(CompressionError::Released)
        ));
    }
}
