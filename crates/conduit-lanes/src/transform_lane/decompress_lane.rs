// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Decompression of `Compressed` artifacts.

use super::{mismatch, open_input, Input};
use conduit_core::codec::DecompressionCodec;
use conduit_core::{Artifact, Lane, LaneKind, Payload, PipelineError, Tag, TransformLane};
use std::sync::Arc;

/// Inflates compressed bytes and re-tags them from the inner content hint.
///
/// Doubly compressed content (`.json.gz.gz`) re-emits [`Tag::Compressed`], which
/// the transform router rejects as a cycle.
pub struct DecompressLane {
    codec: Arc<dyn DecompressionCodec>,
}

impl DecompressLane {
    /// Creates a lane decompressing through `codec`.
    pub fn new(codec: Arc<dyn DecompressionCodec>) -> Self {
        Self { codec }
    }
}

impl Lane for DecompressLane {
    fn strategy_name(&self) -> &'static str {
        "Decompress"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Transform
    }
}

impl TransformLane for DecompressLane {
    fn accepts(&self) -> Tag {
        Tag::Compressed
    }

    fn produces(&self) -> &'static [Tag] {
        &[
            Tag::BundleWrapped,
            Tag::Compressed,
            Tag::StructuredText,
            Tag::ImageEncoded,
            Tag::Decoded,
        ]
    }

    fn transform(&self, artifact: Artifact) -> Result<Artifact, PipelineError> {
        let compressed = match open_input(self, artifact)? {
            Input::Empty(artifact) => return Ok(artifact),
            Input::Payload(Payload::Compressed(compressed)) => compressed,
            Input::Payload(other) => return Err(mismatch(self, &other)),
        };

        let bytes = self
            .codec
            .decompress(compressed.codec, &compressed.bytes)
            .map_err(|error| PipelineError::Format {
                stage: self.strategy_name(),
                error,
            })?;

        log::debug!(
            "Decompress: {} {} bytes -> {} bytes",
            compressed.codec,
            compressed.bytes.len(),
            bytes.len()
        );

        compressed
            .inner
            .classify(bytes, Tag::Compressed, compressed.entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conduit_core::{Codec, CompressedBytes, ContentHint, FormatError};

    /// "Decompresses" by stripping a one-byte marker, rejecting anything else.
    struct MarkerCodec;

    impl DecompressionCodec for MarkerCodec {
        fn decompress(&self, _codec: Codec, bytes: &[u8]) -> Result<Vec<u8>, FormatError> {
            match bytes.split_first() {
                Some((&0xC0, rest)) => Ok(rest.to_vec()),
                _ => Err(FormatError::new("missing marker").at_offset(0)),
            }
        }
    }

    fn compressed(bytes: &[u8], inner: &str) -> Artifact {
        compressed_entry(bytes, inner, None)
    }

    fn compressed_entry(bytes: &[u8], inner: &str, entry: Option<&str>) -> Artifact {
        Artifact::new(
            Payload::Compressed(CompressedBytes {
                codec: Codec::Gzip,
                bytes: bytes.to_vec(),
                inner: ContentHint::named(inner),
                entry: entry.map(str::to_string),
            }),
            Tag::Compressed,
        )
        .unwrap()
    }

    #[test]
    fn test_decompressed_bytes_follow_inner_hint() {
        let lane = DecompressLane::new(Arc::new(MarkerCodec));
        let artifact = lane.transform(compressed(b"\xC0{}", "a.json")).unwrap();

        assert_eq!(artifact.tag(), Tag::StructuredText);
        assert_eq!(artifact.payload(), Some(&Payload::Raw(b"{}".to_vec())));
    }

    #[test]
    fn test_compressed_pack_keeps_selected_entry() {
        let lane = DecompressLane::new(Arc::new(MarkerCodec));
        let artifact = lane
            .transform(compressed_entry(b"\xC0CPAK", "p.pack", Some("a.json")))
            .unwrap();

        assert_eq!(artifact.tag(), Tag::BundleWrapped);
        match artifact.payload() {
            Some(Payload::Archive(archive)) => {
                assert_eq!(archive.bytes, b"CPAK");
                assert_eq!(archive.entry.as_deref(), Some("a.json"));
            }
            other => panic!("expected archive payload, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_output_yields_empty_artifact() {
        let lane = DecompressLane::new(Arc::new(MarkerCodec));
        let artifact = lane.transform(compressed(b"\xC0", "a.json")).unwrap();
        assert!(artifact.is_empty());
    }

    #[test]
    fn test_malformed_input_is_a_format_error() {
        let lane = DecompressLane::new(Arc::new(MarkerCodec));
        let err = lane.transform(compressed(b"\x00", "a.json")).unwrap_err();

        match err {
            PipelineError::Format { stage, error } => {
                assert_eq!(stage, "Decompress");
                assert_eq!(error.message(), "missing marker");
            }
            other => panic!("expected Format, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_artifact_is_returned_unchanged() {
        let lane = DecompressLane::new(Arc::new(MarkerCodec));
        let empty = Artifact::empty(Tag::Compressed);
        assert_eq!(lane.transform(empty.clone()).unwrap(), empty);
    }

    #[test]
    fn test_foreign_tag_is_rejected() {
        let lane = DecompressLane::new(Arc::new(MarkerCodec));
        let raw = Artifact::new(Payload::Raw(vec![1]), Tag::ImageEncoded).unwrap();
        assert!(matches!(
            lane.transform(raw),
            Err(PipelineError::UnexpectedTag { expected: Tag::Compressed, found: Tag::ImageEncoded, .. })
        ));
    }
}
