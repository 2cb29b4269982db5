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

use conduit_agents::TransformRouter;
use conduit_core::codec::{ArchiveReader, DecompressionCodec, StructuredParser};
use conduit_core::io::BundleEntryBytes;
use conduit_core::{
    ArchiveBytes, Artifact, Codec, CompressedBytes, ContentHint, FormatError, Lane, LaneKind, Payload,
    PipelineError, Tag, TransformLane,
};
use conduit_lanes::{DecompressLane, StructuredDataLane, UnbundleLane};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Re-tags its raw input as `emits`, declaring `declares` as its outputs.
struct RetagLane {
    accepts: Tag,
    emits: Tag,
    declares: &'static [Tag],
    calls: AtomicUsize,
}

impl RetagLane {
    fn new(accepts: Tag, emits: Tag, declares: &'static [Tag]) -> Arc<Self> {
        Arc::new(Self {
            accepts,
            emits,
            declares,
            calls: AtomicUsize::new(0),
        })
    }
}

impl Lane for RetagLane {
    fn strategy_name(&self) -> &'static str {
        "Retag"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Transform
    }
}

impl TransformLane for RetagLane {
    fn accepts(&self) -> Tag {
        self.accepts
    }

    fn produces(&self) -> &'static [Tag] {
        self.declares
    }

    fn transform(&self, artifact: Artifact) -> Result<Artifact, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match artifact.into_payload() {
            Some(payload) => Artifact::new(payload, self.emits),
            None => Ok(Artifact::empty(self.accepts)),
        }
    }
}

fn raw(tag: Tag) -> Artifact {
    Artifact::new(Payload::Raw(b"{}".to_vec()), tag).unwrap()
}

#[test]
fn test_terminal_tag_is_returned_as_is() {
    let router = TransformRouter::builder().build();
    let decoded = raw(Tag::Decoded);
    assert_eq!(router.route(decoded.clone()).unwrap(), decoded);
}

#[test]
fn test_empty_artifact_stops_routing() {
    let lane = RetagLane::new(Tag::StructuredText, Tag::Decoded, &[Tag::Decoded]);
    let router = TransformRouter::builder().register(lane.clone()).build();

    let empty = Artifact::empty(Tag::StructuredText);
    assert_eq!(router.route(empty.clone()).unwrap(), empty);
    assert_eq!(lane.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_unregistered_tag_is_unsupported_representation() {
    let router = TransformRouter::builder().build();
    assert!(matches!(
        router.route(raw(Tag::ImageEncoded)),
        Err(PipelineError::UnsupportedRepresentation(Tag::ImageEncoded))
    ));
}

#[test]
fn test_emitting_unregistered_tag_is_unsupported_representation() {
    // StructuredText -> ImageEncoded is declared, but nothing handles ImageEncoded.
    let lane = RetagLane::new(Tag::StructuredText, Tag::ImageEncoded, &[Tag::ImageEncoded]);
    let router = TransformRouter::builder().register(lane).build();

    assert!(matches!(
        router.route(raw(Tag::StructuredText)),
        Err(PipelineError::UnsupportedRepresentation(Tag::ImageEncoded))
    ));
}

#[test]
fn test_undeclared_output_is_rejected() {
    let lane = RetagLane::new(Tag::StructuredText, Tag::ImageEncoded, &[Tag::Decoded]);
    let router = TransformRouter::builder().register(lane).build();

    assert!(matches!(
        router.route(raw(Tag::StructuredText)),
        Err(PipelineError::UnsupportedRepresentation(Tag::ImageEncoded))
    ));
}

#[test]
fn test_forced_cycle_is_detected() {
    let a = RetagLane::new(Tag::StructuredText, Tag::ImageEncoded, &[Tag::ImageEncoded]);
    let b = RetagLane::new(Tag::ImageEncoded, Tag::StructuredText, &[Tag::StructuredText]);
    let router = TransformRouter::builder()
        .register(a.clone())
        .register(b.clone())
        .build();

    match router.route(raw(Tag::StructuredText)) {
        Err(PipelineError::CyclicTransform { tag, visited }) => {
            assert_eq!(tag, Tag::StructuredText);
            assert_eq!(visited, vec![Tag::StructuredText, Tag::ImageEncoded]);
        }
        other => panic!("expected a cycle, got {other:?}"),
    }
    assert_eq!(a.calls.load(Ordering::SeqCst), 1);
    assert_eq!(b.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_self_loop_is_detected() {
    let lane = RetagLane::new(Tag::StructuredText, Tag::StructuredText, &[Tag::StructuredText]);
    let router = TransformRouter::builder().register(lane).build();

    assert!(matches!(
        router.route(raw(Tag::StructuredText)),
        Err(PipelineError::CyclicTransform { tag: Tag::StructuredText, .. })
    ));
}

#[test]
fn test_chain_terminates_within_tag_count() {
    // Every non-terminal tag maps to the next one in pipeline order.
    let chain: [(Tag, Tag); 4] = [
        (Tag::BundleWrapped, Tag::Compressed),
        (Tag::Compressed, Tag::StructuredText),
        (Tag::StructuredText, Tag::ImageEncoded),
        (Tag::ImageEncoded, Tag::Decoded),
    ];
    let lanes: Vec<Arc<RetagLane>> = chain
        .iter()
        .map(|&(from, to)| RetagLane::new(from, to, &Tag::ALL))
        .collect();
    let router = lanes
        .iter()
        .fold(TransformRouter::builder(), |builder, lane| builder.register(lane.clone()))
        .build();

    // Compressed requires a Compressed payload, so drive the chain from StructuredText.
    let (out, path) = router.route_traced(raw(Tag::StructuredText)).unwrap();
    assert_eq!(out.tag(), Tag::Decoded);
    assert_eq!(path, vec![Tag::StructuredText, Tag::ImageEncoded, Tag::Decoded]);
    assert!(path.len() <= Tag::ALL.len());
}

struct Gunzipish;

impl DecompressionCodec for Gunzipish {
    fn decompress(&self, _codec: Codec, bytes: &[u8]) -> Result<Vec<u8>, FormatError> {
        Ok(bytes.to_vec())
    }
}

struct Json;

impl StructuredParser for Json {
    fn parse(&self, bytes: &[u8]) -> Result<serde_json::Value, FormatError> {
        serde_json::from_slice(bytes).map_err(|e| FormatError::new(e.to_string()))
    }
}

fn real_router() -> TransformRouter {
    TransformRouter::builder()
        .register(Arc::new(DecompressLane::new(Arc::new(Gunzipish))))
        .register(Arc::new(StructuredDataLane::new(Arc::new(Json))))
        .build()
}

fn compressed(inner: &str, bytes: &[u8]) -> Artifact {
    Artifact::new(
        Payload::Compressed(CompressedBytes {
            codec: Codec::Gzip,
            bytes: bytes.to_vec(),
            inner: ContentHint::named(inner),
            entry: None,
        }),
        Tag::Compressed,
    )
    .unwrap()
}

#[test]
fn test_compressed_json_reaches_decoded() {
    let out = real_router().route(compressed("a.json", br#"{"a":1}"#)).unwrap();
    assert_eq!(out.tag(), Tag::Decoded);
    assert_eq!(out.as_structured(), Some(&json!({"a": 1})));
}

#[test]
fn test_double_compression_is_a_cycle() {
    assert!(matches!(
        real_router().route(compressed("a.json.gz", br#"{"a":1}"#)),
        Err(PipelineError::CyclicTransform { tag: Tag::Compressed, .. })
    ));
}

#[test]
fn test_terminal_lane_is_never_registered() {
    let lane = RetagLane::new(Tag::Decoded, Tag::Decoded, &[Tag::Decoded]);
    let router = TransformRouter::builder().register(lane.clone()).build();

    assert!(router.lane_for(Tag::Decoded).is_none());
    router.route(raw(Tag::Decoded)).unwrap();
    assert_eq!(lane.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_empty_decompressed_output_ends_without_error() {
    let (out, path) = real_router()
        .route_traced(compressed("empty.json", b""))
        .unwrap();
    assert!(out.is_empty());
    assert_eq!(path, vec![Tag::Compressed]);
}

/// Every entry exists and is empty.
struct EmptyEntries;

impl ArchiveReader for EmptyEntries {
    fn extract(&self, _archive: &[u8], _entry: &str) -> Result<BundleEntryBytes, FormatError> {
        Ok(BundleEntryBytes::default())
    }
}

#[test]
fn test_empty_archive_entry_ends_without_error() {
    let router = TransformRouter::builder()
        .register(Arc::new(UnbundleLane::new(Arc::new(EmptyEntries))))
        .build();
    let wrapped = Artifact::new(
        Payload::Archive(ArchiveBytes {
            bytes: b"CPAK".to_vec(),
            entry: Some("e.json".into()),
        }),
        Tag::BundleWrapped,
    )
    .unwrap();

    let out = router.route(wrapped).unwrap();
    assert!(out.is_empty());
}
