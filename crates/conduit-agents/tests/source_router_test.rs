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

use conduit_agents::SourceRouter;
use conduit_core::{
    AcquireContext, AcquisitionLane, Artifact, Lane, LaneKind, Locator, Payload, PipelineError,
    Scheme, SourceKind, Tag,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Records how often it ran and answers with decoded bytes naming itself.
struct CountingLane {
    name: &'static str,
    schemes: &'static [Scheme],
    calls: AtomicUsize,
}

impl CountingLane {
    fn new(name: &'static str, schemes: &'static [Scheme]) -> Arc<Self> {
        Arc::new(Self {
            name,
            schemes,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Lane for CountingLane {
    fn strategy_name(&self) -> &'static str {
        self.name
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Acquisition
    }
}

impl AcquisitionLane for CountingLane {
    fn schemes(&self) -> &'static [Scheme] {
        self.schemes
    }

    fn source_kind(&self) -> SourceKind {
        SourceKind::File
    }

    fn acquire(&self, _seed: Artifact, _ctx: &AcquireContext) -> Result<Artifact, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Artifact::new(Payload::Raw(self.name.as_bytes().to_vec()), Tag::Decoded)
    }
}

fn seed(identifier: &str) -> Artifact {
    Artifact::seed(Locator::parse(identifier).unwrap())
}

#[test]
fn test_each_scheme_reaches_exactly_its_lane() {
    let file = CountingLane::new("file", &[Scheme::File]);
    let net = CountingLane::new("net", &[Scheme::Http, Scheme::Https]);
    let router = SourceRouter::builder()
        .register(file.clone())
        .register(net.clone())
        .build();
    let ctx = AcquireContext::default();

    let out = router.route(seed("file:///data/a.json"), &ctx).unwrap();
    assert_eq!(out.payload(), Some(&Payload::Raw(b"file".to_vec())));
    assert_eq!((file.calls(), net.calls()), (1, 0));

    router.route(seed("http://example.com/a.json"), &ctx).unwrap();
    router.route(seed("https://example.com/a.json"), &ctx).unwrap();
    assert_eq!((file.calls(), net.calls()), (1, 2), "http and https share the network lane");
}

#[test]
fn test_unregistered_scheme_invokes_no_lane() {
    let file = CountingLane::new("file", &[Scheme::File]);
    let router = SourceRouter::builder().register(file.clone()).build();

    let err = router
        .route(seed("bundle://pack1/icon.png"), &AcquireContext::default())
        .unwrap_err();

    assert!(matches!(err, PipelineError::UnsupportedScheme(ref s) if s == "bundle"), "got {err:?}");
    assert_eq!(file.calls(), 0);
}

#[test]
fn test_non_scheme_tag_is_unsupported_scheme() {
    let file = CountingLane::new("file", &[Scheme::File]);
    let router = SourceRouter::builder().register(file.clone()).build();
    let not_a_seed = Artifact::new(Payload::Raw(vec![1]), Tag::StructuredText).unwrap();

    let err = router.route(not_a_seed, &AcquireContext::default()).unwrap_err();
    assert!(matches!(err, PipelineError::UnsupportedScheme(ref s) if s == "structured-text"));
    assert_eq!(file.calls(), 0);
}

#[test]
fn test_empty_seed_is_returned_unchanged() {
    let file = CountingLane::new("file", &[Scheme::File]);
    let router = SourceRouter::builder().register(file.clone()).build();

    let empty = seed("bundle://pack1/");
    assert!(empty.is_empty());

    let out = router.route(empty.clone(), &AcquireContext::default()).unwrap();
    assert_eq!(out, empty);
    assert_eq!(file.calls(), 0);
}

#[test]
fn test_later_registration_wins() {
    let first = CountingLane::new("first", &[Scheme::File]);
    let second = CountingLane::new("second", &[Scheme::File]);
    let router = SourceRouter::builder()
        .register(first.clone())
        .register(second.clone())
        .build();

    router.route(seed("file:///a.json"), &AcquireContext::default()).unwrap();
    assert_eq!((first.calls(), second.calls()), (0, 1));
    assert_eq!(
        router.lane_for(Scheme::File).map(|lane| lane.strategy_name()),
        Some("second")
    );
    assert!(router.lane_for(Scheme::Bundle).is_none());
}
