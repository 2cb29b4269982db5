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

//! Acquisition of entries from named bundles.

use super::{open_seed, source_error, Seed};
use conduit_core::io::BundleReader;
use conduit_core::{
    AcquireContext, AcquisitionLane, Artifact, ContentHint, Lane, LaneKind, PipelineError,
    Scheme, SourceKind, Tag,
};
use std::sync::Arc;

/// Reads `bundle://<bundle-ref>/<entry>` identifiers through a [`BundleReader`].
///
/// The entry's manifest MIME type and its name supply the content hint.
pub struct BundleAcquisitionLane {
    reader: Arc<dyn BundleReader>,
}

impl BundleAcquisitionLane {
    /// Creates a lane reading through `reader`.
    pub fn new(reader: Arc<dyn BundleReader>) -> Self {
        Self { reader }
    }
}

impl Lane for BundleAcquisitionLane {
    fn strategy_name(&self) -> &'static str {
        "BundleAcquisition"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Acquisition
    }
}

impl AcquisitionLane for BundleAcquisitionLane {
    fn schemes(&self) -> &'static [Scheme] {
        &[Scheme::Bundle]
    }

    fn source_kind(&self) -> SourceKind {
        SourceKind::Bundle
    }

    fn acquire(&self, seed: Artifact, _ctx: &AcquireContext) -> Result<Artifact, PipelineError> {
        let locator = match open_seed(self, seed)? {
            Seed::Empty(artifact) => return Ok(artifact),
            Seed::Locator(locator) => locator,
        };
        let (Some(bundle), Some(entry)) = (locator.bundle_ref(), locator.entry()) else {
            return Ok(Artifact::empty(Tag::Bundle));
        };

        let found = self
            .reader
            .read_entry(bundle, entry)
            .map_err(source_error(self, &locator))?;

        log::debug!(
            "BundleAcquisition: read {} bytes of '{}' from bundle '{}'",
            found.bytes.len(),
            entry,
            bundle
        );

        ContentHint::named(entry)
            .with_mime(found.mime.as_deref())
            .classify(found.bytes, Tag::Bundle, locator.fragment().map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conduit_core::io::BundleEntryBytes;
    use conduit_core::{Codec, Locator, Payload, SourceIoError};
    use std::collections::HashMap;

    struct MemoryBundles(HashMap<(String, String), BundleEntryBytes>);

    impl BundleReader for MemoryBundles {
        fn read_entry(&self, bundle: &str, entry: &str) -> Result<BundleEntryBytes, SourceIoError> {
            self.0
                .get(&(bundle.to_string(), entry.to_string()))
                .cloned()
                .ok_or_else(|| SourceIoError::NotFound(format!("{bundle}/{entry}")))
        }
    }

    fn lane() -> BundleAcquisitionLane {
        let mut entries = HashMap::new();
        entries.insert(
            ("pack1".to_string(), "icon.png.gz".to_string()),
            BundleEntryBytes {
                bytes: vec![0x1f, 0x8b, 0x08],
                mime: None,
            },
        );
        entries.insert(
            ("pack1".to_string(), "settings".to_string()),
            BundleEntryBytes {
                bytes: b"{}".to_vec(),
                mime: Some("application/json".into()),
            },
        );
        BundleAcquisitionLane::new(Arc::new(MemoryBundles(entries)))
    }

    fn seed(identifier: &str) -> Artifact {
        Artifact::seed(Locator::parse(identifier).unwrap())
    }

    #[test]
    fn test_compressed_entry_is_tagged_compressed() {
        let artifact = lane()
            .acquire(seed("bundle://pack1/icon.png.gz"), &AcquireContext::default())
            .unwrap();

        assert_eq!(artifact.tag(), Tag::Compressed);
        match artifact.payload() {
            Some(Payload::Compressed(c)) => {
                assert_eq!(c.codec, Codec::Gzip);
                assert_eq!(c.inner.name.as_deref(), Some("icon.png"));
            }
            other => panic!("expected compressed payload, got {other:?}"),
        }
    }

    #[test]
    fn test_manifest_mime_is_used() {
        let artifact = lane()
            .acquire(seed("bundle://pack1/settings"), &AcquireContext::default())
            .unwrap();
        assert_eq!(artifact.tag(), Tag::StructuredText);
    }

    #[test]
    fn test_missing_entry_is_not_found() {
        let err = lane()
            .acquire(seed("bundle://pack1/nope.json"), &AcquireContext::default())
            .unwrap_err();
        assert_eq!(err.stage(), "bundle acquisition");
        assert!(matches!(err.source_io(), Some(SourceIoError::NotFound(_))));
    }
}
