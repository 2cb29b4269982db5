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

//! Extraction of one entry from a pack archive.

use super::{mismatch, open_input, Input};
use conduit_core::codec::ArchiveReader;
use conduit_core::{
    Artifact, ContentHint, FormatError, Lane, LaneKind, Payload, PipelineError, Tag,
    TransformLane,
};
use std::sync::Arc;

/// Unwraps a `BundleWrapped` archive, handing on the selected entry.
///
/// The entry is named by the identifier's fragment, e.g.
/// `file:///assets/ui.pack#icons/close.png`.
pub struct UnbundleLane {
    archive: Arc<dyn ArchiveReader>,
}

impl UnbundleLane {
    /// Creates a lane extracting through `archive`.
    pub fn new(archive: Arc<dyn ArchiveReader>) -> Self {
        Self { archive }
    }
}

impl Lane for UnbundleLane {
    fn strategy_name(&self) -> &'static str {
        "Unbundle"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Transform
    }
}

impl TransformLane for UnbundleLane {
    fn accepts(&self) -> Tag {
        Tag::BundleWrapped
    }

    fn produces(&self) -> &'static [Tag] {
        &[
            Tag::Compressed,
            Tag::StructuredText,
            Tag::ImageEncoded,
            Tag::Decoded,
        ]
    }

    fn transform(&self, artifact: Artifact) -> Result<Artifact, PipelineError> {
        let archive = match open_input(self, artifact)? {
            Input::Empty(artifact) => return Ok(artifact),
            Input::Payload(Payload::Archive(archive)) => archive,
            Input::Payload(other) => return Err(mismatch(self, &other)),
        };
        let format_error = |error: FormatError| PipelineError::Format {
            stage: self.strategy_name(),
            error,
        };

        let entry = archive.entry.ok_or_else(|| {
            format_error(FormatError::new(
                "no archive entry selected; append '#<entry>' to the identifier",
            ))
        })?;

        let found = self
            .archive
            .extract(&archive.bytes, &entry)
            .map_err(format_error)?;

        log::debug!("Unbundle: extracted '{}' ({} bytes)", entry, found.bytes.len());

        ContentHint::named(entry.as_str())
            .with_mime(found.mime.as_deref())
            .classify(found.bytes, Tag::BundleWrapped, None)
    }
}
