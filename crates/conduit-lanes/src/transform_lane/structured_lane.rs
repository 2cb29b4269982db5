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

//! Parsing of structured text.

use super::{mismatch, open_input, Input};
use conduit_core::codec::StructuredParser;
use conduit_core::{Artifact, Lane, LaneKind, Payload, PipelineError, Tag, TransformLane};
use std::sync::Arc;

/// Parses `StructuredText` bytes into a decoded structured value.
pub struct StructuredDataLane {
    parser: Arc<dyn StructuredParser>,
}

impl StructuredDataLane {
    /// Creates a lane parsing through `parser`.
    pub fn new(parser: Arc<dyn StructuredParser>) -> Self {
        Self { parser }
    }
}

impl Lane for StructuredDataLane {
    fn strategy_name(&self) -> &'static str {
        "StructuredData"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Transform
    }
}

impl TransformLane for StructuredDataLane {
    fn accepts(&self) -> Tag {
        Tag::StructuredText
    }

    fn produces(&self) -> &'static [Tag] {
        &[Tag::Decoded]
    }

    fn transform(&self, artifact: Artifact) -> Result<Artifact, PipelineError> {
        let bytes = match open_input(self, artifact)? {
            Input::Empty(artifact) => return Ok(artifact),
            Input::Payload(Payload::Raw(bytes)) => bytes,
            Input::Payload(other) => return Err(mismatch(self, &other)),
        };

        let value = self.parser.parse(&bytes).map_err(|error| PipelineError::Format {
            stage: self.strategy_name(),
            error,
        })?;

        Ok(Artifact::structured(value))
    }
}
