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

//! Decoding of encoded images.

use super::{mismatch, open_input, Input};
use conduit_core::codec::ImageCodec;
use conduit_core::{Artifact, Lane, LaneKind, Payload, PipelineError, Tag, TransformLane};
use std::sync::Arc;

/// A lane dedicated to decoding image files into RGBA8 pixels on the CPU.
pub struct ImageDecodeLane {
    codec: Arc<dyn ImageCodec>,
}

impl ImageDecodeLane {
    /// Creates a lane decoding through `codec`.
    pub fn new(codec: Arc<dyn ImageCodec>) -> Self {
        Self { codec }
    }
}

impl Lane for ImageDecodeLane {
    fn strategy_name(&self) -> &'static str {
        "ImageDecode"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Transform
    }
}

impl TransformLane for ImageDecodeLane {
    fn accepts(&self) -> Tag {
        Tag::ImageEncoded
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

        let image = self.codec.decode(&bytes).map_err(|error| PipelineError::Format {
            stage: self.strategy_name(),
            error,
        })?;

        log::debug!("ImageDecode: decoded {}x{} image", image.width, image.height);

        Ok(Artifact::image(image))
    }
}
