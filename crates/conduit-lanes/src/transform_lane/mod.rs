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

//! Lanes that convert one representation into the next.

mod decompress_lane;
mod image_lane;
mod structured_lane;
mod unbundle_lane;

pub use decompress_lane::*;
pub use image_lane::*;
pub use structured_lane::*;
pub use unbundle_lane::*;

use conduit_core::lane::expect_tag;
use conduit_core::{Artifact, Payload, PipelineError, TransformLane};

/// What a transform lane finds when it opens its input.
pub(crate) enum Input {
    /// Nothing to transform; hand the artifact back unchanged.
    Empty(Artifact),
    /// The payload to transform.
    Payload(Payload),
}

/// Opens `artifact` for `lane`: empty artifacts pass through, foreign tags fail.
pub(crate) fn open_input(lane: &dyn TransformLane, artifact: Artifact) -> Result<Input, PipelineError> {
    if artifact.is_empty() {
        return Ok(Input::Empty(artifact));
    }
    expect_tag(lane.strategy_name(), lane.accepts(), &artifact)?;
    match artifact.into_payload() {
        Some(payload) => Ok(Input::Payload(payload)),
        None => Ok(Input::Empty(Artifact::empty(lane.accepts()))),
    }
}

/// The error for a payload variant the lane's accepted tag cannot carry.
pub(crate) fn mismatch(lane: &dyn TransformLane, payload: &Payload) -> PipelineError {
    PipelineError::RepresentationMismatch {
        stage: lane.strategy_name(),
        tag: lane.accepts(),
        payload: payload.kind(),
    }
}
