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

//! Lanes that read raw bytes from a source.

mod bundle_lane;
mod file_lane;
mod network_lane;

pub use bundle_lane::*;
pub use file_lane::*;
pub use network_lane::*;

use conduit_core::{
    AcquisitionLane, Artifact, Locator, Payload, PipelineError, SourceIoError, Tag,
};

/// What an acquisition lane finds when it opens its seed.
pub(crate) enum Seed {
    /// The seed carried nothing; hand it back unchanged.
    Empty(Artifact),
    /// The identifier to acquire.
    Locator(Locator),
}

/// Unpacks the locator from `seed`, checking that `lane` serves its scheme.
pub(crate) fn open_seed(lane: &dyn AcquisitionLane, seed: Artifact) -> Result<Seed, PipelineError> {
    let (payload, tag) = seed.into_parts();
    let served = tag.scheme().is_some_and(|s| lane.schemes().contains(&s));
    if !served {
        return Err(PipelineError::UnexpectedTag {
            stage: lane.strategy_name(),
            expected: lane.schemes().first().copied().map_or(tag, Tag::from_scheme),
            found: tag,
        });
    }

    match payload {
        None => Ok(Seed::Empty(Artifact::empty(tag))),
        Some(Payload::Locator(locator)) => Ok(Seed::Locator(locator)),
        Some(other) => Err(PipelineError::RepresentationMismatch {
            stage: lane.strategy_name(),
            tag,
            payload: other.kind(),
        }),
    }
}

/// Wraps a transport failure with the identifier and source kind.
pub(crate) fn source_error(
    lane: &dyn AcquisitionLane,
    locator: &Locator,
) -> impl FnOnce(SourceIoError) -> PipelineError {
    let identifier = locator.to_string();
    let kind = lane.source_kind();
    move |error| PipelineError::SourceIo {
        identifier,
        kind,
        error,
    }
}
