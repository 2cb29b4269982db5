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

use ahash::AHashMap;
use conduit_core::{Artifact, PipelineError, Tag, TransformLane};
use std::sync::Arc;

/// The fixed mapping from representation tag to transform lane.
///
/// Routing always terminates. Every hop must land on a tag its lane declared in
/// [`TransformLane::produces`] and that has not been visited during the call, so
/// at most `Tag::ALL.len()` lanes run per call.
pub struct TransformRouter {
    lanes: AHashMap<Tag, Arc<dyn TransformLane>>,
}

impl TransformRouter {
    /// Starts building a router.
    pub fn builder() -> TransformRouterBuilder {
        TransformRouterBuilder::default()
    }

    /// The lane registered for `tag`, if any.
    pub fn lane_for(&self, tag: Tag) -> Option<&Arc<dyn TransformLane>> {
        self.lanes.get(&tag)
    }

    /// Transforms `artifact` until it is empty or carries a terminal tag.
    ///
    /// A lane that yields an empty artifact ends the walk without error, whatever
    /// tag the empty artifact carries.
    pub fn route(&self, artifact: Artifact) -> Result<Artifact, PipelineError> {
        self.route_traced(artifact).map(|(artifact, _)| artifact)
    }

    /// Like [`route`](Self::route), also returning the tags visited in order.
    pub fn route_traced(&self, artifact: Artifact) -> Result<(Artifact, Vec<Tag>), PipelineError> {
        let mut visited = vec![artifact.tag()];
        let mut current = artifact;

        loop {
            if current.is_empty() {
                log::debug!("TransformRouter: empty '{}' artifact, stopping", current.tag());
                return Ok((current, visited));
            }

            let tag = current.tag();
            if tag.is_terminal() {
                return Ok((current, visited));
            }

            let lane = self
                .lanes
                .get(&tag)
                .ok_or(PipelineError::UnsupportedRepresentation(tag))?;

            let next = lane.transform(current)?;
            if next.is_empty() {
                log::debug!("TransformRouter: {} produced nothing, stopping", lane.strategy_name());
                return Ok((next, visited));
            }
            let produced = next.tag();

            if !lane.produces().contains(&produced) {
                log::warn!(
                    "TransformRouter: {} emitted undeclared tag '{}'",
                    lane.strategy_name(),
                    produced
                );
                return Err(PipelineError::UnsupportedRepresentation(produced));
            }
            if visited.contains(&produced) {
                return Err(PipelineError::CyclicTransform {
                    tag: produced,
                    visited,
                });
            }

            log::debug!(
                "TransformRouter: '{}' -> {} -> '{}'",
                tag,
                lane.strategy_name(),
                produced
            );
            visited.push(produced);
            current = next;
        }
    }
}

/// Collects transform lanes for a [`TransformRouter`].
#[derive(Default)]
pub struct TransformRouterBuilder {
    lanes: AHashMap<Tag, Arc<dyn TransformLane>>,
}

impl TransformRouterBuilder {
    /// Registers `lane` under the tag it accepts.
    ///
    /// Lanes accepting a terminal tag are ignored, since routing stops there.
    pub fn register(mut self, lane: Arc<dyn TransformLane>) -> Self {
        let tag = lane.accepts();
        if tag.is_terminal() {
            log::warn!(
                "TransformRouter: ignoring {}, '{}' is terminal",
                lane.strategy_name(),
                tag
            );
            return self;
        }
        if let Some(previous) = self.lanes.insert(tag, Arc::clone(&lane)) {
            log::warn!(
                "TransformRouter: '{}' was handled by {}, now by {}",
                tag,
                previous.strategy_name(),
                lane.strategy_name()
            );
        }
        self
    }

    /// Freezes the table.
    pub fn build(self) -> TransformRouter {
        TransformRouter { lanes: self.lanes }
    }
}
