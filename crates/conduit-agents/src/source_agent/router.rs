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
use conduit_core::{AcquireContext, AcquisitionLane, Artifact, PipelineError, Scheme};
use std::sync::Arc;

/// The fixed mapping from scheme to acquisition lane.
///
/// A lane serving several schemes (the network lane serves `http` and `https`)
/// is registered once and shared between its entries.
pub struct SourceRouter {
    lanes: AHashMap<Scheme, Arc<dyn AcquisitionLane>>,
}

impl SourceRouter {
    /// Starts building a router.
    pub fn builder() -> SourceRouterBuilder {
        SourceRouterBuilder::default()
    }

    /// The lane registered for `scheme`, if any.
    pub fn lane_for(&self, scheme: Scheme) -> Option<&Arc<dyn AcquisitionLane>> {
        self.lanes.get(&scheme)
    }

    /// Every scheme with a registered lane.
    pub fn schemes(&self) -> impl Iterator<Item = Scheme> + '_ {
        self.lanes.keys().copied()
    }

    /// Hands `seed` to the lane serving its scheme and returns that lane's result.
    ///
    /// A seed without payload is returned unchanged. A tag that is not a scheme,
    /// or a scheme with no lane, fails with [`PipelineError::UnsupportedScheme`]
    /// before any lane runs.
    pub fn route(&self, seed: Artifact, ctx: &AcquireContext) -> Result<Artifact, PipelineError> {
        if seed.is_empty() {
            log::debug!("SourceRouter: empty '{}' seed, nothing to acquire", seed.tag());
            return Ok(seed);
        }

        let tag = seed.tag();
        let lane = tag
            .scheme()
            .and_then(|scheme| self.lanes.get(&scheme))
            .ok_or_else(|| PipelineError::UnsupportedScheme(tag.to_string()))?;

        log::debug!("SourceRouter: '{}' -> {}", tag, lane.strategy_name());
        lane.acquire(seed, ctx)
    }
}

/// Collects acquisition lanes for a [`SourceRouter`].
#[derive(Default)]
pub struct SourceRouterBuilder {
    lanes: AHashMap<Scheme, Arc<dyn AcquisitionLane>>,
}

impl SourceRouterBuilder {
    /// Registers `lane` under every scheme it serves.
    ///
    /// A later registration for the same scheme replaces the earlier one.
    pub fn register(mut self, lane: Arc<dyn AcquisitionLane>) -> Self {
        for &scheme in lane.schemes() {
            if let Some(previous) = self.lanes.insert(scheme, Arc::clone(&lane)) {
                log::warn!(
                    "SourceRouter: '{}' was served by {}, now by {}",
                    scheme,
                    previous.strategy_name(),
                    lane.strategy_name()
                );
            }
        }
        self
    }

    /// Freezes the table.
    pub fn build(self) -> SourceRouter {
        SourceRouter { lanes: self.lanes }
    }
}
