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

use crate::builder::PipelineBuilder;
use conduit_agents::{SourceRouter, TransformRouter};
use conduit_core::{AcquireContext, Artifact, Locator, PipelineError};

/// The single entry point of the pipeline.
///
/// Holds the two immutable dispatch tables; one controller can serve any number
/// of concurrent [`execute`](Self::execute) calls.
pub struct PipelineController {
    sources: SourceRouter,
    transforms: TransformRouter,
}

impl PipelineController {
    /// Assembles a controller from prebuilt routers.
    pub fn new(sources: SourceRouter, transforms: TransformRouter) -> Self {
        Self {
            sources,
            transforms,
        }
    }

    /// Starts building a controller wired with the default collaborators.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Resolves `identifier` into a decoded artifact.
    ///
    /// Uses a context without cancellation and the configured network timeout.
    pub fn execute(&self, identifier: &str) -> Result<Artifact, PipelineError> {
        self.execute_with(identifier, &AcquireContext::default())
    }

    /// Resolves `identifier` with a caller-supplied timeout and cancellation token.
    pub fn execute_with(
        &self,
        identifier: &str,
        ctx: &AcquireContext,
    ) -> Result<Artifact, PipelineError> {
        let result = self.run(identifier, ctx);
        match &result {
            Ok(artifact) => match artifact.payload() {
                Some(payload) => log::info!(
                    "Pipeline: '{}' resolved to {} ({} bytes)",
                    identifier,
                    payload.kind(),
                    payload.byte_len()
                ),
                None => log::info!("Pipeline: '{}' resolved to nothing", identifier),
            },
            Err(err) => log::error!(
                "Pipeline: '{}' failed during {}: {}",
                identifier,
                err.stage(),
                err
            ),
        }
        result
    }

    fn run(&self, identifier: &str, ctx: &AcquireContext) -> Result<Artifact, PipelineError> {
        let locator = Locator::parse(identifier)?;
        let seed = Artifact::seed(locator);
        let acquired = self.sources.route(seed, ctx)?;
        self.transforms.route(acquired)
    }

    /// The acquisition dispatch table.
    pub fn sources(&self) -> &SourceRouter {
        &self.sources
    }

    /// The transform dispatch table.
    pub fn transforms(&self) -> &TransformRouter {
        &self.transforms
    }
}
