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

//! Maps failures to process exit codes.

use conduit_sdk::prelude::PipelineError;

/// Setup failure: configuration, client construction, packing.
pub const SETUP: u8 = 1;
/// Unknown scheme or representation, or an unparsable identifier.
pub const UNSUPPORTED: u8 = 2;
/// The source could not be read.
pub const SOURCE_IO: u8 = 3;
/// A codec rejected its input.
pub const FORMAT: u8 = 4;
/// The transform chain looped.
pub const CYCLIC: u8 = 5;
/// A tag/payload invariant was broken (EX_SOFTWARE).
pub const INTERNAL: u8 = 70;

/// The exit code for `err`, looking through its context chain for a pipeline error.
pub fn code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<PipelineError>())
        .map_or(SETUP, pipeline_code)
}

fn pipeline_code(err: &PipelineError) -> u8 {
    match err {
        PipelineError::UnsupportedScheme(_)
        | PipelineError::UnsupportedRepresentation(_)
        | PipelineError::InvalidIdentifier { .. } => UNSUPPORTED,
        PipelineError::SourceIo { .. } => SOURCE_IO,
        PipelineError::Format { .. } => FORMAT,
        PipelineError::CyclicTransform { .. } => CYCLIC,
        PipelineError::RepresentationMismatch { .. } | PipelineError::UnexpectedTag { .. } => {
            INTERNAL
        }
    }
}
