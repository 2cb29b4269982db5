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

//! Foundational types for the Conduit resource pipeline.
//!
//! This crate owns the vocabulary every other crate speaks: the [`Artifact`]
//! envelope and its [`Tag`], the [`PipelineError`] taxonomy, the lane traits
//! that acquisition and transform stages implement, and the narrow contracts
//! through which stages reach external collaborators (filesystem, network,
//! codecs). It contains no concrete I/O and no codec implementations.

#![warn(missing_docs)]

pub mod artifact;
pub mod cancel;
pub mod codec;
pub mod error;
pub mod hint;
pub mod identifier;
pub mod io;
pub mod lane;

pub use artifact::{
    ArchiveBytes, Artifact, Codec, CompressedBytes, DecodedImage, Payload, PayloadKind, Scheme,
    Tag,
};
pub use cancel::CancellationToken;
pub use error::{FormatError, PipelineError, Position, SourceIoError, SourceKind};
pub use hint::ContentHint;
pub use identifier::Locator;
pub use lane::{AcquireContext, AcquisitionLane, Lane, LaneKind, TransformLane};
