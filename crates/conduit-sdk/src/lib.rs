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

//! The public-facing API of Conduit.
//!
//! A [`PipelineController`] turns an identifier such as
//! `file:///data/sample.json`, `https://example.com/logo.png` or
//! `bundle://pack1/icon.png.gz` into a fully decoded [`Artifact`](conduit_core::Artifact):
//!
//! ```no_run
//! use conduit_sdk::prelude::*;
//!
//! let pipeline = PipelineController::builder().build()?;
//! let artifact = pipeline.execute("file:///data/sample.json")?;
//! if let Some(value) = artifact.as_structured() {
//!     println!("{value}");
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

#![warn(missing_docs)]

mod builder;
mod config;
mod controller;

pub use builder::PipelineBuilder;
pub use config::{LimitsConfig, NetworkConfig, PipelineConfig};
pub use controller::PipelineController;

/// The types most callers need.
pub mod prelude {
    pub use crate::{PipelineBuilder, PipelineConfig, PipelineController};
    pub use conduit_core::{
        AcquireContext, Artifact, CancellationToken, DecodedImage, FormatError, Payload,
        PipelineError, Scheme, SourceIoError, SourceKind, Tag,
    };
}
