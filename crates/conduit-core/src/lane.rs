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

//! # Lane Abstraction
//!
//! A **Lane** is one stage of the pipeline: a reusable processing strategy that
//! the routers select by key. Lanes never reference each other; the routers own
//! the only mapping from keys to lanes.
//!
//! ## Architecture
//!
//! The Lane system follows a two-level trait hierarchy:
//!
//! 1. **`Lane`** (this trait): identity and classification, shared by all lanes.
//! 2. **Domain-specific traits**: extend `Lane` with the stage operation:
//!    - `AcquisitionLane: Lane`: fetches raw bytes for one or more schemes
//!    - `TransformLane: Lane`: converts one representation into the next
//!
//! ## Usage
//!
//! ```rust,ignore
//! use conduit_core::lane::{Lane, LaneKind, TransformLane};
//!
//! struct Passthrough;
//!
//! impl Lane for Passthrough {
//!     fn strategy_name(&self) -> &'static str { "Passthrough" }
//!     fn lane_kind(&self) -> LaneKind { LaneKind::Transform }
//! }
//!
//! impl TransformLane for Passthrough {
//!     fn accepts(&self) -> Tag { Tag::StructuredText }
//!     fn produces(&self) -> &'static [Tag] { &[Tag::Decoded] }
//!     fn transform(&self, artifact: Artifact) -> Result<Artifact, PipelineError> {
//!         /* ... */
//!     }
//! }
//! ```

use crate::artifact::{Artifact, Scheme, Tag};
use crate::cancel::CancellationToken;
use crate::error::{PipelineError, SourceKind};
use std::fmt;
use std::time::Duration;

/// Classification of lane types, used for routing and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneKind {
    /// Fetches raw bytes from a source.
    Acquisition,
    /// Converts one representation into another.
    Transform,
}

impl fmt::Display for LaneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneKind::Acquisition => write!(f, "Acquisition"),
            LaneKind::Transform => write!(f, "Transform"),
        }
    }
}

/// Base trait for all lane types.
///
/// Lanes are stored in shared, read-only dispatch tables, so they must be
/// `Send + Sync` and keep no per-call mutable state.
pub trait Lane: Send + Sync {
    /// Human-readable name identifying this lane's strategy.
    ///
    /// Used for logging and as the stage name in errors.
    fn strategy_name(&self) -> &'static str;

    /// The kind of processing this lane performs.
    fn lane_kind(&self) -> LaneKind;
}

/// Per-call options for an acquisition.
#[derive(Debug, Clone, Default)]
pub struct AcquireContext {
    /// Cancels the acquisition when fired.
    pub cancel: CancellationToken,
    /// Overrides the lane's default timeout for this call.
    pub timeout: Option<Duration>,
}

impl AcquireContext {
    /// A context that can be cancelled through `cancel`.
    pub fn with_cancel(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            timeout: None,
        }
    }

    /// Sets the per-call timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A lane that reads raw bytes from one kind of source.
pub trait AcquisitionLane: Lane {
    /// The schemes this lane serves.
    fn schemes(&self) -> &'static [Scheme];

    /// The kind of source, reported in [`PipelineError::SourceIo`].
    fn source_kind(&self) -> SourceKind;

    /// Reads the resource named by `seed` and tags the bytes for the next stage.
    ///
    /// The result carries a `Raw`, `Compressed`, or `Archive` payload, or no
    /// payload at all when the source was empty. It never decodes.
    fn acquire(&self, seed: Artifact, ctx: &AcquireContext) -> Result<Artifact, PipelineError>;
}

/// A lane that converts artifacts of one tag into artifacts of another.
pub trait TransformLane: Lane {
    /// The only tag this lane accepts.
    fn accepts(&self) -> Tag;

    /// Every tag this lane may legally emit.
    fn produces(&self) -> &'static [Tag];

    /// Converts `artifact`. An empty artifact is returned unchanged.
    fn transform(&self, artifact: Artifact) -> Result<Artifact, PipelineError>;
}

/// Fails with [`PipelineError::UnexpectedTag`] unless `artifact` is tagged `expected`.
pub fn expect_tag(
    stage: &'static str,
    expected: Tag,
    artifact: &Artifact,
) -> Result<(), PipelineError> {
    if artifact.tag() == expected {
        Ok(())
    } else {
        Err(PipelineError::UnexpectedTag {
            stage,
            expected,
            found: artifact.tag(),
        })
    }
}
