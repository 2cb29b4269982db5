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

//! Acquisition over HTTP(S).

use super::{open_seed, source_error, Seed};
use conduit_core::io::NetworkClient;
use conduit_core::{
    AcquireContext, AcquisitionLane, Artifact, ContentHint, Lane, LaneKind, PipelineError,
    Scheme, SourceIoError, SourceKind, Tag,
};
use std::sync::Arc;
use std::time::Duration;

/// The timeout used when neither the caller nor the configuration sets one.
pub const DEFAULT_NETWORK_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches `http://` and `https://` identifiers through a [`NetworkClient`].
///
/// The response `Content-Type` and the last path segment supply the content hint.
pub struct NetworkAcquisitionLane {
    client: Arc<dyn NetworkClient>,
    default_timeout: Duration,
}

impl NetworkAcquisitionLane {
    /// Creates a lane using [`DEFAULT_NETWORK_TIMEOUT`].
    pub fn new(client: Arc<dyn NetworkClient>) -> Self {
        Self {
            client,
            default_timeout: DEFAULT_NETWORK_TIMEOUT,
        }
    }

    /// Sets the timeout applied when the call does not supply one.
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }
}

impl Lane for NetworkAcquisitionLane {
    fn strategy_name(&self) -> &'static str {
        "NetworkAcquisition"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Acquisition
    }
}

impl AcquisitionLane for NetworkAcquisitionLane {
    fn schemes(&self) -> &'static [Scheme] {
        &[Scheme::Http, Scheme::Https]
    }

    fn source_kind(&self) -> SourceKind {
        SourceKind::Network
    }

    fn acquire(&self, seed: Artifact, ctx: &AcquireContext) -> Result<Artifact, PipelineError> {
        let locator = match open_seed(self, seed)? {
            Seed::Empty(artifact) => return Ok(artifact),
            Seed::Locator(locator) => locator,
        };
        let on_error = source_error(self, &locator);

        if ctx.cancel.is_cancelled() {
            return Err(on_error(SourceIoError::Cancelled));
        }

        let timeout = ctx.timeout.unwrap_or(self.default_timeout);
        let fetched = self
            .client
            .fetch(locator.url().as_str(), timeout, &ctx.cancel)
            .map_err(on_error)?;

        log::debug!(
            "NetworkAcquisition: fetched {} bytes from '{}' (content-type: {:?})",
            fetched.bytes.len(),
            locator,
            fetched.content_type
        );

        let hint = ContentHint {
            mime: None,
            name: locator.file_name().map(str::to_string),
        }
        .with_mime(fetched.content_type.as_deref());

        hint.classify(
            fetched.bytes,
            Tag::from_scheme(locator.scheme()),
            locator.fragment().map(str::to_string),
        )
    }
}
