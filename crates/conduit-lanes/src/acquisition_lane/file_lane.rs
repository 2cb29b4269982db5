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

//! Acquisition from the local filesystem.

use super::{open_seed, source_error, Seed};
use conduit_core::io::FileReader;
use conduit_core::{
    AcquireContext, AcquisitionLane, Artifact, ContentHint, Lane, LaneKind, PipelineError,
    Scheme, SourceKind, Tag,
};
use std::sync::Arc;

/// Reads `file://` identifiers through a [`FileReader`].
///
/// The file name supplies the content hint. A URL fragment selects the entry to
/// extract when the file is a pack archive (`file:///assets/ui.pack#close.png`).
pub struct FileAcquisitionLane {
    reader: Arc<dyn FileReader>,
}

impl FileAcquisitionLane {
    /// Creates a lane reading through `reader`.
    pub fn new(reader: Arc<dyn FileReader>) -> Self {
        Self { reader }
    }
}

impl Lane for FileAcquisitionLane {
    fn strategy_name(&self) -> &'static str {
        "FileAcquisition"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Acquisition
    }
}

impl AcquisitionLane for FileAcquisitionLane {
    fn schemes(&self) -> &'static [Scheme] {
        &[Scheme::File]
    }

    fn source_kind(&self) -> SourceKind {
        SourceKind::File
    }

    fn acquire(&self, seed: Artifact, _ctx: &AcquireContext) -> Result<Artifact, PipelineError> {
        let locator = match open_seed(self, seed)? {
            Seed::Empty(artifact) => return Ok(artifact),
            Seed::Locator(locator) => locator,
        };

        let path = locator.file_path()?;
        let bytes = self
            .reader
            .read(&path)
            .map_err(source_error(self, &locator))?;

        log::debug!("FileAcquisition: read {} bytes from '{}'", bytes.len(), path.display());

        let hint = ContentHint {
            mime: None,
            name: path
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string),
        };
        hint.classify(bytes, Tag::File, locator.fragment().map(str::to_string))
    }
}
