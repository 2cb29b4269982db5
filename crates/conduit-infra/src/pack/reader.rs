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

use super::{check_entry_bounds, unpack_entry, PackError, PackIndex};
use conduit_core::codec::ArchiveReader;
use conduit_core::io::{BundleEntryBytes, BundleReader};
use conduit_core::{FormatError, SourceIoError};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Serves `bundle://<bundle>/<entry>` from `<root>/<bundle>.pack`.
///
/// Only the header, the index, and the requested entry are read; the rest of
/// the file is never touched.
#[derive(Debug, Clone)]
pub struct PackBundleReader {
    root: PathBuf,
    max_entry_bytes: u64,
}

impl PackBundleReader {
    /// Creates a reader resolving bundles under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_entry_bytes: u64::MAX,
        }
    }

    /// Refuses entries whose logical size exceeds `limit`.
    pub fn with_max_entry_bytes(mut self, limit: u64) -> Self {
        self.max_entry_bytes = limit;
        self
    }

    /// The directory bundles are resolved in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the pack file backing `bundle`.
    pub fn bundle_path(&self, bundle: &str) -> PathBuf {
        self.root.join(format!("{bundle}.pack"))
    }

    fn read_from_pack(&self, path: &Path, entry: &str) -> Result<BundleEntryBytes, PackError> {
        let mut file = File::open(path)?;
        let index = PackIndex::read_from(&mut file)?;
        let found = index.find(entry)?;
        check_entry_bounds(found, self.max_entry_bytes)?;

        let start = index.position_of(found);
        let file_len = file.metadata()?.len();
        if start.checked_add(found.stored_size).map_or(true, |end| end > file_len) {
            return Err(PackError::Corrupt(format!(
                "entry '{entry}' runs past the end of the pack"
            )));
        }

        let mut stored = Vec::new();
        file.seek(SeekFrom::Start(start))?;
        (&mut file).take(found.stored_size).read_to_end(&mut stored)?;
        if stored.len() as u64 != found.stored_size {
            return Err(PackError::Corrupt("truncated entry data".to_string()));
        }

        Ok(BundleEntryBytes {
            bytes: unpack_entry(found, stored, self.max_entry_bytes)?,
            mime: found.mime.clone(),
        })
    }
}

fn is_plain_name(bundle: &str) -> bool {
    !bundle.is_empty()
        && bundle != "."
        && bundle != ".."
        && !bundle.contains(['/', '\\'])
}

impl BundleReader for PackBundleReader {
    fn read_entry(&self, bundle: &str, entry: &str) -> Result<BundleEntryBytes, SourceIoError> {
        if !is_plain_name(bundle) {
            return Err(SourceIoError::NotFound(format!("bundle '{bundle}'")));
        }
        let path = self.bundle_path(bundle);

        self.read_from_pack(&path, entry).map_err(|e| match e {
            PackError::Io(io) => SourceIoError::from_io(&io, &path.display().to_string()),
            PackError::MissingEntry(name) => {
                SourceIoError::NotFound(format!("{bundle}/{name}"))
            }
            other => SourceIoError::Transport(format!("{}: {other}", path.display())),
        })
    }
}

/// Extracts entries from a pack that is already in memory.
#[derive(Debug, Clone)]
pub struct PackArchiveReader {
    max_entry_bytes: u64,
}

impl Default for PackArchiveReader {
    fn default() -> Self {
        Self::new()
    }
}

impl PackArchiveReader {
    /// Creates a reader with no entry size limit.
    pub fn new() -> Self {
        Self {
            max_entry_bytes: u64::MAX,
        }
    }

    /// Refuses entries whose logical size exceeds `limit`.
    pub fn with_max_entry_bytes(mut self, limit: u64) -> Self {
        self.max_entry_bytes = limit;
        self
    }
}

impl ArchiveReader for PackArchiveReader {
    fn extract(&self, archive: &[u8], entry: &str) -> Result<BundleEntryBytes, FormatError> {
        let mut cursor = archive;
        let index = PackIndex::read_from(&mut cursor).map_err(|e| FormatError::new(e.to_string()))?;
        let found = index.find(entry).map_err(|e| FormatError::new(e.to_string()))?;

        let start = index.position_of(found);
        let stored = start
            .checked_add(found.stored_size)
            .and_then(|end| archive.get(start as usize..end as usize))
            .ok_or_else(|| {
                FormatError::new(format!("entry '{entry}' runs past the end of the pack"))
                    .at_offset(start)
            })?;

        let bytes = unpack_entry(found, stored.to_vec(), self.max_entry_bytes)
            .map_err(|e| FormatError::new(e.to_string()).at_offset(start))?;

        Ok(BundleEntryBytes {
            bytes,
            mime: found.mime.clone(),
        })
    }
}
