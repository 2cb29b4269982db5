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

use super::{PackEntry, PackError, PACK_MAGIC, PACK_VERSION};
use std::fs;
use std::path::Path;

/// Builds a pack archive in memory.
///
/// ```no_run
/// # use conduit_infra::PackWriter;
/// let mut writer = PackWriter::new().with_lz4(true);
/// writer.add("config.json", br#"{"a":1}"#)?;
/// writer.write_to_file("assets/pack1.pack")?;
/// # Ok::<(), conduit_infra::PackError>(())
/// ```
#[derive(Debug, Default)]
pub struct PackWriter {
    entries: Vec<PackEntry>,
    data: Vec<u8>,
    lz4: bool,
}

impl PackWriter {
    /// Creates an empty writer storing entries uncompressed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores entries LZ4-compressed whenever that makes them smaller.
    pub fn with_lz4(mut self, enabled: bool) -> Self {
        self.lz4 = enabled;
        self
    }

    /// Adds an entry, recording no MIME type.
    pub fn add(&mut self, name: impl Into<String>, bytes: &[u8]) -> Result<&mut Self, PackError> {
        self.add_with_mime(name, None, bytes)
    }

    /// Adds an entry with an explicit MIME type.
    pub fn add_with_mime(
        &mut self,
        name: impl Into<String>,
        mime: Option<&str>,
        bytes: &[u8],
    ) -> Result<&mut Self, PackError> {
        let name = name.into();
        if self.entries.iter().any(|entry| entry.name == name) {
            return Err(PackError::DuplicateEntry(name));
        }

        let compressed = self
            .lz4
            .then(|| lz4_flex::compress_prepend_size(bytes))
            .filter(|packed| packed.len() < bytes.len());
        let lz4 = compressed.is_some();
        let stored = compressed.as_deref().unwrap_or(bytes);

        self.entries.push(PackEntry {
            name,
            offset: self.data.len() as u64,
            size: bytes.len() as u64,
            stored_size: stored.len() as u64,
            lz4,
            mime: mime.map(str::to_string),
            hash: *blake3::hash(bytes).as_bytes(),
        });
        self.data.extend_from_slice(stored);
        Ok(self)
    }

    /// The entries added so far.
    pub fn entries(&self) -> &[PackEntry] {
        &self.entries
    }

    /// Serializes the archive.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PackError> {
        let index = bincode::serde::encode_to_vec(&self.entries, bincode::config::standard())
            .map_err(|e| PackError::Encode(e.to_string()))?;
        let index_len = u32::try_from(index.len())
            .map_err(|_| PackError::Encode(format!("index of {} bytes is too large", index.len())))?;

        let mut out = Vec::with_capacity(10 + index.len() + self.data.len());
        out.extend_from_slice(PACK_MAGIC);
        out.extend_from_slice(&PACK_VERSION.to_le_bytes());
        out.extend_from_slice(&index_len.to_le_bytes());
        out.extend_from_slice(&index);
        out.extend_from_slice(&self.data);
        Ok(out)
    }

    /// Writes the archive to `path`, returning its size in bytes.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<u64, PackError> {
        let bytes = self.to_bytes()?;
        fs::write(path.as_ref(), &bytes)?;
        Ok(bytes.len() as u64)
    }
}
