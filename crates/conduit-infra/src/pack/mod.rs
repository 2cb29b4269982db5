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

//! The `.pack` archive format.
//!
//! Layout:
//!
//! ```text
//! b"CPAK" | version: u16 LE | index_len: u32 LE | index (bincode) | data region
//! ```
//!
//! The index is a bincode-encoded (standard config) `Vec<PackEntry>`. Entry
//! offsets are relative to the start of the data region. An entry may be stored
//! LZ4-compressed; its hash always covers the logical (uncompressed) bytes.

mod reader;
mod writer;

pub use reader::*;
pub use writer::*;

use serde::{Deserialize, Serialize};
use std::io::Read;

/// Magic bytes opening every pack.
pub const PACK_MAGIC: &[u8; 4] = b"CPAK";

/// The format version this crate reads and writes.
pub const PACK_VERSION: u16 = 1;

const HEADER_LEN: u64 = 10;

/// Upper bound on the memory a decoded index may claim.
const INDEX_DECODE_LIMIT: usize = 256 * 1024 * 1024;

/// Errors raised while reading or writing a pack.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    /// The header, index, or an entry's stored bytes are malformed.
    #[error("corrupt pack: {0}")]
    Corrupt(String),
    /// The pack has no entry with this name.
    #[error("no entry named '{0}' in pack")]
    MissingEntry(String),
    /// An entry's bytes do not match its recorded hash.
    #[error("checksum mismatch for entry '{0}'")]
    Checksum(String),
    /// An entry with this name was already added.
    #[error("duplicate entry '{0}'")]
    DuplicateEntry(String),
    /// The index could not be encoded.
    #[error("failed to encode pack index: {0}")]
    Encode(String),
    /// An underlying I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One file stored in a pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackEntry {
    /// Forward-slash path of the entry, e.g. `icons/close.png`.
    pub name: String,
    /// Offset of the stored bytes from the start of the data region.
    pub offset: u64,
    /// Logical size of the entry.
    pub size: u64,
    /// Size of the stored bytes.
    pub stored_size: u64,
    /// Whether the stored bytes are LZ4 block-compressed (size prepended).
    pub lz4: bool,
    /// MIME type recorded when the pack was built.
    pub mime: Option<String>,
    /// BLAKE3 hash of the logical bytes.
    pub hash: [u8; 32],
}

/// The parsed header and index of a pack.
#[derive(Debug, Clone)]
pub struct PackIndex {
    entries: Vec<PackEntry>,
    data_start: u64,
}

impl PackIndex {
    /// Reads the header and index from the start of `reader`.
    ///
    /// On return the reader is positioned at the start of the data region.
    pub fn read_from(reader: &mut impl Read) -> Result<Self, PackError> {
        let mut header = [0u8; HEADER_LEN as usize];
        read_exact(reader, &mut header, "header")?;

        if &header[0..4] != PACK_MAGIC {
            return Err(PackError::Corrupt("bad magic".to_string()));
        }
        let version = u16::from_le_bytes([header[4], header[5]]);
        if version != PACK_VERSION {
            return Err(PackError::Corrupt(format!("unsupported version {version}")));
        }
        let index_len = u32::from_le_bytes([header[6], header[7], header[8], header[9]]);

        let mut index = Vec::new();
        let read = reader.take(index_len as u64).read_to_end(&mut index)?;
        if read != index_len as usize {
            return Err(PackError::Corrupt("truncated index".to_string()));
        }

        let (entries, _): (Vec<PackEntry>, usize) =
            bincode::serde::decode_from_slice(
                &index,
                bincode::config::standard().with_limit::<INDEX_DECODE_LIMIT>(),
            )
                .map_err(|e| PackError::Corrupt(format!("unreadable index: {e}")))?;

        Ok(Self {
            entries,
            data_start: HEADER_LEN + index_len as u64,
        })
    }

    /// Every entry, in the order they were written.
    pub fn entries(&self) -> &[PackEntry] {
        &self.entries
    }

    /// Looks up an entry by name.
    pub fn find(&self, name: &str) -> Result<&PackEntry, PackError> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| PackError::MissingEntry(name.to_string()))
    }

    /// Absolute position of `entry`'s stored bytes within the pack.
    pub fn position_of(&self, entry: &PackEntry) -> u64 {
        self.data_start + entry.offset
    }
}

fn read_exact(reader: &mut impl Read, buf: &mut [u8], what: &str) -> Result<(), PackError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        std::io::ErrorKind::UnexpectedEof => PackError::Corrupt(format!("truncated {what}")),
        _ => PackError::Io(e),
    })
}

/// Turns an entry's stored bytes back into its logical bytes, verifying size and hash.
///
/// Entries whose declared size exceeds `max_size` are refused before any
/// decompression takes place.
/// Rejects an entry whose declared sizes are over `max_size` or inconsistent,
/// before anything is allocated for it.
pub(crate) fn check_entry_bounds(entry: &PackEntry, max_size: u64) -> Result<(), PackError> {
    if entry.size > max_size {
        return Err(PackError::Corrupt(format!(
            "entry '{}' declares {} bytes, limit is {max_size}",
            entry.name, entry.size
        )));
    }
    // Worst-case LZ4 block expansion plus the size prefix.
    let max_stored = if entry.lz4 {
        entry
            .size
            .saturating_add(entry.size / 255)
            .saturating_add(16 + 4)
    } else {
        entry.size
    };
    if entry.stored_size > max_stored {
        return Err(PackError::Corrupt(format!(
            "entry '{}' stores {} bytes for {} logical bytes",
            entry.name, entry.stored_size, entry.size
        )));
    }
    Ok(())
}

pub(crate) fn unpack_entry(
    entry: &PackEntry,
    stored: Vec<u8>,
    max_size: u64,
) -> Result<Vec<u8>, PackError> {
    check_entry_bounds(entry, max_size)?;

    let bytes = if entry.lz4 {
        let declared = stored
            .get(..4)
            .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]) as u64);
        if declared != Some(entry.size) {
            return Err(PackError::Corrupt(format!(
                "entry '{}' has an inconsistent compressed size",
                entry.name
            )));
        }
        lz4_flex::decompress_size_prepended(&stored)
            .map_err(|e| PackError::Corrupt(format!("entry '{}': {e}", entry.name)))?
    } else {
        stored
    };

    if bytes.len() as u64 != entry.size {
        return Err(PackError::Corrupt(format!(
            "entry '{}' is {} bytes, index says {}",
            entry.name,
            bytes.len(),
            entry.size
        )));
    }
    if blake3::hash(&bytes).as_bytes() != &entry.hash {
        return Err(PackError::Checksum(entry.name.clone()));
    }
    Ok(bytes)
}
