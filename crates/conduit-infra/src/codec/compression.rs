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

use conduit_core::codec::DecompressionCodec;
use conduit_core::{Codec, FormatError};
use flate2::read::GzDecoder;
use std::io::Read;

/// Largest decompressed output accepted unless configured otherwise (256 MiB).
pub const DEFAULT_MAX_DECOMPRESSED_BYTES: u64 = 256 * 1024 * 1024;

/// Magic number opening an LZ4 frame (`.lz4` files written by the `lz4` tool).
const LZ4_FRAME_MAGIC: [u8; 4] = [0x04, 0x22, 0x4D, 0x18];

/// Gzip (flate2) and LZ4 (lz4_flex) decompression with an output size limit.
///
/// LZ4 input is accepted either as a standard frame or as a raw block with its
/// decompressed size prepended, the layout `lz4_flex::compress_prepend_size` writes.
#[derive(Debug, Clone)]
pub struct CompressionCodec {
    max_output: u64,
}

impl Default for CompressionCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl CompressionCodec {
    /// Creates a codec with [`DEFAULT_MAX_DECOMPRESSED_BYTES`] as its limit.
    pub fn new() -> Self {
        Self {
            max_output: DEFAULT_MAX_DECOMPRESSED_BYTES,
        }
    }

    /// Refuses to produce more than `limit` bytes.
    pub fn with_max_output(mut self, limit: u64) -> Self {
        self.max_output = limit;
        self
    }

    fn too_large(&self) -> FormatError {
        FormatError::new(format!(
            "decompressed size exceeds limit of {} bytes",
            self.max_output
        ))
    }

    /// Drains `reader`, reading at most one byte past the limit.
    fn read_bounded(&self, reader: impl Read, codec: Codec) -> Result<Vec<u8>, FormatError> {
        let mut out = Vec::new();
        reader
            .take(self.max_output.saturating_add(1))
            .read_to_end(&mut out)
            .map_err(|e| FormatError::new(format!("{codec} stream: {e}")))?;
        if out.len() as u64 > self.max_output {
            return Err(self.too_large());
        }
        Ok(out)
    }

    fn lz4_block(&self, bytes: &[u8]) -> Result<Vec<u8>, FormatError> {
        let Some(prefix) = bytes.get(..4) else {
            return Err(FormatError::new("lz4 block shorter than its size prefix")
                .at_offset(bytes.len() as u64));
        };
        let declared = u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]);
        if declared as u64 > self.max_output {
            return Err(self.too_large());
        }
        lz4_flex::decompress_size_prepended(bytes)
            .map_err(|e| FormatError::new(format!("lz4 block: {e}")).at_offset(4))
    }
}

impl DecompressionCodec for CompressionCodec {
    fn decompress(&self, codec: Codec, bytes: &[u8]) -> Result<Vec<u8>, FormatError> {
        match codec {
            Codec::Gzip => self.read_bounded(GzDecoder::new(bytes), codec),
            Codec::Lz4 if bytes.starts_with(&LZ4_FRAME_MAGIC) => {
                self.read_bounded(lz4_flex::frame::FrameDecoder::new(bytes), codec)
            }
            Codec::Lz4 => self.lz4_block(bytes),
        }
    }
}
