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

//! Contracts for the codecs the transform lanes call into.

use crate::artifact::{Codec, DecodedImage};
use crate::error::FormatError;
use crate::io::BundleEntryBytes;

/// Decompresses bytes produced by one of the supported [`Codec`]s.
pub trait DecompressionCodec: Send + Sync {
    /// Decompresses `bytes` that were compressed with `codec`.
    fn decompress(&self, codec: Codec, bytes: &[u8]) -> Result<Vec<u8>, FormatError>;
}

/// Parses structured text into a value.
pub trait StructuredParser: Send + Sync {
    /// Parses `bytes`.
    fn parse(&self, bytes: &[u8]) -> Result<serde_json::Value, FormatError>;
}

/// Decodes an encoded image into RGBA8 pixels.
pub trait ImageCodec: Send + Sync {
    /// Decodes `bytes`.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, FormatError>;
}

/// Extracts one entry from an in-memory pack archive.
pub trait ArchiveReader: Send + Sync {
    /// Extracts `entry` from `archive`.
    fn extract(&self, archive: &[u8], entry: &str) -> Result<BundleEntryBytes, FormatError>;
}
