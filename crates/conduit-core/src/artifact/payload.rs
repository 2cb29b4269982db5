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

//! The closed set of payload representations.

use crate::hint::ContentHint;
use crate::identifier::Locator;
use std::fmt;

/// Compression codecs understood by the decompression stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    /// gzip (RFC 1952).
    Gzip,
    /// LZ4, either as a standard frame or as a block with a little-endian `u32` size prefix.
    Lz4,
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Codec::Gzip => f.write_str("gzip"),
            Codec::Lz4 => f.write_str("lz4"),
        }
    }
}

/// Compressed bytes plus the hint describing what they decompress into.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedBytes {
    /// The codec the bytes were compressed with.
    pub codec: Codec,
    /// The compressed bytes.
    pub bytes: Vec<u8>,
    /// Hint for the decompressed content (e.g. `icon.png` for `icon.png.gz`).
    pub inner: ContentHint,
    /// Archive entry to select if the decompressed content is a pack.
    pub entry: Option<String>,
}

/// A whole pack archive together with the entry the caller asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveBytes {
    /// The archive bytes, header included.
    pub bytes: Vec<u8>,
    /// The entry to extract. `None` when the identifier did not name one.
    pub entry: Option<String>,
}

/// A fully decoded image, always 8-bit RGBA.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8 pixels, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels", &format_args!("[{} bytes]", self.pixels.len()))
            .finish()
    }
}

/// The data carried by an [`Artifact`](super::Artifact).
///
/// Every stage declares which variant it accepts and which it produces; there is
/// no type-erased escape hatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The parsed source identifier. Only seed artifacts carry this.
    Locator(Locator),
    /// Undecoded bytes.
    Raw(Vec<u8>),
    /// Bytes that must be decompressed first.
    Compressed(CompressedBytes),
    /// A pack archive that must be unwrapped first.
    Archive(ArchiveBytes),
    /// A parsed structured document.
    Structured(serde_json::Value),
    /// A decoded image.
    Image(DecodedImage),
}

/// Discriminant of [`Payload`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    /// [`Payload::Locator`]
    Locator,
    /// [`Payload::Raw`]
    Raw,
    /// [`Payload::Compressed`]
    Compressed,
    /// [`Payload::Archive`]
    Archive,
    /// [`Payload::Structured`]
    Structured,
    /// [`Payload::Image`]
    Image,
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PayloadKind::Locator => "locator",
            PayloadKind::Raw => "raw bytes",
            PayloadKind::Compressed => "compressed bytes",
            PayloadKind::Archive => "archive",
            PayloadKind::Structured => "structured value",
            PayloadKind::Image => "decoded image",
        };
        f.write_str(name)
    }
}

impl Payload {
    /// Returns the variant discriminant.
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Locator(_) => PayloadKind::Locator,
            Payload::Raw(_) => PayloadKind::Raw,
            Payload::Compressed(_) => PayloadKind::Compressed,
            Payload::Archive(_) => PayloadKind::Archive,
            Payload::Structured(_) => PayloadKind::Structured,
            Payload::Image(_) => PayloadKind::Image,
        }
    }

    /// Approximate in-memory size of the carried data, for logging.
    pub fn byte_len(&self) -> usize {
        match self {
            Payload::Locator(locator) => locator.as_str().len(),
            Payload::Raw(bytes) => bytes.len(),
            Payload::Compressed(c) => c.bytes.len(),
            Payload::Archive(a) => a.bytes.len(),
            Payload::Structured(value) => value.to_string().len(),
            Payload::Image(image) => image.pixels.len(),
        }
    }
}
