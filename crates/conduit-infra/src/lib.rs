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

//! Concrete implementations of the collaborator contracts defined in `conduit-core`.
//!
//! The pipeline itself never names these types; `conduit-sdk` wires them in by
//! default and tests swap them for fakes.

#![warn(missing_docs)]

pub mod codec;
pub mod fs;
pub mod network;
pub mod pack;

pub use codec::{CompressionCodec, JsonParser, RgbaImageCodec, DEFAULT_MAX_DECOMPRESSED_BYTES};
pub use fs::StdFileReader;
pub use network::{HttpClient, HttpSettings, DEFAULT_MAX_BODY_BYTES, DEFAULT_USER_AGENT};
pub use pack::{PackArchiveReader, PackBundleReader, PackEntry, PackError, PackIndex, PackWriter};
