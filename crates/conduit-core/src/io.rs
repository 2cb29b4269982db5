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

//! Contracts for the transports the acquisition lanes read through.
//!
//! Implementations live outside the core (see `conduit-infra`); tests usually
//! substitute in-memory fakes.

use crate::cancel::CancellationToken;
use crate::error::SourceIoError;
use std::path::Path;
use std::time::Duration;

/// Reads whole files from the local filesystem.
pub trait FileReader: Send + Sync {
    /// Reads the file at `path`.
    fn read(&self, path: &Path) -> Result<Vec<u8>, SourceIoError>;
}

/// The body and declared content type of a network response.
#[derive(Debug, Clone, Default)]
pub struct Fetched {
    /// The response body.
    pub bytes: Vec<u8>,
    /// The `Content-Type` header, if any.
    pub content_type: Option<String>,
}

/// Fetches resources over HTTP(S).
///
/// Implementations must give up with [`SourceIoError::Timeout`] once `timeout`
/// elapses and with [`SourceIoError::Cancelled`] once `cancel` fires, rather than
/// block indefinitely.
pub trait NetworkClient: Send + Sync {
    /// Fetches `url`.
    fn fetch(
        &self,
        url: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<Fetched, SourceIoError>;
}

/// The bytes of one bundle entry and its manifest MIME type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleEntryBytes {
    /// The entry's bytes.
    pub bytes: Vec<u8>,
    /// The MIME type recorded in the bundle manifest, if any.
    pub mime: Option<String>,
}

/// Reads entries from named bundles.
pub trait BundleReader: Send + Sync {
    /// Reads `entry` from the bundle called `bundle`.
    fn read_entry(&self, bundle: &str, entry: &str) -> Result<BundleEntryBytes, SourceIoError>;
}
