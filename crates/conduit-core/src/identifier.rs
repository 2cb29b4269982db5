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

//! Parsing of resource identifiers into [`Locator`]s.

use crate::artifact::Scheme;
use crate::error::PipelineError;
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// A parsed resource identifier.
///
/// Accepted forms:
/// - `file:///absolute/path[#entry]`
/// - `http(s)://host/path`
/// - `bundle://<bundle-ref>/<entry>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    raw: String,
    scheme: Scheme,
    url: Url,
}

impl Locator {
    /// Parses an identifier. Unknown schemes yield [`PipelineError::UnsupportedScheme`].
    pub fn parse(identifier: &str) -> Result<Self, PipelineError> {
        let raw = identifier.trim();
        let url = Url::parse(raw).map_err(|e| invalid(raw, e.to_string()))?;
        let scheme: Scheme = url.scheme().parse()?;

        if scheme == Scheme::Bundle && url.host_str().map_or(true, str::is_empty) {
            return Err(invalid(raw, "bundle identifiers must name a bundle"));
        }

        Ok(Self {
            raw: raw.to_string(),
            scheme,
            url,
        })
    }

    /// Builds a `file://` locator from an absolute path.
    pub fn from_file_path(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let url = Url::from_file_path(path)
            .map_err(|_| invalid(&path.display().to_string(), "path must be absolute"))?;
        Ok(Self {
            raw: url.to_string(),
            scheme: Scheme::File,
            url,
        })
    }

    /// The identifier as given.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The identifier's scheme.
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// The parsed URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The local path of a `file://` locator.
    pub fn file_path(&self) -> Result<PathBuf, PipelineError> {
        self.url
            .to_file_path()
            .map_err(|_| invalid(&self.raw, "not a local file path"))
    }

    /// The bundle name of a `bundle://` locator.
    pub fn bundle_ref(&self) -> Option<&str> {
        match self.scheme {
            Scheme::Bundle => self.url.host_str(),
            _ => None,
        }
    }

    /// The entry path of a `bundle://` locator, without the leading slash.
    pub fn entry(&self) -> Option<&str> {
        match self.scheme {
            Scheme::Bundle => Some(self.url.path().trim_start_matches('/')).filter(|e| !e.is_empty()),
            _ => None,
        }
    }

    /// The URL fragment, used by `file://` and `http(s)://` locators to select an
    /// entry inside a pack archive.
    pub fn fragment(&self) -> Option<&str> {
        self.url.fragment().filter(|f| !f.is_empty())
    }

    /// The last non-empty path segment.
    pub fn file_name(&self) -> Option<&str> {
        self.url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
    }

    /// Returns `true` when the locator names no resource at all.
    pub fn is_empty(&self) -> bool {
        match self.scheme {
            Scheme::File => matches!(self.url.path(), "" | "/"),
            Scheme::Bundle => self.entry().is_none(),
            Scheme::Http | Scheme::Https => false,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn invalid(identifier: &str, reason: impl Into<String>) -> PipelineError {
    PipelineError::InvalidIdentifier {
        identifier: identifier.to_string(),
        reason: reason.into(),
    }
}
