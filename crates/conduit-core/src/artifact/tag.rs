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

//! The closed set of schemes and representation tags.

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The source-kind portion of an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// `file://`: the local filesystem.
    File,
    /// `http://`: plain HTTP.
    Http,
    /// `https://`: HTTP over TLS.
    Https,
    /// `bundle://`: an entry inside a pack archive.
    Bundle,
}

impl Scheme {
    /// All schemes, in declaration order.
    pub const ALL: [Scheme; 4] = [Scheme::File, Scheme::Http, Scheme::Https, Scheme::Bundle];

    /// The scheme as it appears in an identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::File => "file",
            Scheme::Http => "http",
            Scheme::Https => "https",
            Scheme::Bundle => "bundle",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(Scheme::File),
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            "bundle" => Ok(Scheme::Bundle),
            other => Err(PipelineError::UnsupportedScheme(other.to_string())),
        }
    }
}

/// Identifies the representation an [`Artifact`](super::Artifact) currently holds
/// and, transitively, which stage must process it next.
///
/// The progression is `scheme → container → encoding → media → Decoded`, although
/// any tag may move straight to [`Tag::Decoded`] when nothing else is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tag {
    /// Seed for a `file://` identifier.
    File,
    /// Seed for an `http://` identifier.
    Http,
    /// Seed for an `https://` identifier.
    Https,
    /// Seed for a `bundle://` identifier.
    Bundle,
    /// A whole pack archive with one entry selected.
    BundleWrapped,
    /// Compressed bytes.
    Compressed,
    /// Raw bytes of a structured text document (JSON).
    StructuredText,
    /// Raw bytes of an encoded image.
    ImageEncoded,
    /// Fully decoded. No transform is ever registered for this tag.
    Decoded,
}

impl Tag {
    /// Every tag, in pipeline order.
    pub const ALL: [Tag; 9] = [
        Tag::File,
        Tag::Http,
        Tag::Https,
        Tag::Bundle,
        Tag::BundleWrapped,
        Tag::Compressed,
        Tag::StructuredText,
        Tag::ImageEncoded,
        Tag::Decoded,
    ];

    /// The seed tag for a scheme.
    pub fn from_scheme(scheme: Scheme) -> Self {
        match scheme {
            Scheme::File => Tag::File,
            Scheme::Http => Tag::Http,
            Scheme::Https => Tag::Https,
            Scheme::Bundle => Tag::Bundle,
        }
    }

    /// The scheme this tag seeds, if it is a source-scheme tag.
    pub fn scheme(&self) -> Option<Scheme> {
        match self {
            Tag::File => Some(Scheme::File),
            Tag::Http => Some(Scheme::Http),
            Tag::Https => Some(Scheme::Https),
            Tag::Bundle => Some(Scheme::Bundle),
            Tag::BundleWrapped
            | Tag::Compressed
            | Tag::StructuredText
            | Tag::ImageEncoded
            | Tag::Decoded => None,
        }
    }

    /// Returns `true` when the chain is complete at this tag.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Tag::Decoded)
    }

    /// The tag as a short kebab-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::File => "file",
            Tag::Http => "http",
            Tag::Https => "https",
            Tag::Bundle => "bundle",
            Tag::BundleWrapped => "bundle-wrapped",
            Tag::Compressed => "compressed",
            Tag::StructuredText => "structured-text",
            Tag::ImageEncoded => "image-encoded",
            Tag::Decoded => "decoded",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_parsing_is_case_insensitive() {
        assert_eq!("HTTPS".parse::<Scheme>().unwrap(), Scheme::Https);
        assert_eq!("bundle".parse::<Scheme>().unwrap(), Scheme::Bundle);
    }

    #[test]
    fn test_unknown_scheme_is_rejected() {
        match "ftp".parse::<Scheme>() {
            Err(PipelineError::UnsupportedScheme(s)) => assert_eq!(s, "ftp"),
            other => panic!("expected UnsupportedScheme, got {other:?}"),
        }
    }

    #[test]
    fn test_scheme_tags_round_trip() {
        for scheme in Scheme::ALL {
            assert_eq!(Tag::from_scheme(scheme).scheme(), Some(scheme));
        }
        assert_eq!(Tag::Compressed.scheme(), None);
    }

    #[test]
    fn test_only_decoded_is_terminal() {
        assert!(Tag::Decoded.is_terminal());
        assert!(!Tag::ImageEncoded.is_terminal());
        assert!(!Tag::File.is_terminal());
    }
}
