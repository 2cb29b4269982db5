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

//! Derives the next representation tag from a content hint.
//!
//! Acquisition and unwrapping stages know little about the bytes they hand on:
//! a declared MIME type, a file or entry name, or both. [`ContentHint::classify`]
//! turns that into a tagged [`Artifact`] without decoding anything.

use crate::artifact::{ArchiveBytes, Artifact, Codec, CompressedBytes, Payload, Tag};
use crate::error::PipelineError;
use std::path::Path;

const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff", "ico", "tga",
];

/// What is known about a blob of bytes before it is decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentHint {
    /// Declared MIME type, parameters stripped.
    pub mime: Option<String>,
    /// File or entry name, used for its extension.
    pub name: Option<String>,
}

/// The representation a hint resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Compressed with `codec`; the decompressed content is described by `inner`.
    Compressed {
        /// The codec.
        codec: Codec,
        /// Hint for the decompressed content.
        inner: ContentHint,
    },
    /// A pack archive.
    Archive,
    /// A structured text document.
    StructuredText,
    /// An encoded image.
    ImageEncoded,
    /// Opaque bytes that need no further decoding.
    Opaque,
}

impl ContentHint {
    /// A hint carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            mime: None,
            name: Some(name.into()),
        }
    }

    /// Adds a declared MIME type. Parameters such as `; charset=utf-8` are dropped.
    pub fn with_mime(mut self, mime: Option<&str>) -> Self {
        self.mime = mime
            .and_then(|m| m.split(';').next())
            .map(|m| m.trim().to_ascii_lowercase())
            .filter(|m| !m.is_empty());
        self
    }

    fn extension(&self) -> Option<String> {
        let name = self.name.as_deref()?;
        Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
    }

    fn stem_hint(&self) -> ContentHint {
        ContentHint {
            mime: None,
            name: self
                .name
                .as_deref()
                .and_then(|n| Path::new(n).file_stem())
                .and_then(|s| s.to_str())
                .map(str::to_string),
        }
    }

    fn inner_hint(&self) -> ContentHint {
        // A compression extension is stripped; a bare MIME declaration keeps the name.
        match self.extension().as_deref() {
            Some("gz" | "gzip" | "lz4") => self.stem_hint(),
            _ => ContentHint {
                mime: None,
                name: self.name.clone(),
            },
        }
    }

    fn resolve_mime(&self, mime: &str) -> Option<Resolution> {
        let resolution = match mime {
            "application/json" | "text/json" => Resolution::StructuredText,
            m if m.ends_with("+json") => Resolution::StructuredText,
            m if m.starts_with("image/") => Resolution::ImageEncoded,
            "application/gzip" | "application/x-gzip" => Resolution::Compressed {
                codec: Codec::Gzip,
                inner: self.inner_hint(),
            },
            "application/x-lz4" => Resolution::Compressed {
                codec: Codec::Lz4,
                inner: self.inner_hint(),
            },
            "application/vnd.conduit.pack" => Resolution::Archive,
            _ => return None,
        };
        Some(resolution)
    }

    fn resolve_extension(&self) -> Option<Resolution> {
        let ext = self.extension()?;
        let resolution = match ext.as_str() {
            "json" => Resolution::StructuredText,
            "gz" | "gzip" => Resolution::Compressed {
                codec: Codec::Gzip,
                inner: self.stem_hint(),
            },
            "lz4" => Resolution::Compressed {
                codec: Codec::Lz4,
                inner: self.stem_hint(),
            },
            "pack" => Resolution::Archive,
            "bin" => Resolution::Opaque,
            e if IMAGE_EXTENSIONS.contains(&e) => Resolution::ImageEncoded,
            _ => return None,
        };
        Some(resolution)
    }

    /// Resolves the hint. A specific MIME type wins over the name's extension;
    /// `application/octet-stream` defers to the extension and falls back to opaque.
    pub fn resolve(&self) -> Option<Resolution> {
        match self.mime.as_deref() {
            Some("application/octet-stream") => self.resolve_extension().or(Some(Resolution::Opaque)),
            Some(mime) => self.resolve_mime(mime).or_else(|| self.resolve_extension()),
            None => self.resolve_extension(),
        }
    }

    /// Wraps freshly acquired bytes in an artifact tagged for the next stage.
    ///
    /// `origin` is the tag of the stage producing the bytes; it is reported when
    /// the hint cannot be resolved. `entry` selects an archive entry when the bytes
    /// turn out to be a pack. Zero bytes yield an empty artifact.
    pub fn classify(
        &self,
        bytes: Vec<u8>,
        origin: Tag,
        entry: Option<String>,
    ) -> Result<Artifact, PipelineError> {
        if bytes.is_empty() {
            return Ok(Artifact::empty(origin));
        }

        let resolution = self
            .resolve()
            .ok_or(PipelineError::UnsupportedRepresentation(origin))?;

        let (payload, tag) = match resolution {
            Resolution::Compressed { codec, inner } => (
                Payload::Compressed(CompressedBytes {
                    codec,
                    bytes,
                    inner,
                    entry,
                }),
                Tag::Compressed,
            ),
            Resolution::Archive => (Payload::Archive(ArchiveBytes { bytes, entry }), Tag::BundleWrapped),
            Resolution::StructuredText => (Payload::Raw(bytes), Tag::StructuredText),
            Resolution::ImageEncoded => (Payload::Raw(bytes), Tag::ImageEncoded),
            Resolution::Opaque => (Payload::Raw(bytes), Tag::Decoded),
        };
        Artifact::new(payload, tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_resolution() {
        assert_eq!(
            ContentHint::named("sample.json").resolve(),
            Some(Resolution::StructuredText)
        );
        assert_eq!(
            ContentHint::named("ICON.PNG").resolve(),
            Some(Resolution::ImageEncoded)
        );
        assert_eq!(ContentHint::named("pack1.pack").resolve(), Some(Resolution::Archive));
        assert_eq!(ContentHint::named("notes.txt").resolve(), None);
    }

    #[test]
    fn test_compressed_name_strips_one_extension() {
        match ContentHint::named("icon.png.gz").resolve() {
            Some(Resolution::Compressed { codec, inner }) => {
                assert_eq!(codec, Codec::Gzip);
                assert_eq!(inner.name.as_deref(), Some("icon.png"));
                assert_eq!(inner.resolve(), Some(Resolution::ImageEncoded));
            }
            other => panic!("expected gzip resolution, got {other:?}"),
        }
    }

    #[test]
    fn test_mime_wins_over_extension() {
        let hint = ContentHint::named("download").with_mime(Some("application/json; charset=utf-8"));
        assert_eq!(hint.mime.as_deref(), Some("application/json"));
        assert_eq!(hint.resolve(), Some(Resolution::StructuredText));

        let hint = ContentHint::named("photo.json").with_mime(Some("image/png"));
        assert_eq!(hint.resolve(), Some(Resolution::ImageEncoded));
    }

    #[test]
    fn test_octet_stream_defers_to_extension() {
        let hint = ContentHint::named("data.json").with_mime(Some("application/octet-stream"));
        assert_eq!(hint.resolve(), Some(Resolution::StructuredText));

        let hint = ContentHint::named("blob").with_mime(Some("application/octet-stream"));
        assert_eq!(hint.resolve(), Some(Resolution::Opaque));
    }

    #[test]
    fn test_classify_builds_tagged_artifacts() {
        let artifact = ContentHint::named("a.json")
            .classify(b"{}".to_vec(), Tag::File, None)
            .unwrap();
        assert_eq!(artifact.tag(), Tag::StructuredText);

        let artifact = ContentHint::named("pack1.pack")
            .classify(b"CPAK".to_vec(), Tag::File, Some("a.json".into()))
            .unwrap();
        assert_eq!(artifact.tag(), Tag::BundleWrapped);
        match artifact.payload() {
            Some(Payload::Archive(archive)) => assert_eq!(archive.entry.as_deref(), Some("a.json")),
            other => panic!("expected archive payload, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_empty_bytes_is_empty_artifact() {
        let artifact = ContentHint::named("a.json")
            .classify(Vec::new(), Tag::Https, None)
            .unwrap();
        assert!(artifact.is_empty());
        assert_eq!(artifact.tag(), Tag::Https);
    }

    #[test]
    fn test_classify_unknown_hint_reports_origin() {
        let result = ContentHint::named("notes.txt").classify(vec![1], Tag::Bundle, None);
        assert!(matches!(
            result,
            Err(PipelineError::UnsupportedRepresentation(Tag::Bundle))
        ));
    }
}
