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

//! The envelope passed between every pipeline stage.
//!
//! An [`Artifact`] pairs a [`Payload`] with the [`Tag`] describing it. The pair
//! is validated on construction, so a stage that holds an `Artifact` can rely on
//! the tag telling the truth about the payload.

mod payload;
mod tag;

pub use payload::*;
pub use tag::*;

use crate::error::PipelineError;
use crate::identifier::Locator;

/// Payload plus representation tag.
///
/// Artifacts are consumed by value: each stage takes ownership of its input and
/// returns a new artifact. An artifact without a payload is a valid terminal
/// state meaning "nothing was produced".
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    payload: Option<Payload>,
    tag: Tag,
}

impl Artifact {
    /// Creates an artifact, rejecting a tag that does not describe the payload.
    pub fn new(payload: Payload, tag: Tag) -> Result<Self, PipelineError> {
        if !Self::is_consistent(&payload, tag) {
            return Err(PipelineError::RepresentationMismatch {
                stage: "artifact",
                tag,
                payload: payload.kind(),
            });
        }
        Ok(Self {
            payload: Some(payload),
            tag,
        })
    }

    /// Creates an artifact that carries nothing.
    pub fn empty(tag: Tag) -> Self {
        Self { payload: None, tag }
    }

    /// Builds the seed artifact for a locator, tagged with its real scheme.
    ///
    /// A locator that names no resource (`file://`, `bundle://pack1/`) yields an
    /// empty seed.
    pub fn seed(locator: Locator) -> Self {
        let tag = Tag::from_scheme(locator.scheme());
        if locator.is_empty() {
            return Self::empty(tag);
        }
        Self {
            payload: Some(Payload::Locator(locator)),
            tag,
        }
    }

    /// Convenience for a fully decoded structured value.
    pub fn structured(value: serde_json::Value) -> Self {
        Self {
            payload: Some(Payload::Structured(value)),
            tag: Tag::Decoded,
        }
    }

    /// Convenience for a fully decoded image.
    pub fn image(image: DecodedImage) -> Self {
        Self {
            payload: Some(Payload::Image(image)),
            tag: Tag::Decoded,
        }
    }

    /// The representation tag.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The payload, if any.
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Returns `true` when the artifact carries no payload.
    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }

    /// Returns `true` when the artifact is empty or its tag is terminal.
    pub fn is_final(&self) -> bool {
        self.is_empty() || self.tag.is_terminal()
    }

    /// Consumes the artifact and returns its parts.
    pub fn into_parts(self) -> (Option<Payload>, Tag) {
        (self.payload, self.tag)
    }

    /// Consumes the artifact and returns the payload.
    pub fn into_payload(self) -> Option<Payload> {
        self.payload
    }

    /// The structured value, when the artifact is a decoded document.
    pub fn as_structured(&self) -> Option<&serde_json::Value> {
        match &self.payload {
            Some(Payload::Structured(value)) => Some(value),
            _ => None,
        }
    }

    /// The image, when the artifact is a decoded image.
    pub fn as_image(&self) -> Option<&DecodedImage> {
        match &self.payload {
            Some(Payload::Image(image)) => Some(image),
            _ => None,
        }
    }

    fn is_consistent(payload: &Payload, tag: Tag) -> bool {
        match tag {
            Tag::File | Tag::Http | Tag::Https | Tag::Bundle => match payload {
                Payload::Locator(locator) => Tag::from_scheme(locator.scheme()) == tag,
                _ => false,
            },
            Tag::BundleWrapped => matches!(payload, Payload::Archive(_)),
            Tag::Compressed => matches!(payload, Payload::Compressed(_)),
            Tag::StructuredText | Tag::ImageEncoded => matches!(payload, Payload::Raw(_)),
            Tag::Decoded => matches!(
                payload,
                Payload::Structured(_) | Payload::Image(_) | Payload::Raw(_)
            ),
        }
    }
}
