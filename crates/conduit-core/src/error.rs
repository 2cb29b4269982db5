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

//! Defines the error taxonomy of the pipeline.
//!
//! Expected conditions (unknown routing key, missing source, malformed input)
//! are values of [`PipelineError`], never panics. An empty payload is not an
//! error at all: stages hand it back unchanged.

use crate::artifact::{PayloadKind, Tag};
use std::fmt;
use std::time::Duration;

/// Upper bound on the length of a collaborator diagnostic.
pub const MAX_DIAGNOSTIC_LEN: usize = 256;

/// The kind of source an acquisition stage reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// The local filesystem.
    File,
    /// An HTTP(S) endpoint.
    Network,
    /// An entry in a pack archive.
    Bundle,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::File => f.write_str("file"),
            SourceKind::Network => f.write_str("network"),
            SourceKind::Bundle => f.write_str("bundle"),
        }
    }
}

/// Why an acquisition failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceIoError {
    /// The source does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// The source did not answer within the allotted time.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    /// The caller cancelled the acquisition.
    #[error("cancelled")]
    Cancelled,
    /// Any other transport failure.
    #[error("transport error: {0}")]
    Transport(String),
}

impl SourceIoError {
    /// Maps an I/O error, keeping the not-found case distinct.
    pub fn from_io(err: &std::io::Error, what: &str) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => SourceIoError::NotFound(what.to_string()),
            _ => SourceIoError::Transport(format!("{what}: {err}")),
        }
    }
}

/// Where in its input a collaborator gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Byte offset into the input.
    ByteOffset(u64),
    /// One-based line and column in a text input.
    LineColumn {
        /// Line number.
        line: usize,
        /// Column number.
        column: usize,
    },
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::ByteOffset(offset) => write!(f, "byte {offset}"),
            Position::LineColumn { line, column } => write!(f, "line {line}, column {column}"),
        }
    }
}

/// A codec rejected its input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}{}", describe_position(.position))]
pub struct FormatError {
    message: String,
    position: Option<Position>,
}

impl FormatError {
    /// Creates a new error. Messages longer than [`MAX_DIAGNOSTIC_LEN`] are cut.
    pub fn new(message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.len() > MAX_DIAGNOSTIC_LEN {
            let mut cut = MAX_DIAGNOSTIC_LEN;
            while !message.is_char_boundary(cut) {
                cut -= 1;
            }
            message.truncate(cut);
            message.push('…');
        }
        Self {
            message,
            position: None,
        }
    }

    /// Attaches a byte offset.
    pub fn at_offset(mut self, offset: u64) -> Self {
        self.position = Some(Position::ByteOffset(offset));
        self
    }

    /// Attaches a line and column.
    pub fn at_line_column(mut self, line: usize, column: usize) -> Self {
        self.position = Some(Position::LineColumn { line, column });
        self
    }

    /// The diagnostic message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The position, if the collaborator supplied one.
    pub fn position(&self) -> Option<Position> {
        self.position
    }
}

fn describe_position(position: &Option<Position>) -> String {
    position
        .map(|position| format!(" (at {position})"))
        .unwrap_or_default()
}

/// The error returned by every stage and by the pipeline entry point.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The identifier's scheme has no acquisition lane.
    #[error("unsupported scheme '{0}'")]
    UnsupportedScheme(String),

    /// No stage handles this representation.
    #[error("unsupported representation '{0}'")]
    UnsupportedRepresentation(Tag),

    /// The identifier could not be parsed.
    #[error("invalid identifier '{identifier}': {reason}")]
    InvalidIdentifier {
        /// The identifier as given.
        identifier: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Acquisition failed.
    #[error("{kind} source '{identifier}' failed: {error}")]
    SourceIo {
        /// The identifier being acquired.
        identifier: String,
        /// The kind of source.
        kind: SourceKind,
        /// The underlying failure.
        #[source]
        error: SourceIoError,
    },

    /// A collaborator codec rejected its input.
    #[error("{stage} rejected its input: {error}")]
    Format {
        /// The stage that invoked the codec.
        stage: &'static str,
        /// The codec diagnostic.
        #[source]
        error: FormatError,
    },

    /// A transform re-emitted a tag that was already visited during this call.
    #[error("cyclic transform: '{tag}' was already visited ({})", format_path(.visited))]
    CyclicTransform {
        /// The re-emitted tag.
        tag: Tag,
        /// Tags visited so far, in order.
        visited: Vec<Tag>,
    },

    /// A tag was paired with a payload it does not describe.
    #[error("{stage}: tag '{tag}' cannot describe a {payload} payload")]
    RepresentationMismatch {
        /// Where the mismatch was detected.
        stage: &'static str,
        /// The offending tag.
        tag: Tag,
        /// The payload it was paired with.
        payload: PayloadKind,
    },

    /// A stage received an artifact it does not accept.
    #[error("{stage} expected a '{expected}' artifact but received '{found}'")]
    UnexpectedTag {
        /// The stage.
        stage: &'static str,
        /// The tag the stage accepts.
        expected: Tag,
        /// The tag it was given.
        found: Tag,
    },
}

fn format_path(visited: &[Tag]) -> String {
    visited
        .iter()
        .map(Tag::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl PipelineError {
    /// Names the stage at which the failure occurred.
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::InvalidIdentifier { .. } => "identifier parsing",
            PipelineError::UnsupportedScheme(_) => "source routing",
            PipelineError::SourceIo { kind, .. } => match kind {
                SourceKind::File => "file acquisition",
                SourceKind::Network => "network acquisition",
                SourceKind::Bundle => "bundle acquisition",
            },
            PipelineError::UnsupportedRepresentation(_) | PipelineError::CyclicTransform { .. } => {
                "transform routing"
            }
            PipelineError::Format { stage, .. }
            | PipelineError::RepresentationMismatch { stage, .. }
            | PipelineError::UnexpectedTag { stage, .. } => *stage,
        }
    }

    /// Returns `true` for transient failures a caller may retry.
    ///
    /// Only acquisition failures qualify, and a cancellation is never retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PipelineError::SourceIo { error, .. } if !matches!(error, SourceIoError::Cancelled)
        )
    }

    /// The source I/O failure, if this is one.
    pub fn source_io(&self) -> Option<&SourceIoError> {
        match self {
            PipelineError::SourceIo { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_message_is_bounded() {
        let err = FormatError::new("x".repeat(10_000));
        assert!(err.message().len() <= MAX_DIAGNOSTIC_LEN + '…'.len_utf8());
    }

    #[test]
    fn test_format_error_display_includes_position() {
        let err = FormatError::new("unexpected token").at_line_column(3, 7);
        assert_eq!(err.to_string(), "unexpected token (at line 3, column 7)");
        let err = FormatError::new("bad header").at_offset(12);
        assert_eq!(err.to_string(), "bad header (at byte 12)");
    }

    #[test]
    fn test_only_source_io_is_retryable() {
        let io = PipelineError::SourceIo {
            identifier: "https://example.com".into(),
            kind: SourceKind::Network,
            error: SourceIoError::Timeout(Duration::from_secs(1)),
        };
        assert!(io.is_retryable());

        let cancelled = PipelineError::SourceIo {
            identifier: "https://example.com".into(),
            kind: SourceKind::Network,
            error: SourceIoError::Cancelled,
        };
        assert!(!cancelled.is_retryable());

        let format = PipelineError::Format {
            stage: "json",
            error: FormatError::new("eof"),
        };
        assert!(!format.is_retryable());
        assert!(!PipelineError::UnsupportedRepresentation(Tag::Compressed).is_retryable());
    }

    #[test]
    fn test_cyclic_transform_display_lists_path() {
        let err = PipelineError::CyclicTransform {
            tag: Tag::Compressed,
            visited: vec![Tag::File, Tag::Compressed],
        };
        assert_eq!(
            err.to_string(),
            "cyclic transform: 'compressed' was already visited (file -> compressed)"
        );
    }

    #[test]
    fn test_io_not_found_maps_to_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(
            SourceIoError::from_io(&io, "/data/missing.json"),
            SourceIoError::NotFound("/data/missing.json".into())
        );
    }
}
