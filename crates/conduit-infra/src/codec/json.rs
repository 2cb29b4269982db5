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

use conduit_core::codec::StructuredParser;
use conduit_core::FormatError;

/// Parses JSON documents with `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl StructuredParser for JsonParser {
    fn parse(&self, bytes: &[u8]) -> Result<serde_json::Value, FormatError> {
        serde_json::from_slice(bytes)
            .map_err(|e| FormatError::new(e.to_string()).at_line_column(e.line(), e.column()))
    }
}
