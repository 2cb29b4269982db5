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

//! Local filesystem access.

use conduit_core::io::FileReader;
use conduit_core::SourceIoError;
use std::path::Path;

/// Reads whole files through `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileReader;

impl FileReader for StdFileReader {
    fn read(&self, path: &Path) -> Result<Vec<u8>, SourceIoError> {
        std::fs::read(path).map_err(|e| SourceIoError::from_io(&e, &path.display().to_string()))
    }
}
