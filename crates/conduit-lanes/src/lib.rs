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

//! The stages of the resource pipeline.
//!
//! - [`acquisition_lane`] fetches raw bytes for a scheme and tags them.
//! - [`transform_lane`] converts one representation into the next.
//!
//! Every lane talks to the outside world only through the collaborator contracts
//! of `conduit-core`, so each can be driven by fakes in tests.

#![warn(missing_docs)]

pub mod acquisition_lane;
pub mod transform_lane;

pub use acquisition_lane::*;
pub use transform_lane::*;
