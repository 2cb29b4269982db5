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

//! Agents that drive the pipeline's lanes.
//!
//! Each agent owns a fixed dispatch table built once through a builder and never
//! mutated afterwards, so a built agent can be shared across threads freely.

#![warn(missing_docs)]

pub mod source_agent;
pub mod transform_agent;

pub use source_agent::{SourceRouter, SourceRouterBuilder};
pub use transform_agent::{TransformRouter, TransformRouterBuilder};
