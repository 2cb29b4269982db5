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

use crate::cli::FetchArgs;
use anyhow::{Context, Result};
use conduit_sdk::prelude::*;
use std::time::Duration;

pub fn run(config: PipelineConfig, args: &FetchArgs) -> Result<()> {
    let pipeline = PipelineController::builder()
        .with_config(config)
        .build()
        .context("Failed to set up the pipeline")?;

    let mut ctx = AcquireContext::default();
    if let Some(ms) = args.timeout_ms {
        ctx = ctx.timeout(Duration::from_millis(ms));
    }

    let artifact = pipeline
        .execute_with(&args.identifier, &ctx)
        .with_context(|| format!("Failed to fetch '{}'", args.identifier))?;

    println!("{}", summarize(&artifact)?);
    Ok(())
}

/// One human-readable description of a final artifact.
fn summarize(artifact: &Artifact) -> Result<String> {
    let Some(payload) = artifact.payload() else {
        return Ok(format!("no payload ({})", artifact.tag()));
    };

    Ok(match payload {
        Payload::Structured(value) => {
            serde_json::to_string_pretty(value).context("Failed to render structured value")?
        }
        Payload::Image(image) => format!(
            "image {}x{} ({} bytes RGBA8)",
            image.width,
            image.height,
            image.pixels.len()
        ),
        Payload::Raw(bytes) => format!("{} bytes ({})", bytes.len(), artifact.tag()),
        other => format!("{} payload, {} bytes ({})", other.kind(), other.byte_len(), artifact.tag()),
    })
}
