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

//! Pipeline configuration, read from `Conduit.toml`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings for the default collaborators.
///
/// Every field has a default, so an empty or partial file is valid:
///
/// ```toml
/// bundle_root = "assets/packs"
///
/// [network]
/// timeout_ms = 5000
///
/// [limits]
/// max_decompressed_bytes = 67108864
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory holding the `<bundle>.pack` files behind `bundle://` identifiers.
    pub bundle_root: PathBuf,
    /// HTTP(S) transport settings.
    pub network: NetworkConfig,
    /// Resource limits.
    pub limits: LimitsConfig,
}

/// The `[network]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Timeout applied when a call does not supply its own.
    pub timeout_ms: u64,
    /// The `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Responses with larger bodies are refused.
    pub max_body_bytes: u64,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub system_proxy: bool,
}

/// The `[limits]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest output a decompression or pack entry may produce.
    pub max_decompressed_bytes: u64,
}

impl Default for PipelineConfig {
    /// Bundles are looked up in `assets/`.
    fn default() -> Self {
        Self {
            bundle_root: PathBuf::from("assets"),
            network: NetworkConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            user_agent: conduit_infra::DEFAULT_USER_AGENT.to_string(),
            max_body_bytes: conduit_infra::DEFAULT_MAX_BODY_BYTES,
            system_proxy: true,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_decompressed_bytes: conduit_infra::DEFAULT_MAX_DECOMPRESSED_BYTES,
        }
    }
}

impl NetworkConfig {
    /// The timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl PipelineConfig {
    /// The file looked up in the working directory.
    pub const FILE_NAME: &'static str = "Conduit.toml";

    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse pipeline configuration")
    }

    /// Loads the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{}'", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse TOML from '{}'", path.display()))
    }

    /// Loads `path` when it exists, otherwise returns the default configuration.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            log::info!("Found '{}'. Loading configuration.", path.display());
            Self::load(path)
        } else {
            log::info!("No '{}' found. Using default configuration.", path.display());
            Ok(Self::default())
        }
    }
}
