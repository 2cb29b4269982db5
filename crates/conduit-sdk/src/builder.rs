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

use crate::config::PipelineConfig;
use crate::controller::PipelineController;
use anyhow::{Context, Result};
use conduit_agents::{SourceRouter, TransformRouter};
use conduit_core::codec::{ArchiveReader, DecompressionCodec, ImageCodec, StructuredParser};
use conduit_core::io::{BundleReader, FileReader, NetworkClient};
use conduit_infra::{
    CompressionCodec, HttpClient, HttpSettings, JsonParser, PackArchiveReader, PackBundleReader,
    RgbaImageCodec, StdFileReader,
};
use conduit_lanes::{
    BundleAcquisitionLane, DecompressLane, FileAcquisitionLane, ImageDecodeLane,
    NetworkAcquisitionLane, StructuredDataLane, UnbundleLane,
};
use std::sync::Arc;

/// Wires lanes, routers and collaborators into a [`PipelineController`].
///
/// Every collaborator defaults to its `conduit-infra` implementation configured
/// from [`PipelineConfig`]; any of them can be replaced, e.g. by fakes in tests.
#[derive(Default)]
pub struct PipelineBuilder {
    config: PipelineConfig,
    file_reader: Option<Arc<dyn FileReader>>,
    network_client: Option<Arc<dyn NetworkClient>>,
    bundle_reader: Option<Arc<dyn BundleReader>>,
    decompression: Option<Arc<dyn DecompressionCodec>>,
    parser: Option<Arc<dyn StructuredParser>>,
    image_codec: Option<Arc<dyn ImageCodec>>,
    archive_reader: Option<Arc<dyn ArchiveReader>>,
}

impl PipelineBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the filesystem reader.
    pub fn file_reader(mut self, reader: Arc<dyn FileReader>) -> Self {
        self.file_reader = Some(reader);
        self
    }

    /// Replaces the HTTP(S) client.
    pub fn network_client(mut self, client: Arc<dyn NetworkClient>) -> Self {
        self.network_client = Some(client);
        self
    }

    /// Replaces the bundle reader.
    pub fn bundle_reader(mut self, reader: Arc<dyn BundleReader>) -> Self {
        self.bundle_reader = Some(reader);
        self
    }

    /// Replaces the decompression codec.
    pub fn decompression_codec(mut self, codec: Arc<dyn DecompressionCodec>) -> Self {
        self.decompression = Some(codec);
        self
    }

    /// Replaces the structured-data parser.
    pub fn structured_parser(mut self, parser: Arc<dyn StructuredParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Replaces the image codec.
    pub fn image_codec(mut self, codec: Arc<dyn ImageCodec>) -> Self {
        self.image_codec = Some(codec);
        self
    }

    /// Replaces the in-memory archive reader.
    pub fn archive_reader(mut self, reader: Arc<dyn ArchiveReader>) -> Self {
        self.archive_reader = Some(reader);
        self
    }

    /// Builds the controller.
    ///
    /// Fails only when a default collaborator cannot be constructed.
    pub fn build(self) -> Result<PipelineController> {
        let config = self.config;
        let max_output = config.limits.max_decompressed_bytes;

        let file_reader = self
            .file_reader
            .unwrap_or_else(|| Arc::new(StdFileReader));
        let network_client: Arc<dyn NetworkClient> = match self.network_client {
            Some(client) => client,
            None => Arc::new(
                HttpClient::with_settings(&HttpSettings {
                    user_agent: config.network.user_agent.clone(),
                    max_body_bytes: config.network.max_body_bytes,
                    system_proxy: config.network.system_proxy,
                })
                .context("Failed to create the default network client")?,
            ),
        };
        let bundle_reader = self.bundle_reader.unwrap_or_else(|| {
            Arc::new(
                PackBundleReader::new(config.bundle_root.clone()).with_max_entry_bytes(max_output),
            )
        });
        let decompression = self
            .decompression
            .unwrap_or_else(|| Arc::new(CompressionCodec::new().with_max_output(max_output)));
        let parser = self.parser.unwrap_or_else(|| Arc::new(JsonParser));
        let image_codec = self.image_codec.unwrap_or_else(|| Arc::new(RgbaImageCodec));
        let archive_reader = self.archive_reader.unwrap_or_else(|| {
            Arc::new(PackArchiveReader::new().with_max_entry_bytes(max_output))
        });

        let sources = SourceRouter::builder()
            .register(Arc::new(FileAcquisitionLane::new(file_reader)))
            .register(Arc::new(
                NetworkAcquisitionLane::new(network_client)
                    .with_default_timeout(config.network.timeout()),
            ))
            .register(Arc::new(BundleAcquisitionLane::new(bundle_reader)))
            .build();

        let transforms = TransformRouter::builder()
            .register(Arc::new(DecompressLane::new(decompression)))
            .register(Arc::new(UnbundleLane::new(archive_reader)))
            .register(Arc::new(StructuredDataLane::new(parser)))
            .register(Arc::new(ImageDecodeLane::new(image_codec)))
            .build();

        log::debug!(
            "PipelineBuilder: bundles under '{}', network timeout {:?}",
            config.bundle_root.display(),
            config.network.timeout()
        );
        Ok(PipelineController::new(sources, transforms))
    }
}
