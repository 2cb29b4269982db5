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

//! HTTP(S) transport on top of `reqwest`'s blocking client.

use anyhow::{Context, Result};
use conduit_core::io::{Fetched, NetworkClient};
use conduit_core::{CancellationToken, SourceIoError};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::io::{ErrorKind, Read};
use std::time::{Duration, Instant};

/// Largest response body accepted unless configured otherwise (64 MiB).
pub const DEFAULT_MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// The `User-Agent` sent unless configured otherwise.
pub const DEFAULT_USER_AGENT: &str = concat!("conduit/", env!("CARGO_PKG_VERSION"));

const CHUNK_SIZE: usize = 16 * 1024;

/// Construction settings for [`HttpClient`].
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// The `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Responses with larger bodies fail with a transport error.
    pub max_body_bytes: u64,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub system_proxy: bool,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            system_proxy: true,
        }
    }
}

/// A [`NetworkClient`] backed by a shared `reqwest` connection pool.
///
/// The body is read in chunks; the cancellation token and the deadline are
/// checked before the request and between chunks.
pub struct HttpClient {
    client: Client,
    max_body_bytes: u64,
}

impl HttpClient {
    /// Creates a client with default settings.
    pub fn new() -> Result<Self> {
        Self::with_settings(&HttpSettings::default())
    }

    /// Creates a client from explicit settings.
    pub fn with_settings(settings: &HttpSettings) -> Result<Self> {
        let mut builder = Client::builder().user_agent(settings.user_agent.as_str());
        if !settings.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            max_body_bytes: settings.max_body_bytes,
        })
    }

    fn read_body(
        &self,
        mut body: impl Read,
        started: Instant,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>, SourceIoError> {
        let mut bytes = Vec::new();
        let mut chunk = vec![0u8; CHUNK_SIZE];
        loop {
            if cancel.is_cancelled() {
                return Err(SourceIoError::Cancelled);
            }
            if started.elapsed() >= timeout {
                return Err(SourceIoError::Timeout(timeout));
            }

            let n = match body.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == ErrorKind::TimedOut || started.elapsed() >= timeout => {
                    return Err(SourceIoError::Timeout(timeout))
                }
                Err(e) => return Err(SourceIoError::Transport(format!("reading body: {e}"))),
            };

            if (bytes.len() + n) as u64 > self.max_body_bytes {
                return Err(SourceIoError::Transport(format!(
                    "response body exceeds {} bytes",
                    self.max_body_bytes
                )));
            }
            bytes.extend_from_slice(&chunk[..n]);
        }
        Ok(bytes)
    }
}

fn request_error(err: reqwest::Error, timeout: Duration) -> SourceIoError {
    if err.is_timeout() {
        SourceIoError::Timeout(timeout)
    } else if err.is_connect() {
        SourceIoError::Transport(format!("connection failed: {err}"))
    } else {
        SourceIoError::Transport(err.to_string())
    }
}

impl NetworkClient for HttpClient {
    fn fetch(
        &self,
        url: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<Fetched, SourceIoError> {
        if cancel.is_cancelled() {
            return Err(SourceIoError::Cancelled);
        }

        let started = Instant::now();
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .map_err(|e| request_error(e, timeout))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Err(SourceIoError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(SourceIoError::Transport(format!("HTTP {status} from {url}")));
        }
        if let Some(len) = response.content_length() {
            if len > self.max_body_bytes {
                return Err(SourceIoError::Transport(format!(
                    "response body of {len} bytes exceeds {} bytes",
                    self.max_body_bytes
                )));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let bytes = self.read_body(response, started, timeout, cancel)?;
        log::debug!("HttpClient: GET {url} -> {status}, {} bytes", bytes.len());

        Ok(Fetched {
            bytes,
            content_type,
        })
    }
}
