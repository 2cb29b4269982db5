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

use conduit_core::codec::ImageCodec;
use conduit_core::{DecodedImage, FormatError};

/// Decodes any format the `image` crate recognises into RGBA8 pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct RgbaImageCodec;

impl ImageCodec for RgbaImageCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, FormatError> {
        // Decode the image using the `image` crate
        let img = image::load_from_memory(bytes)
            .map_err(|e| FormatError::new(format!("image decode failed: {e}")))?;

        // Convert to RGBA8 (keep in sRGB space)
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(DecodedImage {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }
}
