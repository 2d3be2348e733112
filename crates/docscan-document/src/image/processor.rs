// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster processor — decode captured photos, cut out crop regions, and encode
// intermediate JPEG/PNG files. Operates on in-memory images using the `image`
// crate.

use std::path::Path;

use docscan_core::CropRegion;
use docscan_core::error::ScanError;
use image::{DynamicImage, ImageFormat};
use tracing::{debug, instrument};

/// A decoded raster moving through the scan pipeline.
///
/// ```ignore
/// let jpeg = ImageProcessor::from_bytes(&camera_bytes)?.to_jpeg_bytes(100)?;
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Decode raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, ScanError> {
        let img = image::load_from_memory(data)
            .map_err(|err| ScanError::DecodeFailure(format!("failed to decode image: {}", err)))?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, ScanError> {
        encode_to_format(&self.image, ImageFormat::Png)
    }

    /// Encode the current image as JPEG bytes with the given quality (1-100).
    pub fn to_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>, ScanError> {
        let mut buffer = Vec::new();
        let rgb = self.image.to_rgb8();
        let encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100));
        rgb.write_with_encoder(encoder).map_err(encoding_error)?;
        Ok(buffer)
    }

    /// Encode as JPEG and write to `path`, creating parent directories.
    pub fn save_jpeg(&self, path: impl AsRef<Path>, quality: u8) -> Result<(), ScanError> {
        let path = path.as_ref();
        let bytes = self.to_jpeg_bytes(quality)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "JPEG written");
        Ok(())
    }
}

/// Copy the pixels inside `region` out of a borrowed image.
///
/// The region is clamped to the image bounds; a region already produced by
/// the bounding-box cropper is always in bounds. Only the cropped pixels are
/// copied.
#[instrument(skip(image), fields(region = %region))]
pub fn crop_region(image: &DynamicImage, region: CropRegion) -> DynamicImage {
    let img_w = image.width();
    let img_h = image.height();

    let safe_x = region.left.min(img_w.saturating_sub(1));
    let safe_y = region.top.min(img_h.saturating_sub(1));
    let safe_w = region.width().min(img_w - safe_x);
    let safe_h = region.height().min(img_h - safe_y);

    debug!(safe_x, safe_y, safe_w, safe_h, "Cropping image");
    image.crop_imm(safe_x, safe_y, safe_w, safe_h)
}

/// Encode a `DynamicImage` into the specified format, returning the raw bytes.
fn encode_to_format(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, ScanError> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image.write_to(&mut cursor, format).map_err(encoding_error)?;
    Ok(buffer)
}

/// Encoding failures surface as write failures: nothing could be saved.
fn encoding_error(err: image::ImageError) -> ScanError {
    ScanError::IoFailure(std::io::Error::other(format!("image encoding failed: {err}")))
}
