// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bounding-box cropper — reduces four image-space corners to the smallest
// axis-aligned rectangle containing them and cuts that rectangle out of the
// raster.
//
// No perspective warp is applied: pixels inside the bounding box but outside
// the quadrilateral are kept.

use docscan_core::error::{Result, ScanError};
use docscan_core::{CropRegion, ImagePoint};
use image::DynamicImage;
use tracing::{info, instrument, warn};

use crate::image::processor::crop_region;

/// Compute the clamped bounding box of `points` inside a
/// `raster_width` x `raster_height` raster.
///
/// Fails with [`ScanError::DegenerateRegion`] when the box has no width or no
/// height, instead of silently widening it to one pixel.
pub fn bounding_region(
    points: &[ImagePoint; 4],
    raster_width: u32,
    raster_height: u32,
) -> Result<CropRegion> {
    if points.iter().any(|p| !p.0.is_finite()) {
        return Err(ScanError::InvalidGeometry(
            "crop corner is not a finite number".into(),
        ));
    }

    let min_x = points.iter().map(ImagePoint::x).fold(f32::INFINITY, f32::min);
    let min_y = points.iter().map(ImagePoint::y).fold(f32::INFINITY, f32::min);
    let max_x = points.iter().map(ImagePoint::x).fold(f32::NEG_INFINITY, f32::max);
    let max_y = points.iter().map(ImagePoint::y).fold(f32::NEG_INFINITY, f32::max);

    let left = (min_x.floor() as i64).max(0);
    let top = (min_y.floor() as i64).max(0);
    let right = (max_x.ceil() as i64).min(i64::from(raster_width));
    let bottom = (max_y.ceil() as i64).min(i64::from(raster_height));

    let width = right - left;
    let height = bottom - top;
    if width <= 0 || height <= 0 {
        warn!(left, top, right, bottom, "Crop corners collapse to an empty region");
        return Err(ScanError::DegenerateRegion { width, height });
    }

    // Both spans are positive and every edge lies in [0, dimension], so the
    // casts below are lossless.
    Ok(CropRegion {
        left: left as u32,
        top: top as u32,
        right: right as u32,
        bottom: bottom as u32,
    })
}

/// Crop `raster` to the bounding box of `points`.
#[instrument(skip(raster, points), fields(width = raster.width(), height = raster.height()))]
pub fn crop_to_points(
    raster: &DynamicImage,
    points: &[ImagePoint; 4],
) -> Result<(CropRegion, DynamicImage)> {
    let region = bounding_region(points, raster.width(), raster.height())?;
    info!(region = %region, "Cropping to corner bounding box");
    Ok((region, crop_region(raster, region)))
}
