// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docscan-document — the geometry and document half of the scanner.
//
// Maps corner handles from display space onto the captured raster, crops the
// raster to the corners' bounding box, and exports the result as a one-page
// PDF.

pub mod geometry;
pub mod image;
pub mod integrity;
pub mod pdf;

// Re-export the primary entry points so callers can use
// `docscan_document::GeometryMapper` etc.
pub use geometry::{CornerDrag, DragEvent, GeometryMapper};
pub use image::processor::ImageProcessor;
pub use pdf::reader::PdfInspector;
pub use pdf::writer::PdfExporter;

use ::image::DynamicImage;
use docscan_core::error::Result;
use docscan_core::{CornerSet, CropRegion, Viewport};

/// Map `corners` onto `raster` and crop to their bounding box.
///
/// This is the whole crop step: geometry mapping followed by the
/// bounding-box cut.
pub fn crop_document(
    mapper: &GeometryMapper,
    raster: &DynamicImage,
    corners: &CornerSet,
    viewport: Viewport,
) -> Result<(CropRegion, DynamicImage)> {
    let points = mapper.map_corners(corners, raster.width(), raster.height(), viewport)?;
    image::cropper::crop_to_points(raster, &points)
}
