// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Geometry mapper — converts corner handles from display space into pixel
// coordinates of the captured raster.
//
// The raster is shown aspect-fit inside the viewport: it fills one axis
// exactly and is centred on the other, so display coordinates carry a
// letterbox (vertical) or pillarbox (horizontal) padding that has to be
// removed before scaling.

use docscan_core::error::{Result, ScanError};
use docscan_core::{CornerSet, DisplayGeometry, DisplayPoint, FineTuneOffset, ImagePoint, Viewport};
use tracing::{debug, instrument};

/// Maps display-space corner handles onto the captured raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryMapper {
    /// Calibration added after padding removal, before scaling.
    fine_tune: FineTuneOffset,
}

impl GeometryMapper {
    pub fn new(fine_tune: FineTuneOffset) -> Self {
        Self { fine_tune }
    }

    /// Work out where a `raster_width` x `raster_height` raster lands when
    /// aspect-fit into `viewport`.
    pub fn display_geometry(
        raster_width: u32,
        raster_height: u32,
        viewport: Viewport,
    ) -> Result<DisplayGeometry> {
        if raster_width == 0 || raster_height == 0 {
            return Err(ScanError::InvalidGeometry(format!(
                "raster has no pixels ({raster_width}x{raster_height})"
            )));
        }
        if !viewport.is_valid() {
            return Err(ScanError::InvalidGeometry(format!(
                "viewport must be positive and finite, got {}x{}",
                viewport.width, viewport.height
            )));
        }

        let (w, h) = (raster_width as f32, raster_height as f32);
        let bitmap_aspect = w / h;

        // Compare aspects by cross-multiplying so that equal ratios land in
        // the exact-fit branch without rounding noise.
        let raster_side = raster_width as f64 * viewport.height as f64;
        let viewport_side = viewport.width as f64 * raster_height as f64;

        let geometry = if raster_side > viewport_side {
            // Relatively wider: fill the width, letterbox top and bottom.
            let displayed_height = viewport.width / bitmap_aspect;
            DisplayGeometry {
                displayed_width: viewport.width,
                displayed_height,
                horizontal_padding: 0.0,
                vertical_padding: (viewport.height - displayed_height) / 2.0,
            }
        } else if raster_side < viewport_side {
            // Relatively taller: fill the height, pillarbox left and right.
            let displayed_width = viewport.height * bitmap_aspect;
            DisplayGeometry {
                displayed_width,
                displayed_height: viewport.height,
                horizontal_padding: (viewport.width - displayed_width) / 2.0,
                vertical_padding: 0.0,
            }
        } else {
            DisplayGeometry {
                displayed_width: viewport.width,
                displayed_height: viewport.height,
                horizontal_padding: 0.0,
                vertical_padding: 0.0,
            }
        };

        let usable = |v: f32| v.is_finite() && v > 0.0;
        if !usable(geometry.displayed_width) || !usable(geometry.displayed_height) {
            return Err(ScanError::InvalidGeometry(format!(
                "raster collapses to {}x{} on screen",
                geometry.displayed_width, geometry.displayed_height
            )));
        }

        Ok(geometry)
    }

    /// Map one display point using a precomputed geometry.
    ///
    /// The result is clamped to `[0, raster_width] x [0, raster_height]` after
    /// scaling; intermediate values may be negative.
    pub fn map_point(
        &self,
        geometry: &DisplayGeometry,
        raster_width: u32,
        raster_height: u32,
        point: DisplayPoint,
    ) -> ImagePoint {
        let (w, h) = (raster_width as f32, raster_height as f32);
        let scale_x = w / geometry.displayed_width;
        let scale_y = h / geometry.displayed_height;

        let x = (point.x() - geometry.horizontal_padding + self.fine_tune.x) * scale_x;
        let y = (point.y() - geometry.vertical_padding + self.fine_tune.y) * scale_y;

        ImagePoint::new(x.clamp(0.0, w), y.clamp(0.0, h))
    }

    /// Map all four corners of `corners` into raster pixel space.
    #[instrument(skip(self, corners), fields(raster_width, raster_height))]
    pub fn map_corners(
        &self,
        corners: &CornerSet,
        raster_width: u32,
        raster_height: u32,
        viewport: Viewport,
    ) -> Result<[ImagePoint; 4]> {
        if let Some(bad) = corners.points().iter().find(|p| !p.0.is_finite()) {
            return Err(ScanError::InvalidGeometry(format!(
                "corner position is not a number: ({}, {})",
                bad.x(),
                bad.y()
            )));
        }

        let geometry = Self::display_geometry(raster_width, raster_height, viewport)?;
        debug!(
            displayed_width = geometry.displayed_width,
            displayed_height = geometry.displayed_height,
            horizontal_padding = geometry.horizontal_padding,
            vertical_padding = geometry.vertical_padding,
            "Display geometry computed"
        );

        let points = corners.points();
        Ok(std::array::from_fn(|i| {
            self.map_point(&geometry, raster_width, raster_height, points[i])
        }))
    }
}

impl Default for GeometryMapper {
    fn default() -> Self {
        Self::new(FineTuneOffset::default())
    }
}
