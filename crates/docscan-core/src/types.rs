// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the docscan pipeline.
//
// Points live in one of two coordinate spaces: display space (pixels of the
// rendered viewport, letterbox padding included) and image space (pixels of
// the captured raster, origin top-left). The two are separate newtypes so a
// display point can never be fed where an image point is expected.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// MIME type handed to document viewers for exported scans.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Extension forced onto exported scans.
pub const PDF_EXTENSION: &str = "pdf";

/// A raw 2D coordinate with no coordinate space attached.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: Point2D) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A point in display (viewport) space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayPoint(pub Point2D);

impl DisplayPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self(Point2D::new(x, y))
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }

    /// This point moved by `(dx, dy)` display units.
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.0.x + dx, self.0.y + dy)
    }
}

/// A point in image (raster pixel) space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImagePoint(pub Point2D);

impl ImagePoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self(Point2D::new(x, y))
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }
}

/// Size of the rendered display surface, in display units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Calibration added to display coordinates after padding removal.
///
/// Compensates for a systematic bias between where the handles are drawn
/// and where the gesture layer reports them. The right value depends on the
/// display density of the device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FineTuneOffset {
    pub x: f32,
    pub y: f32,
}

impl FineTuneOffset {
    pub const NONE: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Default for FineTuneOffset {
    fn default() -> Self {
        Self { x: 35.0, y: 30.0 }
    }
}

/// How a raster sits inside a viewport after aspect-ratio fitting.
///
/// At most one of the paddings is non-zero: the raster fills one axis of the
/// viewport exactly and is centred on the other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayGeometry {
    pub displayed_width: f32,
    pub displayed_height: f32,
    pub horizontal_padding: f32,
    pub vertical_padding: f32,
}

/// The user-adjustable quadrilateral: exactly four display-space points.
///
/// Order is cyclic (point `i` connects to point `(i + 1) % 4`); the shape need
/// not be convex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerSet([DisplayPoint; 4]);

impl CornerSet {
    pub const LEN: usize = 4;

    pub const fn new(points: [DisplayPoint; 4]) -> Self {
        Self(points)
    }

    /// A square of side `box_size` centred in `viewport`, listed top-left,
    /// top-right, bottom-right, bottom-left.
    ///
    /// The square shrinks to the smaller viewport side when it would not fit.
    pub fn centered_square(viewport: Viewport, box_size: f32) -> Self {
        let side = box_size.max(0.0).min(viewport.width.min(viewport.height).max(0.0));
        let left = (viewport.width - side) / 2.0;
        let top = (viewport.height - side) / 2.0;
        Self([
            DisplayPoint::new(left, top),
            DisplayPoint::new(left + side, top),
            DisplayPoint::new(left + side, top + side),
            DisplayPoint::new(left, top + side),
        ])
    }

    pub fn points(&self) -> &[DisplayPoint; 4] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<DisplayPoint> {
        self.0.get(index).copied()
    }

    /// Replace the point at `index`. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, point: DisplayPoint) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = point;
        }
    }

    /// The four edges as `(start, end)` pairs, closing back to the first point.
    pub fn edges(&self) -> [(DisplayPoint, DisplayPoint); 4] {
        std::array::from_fn(|i| (self.0[i], self.0[(i + 1) % Self::LEN]))
    }
}

impl From<[DisplayPoint; 4]> for CornerSet {
    fn from(points: [DisplayPoint; 4]) -> Self {
        Self(points)
    }
}

/// Axis-aligned crop rectangle in image space.
///
/// Invariant: `left < right <= image_width` and `top < bottom <= image_height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropRegion {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropRegion {
    /// The region covering a whole `width` x `height` raster.
    pub const fn full(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            top: 0,
            right: width,
            bottom: height,
        }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }
}

impl std::fmt::Display for CropRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{},{} .. {},{}] ({}x{})",
            self.left,
            self.top,
            self.right,
            self.bottom,
            self.width(),
            self.height()
        )
    }
}

/// A scan exported to the scans directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanDocument {
    /// User-chosen name, without the `.pdf` extension.
    pub file_name: String,
    /// Full path of the written PDF.
    pub path: PathBuf,
    /// Page width in pixels (= PDF units).
    pub width: u32,
    /// Page height in pixels (= PDF units).
    pub height: u32,
    /// SHA-256 of the written PDF bytes, lowercase hex.
    pub sha256: String,
    pub size_bytes: u64,
}

/// One row of the saved-scans listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEntry {
    /// File name without extension.
    pub file_name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Utc>>,
}

impl ScanEntry {
    /// Size rounded down to whole kilobytes, as shown in the listing.
    pub fn size_kb(&self) -> u64 {
        self.size_bytes / 1024
    }
}

/// Unique identifier for a scan session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_square_matches_default_layout() {
        let corners = CornerSet::centered_square(Viewport::new(800.0, 800.0), 300.0);
        assert_eq!(
            corners.points(),
            &[
                DisplayPoint::new(250.0, 250.0),
                DisplayPoint::new(550.0, 250.0),
                DisplayPoint::new(550.0, 550.0),
                DisplayPoint::new(250.0, 550.0),
            ]
        );
    }

    #[test]
    fn centered_square_shrinks_to_small_viewport() {
        let corners = CornerSet::centered_square(Viewport::new(200.0, 100.0), 300.0);
        assert_eq!(corners.get(0), Some(DisplayPoint::new(50.0, 0.0)));
        assert_eq!(corners.get(2), Some(DisplayPoint::new(150.0, 100.0)));
    }

    #[test]
    fn edges_wrap_around() {
        let corners = CornerSet::centered_square(Viewport::new(10.0, 10.0), 10.0);
        let edges = corners.edges();
        assert_eq!(edges[3].1, corners.points()[0]);
        assert_eq!(edges[1].0, corners.points()[1]);
    }

    #[test]
    fn set_ignores_out_of_range_index() {
        let mut corners = CornerSet::centered_square(Viewport::new(10.0, 10.0), 4.0);
        let before = corners;
        corners.set(7, DisplayPoint::new(1.0, 1.0));
        assert_eq!(corners, before);
    }

    #[test]
    fn crop_region_dimensions() {
        let region = CropRegion {
            left: 10,
            top: 20,
            right: 110,
            bottom: 70,
        };
        assert_eq!((region.width(), region.height()), (100, 50));
        assert_eq!(CropRegion::full(640, 480).width(), 640);
    }
}
