// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner overlay — draws the crop quadrilateral and its handles onto a copy of
// the captured raster, so the selection can be previewed before cropping.

use docscan_core::ImagePoint;
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

/// Colours and sizes used when drawing the overlay.
#[derive(Debug, Clone, Copy)]
pub struct OverlayStyle {
    pub line_color: Rgba<u8>,
    pub handle_color: Rgba<u8>,
    /// Handle radius in image pixels.
    pub handle_radius: i32,
    /// Edge thickness in image pixels.
    pub line_width: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            line_color: Rgba([0, 122, 255, 255]),
            handle_color: Rgba([255, 59, 48, 255]),
            handle_radius: 20,
            line_width: 3,
        }
    }
}

/// Render `corners` (already in image space) over `raster`.
///
/// Edges connect corner `i` to corner `(i + 1) % 4`.
pub fn draw_corner_overlay(
    raster: &DynamicImage,
    corners: &[ImagePoint; 4],
    style: &OverlayStyle,
) -> RgbaImage {
    let mut canvas = raster.to_rgba8();
    let half = style.line_width as f32 / 2.0;

    for i in 0..corners.len() {
        let a = corners[i];
        let b = corners[(i + 1) % corners.len()];
        // Thick lines as a bundle of parallel one-pixel segments.
        for step in 0..style.line_width.max(1) {
            let d = step as f32 - half;
            draw_line_segment_mut(
                &mut canvas,
                (a.x() + d, a.y()),
                (b.x() + d, b.y()),
                style.line_color,
            );
            draw_line_segment_mut(
                &mut canvas,
                (a.x(), a.y() + d),
                (b.x(), b.y() + d),
                style.line_color,
            );
        }
    }

    for corner in corners {
        draw_filled_circle_mut(
            &mut canvas,
            (corner.x().round() as i32, corner.y().round() as i32),
            style.handle_radius,
            style.handle_color,
        );
    }

    canvas
}
