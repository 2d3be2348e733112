// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — decoding, bounding-box cropping, and corner overlays.

pub mod cropper;
pub mod overlay;
pub mod processor;

pub use cropper::{bounding_region, crop_to_points};
pub use overlay::{OverlayStyle, draw_corner_overlay};
pub use processor::ImageProcessor;
