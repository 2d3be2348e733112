// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanner configuration.

use serde::{Deserialize, Serialize};

use crate::types::{FineTuneOffset, Viewport};

/// Persistent scanner settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Calibration added to display coordinates before scaling into the
    /// captured image (device/density dependent).
    pub fine_tune: FineTuneOffset,
    /// A drag that starts closer than this to a corner grabs that corner.
    pub handle_radius: f32,
    /// Side of the initial corner square, in display units.
    pub default_box_size: f32,
    /// Viewport assumed when the caller does not report one.
    pub viewport: Viewport,
    /// JPEG quality (1-100) for intermediate capture and crop files.
    pub intermediate_jpeg_quality: u8,
    /// Subdirectory of the data dir holding exported PDFs.
    pub scans_dir_name: String,
    /// Subdirectory of the data dir holding intermediate rasters.
    pub captures_dir_name: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            fine_tune: FineTuneOffset::default(),
            handle_radius: 50.0,
            default_box_size: 300.0,
            viewport: Viewport::new(800.0, 800.0),
            intermediate_jpeg_quality: 100,
            scans_dir_name: "scans".into(),
            captures_dir_name: "captures".into(),
        }
    }
}
