// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for targets without a wired camera or viewer.
//
// Every trait method returns `PlatformUnavailable`.

use std::path::Path;

use docscan_core::error::{Result, ScanError};

use crate::traits::*;

/// No-op bridge returned where no native implementation exists.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Unsupported (stub)"
    }
}

impl NativeCamera for StubBridge {
    fn capture_image(&self) -> Result<Option<Vec<u8>>> {
        tracing::warn!("NativeCamera::capture_image called on stub bridge");
        Err(ScanError::PlatformUnavailable)
    }
}

impl NativeViewer for StubBridge {
    fn open_document(&self, _path: &Path, _mime_type: &str) -> Result<()> {
        tracing::warn!("NativeViewer::open_document called on stub bridge");
        Err(ScanError::PlatformUnavailable)
    }
}
