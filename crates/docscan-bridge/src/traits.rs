// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the scanner's native collaborators.
//
// The scan pipeline needs exactly two things from the platform: a photo from
// the camera and a way to show a finished PDF. Both calls may block, so the
// session invokes them off the interactive path.

use std::path::Path;

use docscan_core::error::Result;

/// Unified bridge that groups all native capabilities.
pub trait PlatformBridge: NativeCamera + NativeViewer + Send + Sync {
    /// Human-readable platform name (e.g. "Android 14", "Desktop").
    fn platform_name(&self) -> &str;
}

/// Capture images from the device camera.
pub trait NativeCamera: Send + Sync {
    /// Take a photo and return its encoded bytes (JPEG, PNG, ...).
    ///
    /// Returns `Ok(None)` if the user cancelled, and
    /// `Err(ScanError::CaptureFailure)` on hardware or driver failure.
    fn capture_image(&self) -> Result<Option<Vec<u8>>>;
}

/// Hand finished documents to the platform's viewer.
pub trait NativeViewer: Send + Sync {
    /// Open `path` with whatever application handles `mime_type`.
    fn open_document(&self, path: &Path, mime_type: &str) -> Result<()>;
}
