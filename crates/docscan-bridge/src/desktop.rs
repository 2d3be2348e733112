// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop bridge — "captures" by loading an image file, either one given up
// front or one picked in a file dialog, and opens PDFs with the system's
// default handler.

use std::path::{Path, PathBuf};

use docscan_core::error::{Result, ScanError};
use tracing::{debug, info};

use crate::traits::*;

/// Image extensions offered in the capture dialog.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "tif", "bmp", "webp"];

/// Bridge used on desktop builds and in CI.
#[derive(Debug, Clone, Default)]
pub struct DesktopBridge {
    /// Image to return from every capture instead of asking the user.
    image_source: Option<PathBuf>,
}

impl DesktopBridge {
    /// A bridge that asks for an image with a file dialog on each capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// A bridge whose camera always returns the image at `path`.
    pub fn with_image(path: impl Into<PathBuf>) -> Self {
        Self {
            image_source: Some(path.into()),
        }
    }
}

impl PlatformBridge for DesktopBridge {
    fn platform_name(&self) -> &str {
        "Desktop"
    }
}

impl NativeCamera for DesktopBridge {
    fn capture_image(&self) -> Result<Option<Vec<u8>>> {
        let path = match &self.image_source {
            Some(path) => path.clone(),
            None => match rfd::FileDialog::new()
                .set_title("Choose a photo to scan")
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_file()
            {
                Some(path) => path,
                None => {
                    debug!("capture dialog dismissed");
                    return Ok(None);
                }
            },
        };

        let bytes = std::fs::read(&path).map_err(|err| {
            ScanError::CaptureFailure(format!("could not read {}: {}", path.display(), err))
        })?;
        info!(path = %path.display(), bytes = bytes.len(), "image captured from file");
        Ok(Some(bytes))
    }
}

impl NativeViewer for DesktopBridge {
    fn open_document(&self, path: &Path, mime_type: &str) -> Result<()> {
        if !path.is_file() {
            return Err(ScanError::NotFound(path.display().to_string()));
        }
        info!(path = %path.display(), mime_type, "opening document in system viewer");
        open::that(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_reads_configured_image() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("photo.jpg");
        std::fs::write(&photo, b"jpeg-bytes").unwrap();

        let bridge = DesktopBridge::with_image(&photo);
        assert_eq!(bridge.capture_image().unwrap(), Some(b"jpeg-bytes".to_vec()));
    }

    #[test]
    fn missing_image_is_capture_failure() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = DesktopBridge::with_image(dir.path().join("gone.jpg"));
        assert!(matches!(
            bridge.capture_image(),
            Err(ScanError::CaptureFailure(_))
        ));
    }

    #[test]
    fn opening_missing_pdf_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = DesktopBridge::new();
        let err = bridge
            .open_document(&dir.path().join("nope.pdf"), docscan_core::PDF_MIME_TYPE)
            .unwrap_err();
        assert!(matches!(err, ScanError::NotFound(_)));
    }
}
