// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan session — the capture → adjust → crop → export state machine.
//
// One `ScanSession` is owned per scan flow and passed by `&mut` into each
// step. Camera access, cropping and PDF writing run on tokio's blocking pool;
// corner updates are plain synchronous writes (last write wins).
//
// A failed step moves the session to `Error` and remembers which stage the
// user can resume from. Nothing is retried automatically.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, Utc};
use docscan_bridge::NativeCamera;
use docscan_core::error::{Result, ScanError};
use docscan_core::human_errors::{HumanError, humanize_error};
use docscan_core::{
    CornerSet, CropRegion, ScanConfig, ScanDocument, ScanErrorKind, SessionId, Viewport,
};
use docscan_document::image::overlay::{OverlayStyle, draw_corner_overlay};
use docscan_document::pdf::writer::normalize_file_name;
use docscan_document::{
    CornerDrag, DragEvent, GeometryMapper, ImageProcessor, PdfExporter, crop_document,
};
use image::{DynamicImage, RgbaImage};
use tracing::{debug, error, info, instrument, warn};

/// Where a scan session is in its flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStage {
    Idle,
    Capturing,
    Captured,
    Adjusting,
    Cropped,
    Exporting,
    Done,
    Error,
}

impl std::fmt::Display for ScanStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Capturing => "capturing",
            Self::Captured => "captured",
            Self::Adjusting => "adjusting",
            Self::Cropped => "cropped",
            Self::Exporting => "exporting",
            Self::Done => "done",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// The last failure of a session, ready to show to the user.
#[derive(Debug, Clone)]
pub struct ScanFailure {
    pub kind: ScanErrorKind,
    /// Technical description, for logs.
    pub detail: String,
    pub human: HumanError,
    /// Stage the user can pick up from.
    pub resume: ScanStage,
}

/// Directories a session writes to.
#[derive(Debug, Clone)]
pub struct ScanPaths {
    /// Intermediate capture and crop rasters.
    pub captures_dir: PathBuf,
    /// Exported PDFs.
    pub scans_dir: PathBuf,
}

struct CapturedImage {
    raster: Arc<DynamicImage>,
    path: PathBuf,
}

struct CroppedImage {
    region: CropRegion,
    raster: Arc<DynamicImage>,
    path: PathBuf,
}

/// State of one scan flow.
pub struct ScanSession {
    id: SessionId,
    config: ScanConfig,
    paths: ScanPaths,
    viewport: Viewport,
    stage: ScanStage,
    failure: Option<ScanFailure>,
    capture: Option<CapturedImage>,
    corners: CornerSet,
    drag: CornerDrag,
    cropped: Option<CroppedImage>,
    document: Option<ScanDocument>,
}

#[allow(dead_code)]
impl ScanSession {
    pub fn new(config: ScanConfig, paths: ScanPaths) -> Self {
        let viewport = config.viewport;
        let corners = CornerSet::centered_square(viewport, config.default_box_size);
        let drag = CornerDrag::new(config.handle_radius);
        Self {
            id: SessionId::new(),
            config,
            paths,
            viewport,
            stage: ScanStage::Idle,
            failure: None,
            capture: None,
            corners,
            drag,
            cropped: None,
            document: None,
        }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn stage(&self) -> ScanStage {
        self.stage
    }

    /// The failure that put the session into `Error`, if any.
    pub fn failure(&self) -> Option<&ScanFailure> {
        self.failure.as_ref()
    }

    pub fn corners(&self) -> &CornerSet {
        &self.corners
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Pixel size of the captured raster.
    pub fn captured_size(&self) -> Option<(u32, u32)> {
        self.capture
            .as_ref()
            .map(|c| (c.raster.width(), c.raster.height()))
    }

    /// Intermediate file holding the captured photo.
    pub fn capture_path(&self) -> Option<&PathBuf> {
        self.capture.as_ref().map(|c| &c.path)
    }

    pub fn cropped_region(&self) -> Option<CropRegion> {
        self.cropped.as_ref().map(|c| c.region)
    }

    /// Intermediate file holding the cropped raster.
    pub fn cropped_path(&self) -> Option<&PathBuf> {
        self.cropped.as_ref().map(|c| &c.path)
    }

    /// The exported scan, once the session is `Done`.
    pub fn document(&self) -> Option<&ScanDocument> {
        self.document.as_ref()
    }

    // -- Capture --------------------------------------------------------------

    /// Take a photo with `camera`.
    ///
    /// Returns `Ok(false)` when the user cancelled; the session is back to
    /// `Idle`. On success the corners are reset to the default square.
    #[instrument(skip_all, fields(session = %self.id))]
    pub async fn capture<C>(&mut self, camera: Arc<C>) -> Result<bool>
    where
        C: NativeCamera + ?Sized + 'static,
    {
        self.require(&[ScanStage::Idle], "capture")?;
        self.enter(ScanStage::Capturing);

        let shot = tokio::task::spawn_blocking(move || camera.capture_image())
            .await
            .map_err(|err| ScanError::CaptureFailure(format!("camera task failed: {err}")))
            .and_then(|result| result);

        let bytes = match shot {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                info!("capture cancelled by user");
                self.enter(ScanStage::Idle);
                return Ok(false);
            }
            Err(err) => return Err(self.fail(err, ScanStage::Idle)),
        };

        let path = self
            .paths
            .captures_dir
            .join(format!("document_{}.jpg", Utc::now().timestamp_millis()));
        let quality = self.config.intermediate_jpeg_quality;
        let decoded = {
            let path = path.clone();
            tokio::task::spawn_blocking(move || -> Result<DynamicImage> {
                let processor = ImageProcessor::from_bytes(&bytes)?;
                processor.save_jpeg(&path, quality).map_err(|err| {
                    ScanError::CaptureFailure(format!("could not store photo: {err}"))
                })?;
                Ok(processor.into_dynamic())
            })
            .await
            .map_err(|err| ScanError::DecodeFailure(format!("decode task failed: {err}")))
            .and_then(|result| result)
        };

        let raster = match decoded {
            Ok(raster) => raster,
            Err(err) => {
                // Nothing usable was captured: start over.
                self.capture = None;
                return Err(self.fail(err, ScanStage::Idle));
            }
        };

        info!(
            width = raster.width(),
            height = raster.height(),
            path = %path.display(),
            "photo captured"
        );
        self.capture = Some(CapturedImage {
            raster: Arc::new(raster),
            path,
        });
        self.corners = CornerSet::centered_square(self.viewport, self.config.default_box_size);
        self.drag = CornerDrag::new(self.config.handle_radius);
        self.enter(ScanStage::Captured);
        Ok(true)
    }

    // -- Adjusting ------------------------------------------------------------

    /// Report the current viewport size. Used by the next crop.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        debug!(width = viewport.width, height = viewport.height, "viewport updated");
        self.viewport = viewport;
    }

    /// Replace all four corners.
    pub fn update_corners(&mut self, corners: CornerSet) -> Result<()> {
        self.require(&[ScanStage::Captured, ScanStage::Adjusting], "adjust corners")?;
        self.corners = corners;
        self.enter(ScanStage::Adjusting);
        Ok(())
    }

    /// Feed one drag gesture event to the corner handles.
    pub fn drag(&mut self, event: DragEvent) -> Result<()> {
        self.require(&[ScanStage::Captured, ScanStage::Adjusting], "drag a corner")?;
        self.corners = self.drag.apply(self.corners, event);
        self.enter(ScanStage::Adjusting);
        Ok(())
    }

    /// The captured raster with the current corners drawn over it.
    pub fn preview(&self, style: &OverlayStyle) -> Result<RgbaImage> {
        let capture = self.capture.as_ref().ok_or_else(|| ScanError::InvalidTransition {
            from: self.stage.to_string(),
            action: "preview",
        })?;
        let mapper = GeometryMapper::new(self.config.fine_tune);
        let points = mapper.map_corners(
            &self.corners,
            capture.raster.width(),
            capture.raster.height(),
            self.viewport,
        )?;
        Ok(draw_corner_overlay(&capture.raster, &points, style))
    }

    // -- Crop -----------------------------------------------------------------

    /// Map the corners onto the photo and crop to their bounding box.
    #[instrument(skip_all, fields(session = %self.id))]
    pub async fn confirm_crop(&mut self) -> Result<CropRegion> {
        self.require(&[ScanStage::Captured, ScanStage::Adjusting], "crop")?;
        let Some(capture) = self.capture.as_ref() else {
            return Err(self.invalid("crop"));
        };

        let raster = Arc::clone(&capture.raster);
        let corners = self.corners;
        let viewport = self.viewport;
        let mapper = GeometryMapper::new(self.config.fine_tune);
        let quality = self.config.intermediate_jpeg_quality;
        let path = self
            .paths
            .captures_dir
            .join(format!("cropped_image_{}.jpg", Utc::now().timestamp_millis()));

        let outcome = {
            let path = path.clone();
            tokio::task::spawn_blocking(move || -> Result<(CropRegion, DynamicImage)> {
                let (region, cropped) = crop_document(&mapper, &raster, &corners, viewport)?;
                let processor = ImageProcessor::from_dynamic(cropped);
                processor.save_jpeg(&path, quality)?;
                // The PDF gets the in-memory pixels, not the re-decoded JPEG.
                Ok((region, processor.into_dynamic()))
            })
            .await
            .map_err(|err| ScanError::IoFailure(std::io::Error::other(err)))
            .and_then(|result| result)
        };

        match outcome {
            Ok((region, cropped)) => {
                info!(region = %region, path = %path.display(), "crop confirmed");
                self.cropped = Some(CroppedImage {
                    region,
                    raster: Arc::new(cropped),
                    path,
                });
                self.enter(ScanStage::Cropped);
                Ok(region)
            }
            Err(err) => Err(self.fail(err, ScanStage::Adjusting)),
        }
    }

    // -- Export ---------------------------------------------------------------

    /// Save the cropped page as `<file_name>.pdf` in the scans directory.
    ///
    /// Without a name, a timestamp-derived one is used. A failure leaves the
    /// crop in place so the export can be retried, with the same or another
    /// name.
    #[instrument(skip_all, fields(session = %self.id))]
    pub async fn export(&mut self, file_name: Option<&str>) -> Result<ScanDocument> {
        self.require(&[ScanStage::Cropped], "export")?;
        let Some(cropped) = self.cropped.as_ref() else {
            return Err(self.invalid("export"));
        };
        let raster = Arc::clone(&cropped.raster);

        let requested = file_name
            .map(str::to_owned)
            .unwrap_or_else(default_file_name);
        let name = match normalize_file_name(&requested) {
            Ok(name) => name,
            Err(err) => return Err(self.fail(err, ScanStage::Cropped)),
        };

        self.enter(ScanStage::Exporting);
        let exporter = PdfExporter::new(self.paths.scans_dir.clone());
        let outcome = tokio::task::spawn_blocking(move || exporter.export(&raster, &name))
            .await
            .map_err(|err| ScanError::IoFailure(std::io::Error::other(err)))
            .and_then(|result| result);

        match outcome {
            Ok(document) => {
                info!(path = %document.path.display(), "scan saved");
                self.document = Some(document.clone());
                self.enter(ScanStage::Done);
                Ok(document)
            }
            Err(err) => Err(self.fail(err, ScanStage::Cropped)),
        }
    }

    /// Drop everything and start a new scan.
    pub fn reset(&mut self) {
        debug!(session = %self.id, from = %self.stage, "session reset");
        self.capture = None;
        self.cropped = None;
        self.document = None;
        self.corners = CornerSet::centered_square(self.viewport, self.config.default_box_size);
        self.drag = CornerDrag::new(self.config.handle_radius);
        self.enter(ScanStage::Idle);
    }

    // -- Helpers --------------------------------------------------------------

    /// The stage operations are checked against: the resume point while in
    /// `Error`, the current stage otherwise.
    fn ready_stage(&self) -> ScanStage {
        match (&self.stage, &self.failure) {
            (ScanStage::Error, Some(failure)) => failure.resume,
            (stage, _) => *stage,
        }
    }

    fn require(&self, allowed: &[ScanStage], action: &'static str) -> Result<()> {
        if allowed.contains(&self.ready_stage()) {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> ScanError {
        warn!(session = %self.id, stage = %self.stage, action, "rejected out-of-order step");
        ScanError::InvalidTransition {
            from: self.stage.to_string(),
            action,
        }
    }

    fn enter(&mut self, stage: ScanStage) {
        debug!(session = %self.id, from = %self.stage, to = %stage, "stage change");
        self.stage = stage;
        self.failure = None;
    }

    /// Record `err`, move to `Error`, and hand the error back to the caller.
    fn fail(&mut self, err: ScanError, resume: ScanStage) -> ScanError {
        let kind = err.kind();
        if kind == ScanErrorKind::InvalidGeometry {
            error!(session = %self.id, error = %err, "crop geometry invalid");
        } else {
            warn!(session = %self.id, error = %err, ?kind, resume = %resume, "scan step failed");
        }
        self.failure = Some(ScanFailure {
            kind,
            detail: err.to_string(),
            human: humanize_error(&err),
            resume,
        });
        self.stage = ScanStage::Error;
        err
    }
}

/// `scan_YYYYMMDD_HHMMSS` in local time.
pub fn default_file_name() -> String {
    Local::now().format("scan_%Y%m%d_%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use docscan_core::{DisplayPoint, FineTuneOffset};
    use docscan_document::PdfInspector;
    use image::{Rgb, RgbImage};

    /// Hands back the same encoded photo every time.
    struct FixedCamera(Vec<u8>);

    impl NativeCamera for FixedCamera {
        fn capture_image(&self) -> Result<Option<Vec<u8>>> {
            Ok(Some(self.0.clone()))
        }
    }

    struct CancelledCamera;

    impl NativeCamera for CancelledCamera {
        fn capture_image(&self) -> Result<Option<Vec<u8>>> {
            Ok(None)
        }
    }

    struct BrokenCamera;

    impl NativeCamera for BrokenCamera {
        fn capture_image(&self) -> Result<Option<Vec<u8>>> {
            Err(ScanError::CaptureFailure("lens cap on".into()))
        }
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let raster = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 90])
        }));
        ImageProcessor::from_dynamic(raster).to_png_bytes().unwrap()
    }

    /// Square viewport, no calibration offset: display units map 2:1 onto a
    /// 2000x1000 capture letterboxed with 250 units top and bottom.
    fn session(dir: &std::path::Path) -> ScanSession {
        let config = ScanConfig {
            fine_tune: FineTuneOffset::NONE,
            viewport: Viewport::new(1000.0, 1000.0),
            ..ScanConfig::default()
        };
        ScanSession::new(
            config,
            ScanPaths {
                captures_dir: dir.join("captures"),
                scans_dir: dir.join("scans"),
            },
        )
    }

    fn page_corners() -> CornerSet {
        CornerSet::from([
            DisplayPoint::new(100.0, 300.0),
            DisplayPoint::new(600.0, 300.0),
            DisplayPoint::new(600.0, 550.0),
            DisplayPoint::new(100.0, 550.0),
        ])
    }

    async fn captured(dir: &std::path::Path) -> ScanSession {
        let mut session = session(dir);
        let camera = Arc::new(FixedCamera(png(2000, 1000)));
        assert!(session.capture(camera).await.unwrap());
        session
    }

    #[tokio::test]
    async fn capture_stores_photo_and_resets_corners() {
        let tmp = tempfile::tempdir().unwrap();
        let session = captured(tmp.path()).await;

        assert_eq!(session.stage(), ScanStage::Captured);
        assert_eq!(session.captured_size(), Some((2000, 1000)));
        let path = session.capture_path().unwrap();
        assert!(path.starts_with(tmp.path().join("captures")));
        assert!(path.is_file());
        assert_eq!(
            *session.corners(),
            CornerSet::centered_square(Viewport::new(1000.0, 1000.0), 300.0)
        );
    }

    #[tokio::test]
    async fn cancelled_capture_returns_to_idle_quietly() {
        let tmp = tempfile::tempdir().unwrap();
        let mut session = session(tmp.path());

        let taken = session.capture(Arc::new(CancelledCamera)).await.unwrap();

        assert!(!taken);
        assert_eq!(session.stage(), ScanStage::Idle);
        assert!(session.failure().is_none());
        assert!(session.captured_size().is_none());
    }

    #[tokio::test]
    async fn camera_failure_resumes_at_idle() {
        let tmp = tempfile::tempdir().unwrap();
        let mut session = session(tmp.path());

        let err = session.capture(Arc::new(BrokenCamera)).await.unwrap_err();

        assert!(matches!(err, ScanError::CaptureFailure(_)));
        assert_eq!(session.stage(), ScanStage::Error);
        let failure = session.failure().unwrap();
        assert_eq!(failure.kind, ScanErrorKind::CaptureFailure);
        assert_eq!(failure.resume, ScanStage::Idle);

        // The user can simply try again.
        let camera = Arc::new(FixedCamera(png(40, 20)));
        assert!(session.capture(camera).await.unwrap());
        assert_eq!(session.stage(), ScanStage::Captured);
    }

    #[tokio::test]
    async fn undecodable_photo_is_discarded() {
        let tmp = tempfile::tempdir().unwrap();
        let mut session = session(tmp.path());

        let camera = Arc::new(FixedCamera(b"definitely not a jpeg".to_vec()));
        let err = session.capture(camera).await.unwrap_err();

        assert!(matches!(err, ScanError::DecodeFailure(_)));
        assert_eq!(session.failure().unwrap().resume, ScanStage::Idle);
        assert!(session.captured_size().is_none());
    }

    #[tokio::test]
    async fn full_flow_exports_bounding_box_page() {
        let tmp = tempfile::tempdir().unwrap();
        let mut session = captured(tmp.path()).await;

        session.update_corners(page_corners()).unwrap();
        assert_eq!(session.stage(), ScanStage::Adjusting);

        let region = session.confirm_crop().await.unwrap();
        assert_eq!(
            region,
            CropRegion {
                left: 200,
                top: 100,
                right: 1200,
                bottom: 600
            }
        );
        assert_eq!(session.stage(), ScanStage::Cropped);
        assert!(session.cropped_path().unwrap().is_file());

        let document = session.export(Some("receipt")).await.unwrap();
        assert_eq!(session.stage(), ScanStage::Done);
        assert_eq!(document.path, tmp.path().join("scans").join("receipt.pdf"));
        assert_eq!((document.width, document.height), (1000, 500));
        assert_eq!(session.document(), Some(&document));

        let pdf = PdfInspector::open(&document.path).unwrap();
        assert_eq!(pdf.page_count(), 1);
        assert_eq!(pdf.page_pixel_size(1).unwrap(), (1000, 500));
    }

    #[tokio::test]
    async fn default_name_is_timestamped() {
        let tmp = tempfile::tempdir().unwrap();
        let mut session = captured(tmp.path()).await;
        session.confirm_crop().await.unwrap();

        let document = session.export(None).await.unwrap();

        assert!(document.file_name.starts_with("scan_"));
        assert_eq!(document.file_name.len(), "scan_YYYYMMDD_HHMMSS".len());
        assert!(document.path.is_file());
    }

    #[tokio::test]
    async fn drag_moves_the_grabbed_corner() {
        let tmp = tempfile::tempdir().unwrap();
        let mut session = captured(tmp.path()).await;
        session.update_corners(page_corners()).unwrap();

        session.drag(DragEvent::Start(DisplayPoint::new(110.0, 310.0))).unwrap();
        session.drag(DragEvent::Move { dx: -50.0, dy: -20.0 }).unwrap();
        session.drag(DragEvent::End).unwrap();

        assert_eq!(session.corners().get(0), Some(DisplayPoint::new(50.0, 280.0)));
        assert_eq!(session.corners().get(1), Some(DisplayPoint::new(600.0, 300.0)));
    }

    #[tokio::test]
    async fn out_of_order_steps_are_rejected_without_side_effects() {
        let tmp = tempfile::tempdir().unwrap();
        let mut session = session(tmp.path());

        let err = session.confirm_crop().await.unwrap_err();
        assert!(matches!(err, ScanError::InvalidTransition { action: "crop", .. }));
        assert_eq!(session.stage(), ScanStage::Idle);
        assert!(session.failure().is_none());

        assert!(session.update_corners(page_corners()).is_err());
        assert!(session.export(Some("early")).await.is_err());
        assert_eq!(session.stage(), ScanStage::Idle);
        assert!(!tmp.path().join("scans").join("early.pdf").exists());
    }

    #[tokio::test]
    async fn collapsed_corners_resume_at_adjusting() {
        let tmp = tempfile::tempdir().unwrap();
        let mut session = captured(tmp.path()).await;
        let line = CornerSet::from([DisplayPoint::new(100.0, 400.0); 4]);
        session.update_corners(line).unwrap();

        let err = session.confirm_crop().await.unwrap_err();

        assert!(matches!(err, ScanError::DegenerateRegion { .. }));
        let failure = session.failure().unwrap();
        assert_eq!(failure.kind, ScanErrorKind::DegenerateRegion);
        assert_eq!(failure.resume, ScanStage::Adjusting);
        assert!(failure.human.recoverable);

        session.update_corners(page_corners()).unwrap();
        assert!(session.failure().is_none());
        assert!(session.confirm_crop().await.is_ok());
    }

    #[tokio::test]
    async fn degenerate_viewport_is_invalid_geometry() {
        let tmp = tempfile::tempdir().unwrap();
        let mut session = captured(tmp.path()).await;
        session.set_viewport(Viewport::new(0.0, 0.0));

        let err = session.confirm_crop().await.unwrap_err();

        assert!(matches!(err, ScanError::InvalidGeometry(_)));
        assert_eq!(session.failure().unwrap().resume, ScanStage::Adjusting);
    }

    #[tokio::test]
    async fn bad_name_keeps_the_crop() {
        let tmp = tempfile::tempdir().unwrap();
        let mut session = captured(tmp.path()).await;
        session.confirm_crop().await.unwrap();

        let err = session.export(Some("  .pdf")).await.unwrap_err();

        assert!(matches!(err, ScanError::InvalidFileName(_)));
        assert_eq!(session.failure().unwrap().resume, ScanStage::Cropped);
        assert!(session.cropped_region().is_some());
        assert!(session.export(Some("fixed")).await.is_ok());
    }

    #[tokio::test]
    async fn export_io_failure_can_be_retried() {
        let tmp = tempfile::tempdir().unwrap();
        let scans = tmp.path().join("scans");
        // A directory on the target name makes the final rename fail.
        let squatter = scans.join("page.pdf");
        std::fs::create_dir_all(&squatter).unwrap();
        let mut session = captured(tmp.path()).await;
        session.confirm_crop().await.unwrap();

        let err = session.export(Some("page")).await.unwrap_err();
        assert!(matches!(err, ScanError::IoFailure(_)));
        assert_eq!(session.stage(), ScanStage::Error);
        assert_eq!(session.failure().unwrap().resume, ScanStage::Cropped);
        let names: Vec<String> = std::fs::read_dir(&scans)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["page.pdf".to_string()]);

        std::fs::remove_dir(&squatter).unwrap();
        let document = session.export(Some("page")).await.unwrap();
        assert!(document.path.is_file());
        assert_eq!(session.stage(), ScanStage::Done);
    }

    #[tokio::test]
    async fn reset_starts_over() {
        let tmp = tempfile::tempdir().unwrap();
        let mut session = captured(tmp.path()).await;
        session.confirm_crop().await.unwrap();
        session.export(Some("one")).await.unwrap();

        session.reset();

        assert_eq!(session.stage(), ScanStage::Idle);
        assert!(session.captured_size().is_none());
        assert!(session.document().is_none());
        // Exported files are kept.
        assert!(tmp.path().join("scans").join("one.pdf").is_file());
    }

    #[tokio::test]
    async fn preview_draws_over_the_capture() {
        let tmp = tempfile::tempdir().unwrap();
        let mut session = session(tmp.path());
        assert!(session.preview(&OverlayStyle::default()).is_err());

        let camera = Arc::new(FixedCamera(png(2000, 1000)));
        session.capture(camera).await.unwrap();
        let overlay = session.preview(&OverlayStyle::default()).unwrap();
        assert_eq!(overlay.dimensions(), (2000, 1000));
    }
}
