// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF exporter — wrap one cropped raster as a single PDF page using
// `printpdf` 0.8 and persist it atomically into the scans directory.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use std::io::Write;
use std::path::PathBuf;

use docscan_core::error::ScanError;
use docscan_core::{PDF_EXTENSION, ScanDocument};
use image::DynamicImage;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use crate::integrity::hash_bytes;

/// One PDF unit per pixel: images placed at 72 DPI keep their pixel size.
const PIXELS_PER_INCH: f32 = 72.0;

/// Writes single-page scan PDFs into a fixed directory.
pub struct PdfExporter {
    /// Destination directory for exported scans (created on demand).
    scans_dir: PathBuf,
}

impl PdfExporter {
    pub fn new(scans_dir: impl Into<PathBuf>) -> Self {
        Self {
            scans_dir: scans_dir.into(),
        }
    }

    // -- Rendering ------------------------------------------------------------

    /// Serialise `raster` as a one-page PDF whose page is exactly the raster's
    /// pixel size, with the raster drawn unscaled at the origin.
    ///
    /// Samples are embedded as raw RGB8 (alpha dropped); no lossy re-encoding
    /// takes place.
    #[instrument(skip(raster), fields(width = raster.width(), height = raster.height()))]
    pub fn render(raster: &DynamicImage, title: &str) -> Vec<u8> {
        let width = raster.width();
        let height = raster.height();

        let rgb = raster.to_rgb8();
        let raw = RawImage {
            pixels: RawImageData::U8(rgb.into_raw()),
            width: width as usize,
            height: height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };

        let mut doc = PdfDocument::new(title);
        let xobject_id = doc.add_image(&raw);

        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(0.0)),
                translate_y: Some(Pt(0.0)),
                scale_x: Some(unit_scale(width)),
                scale_y: Some(unit_scale(height)),
                dpi: Some(PIXELS_PER_INCH),
                rotate: None,
            },
        }];

        let page = PdfPage::new(
            Mm::from(Pt(width as f32)),
            Mm::from(Pt(height as f32)),
            ops,
        );
        doc.with_pages(vec![page]);

        // Keep the samples exactly as captured.
        let options = PdfSaveOptions {
            image_optimization: None,
            ..PdfSaveOptions::default()
        };
        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&options, &mut warnings);

        if !warnings.is_empty() {
            debug!(count = warnings.len(), "printpdf reported warnings");
        }
        debug!(bytes = output.len(), "Scan page rendered");
        output
    }

    // -- File output ----------------------------------------------------------

    /// Render `raster` and write it to `<scans_dir>/<file_name>.pdf`.
    ///
    /// The bytes go to a temporary file in the scans directory first and are
    /// renamed into place, so a failed or abandoned export never leaves a
    /// partial PDF under the final name. An existing scan of the same name is
    /// replaced.
    #[instrument(skip(self, raster), fields(dir = %self.scans_dir.display()))]
    pub fn export(&self, raster: &DynamicImage, file_name: &str) -> Result<ScanDocument, ScanError> {
        let stem = normalize_file_name(file_name)?;
        let path = self.scans_dir.join(format!("{stem}.{PDF_EXTENSION}"));

        let bytes = Self::render(raster, &stem);

        std::fs::create_dir_all(&self.scans_dir)?;
        let mut tmp = tempfile::Builder::new()
            .prefix(".export-")
            .suffix(".pdf.part")
            .tempfile_in(&self.scans_dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|err| {
            warn!(path = %path.display(), error = %err.error, "Could not move PDF into place");
            ScanError::IoFailure(err.error)
        })?;

        let document = ScanDocument {
            file_name: stem,
            path,
            width: raster.width(),
            height: raster.height(),
            sha256: hash_bytes(&bytes),
            size_bytes: bytes.len() as u64,
        };
        info!(
            path = %document.path.display(),
            width = document.width,
            height = document.height,
            sha256 = %document.sha256,
            "Scan exported"
        );
        Ok(document)
    }
}

/// Extra scale that brings an image of `pixels` placed at [`PIXELS_PER_INCH`]
/// back to exactly `pixels` PDF units.
///
/// printpdf sizes images through millimetres in `f32`, which lands a few ulps
/// off (`997.0001` for 997 px). The product of that size and this factor
/// rounds to the whole pixel count.
fn unit_scale(pixels: u32) -> f32 {
    let target = pixels as f32;
    let drawn = Pt::from(Mm(target * (25.4 / PIXELS_PER_INCH))).0;
    target / drawn
}

/// Validate a user-supplied scan name and strip any `.pdf` suffix.
///
/// Names must be non-empty and must not escape the scans directory.
pub fn normalize_file_name(file_name: &str) -> Result<String, ScanError> {
    let trimmed = file_name.trim();
    let lower = trimmed.to_ascii_lowercase();
    let stem = match lower.strip_suffix(".pdf") {
        Some(rest) => trimmed[..rest.len()].trim_end(),
        None => trimmed,
    };

    let invalid = stem.is_empty()
        || stem == "."
        || stem == ".."
        || stem.contains(['/', '\\', '\0']);
    if invalid {
        return Err(ScanError::InvalidFileName(file_name.to_owned()));
    }
    Ok(stem.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::reader::PdfInspector;
    use image::{Rgb, RgbImage};

    fn sample(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 3) as u8, (y * 5) as u8, 128])
        }))
    }

    #[test]
    fn names_are_normalised() {
        assert_eq!(normalize_file_name("  receipt ").unwrap(), "receipt");
        assert_eq!(normalize_file_name("receipt.PDF").unwrap(), "receipt");
        assert_eq!(normalize_file_name("report.v2").unwrap(), "report.v2");
    }

    #[test]
    fn unsafe_names_are_rejected() {
        for bad in ["", "   ", ".pdf", "../escape", "a/b", "a\\b", "..", "nul\0byte"] {
            assert!(
                matches!(normalize_file_name(bad), Err(ScanError::InvalidFileName(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn page_matches_raster_pixels() {
        let bytes = PdfExporter::render(&sample(120, 45), "page-size");
        let pdf = PdfInspector::from_bytes(&bytes).unwrap();
        assert_eq!(pdf.page_count(), 1);
        assert_eq!(pdf.page_pixel_size(1).unwrap(), (120, 45));
        assert_eq!(pdf.image_sizes(), vec![(120, 45)]);
    }

    #[test]
    fn image_is_drawn_at_exact_pixel_size() {
        for (width, height) in [(997, 1531), (120, 45), (1, 1)] {
            let bytes = PdfExporter::render(&sample(width, height), "exact");
            let pdf = PdfInspector::from_bytes(&bytes).unwrap();
            let transforms = pdf.draw_transforms(1).unwrap();
            assert_eq!(
                transforms,
                vec![[width as f32, 0.0, 0.0, height as f32, 0.0, 0.0]],
                "{width}x{height}"
            );
        }
    }

    #[test]
    fn unit_scale_cancels_millimetre_rounding() {
        for pixels in [1, 45, 997, 1531, 3024, 4032, 12000] {
            let drawn = Pt::from(Mm(pixels as f32 * (25.4 / PIXELS_PER_INCH))).0;
            assert_eq!(drawn * unit_scale(pixels), pixels as f32, "{pixels} px");
        }
    }

    #[test]
    fn export_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let scans = dir.path().join("nested").join("scans");
        let exporter = PdfExporter::new(&scans);

        let doc = exporter.export(&sample(64, 32), "invoice.pdf").unwrap();

        assert_eq!(doc.file_name, "invoice");
        assert_eq!(doc.path, scans.join("invoice.pdf"));
        assert_eq!((doc.width, doc.height), (64, 32));
        let on_disk = std::fs::read(&doc.path).unwrap();
        assert_eq!(on_disk.len() as u64, doc.size_bytes);
        assert_eq!(hash_bytes(&on_disk), doc.sha256);
    }

    #[test]
    fn export_leaves_no_temporary_files() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = PdfExporter::new(dir.path());
        exporter.export(&sample(8, 8), "one").unwrap();
        exporter.export(&sample(9, 9), "one").unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["one.pdf".to_string()]);

        let pdf = PdfInspector::open(dir.path().join("one.pdf")).unwrap();
        assert_eq!(pdf.page_pixel_size(1).unwrap(), (9, 9));
    }

    #[test]
    fn unwritable_destination_is_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the scans directory should be.
        let blocker = dir.path().join("scans");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let err = PdfExporter::new(&blocker)
            .export(&sample(4, 4), "blocked")
            .unwrap_err();
        assert!(matches!(err, ScanError::IoFailure(_)));
    }

    #[test]
    fn failed_rename_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory squatting on the final name makes the rename fail.
        std::fs::create_dir(dir.path().join("blocked.pdf")).unwrap();

        let err = PdfExporter::new(dir.path())
            .export(&sample(4, 4), "blocked")
            .unwrap_err();

        assert!(matches!(err, ScanError::IoFailure(_)));
        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["blocked.pdf".to_string()]);
        assert!(dir.path().join("blocked.pdf").is_dir());
    }
}
