// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Saved-scan library — list, open, and delete the PDFs in the scans
// directory.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use docscan_bridge::NativeViewer;
use docscan_core::error::{Result, ScanError};
use docscan_core::{PDF_EXTENSION, PDF_MIME_TYPE, ScanEntry};
use docscan_document::pdf::writer::normalize_file_name;
use tracing::{debug, info, instrument, warn};

/// In-memory view of the scans directory.
///
/// The listing is a snapshot: call [`ScanLibrary::refresh`] after scans are
/// added from elsewhere.
pub struct ScanLibrary {
    dir: PathBuf,
    entries: Vec<ScanEntry>,
}

#[allow(dead_code)]
impl ScanLibrary {
    /// Open the library rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        let entries = list_scans(&dir)?;
        Ok(Self { dir, entries })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Saved scans, newest first.
    pub fn entries(&self) -> &[ScanEntry] {
        &self.entries
    }

    /// Re-read the directory.
    pub fn refresh(&mut self) -> Result<&[ScanEntry]> {
        self.entries = list_scans(&self.dir)?;
        Ok(&self.entries)
    }

    /// Look a scan up by name (with or without `.pdf`).
    pub fn find(&self, name: &str) -> Option<&ScanEntry> {
        let stem = normalize_file_name(name).ok()?;
        self.entries.iter().find(|e| e.file_name == stem)
    }

    /// Delete the scan called `name` from disk and from the listing.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn delete(&mut self, name: &str) -> Result<ScanEntry> {
        let stem = normalize_file_name(name)?;
        let path = self.path_for(&stem);

        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                // Gone already: drop any stale entry before reporting.
                self.entries.retain(|e| e.file_name != stem);
                return Err(ScanError::NotFound(stem));
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not delete scan");
                return Err(err.into());
            }
        }

        let removed = match self.entries.iter().position(|e| e.file_name == stem) {
            Some(index) => self.entries.remove(index),
            None => ScanEntry {
                file_name: stem,
                path,
                size_bytes: 0,
                modified: None,
            },
        };
        info!(name = %removed.file_name, "scan deleted");
        Ok(removed)
    }

    /// Hand the scan called `name` to the platform's PDF viewer.
    #[instrument(skip(self, viewer))]
    pub fn open_in_viewer<V>(&self, name: &str, viewer: &V) -> Result<PathBuf>
    where
        V: NativeViewer + ?Sized,
    {
        let stem = normalize_file_name(name)?;
        let path = self.path_for(&stem);
        if !path.is_file() {
            return Err(ScanError::NotFound(stem));
        }
        viewer.open_document(&path, PDF_MIME_TYPE)?;
        debug!(path = %path.display(), "scan handed to viewer");
        Ok(path)
    }

    /// Listed path for `stem`, which keeps the extension's original case.
    fn path_for(&self, stem: &str) -> PathBuf {
        self.entries
            .iter()
            .find(|e| e.file_name == stem)
            .map(|e| e.path.clone())
            .unwrap_or_else(|| self.dir.join(format!("{stem}.{PDF_EXTENSION}")))
    }
}

/// Every regular `.pdf` file directly inside `dir` (extension matched
/// case-insensitively), newest first, then by name.
///
/// A missing directory lists as empty.
pub fn list_scans(dir: &Path) -> Result<Vec<ScanEntry>> {
    let read = match std::fs::read_dir(dir) {
        Ok(read) => read,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let mut entries = Vec::new();
    for item in read {
        let item = item?;
        let path = item.path();
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(PDF_EXTENSION));
        if !is_pdf {
            continue;
        }
        let metadata = match item.metadata() {
            Ok(metadata) if metadata.is_file() => metadata,
            Ok(_) => continue,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        entries.push(ScanEntry {
            file_name: stem,
            size_bytes: metadata.len(),
            modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            path,
        });
    }

    entries.sort_by(|a, b| {
        b.modified
            .cmp(&a.modified)
            .then_with(|| a.file_name.cmp(&b.file_name))
    });
    debug!(dir = %dir.display(), count = entries.len(), "scans listed");
    Ok(entries)
}
