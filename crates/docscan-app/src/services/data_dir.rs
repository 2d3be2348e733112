// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware data directory resolution.

use std::path::{Path, PathBuf};

use docscan_core::error::Result;

const APP_DIR: &str = "docscan";

/// Return the application data directory, creating it if needed.
///
/// An explicit `override_dir` wins. Otherwise a conventional per-user
/// location is used; on mobile the platform bridge should provide the app's
/// documents directory instead.
pub fn data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = match override_dir {
        Some(dir) => dir.to_path_buf(),
        None => dirs_fallback().join(APP_DIR),
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Return a subdirectory inside `base` (e.g. "scans", "captures").
pub fn data_subdir(base: &Path, name: &str) -> Result<PathBuf> {
    let dir = base.join(name);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn dirs_fallback() -> PathBuf {
    // Try XDG data dir, then fallback to home
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg);
    }
    if let Some(home) = std::env::var_os("HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(home).join(".local").join("share");
    }
    // Last resort
    PathBuf::from("/tmp")
}
