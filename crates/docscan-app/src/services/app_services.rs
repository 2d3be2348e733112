// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — resolves storage locations, loads the persisted
// config, and hands out scan sessions and the scan library.

use std::io::Write;
use std::path::{Path, PathBuf};

use docscan_core::ScanConfig;
use docscan_core::error::{Result, ScanError};
use tracing::{info, warn};

use super::data_dir;
use super::scan_library::ScanLibrary;
use crate::session::{ScanPaths, ScanSession};

/// Storage layout and settings shared by every command.
#[derive(Debug, Clone)]
pub struct AppServices {
    data_dir: PathBuf,
    scans_dir: PathBuf,
    captures_dir: PathBuf,
    config: ScanConfig,
}

#[allow(dead_code)]
impl AppServices {
    /// Initialise services. Call once at startup.
    ///
    /// Creates the data directory and its `scans`/`captures` subdirectories
    /// and loads `config.json`, falling back to defaults when it is missing
    /// or unreadable.
    pub fn init(override_dir: Option<&Path>) -> Result<Self> {
        let dir = data_dir::data_dir(override_dir)?;
        info!(path = %dir.display(), "initialising app services");

        let config = load_config(&dir).unwrap_or_default();
        let scans_dir = data_dir::data_subdir(&dir, &config.scans_dir_name)?;
        let captures_dir = data_dir::data_subdir(&dir, &config.captures_dir_name)?;

        Ok(Self {
            data_dir: dir,
            scans_dir,
            captures_dir,
            config,
        })
    }

    /// Start a new scan flow with the current settings.
    pub fn new_session(&self) -> ScanSession {
        ScanSession::new(
            self.config.clone(),
            ScanPaths {
                captures_dir: self.captures_dir.clone(),
                scans_dir: self.scans_dir.clone(),
            },
        )
    }

    /// Open the library of saved scans.
    pub fn library(&self) -> Result<ScanLibrary> {
        ScanLibrary::open(&self.scans_dir)
    }

    // -- Config Persistence --------------------------------------------------

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Update and persist the config.
    pub fn save_config(&mut self, config: ScanConfig) -> Result<()> {
        persist_config(&self.data_dir, &config)?;
        self.config = config;
        Ok(())
    }

    // -- Paths ---------------------------------------------------------------

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn scans_dir(&self) -> &Path {
        &self.scans_dir
    }

    pub fn captures_dir(&self) -> &Path {
        &self.captures_dir
    }
}

// -- Config file persistence -------------------------------------------------

const CONFIG_FILE: &str = "config.json";

fn load_config(data_dir: &Path) -> Option<ScanConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = match std::fs::read_to_string(&path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read config");
            return None;
        }
    };
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            None
        }
    }
}

/// Write `config.json` through a temporary file in the same directory, so
/// an interrupted save keeps the previous config intact.
fn persist_config(data_dir: &Path, config: &ScanConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".config-")
        .suffix(".json.part")
        .tempfile_in(data_dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(&path).map_err(|err| {
        warn!(path = %path.display(), error = %err.error, "could not move config into place");
        ScanError::IoFailure(err.error)
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docscan_core::FineTuneOffset;

    #[test]
    fn init_creates_layout_with_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let services = AppServices::init(Some(tmp.path())).unwrap();

        assert_eq!(services.config(), &ScanConfig::default());
        assert!(services.scans_dir().is_dir());
        assert!(services.captures_dir().is_dir());
        assert!(services.library().unwrap().entries().is_empty());
    }

    #[test]
    fn saved_config_is_loaded_next_time() {
        let tmp = tempfile::tempdir().unwrap();
        let mut services = AppServices::init(Some(tmp.path())).unwrap();
        let config = ScanConfig {
            fine_tune: FineTuneOffset::NONE,
            handle_radius: 64.0,
            ..ScanConfig::default()
        };
        services.save_config(config.clone()).unwrap();

        let reloaded = AppServices::init(Some(tmp.path())).unwrap();
        assert_eq!(reloaded.config(), &config);
    }

    #[test]
    fn corrupt_config_falls_back_to_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "{ not json").unwrap();
        let services = AppServices::init(Some(tmp.path())).unwrap();
        assert_eq!(services.config(), &ScanConfig::default());
    }

    #[test]
    fn unreadable_config_path_falls_back_to_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join(CONFIG_FILE)).unwrap();
        let services = AppServices::init(Some(tmp.path())).unwrap();
        assert_eq!(services.config(), &ScanConfig::default());
    }

    #[test]
    fn save_replaces_config_without_leftovers() {
        let tmp = tempfile::tempdir().unwrap();
        let mut services = AppServices::init(Some(tmp.path())).unwrap();
        services
            .save_config(ScanConfig {
                handle_radius: 10.0,
                ..ScanConfig::default()
            })
            .unwrap();
        let config = ScanConfig {
            handle_radius: 20.0,
            ..ScanConfig::default()
        };
        services.save_config(config.clone()).unwrap();

        let stray: Vec<String> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with(".config-"))
            .collect();
        assert!(stray.is_empty(), "{stray:?}");
        let on_disk = std::fs::read_to_string(tmp.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(serde_json::from_str::<ScanConfig>(&on_disk).unwrap(), config);
    }

    #[test]
    fn failed_save_keeps_previous_config() {
        let tmp = tempfile::tempdir().unwrap();
        let mut services = AppServices::init(Some(tmp.path())).unwrap();
        let before = services.config().clone();
        std::fs::create_dir(tmp.path().join(CONFIG_FILE)).unwrap();

        let err = services
            .save_config(ScanConfig {
                handle_radius: 99.0,
                ..ScanConfig::default()
            })
            .unwrap_err();

        assert!(matches!(err, ScanError::IoFailure(_)));
        assert_eq!(services.config(), &before);
        let names: Vec<String> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with(".config-"))
            .collect();
        assert!(names.is_empty(), "{names:?}");
    }
}
