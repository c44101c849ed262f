//! File-backed persistence of the label configuration.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::{CycleConfig, EXPORT_FILE_PREFIX, ImportError};

/// Error type for reading and writing label files.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    /// An imported file could not be parsed.
    #[error("Cannot import {}: {source}", path.display())]
    Import {
        path:   PathBuf,
        #[source]
        source: ImportError,
    },
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A JSON settings file holding one [`CycleConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored configuration.
    ///
    /// A missing file yields the defaults. An unreadable or malformed file
    /// also yields the defaults (with a warning) so startup never fails.
    pub fn load(&self) -> CycleConfig {
        let defaults = CycleConfig::defaults();
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file, using defaults");
                return defaults;
            },
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read settings, using defaults");
                return defaults;
            },
        };
        match CycleConfig::parse(&text) {
            Ok(raw) => CycleConfig::normalize(&raw, &defaults),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring malformed settings");
                defaults
            },
        }
    }

    /// Writes `config`, replacing the file only once the new content is on disk.
    ///
    /// # Errors
    /// Returns `StoreError::Io` if the directory or file cannot be written.
    pub fn save(&self, config: &CycleConfig) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, config.to_json()).map_err(|e| StoreError::io(&staging, e))?;
        fs::rename(&staging, &self.path).map_err(|e| StoreError::io(&self.path, e))?;
        debug!(path = %self.path.display(), "saved settings");
        Ok(())
    }

    /// Reads and normalizes a label file without storing it.
    ///
    /// # Errors
    /// Returns `StoreError::Io` if the file cannot be read and
    /// `StoreError::Import` if it is not a label mapping.
    pub fn read_import(path: &Path) -> Result<CycleConfig, StoreError> {
        let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        CycleConfig::import(&text, &CycleConfig::defaults()).map_err(|source| StoreError::Import {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overwrites the stored file with the built-in labels.
    ///
    /// # Errors
    /// Returns `StoreError::Io` if the file cannot be written.
    pub fn reset(&self) -> Result<CycleConfig, StoreError> {
        let defaults = CycleConfig::defaults();
        self.save(&defaults)?;
        info!(path = %self.path.display(), "reset labels to defaults");
        Ok(defaults)
    }

    /// Replaces the stored labels with the contents of `source`.
    ///
    /// Nothing is written unless `source` parses.
    ///
    /// # Errors
    /// Returns `StoreError::Import` for a malformed payload and
    /// `StoreError::Io` if either file cannot be accessed.
    pub fn import(&self, source: &Path) -> Result<CycleConfig, StoreError> {
        let config = Self::read_import(source)?;
        self.save(&config)?;
        info!(from = %source.display(), path = %self.path.display(), "imported labels");
        Ok(config)
    }

    /// Writes `config` into `dir` under a timestamped name and returns the path.
    ///
    /// # Errors
    /// Returns `StoreError::Io` if the file cannot be written.
    pub fn export(config: &CycleConfig, dir: &Path, now: NaiveDateTime) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
        let path = dir.join(export_file_name(now));
        fs::write(&path, config.to_json()).map_err(|e| StoreError::io(&path, e))?;
        info!(path = %path.display(), "exported labels");
        Ok(path)
    }
}

/// `cycle-labels-YYYYMMDD-HHMMSS.json`
pub fn export_file_name(now: NaiveDateTime) -> String {
    format!("{EXPORT_FILE_PREFIX}-{}.json", now.format("%Y%m%d-%H%M%S"))
}
