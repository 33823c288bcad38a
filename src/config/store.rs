//! Settings file load/save

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::document::{ConfigDocument, DecodeError};
use crate::constants;

/// Failure loading or saving the settings file
///
/// A missing file is not an error: [`ConfigStore::load`] returns defaults.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse settings file {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("failed to {op} settings file {}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reads and writes one settings file
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/caffeine/Caffeine.json`, or the working directory if
    /// the platform has no config dir
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(constants::config::APP_DIR);
        path.push(constants::config::FILENAME);
        path
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, or defaults if the file does not exist
    pub fn load(&self) -> Result<ConfigDocument, ConfigError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "Settings file not found, using defaults");
                return Ok(ConfigDocument::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    op: "read",
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let document = ConfigDocument::decode(&bytes).map_err(|source| ConfigError::Decode {
            path: self.path.clone(),
            source,
        })?;

        info!(
            path = %self.path.display(),
            mode = %document.mode,
            paths = document.auto.process_paths.len(),
            names = document.auto.process_names.len(),
            windows = document.auto.window_titles.len(),
            "Loaded settings"
        );
        Ok(document)
    }

    /// Write the document, replacing any existing file
    ///
    /// Goes through a sibling temp file and a rename, so a failed write
    /// leaves the previous file in place.
    pub fn save(&self, document: &ConfigDocument) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                    op: "create directory for",
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        let temp_path = self.temp_path();
        if let Err(source) = fs::write(&temp_path, document.encode()) {
            remove_temp_file(&temp_path);
            return Err(ConfigError::Io {
                op: "write",
                path: self.path.clone(),
                source,
            });
        }
        debug!(temp = %temp_path.display(), "Wrote temporary settings file");

        fs::rename(&temp_path, &self.path).map_err(|source| {
            remove_temp_file(&temp_path);
            ConfigError::Io {
                op: "replace",
                path: self.path.clone(),
                source,
            }
        })?;

        info!(path = %self.path.display(), mode = %document.mode, "Saved settings");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| constants::config::FILENAME.into());
        name.push(constants::config::TEMP_SUFFIX);
        self.path.with_file_name(name)
    }
}

/// Best-effort cleanup after a failed save; a temp file that was never created is fine
fn remove_temp_file(temp_path: &Path) {
    match fs::remove_file(temp_path) {
        Ok(()) => debug!(temp = %temp_path.display(), "Removed temporary settings file"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            warn!(temp = %temp_path.display(), error = %e, "Failed to remove temporary settings file")
        }
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}
