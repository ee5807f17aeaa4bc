//! Config directory layout

use std::io;
use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_DIR_ENV_VAR, CONFIG_DIR_NAME, CONFIG_FILE_NAME, LOG_FILE_NAME, REQUESTS_FILE_NAME,
};

/// Locations of the settings, saved requests and log files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    dir: PathBuf,
}

impl Paths {
    /// Uses `$REQKIT_HOME` when set, otherwise `~/.reqkit`.
    pub fn new() -> io::Result<Self> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV_VAR).filter(|v| !v.is_empty()) {
            return Ok(Self::from_dir(dir));
        }
        let home_dir = dirs::home_dir().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "could not find home directory")
        })?;
        Ok(Self::from_dir(home_dir.join(CONFIG_DIR_NAME)))
    }

    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the config directory (~/.reqkit).
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the output settings file (~/.reqkit/config.yaml).
    pub fn config_file(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE_NAME)
    }

    /// Returns the saved requests file (~/.reqkit/requests.yaml).
    pub fn requests_file(&self) -> PathBuf {
        self.dir.join(REQUESTS_FILE_NAME)
    }

    pub fn log_file(&self) -> PathBuf {
        self.dir.join(LOG_FILE_NAME)
    }

    /// Creates the config directory if it doesn't exist.
    pub fn ensure_dir(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)
    }
}
