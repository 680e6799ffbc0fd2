// src/core/paths.rs

use crate::constants::{APP_DIR, CONFIG_FILENAME, IGNORE_FILENAME, TOKEN_FILENAME};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("onedrive-d may not be installed properly: '{0}' does not exist.")]
    NotInstalled(PathBuf),
    #[error("Could not create directory at '{path}': {source}")]
    DirCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not change owner of '{path}': {source}")]
    Chown {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The fixed file layout under `<home>/.onedrive/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub app_dir: PathBuf,
    pub config_file: PathBuf,
    pub token_file: PathBuf,
    pub ignore_file: PathBuf,
}

impl AppPaths {
    /// Computes the layout for a home directory without touching the filesystem.
    pub fn for_home(home: &Path) -> Self {
        let app_dir = home.join(APP_DIR);
        Self {
            config_file: app_dir.join(CONFIG_FILENAME),
            token_file: app_dir.join(TOKEN_FILENAME),
            ignore_file: app_dir.join(IGNORE_FILENAME),
            app_dir,
        }
    }

    /// Computes the layout and checks that the application directory exists.
    ///
    /// The directory is the install marker: it is created by setup, never here.
    pub fn resolve(home: &Path) -> Result<Self, PathError> {
        let paths = Self::for_home(home);
        if !paths.app_dir.is_dir() {
            return Err(PathError::NotInstalled(paths.app_dir));
        }
        Ok(paths)
    }
}

/// Hands ownership of `path` to `uid`, leaving the group unchanged.
#[cfg(unix)]
pub fn set_owner(path: &Path, uid: u32) -> Result<(), PathError> {
    std::os::unix::fs::chown(path, Some(uid), None).map_err(|e| PathError::Chown {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(not(unix))]
pub fn set_owner(_path: &Path, _uid: u32) -> Result<(), PathError> {
    Ok(())
}

/// Creates a single directory and hands it to `uid`. An existing directory is only
/// re-owned.
pub fn create_owned_dir(path: &Path, uid: u32) -> Result<(), PathError> {
    if !path.is_dir() {
        fs::create_dir(path).map_err(|e| PathError::DirCreation {
            path: path.display().to_string(),
            source: e,
        })?;
        log::debug!("Created directory '{}'", path.display());
    }
    set_owner(path, uid)
}
