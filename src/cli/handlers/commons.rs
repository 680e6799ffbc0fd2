// src/cli/handlers/commons.rs

// Helpers shared by several handlers.

use anyhow::{Result, anyhow};
use log::LevelFilter;
use std::path::PathBuf;

use crate::{
    core::config_store::ConfigStore,
    models::ParamValue,
    state::{self, SharedStore},
    system::logging,
};

/// Loads the shared store, then sets up logging from its stored level and log file.
/// Logging already configured from the command line is left as it is.
pub fn open_store(setup_mode: bool) -> SharedStore {
    let shared = state::get_instance(false, setup_mode);
    let (level, file) = log_settings(&state::lock(&shared));
    logging::init(level, file.as_deref());
    shared
}

fn log_settings(store: &ConfigStore) -> (LevelFilter, Option<PathBuf>) {
    (store.min_log_level(), store.log_file_path())
}

/// Expands `~` and environment variables in a user-supplied path and canonicalizes
/// it. The directory must already exist.
pub fn resolve_existing_dir(input: &str) -> Result<PathBuf> {
    let expanded = expand_path(input)?;
    if !expanded.is_dir() {
        return Err(anyhow!("'{}' is not an existing directory.", expanded.display()));
    }
    Ok(dunce::canonicalize(&expanded)?)
}

/// Expands `~` and environment variables without touching the filesystem.
pub fn expand_path(input: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(input.trim())
        .map_err(|e| anyhow!("Failed to expand path '{}': {}", input, e))?;
    Ok(PathBuf::from(expanded.into_owned()))
}

/// Renders a parameter value the way it is stored on disk.
pub fn render_value(value: &ParamValue) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "<unprintable>".to_string())
}
