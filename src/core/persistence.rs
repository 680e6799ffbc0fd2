// src/core/persistence.rs

//! JSON file I/O for the parameter and session files.

use crate::models::ParameterSet;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Filesystem Error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON in '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to replace '{path}': {source}")]
    Replace {
        path: String,
        #[source]
        source: tempfile::PersistError,
    },
    #[error("Path error: {0}")]
    Path(#[from] crate::core::paths::PathError),
}

type PersistResult<T> = Result<T, PersistError>;

/// Reads and deserializes a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> PersistResult<T> {
    let content = fs::read_to_string(path).map_err(|e| PersistError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| PersistError::Json {
        path: path.display().to_string(),
        source: e,
    })
}

/// Reads the parameter file. Anything other than a JSON object is rejected.
pub fn load_parameters(path: &Path) -> PersistResult<ParameterSet> {
    read_json(path)
}

/// Serializes `value` as JSON and atomically replaces `path` with it.
///
/// The data is written to a temporary file in the same directory and then renamed
/// over the target, so a crash mid-write leaves the previous file intact. The
/// replacement takes over the mode and group of the file it replaces; a new file
/// keeps the temporary file's private mode.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> PersistResult<()> {
    let io_err = |e: std::io::Error| PersistError::Io {
        path: path.display().to_string(),
        source: e,
    };
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let temp = NamedTempFile::new_in(dir).map_err(io_err)?;
    if let Ok(previous) = fs::metadata(path) {
        temp.as_file()
            .set_permissions(previous.permissions())
            .map_err(io_err)?;
        keep_group(temp.as_file(), &previous, path);
    }
    {
        let mut writer = BufWriter::new(temp.as_file());
        serde_json::to_writer(&mut writer, value).map_err(|e| PersistError::Json {
            path: path.display().to_string(),
            source: e,
        })?;
        writer.flush().map_err(io_err)?;
    }
    temp.persist(path).map_err(|e| PersistError::Replace {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(())
}

/// Gives `file` the group of `previous`. Only the owner of a group (or root) may do
/// this, so a refusal is logged and the write goes ahead.
#[cfg(unix)]
fn keep_group(file: &fs::File, previous: &fs::Metadata, path: &Path) {
    use std::os::unix::fs::{MetadataExt, fchown};

    let gid = previous.gid();
    if file.metadata().is_ok_and(|meta| meta.gid() == gid) {
        return;
    }
    if let Err(e) = fchown(file, None, Some(gid)) {
        log::warn!("Could not keep group {} on '{}': {}", gid, path.display(), e);
    }
}

#[cfg(not(unix))]
fn keep_group(_file: &fs::File, _previous: &fs::Metadata, _path: &Path) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParamValue;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_load_parameters_from_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config_v2.json");
        fs::write(&path, r#"{"NUM_OF_WORKERS": 8, "CUSTOM_KEY": "x"}"#).unwrap();

        let params = load_parameters(&path).unwrap();
        assert_eq!(params.get("NUM_OF_WORKERS"), Some(&ParamValue::Integer(8)));
        assert_eq!(params.get("CUSTOM_KEY"), Some(&ParamValue::from("x")));
    }

    #[test]
    fn test_load_parameters_rejects_non_objects_and_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config_v2.json");

        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(load_parameters(&path), Err(PersistError::Json { .. })));

        fs::write(&path, "{not json").unwrap();
        assert!(matches!(load_parameters(&path), Err(PersistError::Json { .. })));
    }

    #[test]
    fn test_load_parameters_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = load_parameters(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(PersistError::Io { .. })));
    }

    #[test]
    fn test_write_json_atomic_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "old").unwrap();

        write_json_atomic(&path, &json!({"access_token": "AT"})).unwrap();

        let back: serde_json::Value = read_json(&path).unwrap();
        assert_eq!(back, json!({"access_token": "AT"}));
        // Only the target remains; the temporary file was renamed away.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_json_atomic_keeps_mode_and_group() {
        use std::os::unix::fs::{MetadataExt, PermissionsExt};

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config_v2.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        let before = fs::metadata(&path).unwrap();

        write_json_atomic(&path, &json!({"NUM_OF_WORKERS": 8})).unwrap();

        let after = fs::metadata(&path).unwrap();
        assert_ne!(after.ino(), before.ino());
        assert_eq!(after.mode() & 0o777, 0o644);
        assert_eq!(after.gid(), before.gid());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_json_atomic_new_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        write_json_atomic(&path, &json!(null)).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_write_json_atomic_into_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("session.json");
        assert!(matches!(
            write_json_atomic(&path, &json!(null)),
            Err(PersistError::Io { .. })
        ));
    }
}
