// Process-wide store behaviour. Kept in its own test binary, and in a single test,
// because the instance and the exit hooks are global to the process.

use onedrive_d::core::accounts::{Account, AccountDirectory, AccountError, UserSignals};
use onedrive_d::core::config_store::{InitError, InitMode};
use onedrive_d::state;
use onedrive_d::system::shutdown;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

struct FixedAccount(Account);

impl AccountDirectory for FixedAccount {
    fn lookup(&self, name: &str) -> Result<Account, AccountError> {
        if name == self.0.name {
            Ok(self.0.clone())
        } else {
            Err(AccountError::UnknownUser(name.to_string()))
        }
    }
}

#[cfg(unix)]
fn current_uid(path: &Path) -> u32 {
    use std::os::unix::fs::MetadataExt;
    fs::metadata(path).unwrap().uid()
}

#[cfg(not(unix))]
fn current_uid(_path: &Path) -> u32 {
    0
}

fn config_file(home: &Path) -> PathBuf {
    home.join(".onedrive").join("config_v2.json")
}

#[test]
fn test_singleton_lifecycle() {
    let home = TempDir::new().unwrap();
    let accounts = FixedAccount(Account {
        name: "alice".into(),
        uid: current_uid(home.path()),
        home: home.path().to_path_buf(),
    });
    let signals = UserSignals {
        sudo_user: Some("alice".into()),
        user: Some("root".into()),
    };

    // --- Nothing installed: fails, and nothing is cached or registered ---
    let result = state::try_get_instance(false, InitMode::Normal, &signals, &accounts);
    assert!(matches!(result, Err(InitError::Path(_))));
    assert!(state::instance().is_none());
    assert!(!shutdown::is_registered(shutdown::CONFIG_FLUSH_HOOK));

    // --- Installed, no config file: only setup mode gets through ---
    fs::create_dir(home.path().join(".onedrive")).unwrap();
    let result = state::try_get_instance(false, InitMode::Normal, &signals, &accounts);
    assert!(matches!(result, Err(InitError::ConfigMissing(_))));

    let first = state::try_get_instance(false, InitMode::Setup, &signals, &accounts).unwrap();
    assert!(shutdown::is_registered(shutdown::CONFIG_FLUSH_HOOK));

    // --- Idempotent: same instance, no re-initialization ---
    let second = state::try_get_instance(false, InitMode::Normal, &signals, &accounts).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    // --- Clean store: the exit flush writes nothing ---
    state::flush_instance_if_dirty();
    assert!(!config_file(home.path()).exists());

    // --- Mutate, then run the exit hooks: exactly one write ---
    state::lock(&first).set_root_path("/srv/od");
    assert!(state::lock(&first).is_dirty());
    shutdown::run_exit_hooks();

    assert!(config_file(home.path()).exists());
    assert!(!state::lock(&first).is_dirty());
    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config_file(home.path())).unwrap()).unwrap();
    assert_eq!(saved["ONEDRIVE_ROOT_PATH"], "/srv/od");

    // --- Forced re-initialization reads the saved file in normal mode ---
    let forced = state::try_get_instance(true, InitMode::Normal, &signals, &accounts).unwrap();
    assert!(!Arc::ptr_eq(&first, &forced));
    assert_eq!(state::lock(&forced).root_path(), Some(PathBuf::from("/srv/od")));
    assert!(Arc::ptr_eq(&state::instance().unwrap(), &forced));
}
