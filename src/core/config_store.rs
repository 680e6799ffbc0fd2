// src/core/config_store.rs

//! # Config Store
//!
//! `ConfigStore` owns everything the client persists between runs: the parameter
//! map (`config_v2.json`) and the OAuth session (`session.json`). It also owns the
//! values resolved once at start-up: the OS account, the file layout, the previous
//! run's timestamp and the ignore list.
//!
//! Every mutator sets a single dirty flag. Nothing is written until `dump` (or
//! `flush_if_dirty`) is called; the binary does that once, on exit.

use crate::core::{
    accounts::{self, Account, AccountDirectory, AccountError, UserSignals},
    clock,
    ignore_list::IgnoreList,
    parameters::{self, Param},
    paths::{self, AppPaths, PathError},
    persistence::{self, PersistError},
    token_store::{TokenError, TokenStore},
};
use crate::models::{ParamValue, ParameterSet, TokenRecord, TokenResponse};
use crate::system::logging;
use chrono::{DateTime, Utc};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Start-up failures. Each one is fatal for a normal run.
#[derive(Error, Debug)]
pub enum InitError {
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("onedrive-d config file '{0}' does not exist. Run setup first.")]
    ConfigMissing(PathBuf),
    #[error("Path to local OneDrive repo is not set.")]
    RootPathUnset,
}

/// How strict initialization is.
///
/// `Setup` is used by the first-run flow, which is what creates the config file and
/// picks the root path; the checks for both are skipped and no ignore list is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitMode {
    #[default]
    Normal,
    Setup,
}

#[derive(Debug)]
pub struct ConfigStore {
    account: Account,
    paths: AppPaths,
    params: ParameterSet,
    tokens: TokenStore,
    last_run: DateTime<Utc>,
    ignore_list: Option<IgnoreList>,
    dirty: bool,
}

impl ConfigStore {
    /// Resolves the OS account from `signals` and loads its configuration.
    pub fn initialize(
        signals: &UserSignals,
        directory: &dyn AccountDirectory,
        mode: InitMode,
    ) -> Result<Self, InitError> {
        let account = accounts::resolve_account(signals, directory)?;
        Self::initialize_for(account, mode)
    }

    /// Loads the configuration of an already resolved account.
    pub fn initialize_for(account: Account, mode: InitMode) -> Result<Self, InitError> {
        let paths = AppPaths::resolve(&account.home)?;

        let params = if paths.config_file.exists() {
            match persistence::load_parameters(&paths.config_file) {
                Ok(loaded) => parameters::merge_over_defaults(loaded),
                Err(e) => {
                    log::info!(
                        "Fail to read config file '{}' ({}). Use default.",
                        paths.config_file.display(),
                        e
                    );
                    parameters::defaults()
                }
            }
        } else if mode == InitMode::Normal {
            return Err(InitError::ConfigMissing(paths.config_file));
        } else {
            parameters::defaults()
        };

        let root_unset = params
            .get(Param::RootPath.key())
            .is_none_or(ParamValue::is_null);
        if root_unset && mode == InitMode::Normal {
            return Err(InitError::RootPathUnset);
        }
        let root_path = params
            .get(Param::RootPath.key())
            .and_then(ParamValue::as_str)
            .map(PathBuf::from);

        let last_run = read_last_run(&params);

        let ignore_list = match (&root_path, mode) {
            (Some(root), InitMode::Normal) => load_ignore_list(&paths.ignore_file, root),
            _ => None,
        };

        let tokens = TokenStore::new(paths.token_file.clone());
        log::info!("Loading configuration ... OK");

        Ok(Self {
            account,
            paths,
            params,
            tokens,
            last_run,
            ignore_list,
            dirty: false,
        })
    }

    // --- Read-only state ---

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    pub fn ignore_list(&self) -> Option<&IgnoreList> {
        self.ignore_list.as_ref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Raw lookup by key, including keys unknown to this version.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    // --- Typed parameters ---
    //
    // A value of the wrong type in the file reads as the compiled default.

    fn int_param(&self, p: Param) -> i64 {
        self.params
            .get(p.key())
            .and_then(ParamValue::as_i64)
            .or_else(|| p.default_value().as_i64())
            .unwrap_or_default()
    }

    fn bool_param(&self, p: Param) -> bool {
        self.params
            .get(p.key())
            .and_then(ParamValue::as_bool)
            .or_else(|| p.default_value().as_bool())
            .unwrap_or_default()
    }

    fn path_param(&self, p: Param) -> Option<PathBuf> {
        self.params
            .get(p.key())
            .and_then(ParamValue::as_str)
            .map(PathBuf::from)
    }

    pub fn root_path(&self) -> Option<PathBuf> {
        self.path_param(Param::RootPath)
    }

    pub fn num_of_workers(&self) -> i64 {
        self.int_param(Param::NumOfWorkers)
    }

    pub fn network_error_retry_interval(&self) -> i64 {
        self.int_param(Param::NetworkErrorRetryInterval)
    }

    pub fn deep_scan_interval(&self) -> i64 {
        self.int_param(Param::DeepScanInterval)
    }

    pub fn bits_file_min_size(&self) -> i64 {
        self.int_param(Param::BitsFileMinSize)
    }

    pub fn bits_block_size(&self) -> i64 {
        self.int_param(Param::BitsBlockSize)
    }

    pub fn use_gui(&self) -> bool {
        self.bool_param(Param::UseGui)
    }

    pub fn min_log_level(&self) -> LevelFilter {
        logging::level_from_numeric(self.int_param(Param::MinLogLevel))
    }

    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.path_param(Param::LogFilePath)
    }

    /// When the previous run finished, as loaded at start-up. `set_last_run_timestamp`
    /// only affects what the next run will see.
    pub fn last_run_timestamp(&self) -> DateTime<Utc> {
        self.last_run
    }

    // --- Mutators ---

    pub fn set_root_path(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_string_lossy().into_owned();
        log::debug!("Setting root path to '{}'", path);
        self.params.insert(Param::RootPath.key(), path);
        self.dirty = true;
    }

    pub fn set_last_run_timestamp(&mut self) {
        self.set_last_run_timestamp_at(clock::now());
    }

    pub fn set_last_run_timestamp_at(&mut self, t: DateTime<Utc>) {
        self.params
            .insert(Param::LastRunTimestamp.key(), clock::time_to_str(&t));
        self.dirty = true;
    }

    // --- Tokens ---

    pub fn get_access_token(&mut self) -> Option<&TokenRecord> {
        self.tokens.get_access_token()
    }

    pub fn is_token_expired(&self) -> Result<bool, TokenError> {
        self.tokens.is_token_expired()
    }

    pub fn is_token_expired_at(&self, now: DateTime<Utc>) -> Result<bool, TokenError> {
        self.tokens.is_token_expired_at(now)
    }

    pub fn set_access_token(&mut self, response: TokenResponse) {
        self.set_access_token_at(response, clock::now());
    }

    pub fn set_access_token_at(&mut self, response: TokenResponse, now: DateTime<Utc>) {
        self.tokens.set_access_token_at(response, now);
        self.dirty = true;
    }

    // --- Persistence ---

    /// Writes both files and hands them to the account's uid.
    ///
    /// Failures are logged, never returned. The dirty flag is cleared only when every
    /// step succeeded.
    pub fn dump(&mut self) -> bool {
        // A session that was never read this run must not be overwritten with `null`.
        self.tokens.get_access_token();

        match self.save() {
            Ok(()) => {
                self.dirty = false;
                log::debug!("config saved.");
                true
            }
            Err(e) => {
                log::warn!("failed to save config: {}", e);
                false
            }
        }
    }

    /// Calls `dump` only if something changed. Returns whether a successful write
    /// happened.
    pub fn flush_if_dirty(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.dump()
    }

    fn save(&self) -> Result<(), PersistError> {
        persistence::write_json_atomic(&self.paths.config_file, &self.params)?;
        self.tokens.save()?;
        paths::set_owner(&self.paths.config_file, self.account.uid)?;
        paths::set_owner(&self.paths.token_file, self.account.uid)?;
        Ok(())
    }
}

fn read_last_run(params: &ParameterSet) -> DateTime<Utc> {
    let raw = params
        .get(Param::LastRunTimestamp.key())
        .and_then(ParamValue::as_str)
        .unwrap_or_default();
    clock::str_to_time(raw).unwrap_or_else(|e| {
        log::warn!("{} Treating the last run as never.", e);
        DateTime::<Utc>::UNIX_EPOCH
    })
}

fn load_ignore_list(file: &Path, root: &Path) -> Option<IgnoreList> {
    if !file.exists() {
        log::info!("ignore list file was not found.");
        return None;
    }
    match IgnoreList::load(file, root) {
        Ok(list) => Some(list),
        Err(e) => {
            log::warn!("{}. Ignore list disabled.", e);
            None
        }
    }
}
