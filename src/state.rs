// src/state.rs

//! Process-wide access to the configuration store.
//!
//! The first call builds the store and registers its exit flush; later calls hand
//! back the same instance. `force` rebuilds it from disk, which only tests need.

use crate::core::accounts::{AccountDirectory, SystemAccounts, UserSignals};
use crate::core::config_store::{ConfigStore, InitError, InitMode};
use crate::system::{logging, shutdown};
use lazy_static::lazy_static;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub type SharedStore = Arc<Mutex<ConfigStore>>;

lazy_static! {
    static ref INSTANCE: Mutex<Option<SharedStore>> = Mutex::new(None);
}

/// Returns the store, initializing it on first use.
///
/// Any initialization failure is fatal: it is logged as critical and the process
/// exits with status 1.
pub fn get_instance(force: bool, setup_mode: bool) -> SharedStore {
    let mode = if setup_mode {
        InitMode::Setup
    } else {
        InitMode::Normal
    };
    match try_get_instance(force, mode, &UserSignals::from_env(), &SystemAccounts) {
        Ok(store) => store,
        Err(e) => {
            logging::init(log::LevelFilter::Info, None);
            log::error!("CRITICAL: {}", e);
            logging::flush();
            std::process::exit(1);
        }
    }
}

/// Same as [`get_instance`] with the account sources supplied by the caller, and
/// failures returned instead of ending the process.
pub fn try_get_instance(
    force: bool,
    mode: InitMode,
    signals: &UserSignals,
    directory: &dyn AccountDirectory,
) -> Result<SharedStore, InitError> {
    // Held for the whole initialization, so concurrent first calls build one store.
    let mut slot = INSTANCE.lock().unwrap_or_else(PoisonError::into_inner);
    if !force && let Some(store) = slot.as_ref() {
        return Ok(Arc::clone(store));
    }

    let store = Arc::new(Mutex::new(ConfigStore::initialize(signals, directory, mode)?));
    *slot = Some(Arc::clone(&store));
    shutdown::register(shutdown::CONFIG_FLUSH_HOOK, flush_instance_if_dirty);
    Ok(store)
}

/// The current instance, if one was ever built.
pub fn instance() -> Option<SharedStore> {
    INSTANCE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Locks the store, ignoring poisoning.
pub fn lock(store: &SharedStore) -> MutexGuard<'_, ConfigStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Exit hook: persists the store if it was built and has unsaved changes.
pub fn flush_instance_if_dirty() {
    if let Some(store) = instance() {
        lock(&store).flush_if_dirty();
    }
}
