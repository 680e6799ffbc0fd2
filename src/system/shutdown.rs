// src/system/shutdown.rs

//! Exit hooks for deferred work.
//!
//! Singletons register a hook the first time they are constructed. The binary runs
//! every pending hook once, from a guard held by `main`, so the hooks fire on both
//! the success and the error path. Hooks run in reverse registration order: the
//! logging sink is set up before the configuration store, so it is flushed after the
//! store has finished logging its own flush.

use lazy_static::lazy_static;
use std::sync::{Mutex, PoisonError};

/// Flushes the configuration store if it has unsaved changes.
pub const CONFIG_FLUSH_HOOK: &str = "config-flush";
/// Flushes the logging sink.
pub const LOG_FLUSH_HOOK: &str = "log-flush";

pub type ExitHook = fn();

#[derive(Default)]
struct Registry {
    /// Every name ever registered. Never cleared, so each hook is registered once
    /// per process.
    seen: Vec<&'static str>,
    pending: Vec<(&'static str, ExitHook)>,
}

lazy_static! {
    static ref REGISTRY: Mutex<Registry> = Mutex::new(Registry::default());
}

/// Registers `hook` under `name`. Returns `false` if that name was registered before.
pub fn register(name: &'static str, hook: ExitHook) -> bool {
    let mut registry = REGISTRY.lock().unwrap_or_else(PoisonError::into_inner);
    if registry.seen.contains(&name) {
        return false;
    }
    log::debug!("Registering exit hook '{}'", name);
    registry.seen.push(name);
    registry.pending.push((name, hook));
    true
}

pub fn is_registered(name: &str) -> bool {
    REGISTRY
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .seen
        .contains(&name)
}

/// Runs every pending hook, most recently registered first. A second call runs nothing.
pub fn run_exit_hooks() {
    // Take the hooks out before running them: a hook may log, and logging must not
    // wait on this lock.
    let pending = std::mem::take(
        &mut REGISTRY
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pending,
    );
    for (name, hook) in pending.into_iter().rev() {
        log::trace!("Running exit hook '{}'", name);
        hook();
    }
}
