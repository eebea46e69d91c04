//! Serialized access to the `TWIN_*` environment for config tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::env_overrides::TWIN_ENV_VARS;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Holds the process-wide env lock for its lifetime. Starts with every
/// `TWIN_*` override removed and puts the previous values back on drop.
pub(super) struct ScopedTwinEnv {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl ScopedTwinEnv {
    pub(super) fn clean() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let saved = TWIN_ENV_VARS
            .iter()
            .map(|&key| (key, std::env::var(key).ok()))
            .collect();
        for key in TWIN_ENV_VARS {
            // SAFETY: ENV_LOCK is held, no other test touches the environment.
            unsafe { std::env::remove_var(key) };
        }
        Self { saved, _lock: lock }
    }

    pub(super) fn with(self, key: &'static str, value: &str) -> Self {
        debug_assert!(TWIN_ENV_VARS.contains(&key), "{key} would not be restored");
        // SAFETY: ENV_LOCK is held by `self`.
        unsafe { std::env::set_var(key, value) };
        self
    }
}

impl Drop for ScopedTwinEnv {
    fn drop(&mut self) {
        for (key, previous) in self.saved.drain(..) {
            // SAFETY: the lock field is released only after this body runs.
            unsafe {
                match previous {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
