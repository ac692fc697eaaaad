//! Scoped environment overrides for configuration tests.
//!
//! Process environment is global, so every override takes one shared lock
//! and restores the previous values when dropped.

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, OnceLock};

use recovery_board::config::{
    API_URL_ENV, LOG_ENV, MOVE_POLICY_ENV, STORE_DIR_ENV, STORE_KEY_ENV, TIMEOUT_SECS_ENV,
};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Every variable the board configuration reads.
pub const BOARD_ENV_VARS: [&str; 6] = [
    API_URL_ENV,
    STORE_DIR_ENV,
    STORE_KEY_ENV,
    TIMEOUT_SECS_ENV,
    MOVE_POLICY_ENV,
    LOG_ENV,
];

/// Holds the environment lock and the values to restore.
pub struct BoardEnv {
    saved: Vec<(&'static str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl BoardEnv {
    /// Clears every board variable, then applies `overrides`.
    pub fn with(overrides: &[(&'static str, &str)]) -> Self {
        let lock = env_lock();
        let saved = BOARD_ENV_VARS
            .iter()
            .map(|name| (*name, env::var_os(name)))
            .collect();
        for name in BOARD_ENV_VARS {
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                env::remove_var(name);
            }
        }
        for (name, value) in overrides {
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                env::set_var(name, value);
            }
        }
        Self { saved, _lock: lock }
    }

    /// Clears every board variable.
    pub fn cleared() -> Self {
        Self::with(&[])
    }
}

impl Drop for BoardEnv {
    fn drop(&mut self) {
        for (name, value) in self.saved.drain(..) {
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(previous) => env::set_var(name, previous),
                    None => env::remove_var(name),
                }
            }
        }
    }
}

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
