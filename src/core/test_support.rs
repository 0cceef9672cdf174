//! Shared helpers for tests that touch process environment variables

use super::config::ENV_MESSAGE_FORMAT;
use super::style::{ENV_FORCE_TEXT, ENV_FORCE_TEXT_COLOR, ENV_FORCE_TEXT_NO_COLOR};
use parking_lot::{Mutex, MutexGuard};

const ALL_VARS: &[&str] = &[
    ENV_FORCE_TEXT_COLOR,
    ENV_FORCE_TEXT_NO_COLOR,
    ENV_FORCE_TEXT,
    ENV_MESSAGE_FORMAT,
];

// Environment variables are process-wide; tests that read or write them
// must not interleave.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Holds the environment lock for the test's duration and restores the
/// facade's variables to their previous values on drop.
pub(crate) struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    /// Lock and clear all facade variables
    pub(crate) fn clear_style_vars() -> Self {
        let lock = ENV_LOCK.lock();
        let saved = ALL_VARS
            .iter()
            .map(|&name| {
                let previous = std::env::var(name).ok();
                std::env::remove_var(name);
                (name, previous)
            })
            .collect();
        Self {
            saved,
            _lock: lock,
        }
    }

    /// Lock, clear all facade variables, then set exactly one
    pub(crate) fn set(name: &str, value: &str) -> Self {
        let guard = Self::clear_style_vars();
        std::env::set_var(name, value);
        guard
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (name, previous) in self.saved.drain(..) {
            match previous {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }
}
