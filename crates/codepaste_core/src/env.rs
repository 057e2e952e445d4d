//! Process-global environment mutation helpers.

use std::sync::{Mutex, MutexGuard, OnceLock};

fn global_env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Set an environment variable through a compatibility wrapper.
///
/// Rust toolchains differ on whether env mutation APIs are `unsafe`.
#[allow(unused_unsafe)]
pub fn set_env_var(key: &str, value: &str) {
    // SAFETY: Callers serialize mutation through `EnvOverrides`.
    unsafe {
        std::env::set_var(key, value);
    }
}

/// Remove an environment variable through a compatibility wrapper.
#[allow(unused_unsafe)]
pub fn remove_env_var(key: &str) {
    // SAFETY: Callers serialize mutation through `EnvOverrides`.
    unsafe {
        std::env::remove_var(key);
    }
}

/// Scoped set of environment overrides.
///
/// Holds the process-wide env lock for its lifetime, so tests that read or
/// write the environment cannot interleave. Every touched variable is
/// restored, in reverse order, on drop.
pub struct EnvOverrides {
    saved: Vec<(String, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvOverrides {
    /// Acquire the env lock with no overrides applied yet.
    ///
    /// A lock poisoned by a panicking test is recovered, since the guarded
    /// data is `()`.
    pub fn new() -> Self {
        let lock = global_env_lock()
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Self {
            saved: Vec::new(),
            _lock: lock,
        }
    }

    /// Set `key=value` until this guard is dropped.
    pub fn set(mut self, key: &str, value: &str) -> Self {
        self.remember(key);
        set_env_var(key, value);
        self
    }

    /// Remove `key` until this guard is dropped.
    pub fn remove(mut self, key: &str) -> Self {
        self.remember(key);
        remove_env_var(key);
        self
    }

    fn remember(&mut self, key: &str) {
        self.saved.push((key.to_string(), std::env::var(key).ok()));
    }
}

impl Default for EnvOverrides {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EnvOverrides {
    fn drop(&mut self) {
        while let Some((key, previous)) = self.saved.pop() {
            match previous {
                Some(value) => set_env_var(&key, &value),
                None => remove_env_var(&key),
            }
        }
    }
}
