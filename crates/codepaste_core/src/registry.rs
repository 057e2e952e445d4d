//! Registry of claimed user names.

use crate::AppError;
use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Set of registered names with atomic claim semantics.
///
/// Names are compared byte-for-byte. The registry applies no length or
/// charset rules; see [`crate::NamePolicy`] for that.
#[derive(Debug, Default)]
pub struct UserRegistry {
    names: RwLock<HashSet<String>>,
}

impl UserRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashSet<String>>, AppError> {
        self.names
            .read()
            .map_err(|_| AppError::Poisoned("user registry"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashSet<String>>, AppError> {
        self.names
            .write()
            .map_err(|_| AppError::Poisoned("user registry"))
    }

    /// Claim `name`.
    ///
    /// The membership check and the insert happen under one write lock, so
    /// concurrent claims of the same name see exactly one winner.
    ///
    /// # Errors
    /// Returns [`AppError::NameTaken`] when `name` is already registered, or
    /// [`AppError::Poisoned`] when the lock is poisoned.
    pub fn register(&self, name: &str) -> Result<(), AppError> {
        let mut names = self.write()?;
        if names.contains(name) {
            return Err(AppError::NameTaken(name.to_string()));
        }
        names.insert(name.to_string());
        Ok(())
    }

    /// Whether `name` has been claimed.
    ///
    /// # Errors
    /// Returns [`AppError::Poisoned`] when the lock is poisoned.
    pub fn contains(&self, name: &str) -> Result<bool, AppError> {
        Ok(self.read()?.contains(name))
    }

    /// Number of registered names.
    ///
    /// # Errors
    /// Returns [`AppError::Poisoned`] when the lock is poisoned.
    pub fn len(&self) -> Result<usize, AppError> {
        Ok(self.read()?.len())
    }

    /// Whether no names have been registered.
    ///
    /// # Errors
    /// Returns [`AppError::Poisoned`] when the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.read()?.is_empty())
    }
}
