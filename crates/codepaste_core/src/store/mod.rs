//! In-memory paste store keyed by retrieval code.

mod code;


pub use code::{digits_from_bytes, generate_code, CodeSource, OsCodeSource};

use crate::constants::DEFAULT_MAX_CODE_ATTEMPTS;
use crate::models::{PasteRecord, RetrievalCode};
use crate::AppError;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Code-to-record map with collision-safe code assignment.
///
/// Records are never removed, so a code stays valid for the lifetime of the
/// store once handed out.
pub struct PasteStore {
    records: RwLock<HashMap<RetrievalCode, PasteRecord>>,
    source: Box<dyn CodeSource>,
    max_attempts: usize,
}

impl Default for PasteStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CODE_ATTEMPTS)
    }
}

impl PasteStore {
    /// Create a store backed by the OS CSPRNG.
    ///
    /// # Arguments
    /// - `max_attempts`: Codes drawn per `put` before giving up (minimum 1).
    pub fn new(max_attempts: usize) -> Self {
        Self::with_source(OsCodeSource, max_attempts)
    }

    /// Create a store drawing codes from `source`.
    pub fn with_source(source: impl CodeSource + 'static, max_attempts: usize) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            source: Box::new(source),
            max_attempts: max_attempts.max(1),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<RetrievalCode, PasteRecord>>, AppError> {
        self.records
            .read()
            .map_err(|_| AppError::Poisoned("paste store"))
    }

    fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<RetrievalCode, PasteRecord>>, AppError> {
        self.records
            .write()
            .map_err(|_| AppError::Poisoned("paste store"))
    }

    /// Store `record` under a freshly generated code.
    ///
    /// Random bytes are drawn without holding the lock; only the
    /// insert-if-vacant step runs under the write lock. A colliding code is
    /// discarded whole and a new one drawn.
    ///
    /// # Returns
    /// The code now mapped to `record`.
    ///
    /// # Errors
    /// Returns [`AppError::RandomnessUnavailable`] when the code source fails,
    /// [`AppError::CodeSpaceExhausted`] when every attempt collided, or
    /// [`AppError::Poisoned`] when the lock is poisoned.
    pub fn put(&self, record: PasteRecord) -> Result<RetrievalCode, AppError> {
        for attempt in 1..=self.max_attempts {
            let candidate = generate_code(self.source.as_ref())?;
            let mut records = self.write()?;
            match records.entry(candidate) {
                Entry::Vacant(slot) => {
                    let code = slot.key().clone();
                    slot.insert(record);
                    return Ok(code);
                }
                Entry::Occupied(taken) => {
                    tracing::debug!(
                        attempt,
                        code = %taken.key(),
                        "Retrieval code collision, regenerating"
                    );
                }
            }
        }
        Err(AppError::CodeSpaceExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Fetch a copy of the record stored under `code`.
    ///
    /// # Errors
    /// Returns [`AppError::NotFound`] when no record uses `code`, or
    /// [`AppError::Poisoned`] when the lock is poisoned.
    pub fn get(&self, code: &RetrievalCode) -> Result<PasteRecord, AppError> {
        self.read()?.get(code).cloned().ok_or(AppError::NotFound)
    }

    /// Number of stored records.
    ///
    /// # Errors
    /// Returns [`AppError::Poisoned`] when the lock is poisoned.
    pub fn len(&self) -> Result<usize, AppError> {
        Ok(self.read()?.len())
    }

    /// Whether nothing has been stored yet.
    ///
    /// # Errors
    /// Returns [`AppError::Poisoned`] when the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.read()?.is_empty())
    }

    /// Configured attempt cap per `put`.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }
}
