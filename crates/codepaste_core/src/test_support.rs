//! Shared test-only helpers for codepaste_core.

use crate::store::CodeSource;
use crate::AppError;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Code source that replays fixed byte sequences.
///
/// Each `fill` consumes the next scripted sequence; the last one repeats
/// once the script runs out, which makes "always collide" setups trivial.
pub(crate) struct ScriptedCodeSource {
    script: Mutex<VecDeque<Vec<u8>>>,
    last: Mutex<Vec<u8>>,
    draws: AtomicUsize,
}

impl ScriptedCodeSource {
    /// Build a source from byte sequences, each at least `CODE_LENGTH` long.
    ///
    /// # Panics
    /// Panics when `script` is empty.
    pub(crate) fn new<I, B>(script: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let script: VecDeque<Vec<u8>> = script
            .into_iter()
            .map(|bytes| bytes.as_ref().to_vec())
            .collect();
        let first = script.front().cloned().expect("script must not be empty");
        Self {
            script: Mutex::new(script),
            last: Mutex::new(first),
            draws: AtomicUsize::new(0),
        }
    }

    /// How many times `fill` has been called.
    pub(crate) fn draws(&self) -> usize {
        self.draws.load(Ordering::SeqCst)
    }
}

impl CodeSource for ScriptedCodeSource {
    fn fill(&self, buf: &mut [u8]) -> Result<(), AppError> {
        self.draws.fetch_add(1, Ordering::SeqCst);
        let mut last = self.last.lock().expect("last lock");
        if let Some(next) = self.script.lock().expect("script lock").pop_front() {
            *last = next;
        }
        buf.copy_from_slice(&last[..buf.len()]);
        Ok(())
    }
}

/// Code source whose entropy pool is always unavailable.
pub(crate) struct FailingCodeSource;

impl CodeSource for FailingCodeSource {
    fn fill(&self, _buf: &mut [u8]) -> Result<(), AppError> {
        Err(AppError::RandomnessUnavailable(
            "entropy source offline".to_string(),
        ))
    }
}
