//! Retrieval-code generation.
//!
//! Each code is `CODE_LENGTH` random bytes mapped through
//! `CODE_ALPHABET[byte % 10]`. Since 256 is not a multiple of 10, residues
//! `0..=5` (digits `1` to `6`) come up with probability 26/256 and the rest
//! with 25/256. That skew is part of the output distribution and is kept as
//! is.

use crate::constants::{CODE_ALPHABET, CODE_LENGTH};
use crate::models::RetrievalCode;
use crate::AppError;
use rand::rngs::OsRng;
use rand::RngCore;

/// Source of random bytes for code generation.
pub trait CodeSource: Send + Sync {
    /// Fill `buf` entirely with random bytes.
    ///
    /// # Errors
    /// Returns [`AppError::RandomnessUnavailable`] when no bytes can be drawn.
    fn fill(&self, buf: &mut [u8]) -> Result<(), AppError>;
}

/// Operating-system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsCodeSource;

impl CodeSource for OsCodeSource {
    fn fill(&self, buf: &mut [u8]) -> Result<(), AppError> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|err| AppError::RandomnessUnavailable(err.to_string()))
    }
}

/// Map raw bytes onto the code alphabet.
pub fn digits_from_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| char::from(CODE_ALPHABET[usize::from(*byte) % CODE_ALPHABET.len()]))
        .collect()
}

/// Draw one candidate code from `source`.
///
/// # Errors
/// Propagates [`AppError::RandomnessUnavailable`] from the source.
pub fn generate_code(source: &dyn CodeSource) -> Result<RetrievalCode, AppError> {
    let mut buf = [0u8; CODE_LENGTH];
    source.fill(&mut buf)?;
    Ok(RetrievalCode::from_generated(digits_from_bytes(&buf)))
}
