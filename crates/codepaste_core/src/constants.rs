//! Shared constants used across CodePaste crates.

/// Default API port for CodePaste.
pub const DEFAULT_PORT: u16 = 8080;

/// Number of digits in a retrieval code.
pub const CODE_LENGTH: usize = 6;

/// Alphabet retrieval codes are drawn from, indexed by `byte % len`.
pub const CODE_ALPHABET: &[u8; 10] = b"1234567890";

/// Default number of generation attempts before a paste is rejected.
pub const DEFAULT_MAX_CODE_ATTEMPTS: usize = 10;

/// Owner recorded for uploads without a user name.
pub const ANONYMOUS_OWNER: &str = "Anonymous";

/// Default minimum registered-name length, in chars.
///
/// Rejects the empty name, which the registry alone would accept.
pub const DEFAULT_NAME_MIN_LEN: usize = 1;

/// Default base URL for CLI/API clients.
pub const DEFAULT_CLI_SERVER_URL: &str = "http://127.0.0.1:8080";
