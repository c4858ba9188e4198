//! Keystore error types

use thiserror::Error;

/// Errors that can occur while sealing or opening a keystore
#[derive(Error, Debug)]
pub enum KeystoreError {
    /// Schema violation: missing/ill-typed fields, bad hex, or KDF parameters
    /// inconsistent with the declared tag
    #[error("malformed keystore: {0}")]
    MalformedKeystore(String),

    /// The `kdf` tag names an algorithm this crate does not implement
    #[error("unsupported kdf: {0} (expected \"scrypt\" or \"pbkdf2\")")]
    UnsupportedKdf(String),

    /// KDF cost parameters failed validation
    #[error("invalid kdf parameter: {0}")]
    InvalidParameter(String),

    /// MAC verification failed: wrong password or corrupted document.
    /// The scheme cannot tell the two apart; no plaintext is returned.
    #[error("integrity check failed: wrong password or corrupted keystore")]
    IntegrityFailure,

    /// The entropy draw during sealing failed
    #[error("random source failure: {0}")]
    RandomSourceFailure(String),
}

/// Result type for keystore operations
pub type Result<T> = std::result::Result<T, KeystoreError>;
