//! Error types for shush
//!
//! Provides a unified error type for all shush operations. Every variant
//! belongs to exactly one [`ErrorKind`], which callers use to decide how to
//! report a failure (fix the input, fix the environment, or give up).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for shush operations
pub type Result<T> = std::result::Result<T, ShushError>;

/// Coarse classification of a [`ShushError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad parameters or malformed input; the caller can correct and retry
    Validation,
    /// Filesystem failure, propagated verbatim
    Io,
    /// Refused to overwrite an existing artifact
    Conflict,
    /// Key, nonce, tag or entropy failure
    Crypto,
    /// Misuse of an internal API; unreachable through validated operations
    Logic,
}

/// Unified error type for shush
#[derive(Error, Debug)]
pub enum ShushError {
    // ===== Validation Errors =====
    #[error("Invalid share count: {0} (must be between 2 and 255)")]
    InvalidShareCount(usize),

    #[error("Invalid threshold: {threshold} (must be between 2 and {shares})")]
    InvalidThreshold { threshold: usize, shares: usize },

    #[error("Insufficient shares: have {available}, need at least {required}")]
    InsufficientShares { available: usize, required: usize },

    #[error("Malformed shard file name: {0}")]
    MalformedShardName(String),

    #[error("Malformed file name: {0} (expected a .shush suffix)")]
    MalformedFileName(String),

    #[error("Shards belong to different secrets: {first} and {other}")]
    MismatchedShards { first: PathBuf, other: PathBuf },

    #[error("Shard index {index} given more than once: {}", .path.display())]
    RepeatedShard { index: u8, path: PathBuf },

    #[error("Encoding error: {0}")]
    Encoding(String),

    // ===== I/O Errors =====
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ===== Conflict Errors =====
    #[error("Attempted to write to a file that already exists: {}", .0.display())]
    FileExists(PathBuf),

    // ===== Cryptography Errors =====
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("Envelope too short: {len} bytes, not a shush encrypted file")]
    EnvelopeTooShort { len: usize },

    #[error("Authentication failed: wrong key or tampered ciphertext")]
    AuthenticationFailed,

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("Entropy source unavailable: {0}")]
    Entropy(String),

    // ===== Logic Errors =====
    #[error("Duplicate share index: {0}")]
    DuplicateShare(u8),

    #[error("Share size mismatch: expected {expected}, got {actual}")]
    ShareLengthMismatch { expected: usize, actual: usize },

    #[error("Invalid share index: {index} (max: {max})")]
    InvalidShareIndex { index: usize, max: usize },
}

impl ShushError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShushError::InvalidShareCount(_)
            | ShushError::InvalidThreshold { .. }
            | ShushError::InsufficientShares { .. }
            | ShushError::MalformedShardName(_)
            | ShushError::MalformedFileName(_)
            | ShushError::MismatchedShards { .. }
            | ShushError::RepeatedShard { .. }
            | ShushError::Encoding(_) => ErrorKind::Validation,
            ShushError::Io(_) => ErrorKind::Io,
            ShushError::FileExists(_) => ErrorKind::Conflict,
            ShushError::InvalidKeyLength { .. }
            | ShushError::EnvelopeTooShort { .. }
            | ShushError::AuthenticationFailed
            | ShushError::Encryption(_)
            | ShushError::Entropy(_) => ErrorKind::Crypto,
            ShushError::DuplicateShare(_)
            | ShushError::ShareLengthMismatch { .. }
            | ShushError::InvalidShareIndex { .. } => ErrorKind::Logic,
        }
    }
}

impl From<base64::DecodeError> for ShushError {
    fn from(err: base64::DecodeError) -> Self {
        ShushError::Encoding(err.to_string())
    }
}

impl From<rand::Error> for ShushError {
    fn from(err: rand::Error) -> Self {
        ShushError::Entropy(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ShushError::InsufficientShares {
            available: 1,
            required: 2,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient shares: have 1, need at least 2"
        );

        let err = ShushError::FileExists(PathBuf::from("secret.key"));
        assert_eq!(
            err.to_string(),
            "Attempted to write to a file that already exists: secret.key"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ShushError = io_err.into();
        assert!(matches!(err, ShushError::Io(_)));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            ShushError::InvalidThreshold {
                threshold: 1,
                shares: 5
            }
            .kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            ShushError::FileExists(PathBuf::from("x")).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            ShushError::RepeatedShard {
                index: 0,
                path: PathBuf::from("x.shard00")
            }
            .kind(),
            ErrorKind::Validation
        );
        assert_eq!(ShushError::AuthenticationFailed.kind(), ErrorKind::Crypto);
        assert_eq!(ShushError::DuplicateShare(3).kind(), ErrorKind::Logic);
    }
}
