// Path: crates/agora-crypto/src/error.rs
//! Local error type for the `agora-crypto` crate.

use agora_types::error::ErrorCode;
use thiserror::Error;

/// Errors from cryptographic operations: hashing and signature verification.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// A hash digest had an unexpected length.
    #[error("invalid hash length: expected {expected}, got {got}")]
    InvalidHashLength {
        /// The expected length in bytes.
        expected: usize,
        /// The actual length in bytes.
        got: usize,
    },
    /// The provided key material could not be parsed.
    #[error("invalid public key: {0}")]
    InvalidKey(String),
    /// A generic failure in the underlying cryptographic library.
    #[error("cryptographic operation failed: {0}")]
    OperationFailed(String),
}

impl ErrorCode for CryptoError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidHashLength { .. } => "CRYPTO_INVALID_HASH_LENGTH",
            Self::InvalidKey(_) => "CRYPTO_INVALID_KEY",
            Self::OperationFailed(_) => "CRYPTO_OPERATION_FAILED",
        }
    }
}

impl From<dcrypt::Error> for CryptoError {
    fn from(e: dcrypt::Error) -> Self {
        CryptoError::OperationFailed(e.to_string())
    }
}
