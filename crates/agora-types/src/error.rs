// Path: crates/agora-types/src/error.rs
//! Shared error vocabulary. Each crate downstream defines its own
//! `thiserror` enum for its own failure modes and converts into these where
//! a boundary is crossed; this module only holds the `ErrorCode` trait and
//! the error kinds that are genuinely cross-cutting.

use thiserror::Error;

/// Assigns a stable, machine-readable string code to an error variant, for
/// log correlation and RPC error surfaces.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors from the durable `ValidatorRecord`/`PreImageRecord` store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying backend (redb, in-memory map) failed.
    #[error("storage backend error: {0}")]
    Backend(String),
    /// A row failed to decode; the on-disk format is corrupt or from an
    /// incompatible schema version.
    #[error("storage decode error: {0}")]
    Decode(String),
    /// A row failed to encode before being written. The canonical codec is
    /// infallible in practice; this exists so the `Result` it returns has
    /// somewhere to go rather than being unwrapped at the storage boundary.
    #[error("storage encode error: {0}")]
    Encode(String),
}

impl ErrorCode for StorageError {
    fn code(&self) -> &'static str {
        match self {
            Self::Backend(_) => "STORAGE_BACKEND_ERROR",
            Self::Decode(_) => "STORAGE_DECODE_ERROR",
            Self::Encode(_) => "STORAGE_ENCODE_ERROR",
        }
    }
}
