// Path: crates/agora-consensus/src/error.rs
//! Error type for the enrollment engine.

use agora_types::error::ErrorCode;
use agora_types::error::StorageError;
use thiserror::Error;

/// Errors the engine can return from its fallible operations.
///
/// Most operations in this crate do not return `EngineError` at all — per
/// the fatal/swallow policy, `hasEnrollment` and `hasPublicKey` panic rather
/// than propagate a storage failure, and the remaining read paths swallow
/// storage errors into a sentinel. This type exists for `getValidators`, the
/// one read path where a silently-truncated active set would be worse than
/// a visible failure.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The durable store failed while evaluating or applying a mutation.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ErrorCode for EngineError {
    fn code(&self) -> &'static str {
        match self {
            Self::Storage(_) => "ENGINE_STORAGE_FAILURE",
        }
    }
}
