// Path: crates/agora-storage/src/error.rs
//! Local error type for the `agora-storage` crate.

pub use agora_types::error::StorageError;
