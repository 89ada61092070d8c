// Path: crates/agora-types/src/codec.rs
//! Defines the canonical, deterministic binary codec used for every row
//! persisted by the validator-record store.
//!
//! This module is a thin wrapper around `parity-scale-codec` (SCALE), used
//! for its compact and deterministic encoding. Centralizing it here ensures
//! every backend (`InMemoryValidatorStore`, `RedbValidatorStore`) agrees on
//! the exact same byte representation of a row, which matters once rows are
//! hashed or diffed across a process restart.

use parity_scale_codec::{Decode, DecodeAll, Encode};

/// Encodes a value into its canonical, deterministic byte representation.
pub fn to_bytes_canonical<T: Encode>(v: &T) -> Result<Vec<u8>, String> {
    Ok(v.encode())
}

/// Decodes a value from its canonical byte representation, failing fast on
/// any malformed or truncated input rather than accepting a partial parse.
pub fn from_bytes_canonical<T: Decode>(bytes: &[u8]) -> Result<T, String> {
    T::decode_all(&mut &*bytes).map_err(|e| format!("canonical decode failed: {e}"))
}
