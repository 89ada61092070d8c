// Path: crates/agora-types/src/primitives.rs
//! The fundamental, domain-agnostic value types used throughout the engine:
//! `Hash`, `Height`, `PublicKey`, `Amount`, and `Signature`.

use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of bytes in a [`Hash`]. The engine works exclusively with 512-bit
/// digests (SHA-512 output), matching the pre-image chain's hash function.
pub const HASH_LEN: usize = 64;

/// An opaque, 512-bit digest. Ordered lexicographically on its byte
/// representation, which is also the ordering used for `utxo_key` ascending
/// sorts in `getEnrolledUTXOs` / `getValidators` (consensus-critical).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode)]
pub struct Hash(pub [u8; HASH_LEN]);

impl Hash {
    /// The all-zero hash, used as a sentinel (e.g. "no pre-image yet").
    pub const ZERO: Hash = Hash([0u8; HASH_LEN]);

    /// Builds a `Hash` from a byte slice, zero-padding or truncating is not
    /// performed: the slice must be exactly [`HASH_LEN`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != HASH_LEN {
            return None;
        }
        let mut out = [0u8; HASH_LEN];
        out.copy_from_slice(bytes);
        Some(Hash(out))
    }

    /// Borrows the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", hex::encode(self.0))
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        Hash::from_slice(&bytes)
            .ok_or_else(|| serde::de::Error::custom("expected a 64-byte hex hash"))
    }
}

/// A monotonically increasing block index. `Height(0)` is genesis.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Encode, Decode, Serialize, Deserialize,
)]
pub struct Height(pub u64);

impl Height {
    /// Genesis height.
    pub const GENESIS: Height = Height(0);
    /// The sentinel value returned by `getEnrolledHeight` when no enrollment
    /// is found within the sliding window.
    pub const MAX: Height = Height(u64::MAX);

    /// Saturating subtraction, used for `minEnrollmentHeight(H)`.
    pub fn saturating_sub(self, rhs: u64) -> Height {
        Height(self.0.saturating_sub(rhs))
    }

    /// Saturating addition.
    pub fn saturating_add(self, rhs: u64) -> Height {
        Height(self.0.saturating_add(rhs))
    }

    /// The raw block index.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Height {
    fn from(v: u64) -> Self {
        Height(v)
    }
}

/// An opaque, string-serialisable public key. Stored and compared as raw
/// bytes; rendered for logging/RPC as a base58 string, matching the address
/// encoding used elsewhere in the node.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, Serialize, Deserialize)]
pub struct PublicKey(pub Vec<u8>);

impl PublicKey {
    /// Borrows the raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", bs58::encode(&self.0).into_string())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", bs58::encode(&self.0).into_string())
    }
}

/// An unsigned coin quantity.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Encode, Decode, Serialize, Deserialize,
)]
pub struct Amount(pub u64);

impl Amount {
    /// The zero amount.
    pub const ZERO: Amount = Amount(0);

    /// The raw coin quantity.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A Schnorr `(R, s)` signature pair. `r` is the compressed curve point of
/// the per-signature nonce; `s` is the scalar response. Verified by
/// `agora_crypto::schnorr`.
#[derive(Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct Signature {
    /// The nonce point `R`.
    pub r: [u8; 32],
    /// The scalar response `s`.
    pub s: [u8; 32],
}

impl Signature {
    /// Concatenates `r || s` into the 64-byte wire representation consumed
    /// by the underlying signature scheme.
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.r);
        out[32..].copy_from_slice(&self.s);
        out
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Signature(r={}, s={})",
            hex::encode(self.r),
            hex::encode(self.s)
        )
    }
}
