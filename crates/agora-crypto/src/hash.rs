// Path: crates/agora-crypto/src/hash.rs
//! SHA-512 hashing, the basis of both the pre-image chain and the
//! enrollment-challenge digest. `Hash` is a 512-bit digest, so SHA-512
//! output maps onto it directly with no truncation.

use crate::error::CryptoError;
use agora_types::Hash;
use dcrypt::algorithms::hash::sha2::Sha512 as DcryptSha512;
use dcrypt::algorithms::hash::HashFunction;
use dcrypt::algorithms::ByteSerializable;

/// Hashes arbitrary bytes into a [`Hash`].
pub fn sha512(data: impl AsRef<[u8]>) -> Result<Hash, CryptoError> {
    let digest = DcryptSha512::digest(data.as_ref()).map_err(dcrypt::Error::from)?;
    let bytes = digest.to_bytes();
    Hash::from_slice(&bytes).ok_or(CryptoError::InvalidHashLength {
        expected: 64,
        got: bytes.len(),
    })
}

/// Hashes a [`Hash`] into the next [`Hash`] in a pre-image chain:
/// `H(preimage)`.
pub fn hash_once(input: &Hash) -> Result<Hash, CryptoError> {
    sha512(input.as_bytes())
}

/// Applies [`hash_once`] `count` times to `input`, as required by
/// `PreImageChain::verify`'s "applying the hash N times" check.
pub fn hash_n_times(input: &Hash, count: u64) -> Result<Hash, CryptoError> {
    let mut current = *input;
    for _ in 0..count {
        current = hash_once(&current)?;
    }
    Ok(current)
}
