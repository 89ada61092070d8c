// Path: crates/agora-crypto/src/preimage_chain.rs
//! C1 — PreImageChain: derives and verifies the commit-reveal hash chain a
//! validator uses to prove liveness, one reveal per block.
//!
//! The chain is built backwards from a node-local secret seed: `P[n] =
//! H(seed)`, and `P[i] = H(P[i+1])` for `i` counting down to `0`. `P[0]` is
//! the commitment published at enrollment time; `P[1], P[2], …` are
//! revealed one step per block as liveness proofs. Verifying a reveal means
//! hashing the newly-revealed value forward until it reaches the
//! previously-accepted one.

use crate::error::CryptoError;
use crate::hash::{hash_n_times, sha512};
use agora_types::{Hash, PreImage};

/// A fully pre-computed pre-image chain `P[0] ..= P[cycle_length]`.
/// Pre-computing is acceptable because `cycle_length` is small (tens to a
/// few thousand), per the design notes.
#[derive(Clone, Debug)]
pub struct PreImageChain {
    /// `values[i] == P[i]`.
    values: Vec<Hash>,
}

impl PreImageChain {
    /// Derives the chain from a node-local secret `seed` for a validator
    /// cycle of length `cycle_length`. Returns the chain; `P[0]` (available
    /// via [`PreImageChain::commitment`]) is the value revealed at
    /// enrollment time.
    pub fn derive(seed: &[u8], cycle_length: u32) -> Result<Self, CryptoError> {
        let len = cycle_length as usize + 1;
        let mut values = vec![Hash::ZERO; len];
        values[cycle_length as usize] = sha512(seed)?;
        for i in (0..cycle_length as usize).rev() {
            values[i] = crate::hash::hash_once(&values[i + 1])?;
        }
        Ok(PreImageChain { values })
    }

    /// Returns `P[offset]`. `offset` must be in `[0, cycle_length]`.
    pub fn preimage_at(&self, offset: u32) -> Option<Hash> {
        self.values.get(offset as usize).copied()
    }

    /// `P[0]`, the commitment revealed at enrollment time.
    pub fn commitment(&self) -> Hash {
        self.values[0]
    }

    /// The cycle length this chain was derived for.
    pub fn cycle_length(&self) -> u32 {
        self.values.len() as u32 - 1
    }
}

/// Verifies that revealing `new` is a valid successor to the
/// previously-accepted `current`, within a cycle of length `cycle_length`.
///
/// Passes iff:
/// - `new.height > current.height`,
/// - `new.height - current.height <= cycle_length`, and
/// - hashing `new.hash` forward `(new.height - current.height)` times
///   yields `current.hash`.
///
/// Never returns an error: a malformed input is simply a rejection.
pub fn verify(current: &PreImage, new: &PreImage, cycle_length: u32) -> bool {
    if new.height.value() <= current.height.value() {
        return false;
    }
    let delta = new.height.value() - current.height.value();
    if delta > cycle_length as u64 {
        return false;
    }
    match hash_n_times(&new.hash, delta) {
        Ok(derived) => derived == current.hash,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_types::Height;

    #[test]
    fn chain_hashes_backward_from_the_seed() {
        let chain = PreImageChain::derive(b"validator-0-secret", 20).unwrap();
        assert_eq!(chain.preimage_at(20).unwrap(), sha512(b"validator-0-secret").unwrap());
        let p19 = crate::hash::hash_once(&chain.preimage_at(20).unwrap()).unwrap();
        assert_eq!(chain.preimage_at(19).unwrap(), p19);
    }

    #[test]
    fn verify_accepts_a_valid_single_step_reveal() {
        let chain = PreImageChain::derive(b"seed", 20).unwrap();
        let current = PreImage {
            utxo: Hash::ZERO,
            hash: chain.preimage_at(0).unwrap(),
            height: Height(1),
        };
        let new = PreImage {
            utxo: Hash::ZERO,
            hash: chain.preimage_at(1).unwrap(),
            height: Height(2),
        };
        assert!(verify(&current, &new, 20));
    }

    #[test]
    fn verify_accepts_a_multi_step_reveal() {
        let chain = PreImageChain::derive(b"seed", 20).unwrap();
        let current = PreImage {
            utxo: Hash::ZERO,
            hash: chain.preimage_at(0).unwrap(),
            height: Height(1),
        };
        // height advances by 11, so the revealed value must be 11 hops from
        // the seed-ward end relative to `current`'s offset (0 + 11 = 11).
        let new = PreImage {
            utxo: Hash::ZERO,
            hash: chain.preimage_at(11).unwrap(),
            height: Height(12),
        };
        assert!(verify(&current, &new, 20));
    }

    #[test]
    fn verify_rejects_non_increasing_height() {
        let chain = PreImageChain::derive(b"seed", 20).unwrap();
        let current = PreImage {
            utxo: Hash::ZERO,
            hash: chain.preimage_at(5).unwrap(),
            height: Height(5),
        };
        let new = PreImage {
            utxo: Hash::ZERO,
            hash: chain.preimage_at(5).unwrap(),
            height: Height(5),
        };
        assert!(!verify(&current, &new, 20));
    }

    #[test]
    fn verify_rejects_a_jump_past_the_cycle_length() {
        let chain = PreImageChain::derive(b"seed", 20).unwrap();
        let current = PreImage {
            utxo: Hash::ZERO,
            hash: chain.preimage_at(0).unwrap(),
            height: Height(1),
        };
        let new = PreImage {
            utxo: Hash::ZERO,
            hash: chain.preimage_at(20).unwrap(),
            height: Height(10_000),
        };
        assert!(!verify(&current, &new, 20));
    }

    #[test]
    fn verify_rejects_a_hash_that_does_not_chain_back() {
        let chain = PreImageChain::derive(b"seed", 20).unwrap();
        let other = PreImageChain::derive(b"different-seed", 20).unwrap();
        let current = PreImage {
            utxo: Hash::ZERO,
            hash: chain.preimage_at(0).unwrap(),
            height: Height(1),
        };
        let new = PreImage {
            utxo: Hash::ZERO,
            hash: other.preimage_at(5).unwrap(),
            height: Height(6),
        };
        assert!(!verify(&current, &new, 20));
    }
}
