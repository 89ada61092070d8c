// Path: crates/agora-crypto/src/schnorr.rs
//! Schnorr `(R, s)` signature verification over the canonical enrollment
//! challenge.
//!
//! Ed25519 is itself a Schnorr signature scheme over the twisted Edwards
//! curve, with the signature's first half acting as the nonce point `R` and
//! the second half as the scalar response `s` — exactly the shape
//! `agora_types::Signature` models. We reuse `dcrypt`'s Ed25519
//! implementation rather than hand-rolling curve arithmetic.

use agora_types::{Hash, PublicKey, Signature};
use dcrypt::sign::eddsa::{self, Ed25519};
use tracing::debug;

const ENROLLMENT_CHALLENGE_DOMAIN: &[u8] = b"agora/enrollment/v1";

/// Builds the canonical challenge bytes an enrollment signature must cover:
/// a domain tag, the frozen UTXO identity, the pre-image commitment, and
/// the requested cycle length. Binding all three prevents an enrollment
/// signature for one UTXO/cycle from being replayed against another.
pub fn enrollment_challenge(utxo_key: &Hash, commitment: &Hash, cycle_length: u32) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(ENROLLMENT_CHALLENGE_DOMAIN.len() + 64 + 64 + 4);
    bytes.extend_from_slice(ENROLLMENT_CHALLENGE_DOMAIN);
    bytes.extend_from_slice(utxo_key.as_bytes());
    bytes.extend_from_slice(commitment.as_bytes());
    bytes.extend_from_slice(&cycle_length.to_be_bytes());
    bytes
}

/// Verifies `signature` as a Schnorr signature by `public_key` over the
/// canonical enrollment challenge for `(utxo_key, commitment,
/// cycle_length)`. Never errors: malformed key/signature material is
/// simply a verification failure.
pub fn verify_enrollment_signature(
    public_key: &PublicKey,
    signature: &Signature,
    utxo_key: &Hash,
    commitment: &Hash,
    cycle_length: u32,
) -> bool {
    let challenge = enrollment_challenge(utxo_key, commitment, cycle_length);

    let pk = match eddsa::Ed25519PublicKey::from_bytes(public_key.as_bytes()) {
        Ok(pk) => pk,
        Err(e) => {
            debug!("enrollment signature rejected: invalid public key: {e:?}");
            return false;
        }
    };
    let sig = match eddsa::Ed25519Signature::from_bytes(&signature.to_bytes()) {
        Ok(sig) => sig,
        Err(e) => {
            debug!("enrollment signature rejected: invalid signature encoding: {e:?}");
            return false;
        }
    };

    match Ed25519::verify(&challenge, &sig, &pk) {
        Ok(()) => true,
        Err(e) => {
            debug!("enrollment signature rejected: {e:?}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_types::Hash as AgoraHash;
    use dcrypt::sign::eddsa::Ed25519;

    fn sample_keypair() -> (eddsa::Ed25519PublicKey, eddsa::Ed25519SecretKey) {
        let mut rng = rand::rngs::OsRng;
        Ed25519::keypair(&mut rng).expect("keypair generation should succeed")
    }

    fn to_signature(sig: &eddsa::Ed25519Signature) -> Signature {
        let bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Signature { r, s }
    }

    #[test]
    fn verifies_a_genuine_enrollment_signature() {
        let (pk, sk) = sample_keypair();
        let utxo_key = AgoraHash::from_slice(&[1u8; 64]).unwrap();
        let commitment = AgoraHash::from_slice(&[2u8; 64]).unwrap();
        let challenge = enrollment_challenge(&utxo_key, &commitment, 20);
        let sig = Ed25519::sign(&challenge, &sk).unwrap();

        let public_key = PublicKey(pk.to_bytes());
        let signature = to_signature(&sig);

        assert!(verify_enrollment_signature(
            &public_key,
            &signature,
            &utxo_key,
            &commitment,
            20
        ));
    }

    #[test]
    fn rejects_a_signature_for_a_different_cycle_length() {
        let (pk, sk) = sample_keypair();
        let utxo_key = AgoraHash::from_slice(&[1u8; 64]).unwrap();
        let commitment = AgoraHash::from_slice(&[2u8; 64]).unwrap();
        let challenge = enrollment_challenge(&utxo_key, &commitment, 20);
        let sig = Ed25519::sign(&challenge, &sk).unwrap();

        let public_key = PublicKey(pk.to_bytes());
        let signature = to_signature(&sig);

        assert!(!verify_enrollment_signature(
            &public_key,
            &signature,
            &utxo_key,
            &commitment,
            21
        ));
    }

    #[test]
    fn rejects_garbage_key_material() {
        let utxo_key = AgoraHash::from_slice(&[1u8; 64]).unwrap();
        let commitment = AgoraHash::from_slice(&[2u8; 64]).unwrap();
        let public_key = PublicKey(vec![0u8; 3]);
        let signature = Signature { r: [0u8; 32], s: [0u8; 32] };

        assert!(!verify_enrollment_signature(
            &public_key,
            &signature,
            &utxo_key,
            &commitment,
            20
        ));
    }
}
