// Path: crates/agora-crypto/src/lib.rs
//! # Agora Crypto Crate Lints
//!
//! Panics are disallowed in non-test code to promote robust error handling;
//! every fallible primitive here returns a `Result` instead.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::indexing_slicing
    )
)]
#![forbid(unsafe_code)]

//! Cryptographic primitives for the Agora validator-set engine: SHA-512
//! hashing, the pre-image hash chain (C1), and Schnorr enrollment-signature
//! verification.

pub mod error;
pub mod hash;
pub mod preimage_chain;
pub mod schnorr;

pub use error::CryptoError;
pub use preimage_chain::{verify as verify_preimage, PreImageChain};
pub use schnorr::verify_enrollment_signature;
