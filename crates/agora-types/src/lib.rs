// Path: crates/agora-types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # Agora Types
//!
//! Core data structures, canonical codec, and error types shared by every
//! crate in the workspace. Kept dependency-light and free of any storage or
//! networking concerns so it can sit at the bottom of the dependency graph.

pub mod codec;
pub mod config;
pub mod enrollment;
pub mod error;
pub mod primitives;

pub use config::ConsensusParams;
pub use enrollment::{
    Enrollment, EnrollmentState, PreImage, PreImageRecord, ValidatorInfo, ValidatorRecord,
};
pub use primitives::{Amount, Hash, Height, PublicKey, Signature};
