// Path: crates/agora-types/src/enrollment.rs
//! The enrollment-and-pre-image data model: the wire/claim types
//! (`Enrollment`, `PreImage`), the durable row types (`ValidatorRecord`,
//! `PreImageRecord`), and the read-side projections (`ValidatorInfo`,
//! `EnrollmentState`).

use crate::primitives::{Amount, Hash, Height, PublicKey, Signature};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// A claim that revealing `hash` at `height` is the next link in the
/// pre-image chain committed to by the enrollment identified by `utxo`.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct PreImage {
    /// The frozen UTXO identifying the enrollment this pre-image belongs to.
    pub utxo: Hash,
    /// The revealed hash chain element.
    pub hash: Hash,
    /// The block height at which this pre-image is revealed.
    pub height: Height,
}

impl PreImage {
    /// The sentinel empty pre-image returned by `getPreimage` when no record
    /// exists for the given `utxo`.
    pub fn empty(utxo: Hash) -> Self {
        PreImage {
            utxo,
            hash: Hash::ZERO,
            height: Height::GENESIS,
        }
    }
}

/// A validator-registration message: a frozen UTXO stake, a commitment to
/// the head of a pre-image hash chain, the cycle length it authorises, and
/// a signature proving ownership of the frozen output.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct Enrollment {
    /// The frozen UTXO backing this enrollment's stake.
    pub utxo_key: Hash,
    /// `P[0]`, the head of the pre-image chain revealed at enrollment time.
    pub commitment: Hash,
    /// The number of blocks this enrollment authorises signing for.
    pub cycle_length: u32,
    /// Proves ownership of `utxo_key`'s owning key over a canonical
    /// enrollment challenge.
    pub enroll_sig: Signature,
}

/// The durable row for one enrollment cycle, keyed by `(utxo_key,
/// enrolled_height)`. Never deleted except by `removeAll`.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct ValidatorRecord {
    /// The frozen UTXO identifying this validator identity.
    pub utxo_key: Hash,
    /// The height at which this record was created; signing authority
    /// begins at `enrolled_height + 1`.
    pub enrolled_height: Height,
    /// The public key authorised to sign on behalf of this record.
    pub public_key: PublicKey,
    /// The `R` component of the enrollment signature, retained for audit.
    pub nonce: Hash,
    /// The frozen stake backing this enrollment.
    pub stake: Amount,
    /// Set exactly once by `slashValidator`; never cleared.
    pub slashed_height: Option<Height>,
}

impl ValidatorRecord {
    /// The height at which this record's signing authority ends (inclusive).
    pub fn expiry_height(&self, validator_cycle: u32) -> Height {
        self.enrolled_height.saturating_add(validator_cycle as u64)
    }
}

/// The durable row tracking the current pre-image position for one
/// `utxo_key`. Exactly one exists per `ValidatorRecord`'s identity.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct PreImageRecord {
    /// The enrollment identity this record tracks.
    pub utxo_key: Hash,
    /// The most recently accepted pre-image chain element.
    pub current_preimage_hash: Hash,
    /// The height at which `current_preimage_hash` was accepted.
    pub current_preimage_height: Height,
}

impl PreImageRecord {
    /// Projects this row into the `PreImage` claim shape used by read APIs.
    pub fn as_preimage(&self) -> PreImage {
        PreImage {
            utxo: self.utxo_key,
            hash: self.current_preimage_hash,
            height: self.current_preimage_height,
        }
    }
}

/// A read-side projection of an active validator: its enrollment height,
/// signing key, stake, and current pre-image, joined from `ValidatorRecord`
/// and `PreImageRecord`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorInfo {
    /// The height at which this validator enrolled for the current cycle.
    pub enrolled: Height,
    /// The signing key.
    pub address: PublicKey,
    /// The frozen stake.
    pub stake: Amount,
    /// The current pre-image claim.
    pub preimage: PreImage,
}

/// A snapshot of a `utxo_key`'s most recent enrollment, used by
/// `findRecentEnrollment`. `slashed_height` is `None` when not slashed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentState {
    /// The height at which the enrollment was created.
    pub enrolled_height: Height,
    /// The current pre-image claim for this identity.
    pub preimage: PreImage,
    /// Set once the record has been slashed.
    pub slashed_height: Option<Height>,
}
