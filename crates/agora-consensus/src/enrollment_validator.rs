// Path: crates/agora-consensus/src/enrollment_validator.rs
//! Decides whether a candidate [`Enrollment`] is well-formed and eligible at
//! a given height. Five checks, first failure wins; success yields the
//! validator's stake.

use crate::active_set::is_active_for_signing;
use crate::external::{PenaltyDepositProvider, UtxoKind, UtxoView};
use agora_crypto::verify_enrollment_signature;
use agora_storage::ValidatorStore;
use agora_types::{Amount, ConsensusParams, Enrollment, Height, PublicKey};

/// Runs the five eligibility checks against `enrollment` as if it were
/// being applied at `height`. Returns the candidate's stake on success, or
/// the stable diagnostic string of the first failing check.
#[allow(clippy::too_many_arguments)]
pub fn validate(
    store: &dyn ValidatorStore,
    utxo_view: &dyn UtxoView,
    penalty: &dyn PenaltyDepositProvider,
    params: &ConsensusParams,
    height: Height,
    enrollment: &Enrollment,
) -> Result<(Amount, PublicKey), String> {
    // Check 1: the UTXO must resolve, and its owner becomes the candidate key.
    let utxo = utxo_view
        .peek_utxo(&enrollment.utxo_key)
        .ok_or_else(|| "Enrollment UTXO not found or already spent".to_string())?;
    let candidate_key = utxo.owner.clone();

    // Check 2: value and output type.
    if utxo.kind != UtxoKind::Freeze || utxo.value.value() < params.min_stake.value() {
        return Err("Enrollment output is not an eligible freeze output".to_string());
    }

    // Check 3: the enrollment signature.
    if !verify_enrollment_signature(
        &candidate_key,
        &enrollment.enroll_sig,
        &enrollment.utxo_key,
        &enrollment.commitment,
        enrollment.cycle_length,
    ) {
        tracing::debug!(utxo_key = %enrollment.utxo_key, "enrollment signature verification failed");
        return Err("Enrollment signature is invalid".to_string());
    }

    let prior_records = store
        .records_for_utxo(&enrollment.utxo_key)
        .map_err(|e| e.to_string())?;

    // Check 4: if a prior record exists, it must have expired, and if it was
    // slashed, the penalty deposit must have been consumed.
    if let Some(most_recent) = prior_records.first() {
        let expiry = most_recent.expiry_height(params.validator_cycle);
        if expiry > height {
            return Err("This validator is already enrolled".to_string());
        }
        if most_recent.slashed_height.is_some()
            && penalty.penalty_deposit(&enrollment.utxo_key).value() > 0
        {
            return Err("This validator is already enrolled".to_string());
        }
    }

    // Check 5: no exact-height duplicate, no public-key collision.
    if prior_records
        .iter()
        .any(|r| r.enrolled_height == height)
    {
        return Err("Already enrolled at this height".to_string());
    }

    let all_records = store.all_records().map_err(|e| e.to_string())?;
    let next_height = Height(height.value().saturating_add(1));
    if all_records.iter().any(|r| {
        r.public_key == candidate_key
            && is_active_for_signing(r, next_height, params.validator_cycle)
    }) {
        return Err("A validator with the same public key is already enrolled".to_string());
    }

    Ok((Amount(utxo.value.value()), candidate_key))
}
