// Path: crates/agora-consensus/src/engine.rs
//! The public surface of the enrollment engine: `add`, `slashValidator`,
//! the height-parametrised queries, and pre-image advancement. Everything
//! else in this crate exists to support this module.

use crate::active_set::{is_active_for_signing, is_retained_for_indexing, min_enrollment_height};
use crate::enrollment_validator;
use crate::error::EngineError;
use crate::external::{PenaltyDepositProvider, UtxoView};
use agora_crypto::verify_preimage;
use agora_storage::ValidatorStore;
use agora_types::{
    ConsensusParams, Enrollment, EnrollmentState, Height, PreImage, PreImageRecord, PublicKey,
    ValidatorInfo, ValidatorRecord,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// The validator-set enrollment and pre-image state engine.
///
/// Owns its durable store exclusively. The UTXO view and penalty-deposit
/// provider passed to [`ValidatorSetEngine::add`] are borrowed for the
/// duration of that call only.
pub struct ValidatorSetEngine {
    store: Arc<dyn ValidatorStore>,
    params: ConsensusParams,
}

impl ValidatorSetEngine {
    /// Builds an engine over `store`, governed by `params`.
    pub fn new(store: Arc<dyn ValidatorStore>, params: ConsensusParams) -> Self {
        ValidatorSetEngine { store, params }
    }

    /// `minEnrollmentHeight(H) = max(0, H - validator_cycle)`. Pure.
    pub fn min_enrollment_height(&self, at_height: Height) -> Height {
        min_enrollment_height(at_height, self.params.validator_cycle)
    }

    /// Validates and, on success, durably records a new enrollment cycle for
    /// the UTXO named in `enrollment`. Returns `Ok(())` on success or the
    /// stable diagnostic string of whichever check failed.
    pub fn add(
        &self,
        height: Height,
        utxo_view: &dyn UtxoView,
        penalty: &dyn PenaltyDepositProvider,
        enrollment: Enrollment,
    ) -> Result<(), String> {
        let (stake, candidate_key) = enrollment_validator::validate(
            self.store.as_ref(),
            utxo_view,
            penalty,
            &self.params,
            height,
            &enrollment,
        )
        .map_err(|reason| {
            debug!(utxo_key = %enrollment.utxo_key, %reason, "enrollment rejected");
            reason
        })?;

        let mut nonce_bytes = [0u8; 64];
        nonce_bytes[..32].copy_from_slice(&enrollment.enroll_sig.r);
        let record = ValidatorRecord {
            utxo_key: enrollment.utxo_key,
            enrolled_height: height,
            public_key: candidate_key,
            nonce: agora_types::Hash(nonce_bytes),
            stake,
            slashed_height: None,
        };
        let preimage = PreImageRecord {
            utxo_key: enrollment.utxo_key,
            current_preimage_hash: enrollment.commitment,
            current_preimage_height: height,
        };

        self.store.insert_enrollment(record, preimage).map_err(|e| {
            error!(utxo_key = %enrollment.utxo_key, error = %e, "failed to persist enrollment");
            e.to_string()
        })?;

        info!(utxo_key = %enrollment.utxo_key, %height, "validator enrolled");
        Ok(())
    }

    /// Marks the currently-active record for `utxo_key` as slashed at
    /// `height`. Idempotent: a record already slashed is untouched, and a
    /// missing record is a silent no-op. Storage failures are logged and
    /// swallowed — slashing is best-effort from the engine's perspective;
    /// callers that need a guarantee should check `hasEnrollment` afterward.
    pub fn slash_validator(&self, utxo_key: agora_types::Hash, height: Height) {
        let most_recent = match self.store.records_for_utxo(&utxo_key) {
            Ok(records) => records.into_iter().next(),
            Err(e) => {
                warn!(%utxo_key, error = %e, "slashValidator: storage read failed");
                return;
            }
        };
        let Some(record) = most_recent else {
            return;
        };
        if let Err(e) = self
            .store
            .set_slashed(utxo_key, record.enrolled_height, height)
        {
            warn!(%utxo_key, error = %e, "slashValidator: storage write failed");
        }
    }

    /// The most recent `enrolled_height` within `[minEnrollmentHeight(H), H]`
    /// for `utxo_key`, or `Height::MAX` if no record falls in that window.
    pub fn get_enrolled_height(&self, height: Height, utxo_key: &agora_types::Hash) -> Height {
        let records = match self.store.records_for_utxo(utxo_key) {
            Ok(records) => records,
            Err(e) => {
                warn!(%utxo_key, error = %e, "getEnrolledHeight: storage read failed");
                return Height::MAX;
            }
        };
        let min_height = self.min_enrollment_height(height);
        records
            .into_iter()
            .filter(|r| min_height <= r.enrolled_height && r.enrolled_height <= height)
            .map(|r| r.enrolled_height)
            .max()
            .unwrap_or(Height::MAX)
    }

    /// Whether an enrollment record for `utxo_key` is retained at `height`.
    ///
    /// Consensus-critical: a storage failure here cannot be silently turned
    /// into `false`, since that could make the engine disagree with itself
    /// about who is allowed to sign. The process aborts instead.
    #[allow(clippy::panic)]
    pub fn has_enrollment(&self, height: Height, utxo_key: &agora_types::Hash) -> bool {
        let records = match self.store.records_for_utxo(utxo_key) {
            Ok(records) => records,
            Err(e) => {
                error!(%utxo_key, error = %e, "hasEnrollment: storage read failed, aborting");
                panic!("hasEnrollment: storage failure on a consensus-critical path: {e}");
            }
        };
        records
            .iter()
            .any(|r| is_retained_for_indexing(r, height, self.params.validator_cycle))
    }

    /// Whether `public_key` is the signing key of any record retained at
    /// `height`. Same fatal-on-storage-failure policy as `hasEnrollment`.
    #[allow(clippy::panic)]
    pub fn has_public_key(&self, height: Height, public_key: &PublicKey) -> bool {
        let records = match self.store.all_records() {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, "hasPublicKey: storage read failed, aborting");
                panic!("hasPublicKey: storage failure on a consensus-critical path: {e}");
            }
        };
        records.iter().any(|r| {
            &r.public_key == public_key
                && is_retained_for_indexing(r, height, self.params.validator_cycle)
        })
    }

    /// The number of records eligible to sign block `height`. Returns `0` on
    /// storage failure rather than propagating: this is a throughput query,
    /// not a consensus-critical existence check.
    pub fn count_active(&self, height: Height) -> u64 {
        match self.store.all_records() {
            Ok(records) => records
                .iter()
                .filter(|r| is_active_for_signing(r, height, self.params.validator_cycle))
                .count() as u64,
            Err(e) => {
                warn!(error = %e, "countActive: storage read failed");
                0
            }
        }
    }

    /// Every `utxo_key` retained at `height`, including slashed ones,
    /// ordered ascending by hash — the index-stable enumeration SCP quorum
    /// construction relies on.
    pub fn get_enrolled_utxos(&self, height: Height) -> (Vec<agora_types::Hash>, bool) {
        match self.store.all_records() {
            Ok(records) => {
                let mut utxos: Vec<agora_types::Hash> = records
                    .iter()
                    .filter(|r| is_retained_for_indexing(r, height, self.params.validator_cycle))
                    .map(|r| r.utxo_key)
                    .collect();
                utxos.sort();
                utxos.dedup();
                (utxos, true)
            }
            Err(e) => {
                warn!(error = %e, "getEnrolledUTXOs: storage read failed");
                (Vec::new(), false)
            }
        }
    }

    /// The active signing set at `height`: every record active for signing,
    /// excluding slashed, joined with its pre-image, ordered ascending by
    /// `utxo_key`.
    ///
    /// Unlike the other read queries, a storage failure here propagates
    /// rather than being swallowed into an empty list: the active set feeds
    /// quorum construction directly, and a silently-truncated set is worse
    /// than a visible failure.
    pub fn get_validators(&self, height: Height) -> Result<Vec<ValidatorInfo>, EngineError> {
        let records = self.store.all_records().map_err(|e| {
            error!(error = %e, "getValidators: storage read failed");
            EngineError::from(e)
        })?;
        let mut active: Vec<&ValidatorRecord> = records
            .iter()
            .filter(|r| is_active_for_signing(r, height, self.params.validator_cycle))
            .collect();
        active.sort_by_key(|r| r.utxo_key);

        let infos = active
            .into_iter()
            .map(|record| {
                let preimage = match self.store.preimage(&record.utxo_key) {
                    Ok(Some(p)) => p.as_preimage(),
                    Ok(None) => PreImage::empty(record.utxo_key),
                    Err(e) => {
                        warn!(utxo_key = %record.utxo_key, error = %e, "getValidators: preimage read failed");
                        PreImage::empty(record.utxo_key)
                    }
                };
                ValidatorInfo {
                    enrolled: record.enrolled_height,
                    address: record.public_key.clone(),
                    stake: record.stake,
                    preimage,
                }
            })
            .collect();
        Ok(infos)
    }

    /// The current pre-image claim for `utxo_key`, or the sentinel empty
    /// claim if no `PreImageRecord` exists.
    pub fn get_preimage(&self, utxo_key: &agora_types::Hash) -> PreImage {
        match self.store.preimage(utxo_key) {
            Ok(Some(record)) => record.as_preimage(),
            Ok(None) => PreImage::empty(*utxo_key),
            Err(e) => {
                warn!(%utxo_key, error = %e, "getPreimage: storage read failed");
                PreImage::empty(*utxo_key)
            }
        }
    }

    /// Every pre-image whose `height >= start_height`.
    pub fn get_preimages(&self, start_height: Height) -> Vec<PreImage> {
        match self.store.all_preimages() {
            Ok(records) => records
                .into_iter()
                .filter(|r| r.current_preimage_height >= start_height)
                .map(|r| r.as_preimage())
                .collect(),
            Err(e) => {
                warn!(error = %e, "getPreimages: storage read failed");
                Vec::new()
            }
        }
    }

    /// Applies a pre-image reveal. Rejects if no `PreImageRecord` exists for
    /// `new.utxo`, if `new.height` does not strictly increase the stored
    /// height, if it jumps further than one cycle length, or if the hash
    /// chain does not verify back to the stored value.
    pub fn add_preimage(&self, new: PreImage) -> bool {
        let current = match self.store.preimage(&new.utxo) {
            Ok(Some(record)) => record.as_preimage(),
            Ok(None) => {
                info!(utxo_key = %new.utxo, "addPreimage: no matching enrollment");
                return false;
            }
            Err(e) => {
                warn!(utxo_key = %new.utxo, error = %e, "addPreimage: storage read failed");
                return false;
            }
        };

        if !verify_preimage(&current, &new, self.params.validator_cycle) {
            debug!(utxo_key = %new.utxo, "addPreimage: chain verification failed");
            return false;
        }

        let record = PreImageRecord {
            utxo_key: new.utxo,
            current_preimage_hash: new.hash,
            current_preimage_height: new.height,
        };
        match self.store.set_preimage(record) {
            Ok(()) => true,
            Err(e) => {
                warn!(utxo_key = %new.utxo, error = %e, "addPreimage: storage write failed");
                false
            }
        }
    }

    /// The most recent enrollment cycle recorded for `utxo_key`, if any.
    pub fn find_recent_enrollment(
        &self,
        utxo_key: &agora_types::Hash,
    ) -> Option<EnrollmentState> {
        let record = match self.store.records_for_utxo(utxo_key) {
            Ok(records) => records.into_iter().next()?,
            Err(e) => {
                warn!(%utxo_key, error = %e, "findRecentEnrollment: storage read failed");
                return None;
            }
        };
        let preimage = match self.store.preimage(utxo_key) {
            Ok(Some(p)) => p.as_preimage(),
            Ok(None) => PreImage::empty(*utxo_key),
            Err(e) => {
                warn!(%utxo_key, error = %e, "findRecentEnrollment: preimage read failed");
                PreImage::empty(*utxo_key)
            }
        };
        Some(EnrollmentState {
            enrolled_height: record.enrolled_height,
            preimage,
            slashed_height: record.slashed_height,
        })
    }

    /// Drops every enrollment and pre-image record. Administrative-only;
    /// callers must quiesce the engine (no concurrent readers) first.
    pub fn remove_all(&self) {
        if let Err(e) = self.store.remove_all() {
            error!(error = %e, "removeAll: storage write failed");
        }
    }
}
