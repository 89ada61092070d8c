// Path: crates/agora-storage/src/traits.rs
//! ValidatorRecord store contract.
//!
//! This trait captures atomic two-table writes, indexed access by
//! `utxo_key`, and the ability to enumerate everything so the engine can
//! compute height-parametrised projections. It says nothing about *how* a
//! backend persists rows — [`crate::memory`] and [`crate::redb_store`]
//! satisfy it with very different storage engines.

use agora_types::error::StorageError;
use agora_types::{Hash, Height, PreImageRecord, ValidatorRecord};

/// A durable, concurrent-read-safe store of `ValidatorRecord` and
/// `PreImageRecord` rows.
///
/// Implementations must be safe to share behind an `Arc` and called from
/// multiple reader threads while a single writer thread serialises
/// mutations.
pub trait ValidatorStore: Send + Sync {
    /// Atomically inserts a new `ValidatorRecord` together with its initial
    /// `PreImageRecord`. Both writes commit or neither does: a reader must
    /// never see one half without the other.
    fn insert_enrollment(
        &self,
        record: ValidatorRecord,
        preimage: PreImageRecord,
    ) -> Result<(), StorageError>;

    /// Sets `slashed_height` on the record identified by `(utxo_key,
    /// enrolled_height)`, unless it is already set — once set, never cleared
    /// or overwritten. Returns `true` if this call changed the record,
    /// `false` if it was already slashed or did not exist.
    fn set_slashed(
        &self,
        utxo_key: Hash,
        enrolled_height: Height,
        slashed_height: Height,
    ) -> Result<bool, StorageError>;

    /// All `ValidatorRecord`s ever created for `utxo_key`, ordered by
    /// `enrolled_height` descending (most recent enrollment cycle first).
    fn records_for_utxo(&self, utxo_key: &Hash) -> Result<Vec<ValidatorRecord>, StorageError>;

    /// Every `ValidatorRecord` in the store, in no particular order. The
    /// engine is responsible for filtering/sorting per the active-at-height
    /// predicate.
    fn all_records(&self) -> Result<Vec<ValidatorRecord>, StorageError>;

    /// The current `PreImageRecord` for `utxo_key`, if any.
    fn preimage(&self, utxo_key: &Hash) -> Result<Option<PreImageRecord>, StorageError>;

    /// Overwrites the `PreImageRecord` for `record.utxo_key`. Callers are
    /// responsible for enforcing monotonicity before calling this; the store
    /// itself performs no validation beyond persistence.
    fn set_preimage(&self, record: PreImageRecord) -> Result<(), StorageError>;

    /// Every `PreImageRecord` in the store, in no particular order.
    fn all_preimages(&self) -> Result<Vec<PreImageRecord>, StorageError>;

    /// Drops every row in both tables. Administrative-only; callers must
    /// quiesce the engine (no concurrent readers) before invoking.
    fn remove_all(&self) -> Result<(), StorageError>;
}
