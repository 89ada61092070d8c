// Path: crates/agora-storage/src/memory.rs
//! An ephemeral, `HashMap`-backed [`ValidatorStore`], used by tests and by
//! nodes that do not need state to survive a restart.

use crate::traits::ValidatorStore;
use agora_types::error::StorageError;
use agora_types::{Hash, Height, PreImageRecord, ValidatorRecord};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
struct Tables {
    validators: HashMap<(Hash, Height), ValidatorRecord>,
    preimages: HashMap<Hash, PreImageRecord>,
}

/// In-memory implementation of [`ValidatorStore`]. Both tables live behind
/// one lock, which is what gives `insert_enrollment` its atomicity: a
/// reader can never observe the `ValidatorRecord` half of an insert without
/// the `PreImageRecord` half.
pub struct InMemoryValidatorStore {
    tables: RwLock<Tables>,
}

impl InMemoryValidatorStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        InMemoryValidatorStore {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for InMemoryValidatorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidatorStore for InMemoryValidatorStore {
    fn insert_enrollment(
        &self,
        record: ValidatorRecord,
        preimage: PreImageRecord,
    ) -> Result<(), StorageError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StorageError::Backend("validator store lock poisoned".into()))?;
        tables
            .validators
            .insert((record.utxo_key, record.enrolled_height), record);
        tables.preimages.insert(preimage.utxo_key, preimage);
        Ok(())
    }

    fn set_slashed(
        &self,
        utxo_key: Hash,
        enrolled_height: Height,
        slashed_height: Height,
    ) -> Result<bool, StorageError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StorageError::Backend("validator store lock poisoned".into()))?;
        match tables.validators.get_mut(&(utxo_key, enrolled_height)) {
            Some(record) if record.slashed_height.is_none() => {
                record.slashed_height = Some(slashed_height);
                Ok(true)
            }
            Some(_) => Ok(false),
            None => Ok(false),
        }
    }

    fn records_for_utxo(&self, utxo_key: &Hash) -> Result<Vec<ValidatorRecord>, StorageError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| StorageError::Backend("validator store lock poisoned".into()))?;
        let mut records: Vec<ValidatorRecord> = tables
            .validators
            .values()
            .filter(|r| &r.utxo_key == utxo_key)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.enrolled_height.cmp(&a.enrolled_height));
        Ok(records)
    }

    fn all_records(&self) -> Result<Vec<ValidatorRecord>, StorageError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| StorageError::Backend("validator store lock poisoned".into()))?;
        Ok(tables.validators.values().cloned().collect())
    }

    fn preimage(&self, utxo_key: &Hash) -> Result<Option<PreImageRecord>, StorageError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| StorageError::Backend("validator store lock poisoned".into()))?;
        Ok(tables.preimages.get(utxo_key).cloned())
    }

    fn set_preimage(&self, record: PreImageRecord) -> Result<(), StorageError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StorageError::Backend("validator store lock poisoned".into()))?;
        tables.preimages.insert(record.utxo_key, record);
        Ok(())
    }

    fn all_preimages(&self) -> Result<Vec<PreImageRecord>, StorageError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| StorageError::Backend("validator store lock poisoned".into()))?;
        Ok(tables.preimages.values().cloned().collect())
    }

    fn remove_all(&self) -> Result<(), StorageError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StorageError::Backend("validator store lock poisoned".into()))?;
        tables.validators.clear();
        tables.preimages.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_types::{Amount, PublicKey};

    fn sample_record(utxo: u8, height: u64) -> ValidatorRecord {
        ValidatorRecord {
            utxo_key: Hash::from_slice(&[utxo; 64]).unwrap(),
            enrolled_height: Height(height),
            public_key: PublicKey(vec![utxo]),
            nonce: Hash::ZERO,
            stake: Amount(1),
            slashed_height: None,
        }
    }

    fn sample_preimage(utxo: u8, height: u64) -> PreImageRecord {
        PreImageRecord {
            utxo_key: Hash::from_slice(&[utxo; 64]).unwrap(),
            current_preimage_hash: Hash::ZERO,
            current_preimage_height: Height(height),
        }
    }

    #[test]
    fn insert_is_visible_in_both_tables() {
        let store = InMemoryValidatorStore::new();
        store
            .insert_enrollment(sample_record(1, 1), sample_preimage(1, 1))
            .unwrap();
        let utxo = Hash::from_slice(&[1u8; 64]).unwrap();
        assert_eq!(store.records_for_utxo(&utxo).unwrap().len(), 1);
        assert!(store.preimage(&utxo).unwrap().is_some());
    }

    #[test]
    fn slashing_is_idempotent() {
        let store = InMemoryValidatorStore::new();
        let utxo = Hash::from_slice(&[1u8; 64]).unwrap();
        store
            .insert_enrollment(sample_record(1, 1), sample_preimage(1, 1))
            .unwrap();

        assert!(store.set_slashed(utxo, Height(1), Height(10)).unwrap());
        assert!(!store.set_slashed(utxo, Height(1), Height(99)).unwrap());

        let record = &store.records_for_utxo(&utxo).unwrap()[0];
        assert_eq!(record.slashed_height, Some(Height(10)));
    }

    #[test]
    fn remove_all_clears_both_tables() {
        let store = InMemoryValidatorStore::new();
        store
            .insert_enrollment(sample_record(1, 1), sample_preimage(1, 1))
            .unwrap();
        store.remove_all().unwrap();
        assert!(store.all_records().unwrap().is_empty());
        assert!(store.all_preimages().unwrap().is_empty());
    }
}
