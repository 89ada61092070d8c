// Path: crates/agora-storage/src/redb_store.rs
//! On-disk [`ValidatorStore`] backed by `redb`.
//!
//! Two tables: `VALIDATORS`, keyed by `utxo_key (64 bytes) || enrolled_height
//! (big-endian u64)` so range scans naturally come back in ascending
//! enrollment order, and `PREIMAGES`, keyed by `utxo_key` alone since a UTXO
//! has at most one live preimage record. Values are SCALE-encoded.

use crate::traits::ValidatorStore;
use agora_types::codec::{from_bytes_canonical, to_bytes_canonical};
use agora_types::error::StorageError;
use agora_types::{Hash, Height, PreImageRecord, ValidatorRecord};
use redb::{Database, ReadableTable, TableDefinition};
use std::path::Path;

const VALIDATORS: TableDefinition<&[u8], &[u8]> = TableDefinition::new("validators");
const PREIMAGES: TableDefinition<&[u8], &[u8]> = TableDefinition::new("preimages");

fn validator_key(utxo_key: &Hash, enrolled_height: Height) -> Vec<u8> {
    let mut key = Vec::with_capacity(72);
    key.extend_from_slice(utxo_key.as_bytes());
    key.extend_from_slice(&enrolled_height.value().to_be_bytes());
    key
}

fn backend_err(err: impl std::fmt::Display) -> StorageError {
    StorageError::Backend(err.to_string())
}

/// Durable `ValidatorStore` backed by a single `redb::Database` file.
pub struct RedbValidatorStore {
    db: Database,
}

impl RedbValidatorStore {
    /// Opens (creating if necessary) the database file at `path`, and makes
    /// sure both tables exist before returning.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db = Database::create(path).map_err(backend_err)?;
        let write_txn = db.begin_write().map_err(backend_err)?;
        {
            write_txn.open_table(VALIDATORS).map_err(backend_err)?;
            write_txn.open_table(PREIMAGES).map_err(backend_err)?;
        }
        write_txn.commit().map_err(backend_err)?;
        Ok(RedbValidatorStore { db })
    }
}

impl ValidatorStore for RedbValidatorStore {
    fn insert_enrollment(
        &self,
        record: ValidatorRecord,
        preimage: PreImageRecord,
    ) -> Result<(), StorageError> {
        let write_txn = self.db.begin_write().map_err(backend_err)?;
        {
            let mut validators = write_txn.open_table(VALIDATORS).map_err(backend_err)?;
            let key = validator_key(&record.utxo_key, record.enrolled_height);
            let value = to_bytes_canonical(&record).map_err(StorageError::Encode)?;
            validators
                .insert(key.as_slice(), value.as_slice())
                .map_err(backend_err)?;

            let mut preimages = write_txn.open_table(PREIMAGES).map_err(backend_err)?;
            let value = to_bytes_canonical(&preimage).map_err(StorageError::Encode)?;
            preimages
                .insert(preimage.utxo_key.as_bytes().as_slice(), value.as_slice())
                .map_err(backend_err)?;
        }
        write_txn.commit().map_err(backend_err)?;
        Ok(())
    }

    fn set_slashed(
        &self,
        utxo_key: Hash,
        enrolled_height: Height,
        slashed_height: Height,
    ) -> Result<bool, StorageError> {
        let write_txn = self.db.begin_write().map_err(backend_err)?;
        let changed;
        {
            let mut validators = write_txn.open_table(VALIDATORS).map_err(backend_err)?;
            let key = validator_key(&utxo_key, enrolled_height);
            let existing = validators.get(key.as_slice()).map_err(backend_err)?;
            let mut record: ValidatorRecord = match existing {
                Some(bytes) => from_bytes_canonical(bytes.value()).map_err(StorageError::Decode)?,
                None => {
                    drop(validators);
                    write_txn.commit().map_err(backend_err)?;
                    return Ok(false);
                }
            };
            if record.slashed_height.is_some() {
                changed = false;
            } else {
                record.slashed_height = Some(slashed_height);
                let value = to_bytes_canonical(&record).map_err(StorageError::Encode)?;
                validators
                    .insert(key.as_slice(), value.as_slice())
                    .map_err(backend_err)?;
                changed = true;
            }
        }
        write_txn.commit().map_err(backend_err)?;
        Ok(changed)
    }

    fn records_for_utxo(&self, utxo_key: &Hash) -> Result<Vec<ValidatorRecord>, StorageError> {
        let read_txn = self.db.begin_read().map_err(backend_err)?;
        let validators = read_txn.open_table(VALIDATORS).map_err(backend_err)?;
        let mut out = Vec::new();
        for entry in validators.iter().map_err(backend_err)? {
            let (key, value) = entry.map_err(backend_err)?;
            if &key.value()[..64] != utxo_key.as_bytes().as_slice() {
                continue;
            }
            out.push(from_bytes_canonical(value.value()).map_err(StorageError::Decode)?);
        }
        out.sort_by(|a: &ValidatorRecord, b: &ValidatorRecord| {
            b.enrolled_height.cmp(&a.enrolled_height)
        });
        Ok(out)
    }

    fn all_records(&self) -> Result<Vec<ValidatorRecord>, StorageError> {
        let read_txn = self.db.begin_read().map_err(backend_err)?;
        let validators = read_txn.open_table(VALIDATORS).map_err(backend_err)?;
        let mut out = Vec::new();
        for entry in validators.iter().map_err(backend_err)? {
            let (_, value) = entry.map_err(backend_err)?;
            out.push(from_bytes_canonical(value.value()).map_err(StorageError::Decode)?);
        }
        Ok(out)
    }

    fn preimage(&self, utxo_key: &Hash) -> Result<Option<PreImageRecord>, StorageError> {
        let read_txn = self.db.begin_read().map_err(backend_err)?;
        let preimages = read_txn.open_table(PREIMAGES).map_err(backend_err)?;
        match preimages
            .get(utxo_key.as_bytes().as_slice())
            .map_err(backend_err)?
        {
            Some(value) => Ok(Some(
                from_bytes_canonical(value.value()).map_err(StorageError::Decode)?,
            )),
            None => Ok(None),
        }
    }

    fn set_preimage(&self, record: PreImageRecord) -> Result<(), StorageError> {
        let write_txn = self.db.begin_write().map_err(backend_err)?;
        {
            let mut preimages = write_txn.open_table(PREIMAGES).map_err(backend_err)?;
            let value = to_bytes_canonical(&record).map_err(StorageError::Encode)?;
            preimages
                .insert(record.utxo_key.as_bytes().as_slice(), value.as_slice())
                .map_err(backend_err)?;
        }
        write_txn.commit().map_err(backend_err)?;
        Ok(())
    }

    fn all_preimages(&self) -> Result<Vec<PreImageRecord>, StorageError> {
        let read_txn = self.db.begin_read().map_err(backend_err)?;
        let preimages = read_txn.open_table(PREIMAGES).map_err(backend_err)?;
        let mut out = Vec::new();
        for entry in preimages.iter().map_err(backend_err)? {
            let (_, value) = entry.map_err(backend_err)?;
            out.push(from_bytes_canonical(value.value()).map_err(StorageError::Decode)?);
        }
        Ok(out)
    }

    fn remove_all(&self) -> Result<(), StorageError> {
        let write_txn = self.db.begin_write().map_err(backend_err)?;
        {
            let mut validators = write_txn.open_table(VALIDATORS).map_err(backend_err)?;
            let keys: Vec<Vec<u8>> = validators
                .iter()
                .map_err(backend_err)?
                .map(|entry| entry.map(|(k, _)| k.value().to_vec()))
                .collect::<Result<_, _>>()
                .map_err(backend_err)?;
            for key in keys {
                validators.remove(key.as_slice()).map_err(backend_err)?;
            }

            let mut preimages = write_txn.open_table(PREIMAGES).map_err(backend_err)?;
            let keys: Vec<Vec<u8>> = preimages
                .iter()
                .map_err(backend_err)?
                .map(|entry| entry.map(|(k, _)| k.value().to_vec()))
                .collect::<Result<_, _>>()
                .map_err(backend_err)?;
            for key in keys {
                preimages.remove(key.as_slice()).map_err(backend_err)?;
            }
        }
        write_txn.commit().map_err(backend_err)?;
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
    fn insert_and_read_round_trips_through_the_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = RedbValidatorStore::open(dir.path().join("validators.redb")).unwrap();
        store
            .insert_enrollment(sample_record(3, 7), sample_preimage(3, 7))
            .unwrap();

        let utxo = Hash::from_slice(&[3u8; 64]).unwrap();
        let records = store.records_for_utxo(&utxo).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].enrolled_height, Height(7));
        assert!(store.preimage(&utxo).unwrap().is_some());
    }

    #[test]
    fn set_slashed_is_idempotent_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("validators.redb");
        {
            let store = RedbValidatorStore::open(&db_path).unwrap();
            store
                .insert_enrollment(sample_record(9, 1), sample_preimage(9, 1))
                .unwrap();
            let utxo = Hash::from_slice(&[9u8; 64]).unwrap();
            assert!(store.set_slashed(utxo, Height(1), Height(5)).unwrap());
        }
        let store = RedbValidatorStore::open(&db_path).unwrap();
        let utxo = Hash::from_slice(&[9u8; 64]).unwrap();
        assert!(!store.set_slashed(utxo, Height(1), Height(99)).unwrap());
        let records = store.records_for_utxo(&utxo).unwrap();
        assert_eq!(records[0].slashed_height, Some(Height(5)));
    }

    #[test]
    fn remove_all_empties_both_tables() {
        let dir = tempfile::tempdir().unwrap();
        let store = RedbValidatorStore::open(dir.path().join("validators.redb")).unwrap();
        store
            .insert_enrollment(sample_record(1, 1), sample_preimage(1, 1))
            .unwrap();
        store.remove_all().unwrap();
        assert!(store.all_records().unwrap().is_empty());
        assert!(store.all_preimages().unwrap().is_empty());
    }
}
