//! Persistence layer for the name registry.
//!
//! The registry keeps its working state in memory; this crate gives it
//! a durable backend so records, the admin identity, the fee, and the
//! accumulated balance survive a process restart. The owner index is
//! deliberately not persisted: every ever-registered record carries its
//! current owner, so the index is rebuilt from the record table on
//! open.

use anyhow::Result;
use namereg_types::{DomainName, DomainRecord, RegistryMeta};
use sled::transaction::{TransactionError, Transactional};
use sled::{Db, Tree};
use std::path::Path;

const META_KEY: &[u8] = b"registry_meta";

/// Storage errors
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Abstract storage trait for registry state.
pub trait RegistryStore: Send + Sync {
    /// Write-through of one record under its name key.
    fn put_record(&self, name: &DomainName, record: &DomainRecord) -> Result<()>;
    /// Fetch a single record, if ever written.
    fn get_record(&self, name: &DomainName) -> Result<Option<DomainRecord>>;
    /// Load the full record table.
    fn load_records(&self) -> Result<Vec<(DomainName, DomainRecord)>>;
    /// Persist admin/fee/balance as one blob.
    fn put_meta(&self, meta: &RegistryMeta) -> Result<()>;
    /// Load admin/fee/balance, `None` on a fresh store.
    fn load_meta(&self) -> Result<Option<RegistryMeta>>;
    /// Persist a record and the meta blob as one atomic write.
    /// Either both land or neither does; operations that touch the
    /// balance as well as a record go through this to keep a durable
    /// half-commit impossible.
    fn put_record_with_meta(
        &self,
        name: &DomainName,
        record: &DomainRecord,
        meta: &RegistryMeta,
    ) -> Result<()>;
    /// Force buffered writes to disk.
    fn flush(&self) -> Result<()>;
}

/// Sled-backed implementation.
pub struct SledRegistryStore {
    db: Db,
    records: Tree,
    metadata: Tree,
}

impl SledRegistryStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path).map_err(StorageError::Database)?;
        let records = db.open_tree("records").map_err(StorageError::Database)?;
        let metadata = db.open_tree("metadata").map_err(StorageError::Database)?;
        Ok(Self {
            db,
            records,
            metadata,
        })
    }
}

impl RegistryStore for SledRegistryStore {
    fn put_record(&self, name: &DomainName, record: &DomainRecord) -> Result<()> {
        let data = serde_json::to_vec(record).map_err(StorageError::Serialization)?;
        self.records
            .insert(name.as_str().as_bytes(), data)
            .map_err(StorageError::Database)?;
        Ok(())
    }

    fn get_record(&self, name: &DomainName) -> Result<Option<DomainRecord>> {
        self.records
            .get(name.as_str().as_bytes())
            .map_err(StorageError::Database)?
            .map(|v| serde_json::from_slice(&v))
            .transpose()
            .map_err(|e| StorageError::Serialization(e).into())
    }

    fn load_records(&self) -> Result<Vec<(DomainName, DomainRecord)>> {
        let mut out = Vec::with_capacity(self.records.len());
        for item in self.records.iter() {
            let (key, val) = item.map_err(StorageError::Database)?;
            let name = DomainName::new(String::from_utf8_lossy(&key).into_owned());
            let record: DomainRecord =
                serde_json::from_slice(&val).map_err(StorageError::Serialization)?;
            out.push((name, record));
        }
        tracing::debug!(records = out.len(), "loaded record table");
        Ok(out)
    }

    fn put_meta(&self, meta: &RegistryMeta) -> Result<()> {
        let data = serde_json::to_vec(meta).map_err(StorageError::Serialization)?;
        self.metadata
            .insert(META_KEY, data)
            .map_err(StorageError::Database)?;
        Ok(())
    }

    fn load_meta(&self) -> Result<Option<RegistryMeta>> {
        self.metadata
            .get(META_KEY)
            .map_err(StorageError::Database)?
            .map(|v| serde_json::from_slice(&v))
            .transpose()
            .map_err(|e| StorageError::Serialization(e).into())
    }

    fn put_record_with_meta(
        &self,
        name: &DomainName,
        record: &DomainRecord,
        meta: &RegistryMeta,
    ) -> Result<()> {
        let record_data = serde_json::to_vec(record).map_err(StorageError::Serialization)?;
        let meta_data = serde_json::to_vec(meta).map_err(StorageError::Serialization)?;
        (&self.records, &self.metadata)
            .transaction(|(records, metadata)| {
                records.insert(name.as_str().as_bytes(), record_data.as_slice())?;
                metadata.insert(META_KEY, meta_data.as_slice())?;
                Ok(())
            })
            .map_err(|err| match err {
                TransactionError::Abort(()) => anyhow::anyhow!("record/meta write aborted"),
                TransactionError::Storage(e) => StorageError::Database(e).into(),
            })?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.db.flush().map_err(StorageError::Database)?;
        Ok(())
    }
}
