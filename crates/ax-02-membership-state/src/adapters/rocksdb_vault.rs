//! # RocksDB Hash Vaults
//!
//! One database, one column family per vault:
//!
//! - `members` - token hashes of committed members
//! - `captions` - hashes of claimed handles
//! - `poa` - delegation pair-hashes
//!
//! Keys are the raw 32-byte hash; values are empty. Bloom filters keep
//! negative `exists` lookups off disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use rocksdb::{ColumnFamilyDescriptor, Options, WriteOptions, DB};
use shared_crypto::Hash;

use crate::domain::config::StateConfig;
use crate::domain::errors::VaultError;
use crate::ports::vault::HashVault;

pub const CF_MEMBERS: &str = "members";
pub const CF_CAPTIONS: &str = "captions";
pub const CF_ATTORNEYS: &str = "poa";

/// All column families used by the membership state
pub const COLUMN_FAMILIES: &[&str] = &[CF_MEMBERS, CF_CAPTIONS, CF_ATTORNEYS];

/// Shared database handle. `None` once closed.
type SharedDb = Arc<RwLock<Option<DB>>>;

/// Owner of the RocksDB instance backing the three vaults.
pub struct RocksDbVaultStore {
    db: SharedDb,
    path: PathBuf,
    sync_writes: bool,
}

impl RocksDbVaultStore {
    /// Open or create the database under `path`.
    pub fn open(path: impl AsRef<Path>, config: &StateConfig) -> Result<Self, VaultError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&rocksdb::Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let cf_descriptors: Vec<ColumnFamilyDescriptor> = COLUMN_FAMILIES
            .iter()
            .map(|name| {
                let mut cf_opts = Options::default();
                cf_opts.set_compression_type(rocksdb::DBCompressionType::Snappy);
                ColumnFamilyDescriptor::new(*name, cf_opts)
            })
            .collect();

        let db = DB::open_cf_descriptors(&opts, path.as_ref(), cf_descriptors)
            .map_err(|e| VaultError::Unavailable(format!("Failed to open RocksDB: {}", e)))?;

        Ok(Self {
            db: Arc::new(RwLock::new(Some(db))),
            path: path.as_ref().to_path_buf(),
            sync_writes: config.sync_writes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Vault view over one column family.
    pub fn vault(&self, column_family: &'static str) -> RocksDbHashVault {
        RocksDbHashVault {
            db: Arc::clone(&self.db),
            column_family,
            sync_writes: self.sync_writes,
        }
    }
}

/// A hash vault backed by one RocksDB column family.
///
/// Reads share the lock; `insert` and `remove` take it exclusively so the
/// existence check and the write are atomic with respect to other writers.
pub struct RocksDbHashVault {
    db: SharedDb,
    column_family: &'static str,
    sync_writes: bool,
}

impl RocksDbHashVault {
    fn write_opts(&self) -> WriteOptions {
        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.sync_writes);
        write_opts
    }

    fn missing_cf(&self) -> VaultError {
        VaultError::Unavailable(format!("column family '{}' missing", self.column_family))
    }
}

impl HashVault for RocksDbHashVault {
    fn exists(&self, hash: &Hash) -> Result<bool, VaultError> {
        let guard = self.db.read();
        let db = guard.as_ref().ok_or(VaultError::Closed)?;
        let cf = db.cf_handle(self.column_family).ok_or_else(|| self.missing_cf())?;
        db.get_pinned_cf(cf, hash.as_bytes())
            .map(|value| value.is_some())
            .map_err(|e| VaultError::Io(format!("RocksDB get failed: {}", e)))
    }

    fn insert(&self, hash: &Hash) -> Result<bool, VaultError> {
        let guard = self.db.write();
        let db = guard.as_ref().ok_or(VaultError::Closed)?;
        let cf = db.cf_handle(self.column_family).ok_or_else(|| self.missing_cf())?;

        let present = db
            .get_pinned_cf(cf, hash.as_bytes())
            .map_err(|e| VaultError::Io(format!("RocksDB get failed: {}", e)))?
            .is_some();
        if present {
            return Ok(false);
        }

        db.put_cf_opt(cf, hash.as_bytes(), b"", &self.write_opts())
            .map_err(|e| VaultError::Io(format!("RocksDB put failed: {}", e)))?;
        Ok(true)
    }

    fn remove(&self, hash: &Hash) -> Result<bool, VaultError> {
        let guard = self.db.write();
        let db = guard.as_ref().ok_or(VaultError::Closed)?;
        let cf = db.cf_handle(self.column_family).ok_or_else(|| self.missing_cf())?;

        let present = db
            .get_pinned_cf(cf, hash.as_bytes())
            .map_err(|e| VaultError::Io(format!("RocksDB get failed: {}", e)))?
            .is_some();
        if !present {
            return Ok(false);
        }

        db.delete_cf_opt(cf, hash.as_bytes(), &self.write_opts())
            .map_err(|e| VaultError::Io(format!("RocksDB delete failed: {}", e)))?;
        Ok(true)
    }

    /// Flushes and drops the shared database; closes all three vaults.
    fn close(&self) -> Result<(), VaultError> {
        let mut guard = self.db.write();
        if let Some(db) = guard.take() {
            db.flush()
                .map_err(|e| VaultError::Io(format!("RocksDB flush failed: {}", e)))?;
        }
        Ok(())
    }
}
