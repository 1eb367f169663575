//! # In-Memory Hash Vault
//!
//! For tests and ephemeral validators.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use shared_crypto::Hash;

use crate::domain::errors::VaultError;
use crate::ports::vault::HashVault;

#[derive(Debug, Default)]
pub struct MemoryHashVault {
    hashes: RwLock<HashSet<Hash>>,
    closed: AtomicBool,
}

impl MemoryHashVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.hashes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.read().is_empty()
    }

    fn ensure_open(&self) -> Result<(), VaultError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(VaultError::Closed);
        }
        Ok(())
    }
}

impl HashVault for MemoryHashVault {
    fn exists(&self, hash: &Hash) -> Result<bool, VaultError> {
        self.ensure_open()?;
        Ok(self.hashes.read().contains(hash))
    }

    fn insert(&self, hash: &Hash) -> Result<bool, VaultError> {
        self.ensure_open()?;
        Ok(self.hashes.write().insert(*hash))
    }

    fn remove(&self, hash: &Hash) -> Result<bool, VaultError> {
        self.ensure_open()?;
        Ok(self.hashes.write().remove(hash))
    }

    fn close(&self) -> Result<(), VaultError> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }
}
