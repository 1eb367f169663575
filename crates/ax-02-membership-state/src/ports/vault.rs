//! # Hash Vault Port
//!
//! A persistent set of 32-byte hashes. Committed state keeps three of them:
//! members, captions and delegations.

use std::sync::Arc;

use shared_crypto::Hash;

use crate::domain::errors::VaultError;

/// Abstract hash-set storage.
///
/// Implementations must be safe to share across validator threads. `insert`
/// and `remove` report whether the set changed, so repeated calls are
/// harmless.
pub trait HashVault: Send + Sync {
    /// Whether `hash` is present.
    fn exists(&self, hash: &Hash) -> Result<bool, VaultError>;

    /// Add `hash`. Returns `false` if it was already present.
    fn insert(&self, hash: &Hash) -> Result<bool, VaultError>;

    /// Remove `hash`. Returns `false` if it was absent.
    fn remove(&self, hash: &Hash) -> Result<bool, VaultError>;

    /// Flush and release the vault. Later calls fail with `Closed`.
    fn close(&self) -> Result<(), VaultError> {
        Ok(())
    }
}

impl<T: HashVault + ?Sized> HashVault for Box<T> {
    fn exists(&self, hash: &Hash) -> Result<bool, VaultError> {
        (**self).exists(hash)
    }

    fn insert(&self, hash: &Hash) -> Result<bool, VaultError> {
        (**self).insert(hash)
    }

    fn remove(&self, hash: &Hash) -> Result<bool, VaultError> {
        (**self).remove(hash)
    }

    fn close(&self) -> Result<(), VaultError> {
        (**self).close()
    }
}

impl<T: HashVault + ?Sized> HashVault for Arc<T> {
    fn exists(&self, hash: &Hash) -> Result<bool, VaultError> {
        (**self).exists(hash)
    }

    fn insert(&self, hash: &Hash) -> Result<bool, VaultError> {
        (**self).insert(hash)
    }

    fn remove(&self, hash: &Hash) -> Result<bool, VaultError> {
        (**self).remove(hash)
    }

    fn close(&self) -> Result<(), VaultError> {
        (**self).close()
    }
}
