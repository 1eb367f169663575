//! # Committed State
//!
//! Three durable existence sets, each behind a [`HashVault`]:
//!
//! | Vault | Key |
//! |-------|-----|
//! | members | `H(token)` |
//! | captions | `H(handle)` |
//! | poa | `H(author ‖ attorney)` |
//!
//! `incorporate` is the only mutator and must be called by a single
//! commit authority, one finalized mutation set at a time.

use shared_crypto::{hash_bytes, hash_pair, hash_token, Hash, Token};
use tracing::{info, warn};

use super::config::StateConfig;
use super::errors::{StateError, VaultError};
use super::mutations::MutationSet;
use super::overlay::MutatingState;
use crate::adapters::memory_vault::MemoryHashVault;
use crate::ports::api::MembershipView;
use crate::ports::vault::HashVault;

pub const MEMBERS_VAULT: &str = "members";
pub const CAPTIONS_VAULT: &str = "captions";
pub const ATTORNEYS_VAULT: &str = "poa";

/// Hash under which a handle is recorded.
pub fn caption_hash(handle: &str) -> Hash {
    hash_bytes(handle.as_bytes())
}

/// What one `incorporate` call changed. Counts only entries that actually
/// flipped, so re-incorporating the same set reports zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IncorporateSummary {
    pub grants_added: usize,
    pub grants_revoked: usize,
    pub members_added: usize,
    pub captions_added: usize,
}

pub struct CommittedState<V: HashVault = Box<dyn HashVault>> {
    members: V,
    captions: V,
    attorneys: V,
}

fn unavailable(vault: &'static str) -> impl FnOnce(VaultError) -> StateError {
    move |source| {
        warn!(vault, error = %source, "hash vault unavailable");
        StateError::StoreUnavailable { vault, source }
    }
}

impl<V: HashVault> CommittedState<V> {
    pub fn from_vaults(members: V, captions: V, attorneys: V) -> Self {
        Self {
            members,
            captions,
            attorneys,
        }
    }

    pub fn has_member_hash(&self, hash: &Hash) -> Result<bool, StateError> {
        self.members.exists(hash).map_err(unavailable(MEMBERS_VAULT))
    }

    pub fn has_caption_hash(&self, hash: &Hash) -> Result<bool, StateError> {
        self.captions.exists(hash).map_err(unavailable(CAPTIONS_VAULT))
    }

    pub fn has_attorney_hash(&self, hash: &Hash) -> Result<bool, StateError> {
        self.attorneys.exists(hash).map_err(unavailable(ATTORNEYS_VAULT))
    }

    /// Fold a finalized mutation set into the durable vaults.
    ///
    /// Grants are inserted before revokes are applied, so a pair present in
    /// both ends up revoked. Every step is idempotent per key.
    pub fn incorporate(&self, mutations: &MutationSet) -> Result<IncorporateSummary, StateError> {
        let mut summary = IncorporateSummary::default();

        for hash in &mutations.grant_power {
            if self.attorneys.insert(hash).map_err(unavailable(ATTORNEYS_VAULT))? {
                summary.grants_added += 1;
            }
        }
        for hash in &mutations.revoke_power {
            if self.attorneys.remove(hash).map_err(unavailable(ATTORNEYS_VAULT))? {
                summary.grants_revoked += 1;
            }
        }
        for hash in &mutations.new_members {
            if self.members.insert(hash).map_err(unavailable(MEMBERS_VAULT))? {
                summary.members_added += 1;
            }
        }
        for hash in &mutations.new_captions {
            if self.captions.insert(hash).map_err(unavailable(CAPTIONS_VAULT))? {
                summary.captions_added += 1;
            }
        }

        info!(
            grants_added = summary.grants_added,
            grants_revoked = summary.grants_revoked,
            members_added = summary.members_added,
            captions_added = summary.captions_added,
            "incorporated mutation set"
        );
        Ok(summary)
    }

    /// Empty overlay for validating actions at `epoch`.
    pub fn validator(&self, epoch: u64) -> MutatingState<'_, V> {
        MutatingState::new(self, epoch, MutationSet::new())
    }

    /// Overlay seeded with the merge of `sets`, e.g. the pending deltas of
    /// ancestor candidates that are not yet committed.
    pub fn validator_with<'m>(
        &self,
        epoch: u64,
        sets: impl IntoIterator<Item = &'m MutationSet>,
    ) -> MutatingState<'_, V> {
        MutatingState::new(self, epoch, MutationSet::merge(sets))
    }

    /// Close all three vaults. Every vault is closed even if an earlier one
    /// fails; the first failure is returned.
    pub fn shutdown(self) -> Result<(), StateError> {
        let results = [
            self.members.close().map_err(unavailable(MEMBERS_VAULT)),
            self.captions.close().map_err(unavailable(CAPTIONS_VAULT)),
            self.attorneys.close().map_err(unavailable(ATTORNEYS_VAULT)),
        ];
        info!("committed state shut down");
        results.into_iter().collect()
    }
}

impl CommittedState<MemoryHashVault> {
    pub fn in_memory() -> Self {
        Self::from_vaults(
            MemoryHashVault::new(),
            MemoryHashVault::new(),
            MemoryHashVault::new(),
        )
    }
}

impl CommittedState<Box<dyn HashVault>> {
    /// Open the backend selected by `config`.
    pub fn open(config: &StateConfig) -> Result<Self, StateError> {
        match &config.data_dir {
            None => {
                info!("opening in-memory committed state");
                Ok(Self::from_vaults(
                    Box::new(MemoryHashVault::new()),
                    Box::new(MemoryHashVault::new()),
                    Box::new(MemoryHashVault::new()),
                ))
            }
            #[cfg(feature = "rocksdb")]
            Some(dir) => {
                use crate::adapters::rocksdb_vault::{
                    RocksDbVaultStore, CF_ATTORNEYS, CF_CAPTIONS, CF_MEMBERS,
                };

                let store = RocksDbVaultStore::open(dir, config)
                    .map_err(unavailable("rocksdb"))?;
                info!(path = %store.path().display(), "opened RocksDB committed state");
                Ok(Self::from_vaults(
                    Box::new(store.vault(CF_MEMBERS)),
                    Box::new(store.vault(CF_CAPTIONS)),
                    Box::new(store.vault(CF_ATTORNEYS)),
                ))
            }
            #[cfg(not(feature = "rocksdb"))]
            Some(dir) => Err(StateError::Config(format!(
                "data dir {} requires the 'rocksdb' feature",
                dir.display()
            ))),
        }
    }
}

impl<V: HashVault> MembershipView for CommittedState<V> {
    fn has_member(&self, token: &Token) -> Result<bool, StateError> {
        self.has_member_hash(&hash_token(token))
    }

    fn has_handle(&self, handle: &str) -> Result<bool, StateError> {
        self.has_caption_hash(&caption_hash(handle))
    }

    fn power_of_attorney(&self, token: &Token, attorney: &Token) -> Result<bool, StateError> {
        if token == attorney {
            return Ok(true);
        }
        self.has_attorney_hash(&hash_pair(token, attorney))
    }
}
