//! # Mutation Set
//!
//! Pending, not-yet-committed state delta produced by one validation pass.
//!
//! ## Merge
//!
//! Candidate blocks validated in parallel each produce a set. Merging
//! unions every category, then drops from the grants every hash that any
//! input revoked. Revocation dominates regardless of which input
//! contributed which, so the result does not depend on input order.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use shared_crypto::Hash;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationSet {
    /// Delegation pair-hashes granted.
    pub grant_power: BTreeSet<Hash>,
    /// Delegation pair-hashes revoked.
    pub revoke_power: BTreeSet<Hash>,
    /// Token hashes of new members.
    pub new_members: BTreeSet<Hash>,
    /// Hashes of newly claimed handles.
    pub new_captions: BTreeSet<Hash>,
}

impl MutationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_grant(&self, hash: &Hash) -> bool {
        self.grant_power.contains(hash)
    }

    pub fn has_revoke(&self, hash: &Hash) -> bool {
        self.revoke_power.contains(hash)
    }

    pub fn has_member(&self, hash: &Hash) -> bool {
        self.new_members.contains(hash)
    }

    pub fn has_caption(&self, hash: &Hash) -> bool {
        self.new_captions.contains(hash)
    }

    pub fn is_empty(&self) -> bool {
        self.grant_power.is_empty()
            && self.revoke_power.is_empty()
            && self.new_members.is_empty()
            && self.new_captions.is_empty()
    }

    /// Total number of recorded facts across all categories.
    pub fn len(&self) -> usize {
        self.grant_power.len()
            + self.revoke_power.len()
            + self.new_members.len()
            + self.new_captions.len()
    }

    /// Combine sets into a new one. Inputs are left untouched.
    pub fn merge<'a>(sets: impl IntoIterator<Item = &'a MutationSet>) -> MutationSet {
        let mut merged = MutationSet::new();
        for set in sets {
            merged.grant_power.extend(set.grant_power.iter().copied());
            merged.revoke_power.extend(set.revoke_power.iter().copied());
            merged.new_members.extend(set.new_members.iter().copied());
            merged.new_captions.extend(set.new_captions.iter().copied());
        }
        let revoked = &merged.revoke_power;
        merged.grant_power.retain(|hash| !revoked.contains(hash));
        merged
    }

    /// Merge `self` with `others`.
    pub fn merge_with(&self, others: &[MutationSet]) -> MutationSet {
        Self::merge(std::iter::once(self).chain(others))
    }
}
