//! # Speculative Overlay
//!
//! A read view of committed state plus one pending [`MutationSet`].
//!
//! Lookups consult the pending set first and fall back to committed state.
//! Pending facts shadow absence, never presence: a pending revoke cancels a
//! pending grant but does not hide a committed one. Committed grants are
//! removed only by `incorporate`.
//!
//! Overlays borrow committed state immutably, so any number of them can
//! validate sibling candidates in parallel.

use shared_crypto::{hash_pair, hash_token, Token};

use super::errors::StateError;
use super::mutations::MutationSet;
use super::state::{caption_hash, CommittedState};
use crate::ports::api::MembershipView;
use crate::ports::vault::HashVault;

pub struct MutatingState<'a, V: HashVault = Box<dyn HashVault>> {
    state: &'a CommittedState<V>,
    mutations: MutationSet,
    epoch: u64,
}

impl<'a, V: HashVault> MutatingState<'a, V> {
    pub(crate) fn new(state: &'a CommittedState<V>, epoch: u64, mutations: MutationSet) -> Self {
        Self {
            state,
            mutations,
            epoch,
        }
    }

    /// Epoch of the validator that owns this overlay.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn mutations(&self) -> &MutationSet {
        &self.mutations
    }

    /// Give up the overlay and keep its pending delta.
    pub fn into_mutations(self) -> MutationSet {
        self.mutations
    }

    /// Record a new member and their handle. Duplicate checks are the
    /// caller's job.
    pub fn set_new_member(&mut self, token: &Token, handle: &str) {
        self.mutations.new_members.insert(hash_token(token));
        self.mutations.new_captions.insert(caption_hash(handle));
    }

    /// Record a grant, cancelling any pending revoke of the same pair.
    pub fn set_new_grant_power(&mut self, token: &Token, attorney: &Token) {
        let pair = hash_pair(token, attorney);
        self.mutations.revoke_power.remove(&pair);
        self.mutations.grant_power.insert(pair);
    }

    /// Record a revoke, cancelling any pending grant of the same pair.
    pub fn set_new_revoke_power(&mut self, token: &Token, attorney: &Token) {
        let pair = hash_pair(token, attorney);
        self.mutations.grant_power.remove(&pair);
        self.mutations.revoke_power.insert(pair);
    }
}

impl<V: HashVault> MembershipView for MutatingState<'_, V> {
    fn has_member(&self, token: &Token) -> Result<bool, StateError> {
        let hash = hash_token(token);
        if self.mutations.has_member(&hash) {
            return Ok(true);
        }
        self.state.has_member_hash(&hash)
    }

    fn has_handle(&self, handle: &str) -> Result<bool, StateError> {
        let hash = caption_hash(handle);
        if self.mutations.has_caption(&hash) {
            return Ok(true);
        }
        self.state.has_caption_hash(&hash)
    }

    fn power_of_attorney(&self, token: &Token, attorney: &Token) -> Result<bool, StateError> {
        if token == attorney {
            return Ok(true);
        }
        let pair = hash_pair(token, attorney);
        if self.mutations.has_grant(&pair) {
            return Ok(true);
        }
        self.state.has_attorney_hash(&pair)
    }
}
