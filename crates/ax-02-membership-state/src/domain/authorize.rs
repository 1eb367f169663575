//! # Authorization Engine
//!
//! Decides, per action, whether it is admissible against an overlay, and
//! records the resulting facts into the overlay's mutation set.
//!
//! | Kind | Preconditions | Records |
//! |------|---------------|---------|
//! | Join | handle unclaimed, author not a member, details JSON | member + caption |
//! | Update | author member, signer has power, details JSON | - |
//! | Grant | author member, no visible grant | grant |
//! | Revoke | author member, visible grant | revoke |
//! | Void | epoch ≤ validator epoch, author member, signer has power | - |
//!
//! A rejected action records nothing. A vault failure aborts with
//! `Err(StateError)` rather than a rejection.

use ax_01_action_codec::{
    is_valid_json, Action, ActionKind, GrantPowerOfAttorney, JoinNetwork, RevokePowerOfAttorney,
    UpdateInfo, Void,
};
use tracing::debug;

use super::errors::{Rejection, StateError};
use super::overlay::MutatingState;
use crate::ports::api::MembershipView;
use crate::ports::vault::HashVault;

/// Outcome of authorizing one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted(ActionKind),
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Verdict::Rejected(rejection) => Some(rejection),
            Verdict::Accepted(_) => None,
        }
    }
}

fn reject(rejection: Rejection) -> Result<Verdict, StateError> {
    Ok(Verdict::Rejected(rejection))
}

impl<V: HashVault> MutatingState<'_, V> {
    /// Decode `data` and authorize it. Undecodable bytes are a rejection,
    /// not an error.
    pub fn validate(&mut self, data: &[u8]) -> Result<Verdict, StateError> {
        match Action::decode(data) {
            Ok(action) => self.authorize(&action),
            Err(err) => {
                debug!(len = data.len(), reason = %err, "undecodable action rejected");
                reject(Rejection::Decode(err))
            }
        }
    }

    /// Authorize every buffer in order against this overlay.
    pub fn validate_all<'d>(
        &mut self,
        batch: impl IntoIterator<Item = &'d [u8]>,
    ) -> Result<Vec<Verdict>, StateError> {
        batch.into_iter().map(|data| self.validate(data)).collect()
    }

    /// Authorize an already decoded action. Signature verification happens
    /// in decode and is not repeated here.
    pub fn authorize(&mut self, action: &Action) -> Result<Verdict, StateError> {
        let verdict = match action {
            Action::JoinNetwork(join) => self.authorize_join(join)?,
            Action::UpdateInfo(update) => self.authorize_update(update)?,
            Action::GrantPowerOfAttorney(grant) => self.authorize_grant(grant)?,
            Action::RevokePowerOfAttorney(revoke) => self.authorize_revoke(revoke)?,
            Action::Void(void) => self.authorize_void(void)?,
        };

        match &verdict {
            Verdict::Accepted(kind) => debug!(
                kind = %kind,
                author = %action.author(),
                epoch = action.epoch(),
                "action accepted"
            ),
            Verdict::Rejected(reason) => debug!(
                kind = %action.kind(),
                author = %action.author(),
                epoch = action.epoch(),
                reason = %reason,
                "action rejected"
            ),
        }
        Ok(verdict)
    }

    fn authorize_join(&mut self, join: &JoinNetwork) -> Result<Verdict, StateError> {
        if self.has_handle(&join.handle)? {
            return reject(Rejection::HandleTaken);
        }
        if self.has_member(&join.author)? {
            return reject(Rejection::AlreadyMember);
        }
        if !is_valid_json(&join.details) {
            return reject(Rejection::InvalidDetails);
        }
        self.set_new_member(&join.author, &join.handle);
        Ok(Verdict::Accepted(ActionKind::JoinNetwork))
    }

    fn authorize_update(&mut self, update: &UpdateInfo) -> Result<Verdict, StateError> {
        if !self.has_member(&update.author)? {
            return reject(Rejection::NotMember);
        }
        if !self.power_of_attorney(&update.author, &update.signer)? {
            return reject(Rejection::NoPowerOfAttorney);
        }
        if !is_valid_json(&update.details) {
            return reject(Rejection::InvalidDetails);
        }
        Ok(Verdict::Accepted(ActionKind::UpdateInfo))
    }

    fn authorize_grant(&mut self, grant: &GrantPowerOfAttorney) -> Result<Verdict, StateError> {
        if !self.has_member(&grant.author)? {
            return reject(Rejection::NotMember);
        }
        if self.power_of_attorney(&grant.author, &grant.attorney)? {
            return reject(Rejection::GrantExists);
        }
        self.set_new_grant_power(&grant.author, &grant.attorney);
        Ok(Verdict::Accepted(ActionKind::GrantPowerOfAttorney))
    }

    fn authorize_revoke(&mut self, revoke: &RevokePowerOfAttorney) -> Result<Verdict, StateError> {
        if !self.has_member(&revoke.author)? {
            return reject(Rejection::NotMember);
        }
        if !self.power_of_attorney(&revoke.author, &revoke.attorney)? {
            return reject(Rejection::GrantMissing);
        }
        self.set_new_revoke_power(&revoke.author, &revoke.attorney);
        Ok(Verdict::Accepted(ActionKind::RevokePowerOfAttorney))
    }

    fn authorize_void(&mut self, void: &Void) -> Result<Verdict, StateError> {
        if void.epoch > self.epoch() {
            return reject(Rejection::FutureEpoch {
                action: void.epoch,
                current: self.epoch(),
            });
        }
        if !self.has_member(&void.author)? {
            return reject(Rejection::NotMember);
        }
        if !self.power_of_attorney(&void.author, &void.signer)? {
            return reject(Rejection::NoPowerOfAttorney);
        }
        Ok(Verdict::Accepted(ActionKind::Void))
    }
}
