//! # Membership Queries
//!
//! The three questions the authorization rules ask. Answered by committed
//! state alone, or by a speculative overlay on top of it.

use shared_crypto::Token;

use crate::domain::errors::StateError;

pub trait MembershipView {
    /// Whether `token` belongs to a member.
    fn has_member(&self, token: &Token) -> Result<bool, StateError>;

    /// Whether `handle` has been claimed.
    fn has_handle(&self, handle: &str) -> Result<bool, StateError>;

    /// Whether `attorney` may sign on behalf of `token`. A token always
    /// holds power over itself.
    fn power_of_attorney(&self, token: &Token, attorney: &Token) -> Result<bool, StateError>;
}
