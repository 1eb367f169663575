//! # Action Codec (AX-01)
//!
//! Binary wire codec for the five attorney action kinds.
//!
//! ## Role in System
//!
//! ```text
//! raw bytes ──kind()──→ dispatch ──decode()──→ Action ──→ [Membership State (2)]
//!                                     │
//!                          header, fields, JSON,
//!                          signed prefix, signature,
//!                          no trailing bytes
//! ```
//!
//! ## Security
//!
//! - The signature covers every byte before it; nothing follows it
//! - `UpdateInfo` and `Void` are verified against the declared signer,
//!   every other kind against the author
//! - Decode never returns a partially parsed action

pub mod domain;

pub use domain::codec::{get_tokens, is_attorney_non_void, is_valid_json, kind};
pub use domain::entities::{
    Action, ActionKind, GrantPowerOfAttorney, JoinNetwork, ProtocolCode, RevokePowerOfAttorney,
    UpdateInfo, Void,
};
pub use domain::errors::DecodeError;
pub use domain::wire::{FORMAT_VERSION, HEADER_SIZE, VOID_TAIL_SIZE};
