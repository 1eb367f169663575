//! # Membership State (AX-02)
//!
//! Who is a member, which handles are claimed, and who may sign for whom.
//!
//! ## Role in System
//!
//! ```text
//!                 ┌──────────── MutatingState (per candidate) ────────────┐
//! raw bytes ──→   │ decode → authorize → record into MutationSet           │
//!                 │            │ pending first, then committed            │
//!                 └────────────┼──────────────────────────────────────────┘
//!                              ▼
//!                       CommittedState ◄── incorporate(merge(sets))
//!                 members │ captions │ poa   (HashVault each)
//! ```
//!
//! ## Invariants
//!
//! - A handle maps to at most one member
//! - Merging mutation sets lets revocation dominate grant, in any order
//! - Overlays never write committed state; only `incorporate` does
//! - A vault failure aborts validation; it is never read as "absent"
//!
//! ## Backends
//!
//! In-memory vaults by default. With the `rocksdb` feature, a data dir in
//! [`StateConfig`] selects one RocksDB column family per vault.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::MemoryHashVault;
#[cfg(feature = "rocksdb")]
pub use adapters::{RocksDbHashVault, RocksDbVaultStore};
pub use domain::authorize::Verdict;
pub use domain::config::StateConfig;
pub use domain::errors::{Rejection, StateError, VaultError};
pub use domain::mutations::MutationSet;
pub use domain::overlay::MutatingState;
pub use domain::state::{caption_hash, CommittedState, IncorporateSummary};
pub use ports::api::MembershipView;
pub use ports::vault::HashVault;
