use ax_01_action_codec::DecodeError;
use thiserror::Error;

/// Failures reported by a hash vault.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VaultError {
    #[error("Vault is closed")]
    Closed,

    #[error("Vault unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Faults of the state layer. A `StoreUnavailable` aborts the validation
/// pass: an existence answer that could not be obtained is never read as
/// "absent".
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Hash vault '{vault}' unavailable: {source}")]
    StoreUnavailable {
        vault: &'static str,
        #[source]
        source: VaultError,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Why an action was not accepted. This is an expected outcome of
/// validation, not a fault.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("Undecodable action: {0}")]
    Decode(#[from] DecodeError),

    #[error("Handle already claimed")]
    HandleTaken,

    #[error("Author is already a member")]
    AlreadyMember,

    #[error("Author is not a member")]
    NotMember,

    #[error("Details field is not valid JSON")]
    InvalidDetails,

    #[error("Signer holds no power of attorney for the author")]
    NoPowerOfAttorney,

    #[error("Power of attorney already granted")]
    GrantExists,

    #[error("No power of attorney to revoke")]
    GrantMissing,

    #[error("Action epoch {action} is ahead of validator epoch {current}")]
    FutureEpoch { action: u64, current: u64 },
}
