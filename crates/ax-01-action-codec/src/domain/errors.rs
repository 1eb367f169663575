//! # Decode Errors
//!
//! Every way a byte buffer can fail to be an attorney action. Callers treat
//! all of these as "not a valid action of this kind": they are recoverable
//! and never indicate a fault in the validator.

use thiserror::Error;

use super::entities::ActionKind;

/// Errors that can occur while decoding an action.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Buffer shorter than the fixed header
    #[error("Buffer too short: {len} bytes, need at least {min}")]
    TooShort { len: usize, min: usize },

    /// Format version byte is not the canonical one
    #[error("Unsupported format version: {0}")]
    UnsupportedVersion(u8),

    /// Second header byte does not mark a void instruction
    #[error("Not a void instruction: tag {0}")]
    NotVoidInstruction(u8),

    /// Protocol tag does not belong to this protocol
    #[error("Foreign protocol tag: {0:02x?}")]
    ForeignProtocol([u8; 4]),

    /// Discriminator does not match the decoder being run
    #[error("Kind mismatch: expected {expected:?}, found {found}")]
    KindMismatch { expected: ActionKind, found: u8 },

    /// Discriminator is not a known action kind
    #[error("Unknown action kind: {0}")]
    UnknownKind(u8),

    /// A field ran past the end of the buffer
    #[error("Truncated {field}: need {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        field: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// String field is not valid UTF-8
    #[error("Invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    /// Details field is not parseable as JSON
    #[error("Details field is not valid JSON")]
    InvalidDetails,

    /// Bytes left over after the signature
    #[error("Trailing bytes after signature: {0}")]
    TrailingBytes(usize),

    /// Signature does not verify against the signer's token
    #[error("Signature verification failed")]
    BadSignature,
}
