//! Crypto error types.

use thiserror::Error;

/// Cryptographic parsing errors.
#[derive(Debug, Error, PartialEq)]
pub enum CryptoError {
    /// Wrong number of bytes for a fixed-size value
    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Input was not valid hex
    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}
