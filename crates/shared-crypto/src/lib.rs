//! # Shared Crypto - Primitives for the Attorney Protocol
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256 | Existence-set keys (members, captions, delegations) |
//! | `signatures` | Ed25519 | Tokens, action signatures |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, no RNG dependency
//! - **Tokens**: Kept as raw bytes; malformed keys fail verification, never panic

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod signatures;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{hash_bytes, hash_many, hash_pair, hash_token, Hash, HASH_SIZE};
pub use signatures::{PrivateKey, Signature, Token, SIGNATURE_SIZE, TOKEN_SIZE};

