//! # SHA-256 Hashing
//!
//! Digest type used as the sole key of every existence set.
//!
//! ## Key Derivations
//!
//! - Members: `hash_token(author)`
//! - Captions: `hash_bytes(handle)`
//! - Delegations: `hash_pair(author, attorney)` over `author || attorney`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::signatures::Token;
use crate::CryptoError;

/// Size of a digest in bytes.
pub const HASH_SIZE: usize = 32;

/// SHA-256 digest (256-bit).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    /// All-zero digest.
    pub const ZERO: Hash = Hash([0u8; HASH_SIZE]);

    /// Wrap raw digest bytes.
    pub const fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Hash {
    type Error = CryptoError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; HASH_SIZE] = value.try_into().map_err(|_| CryptoError::InvalidLength {
            expected: HASH_SIZE,
            actual: value.len(),
        })?;
        Ok(Self(bytes))
    }
}

impl FromStr for Hash {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        Self::try_from(bytes.as_slice())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Hash arbitrary bytes (one-shot).
pub fn hash_bytes(data: &[u8]) -> Hash {
    Hash(Sha256::digest(data).into())
}

/// Hash multiple inputs as if concatenated.
pub fn hash_many(inputs: &[&[u8]]) -> Hash {
    let mut hasher = Sha256::new();
    for input in inputs {
        hasher.update(input);
    }
    Hash(hasher.finalize().into())
}

/// Hash of a token's key bytes. Used as the member key.
pub fn hash_token(token: &Token) -> Hash {
    hash_bytes(token.as_bytes())
}

/// Delegation pair-hash over `author || attorney`.
pub fn hash_pair(author: &Token, attorney: &Token) -> Hash {
    hash_many(&[author.as_bytes(), attorney.as_bytes()])
}
