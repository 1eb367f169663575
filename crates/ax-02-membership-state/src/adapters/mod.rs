//! Adapters layer - concrete hash vaults.

pub mod memory_vault;
#[cfg(feature = "rocksdb")]
pub mod rocksdb_vault;

pub use memory_vault::MemoryHashVault;
#[cfg(feature = "rocksdb")]
pub use rocksdb_vault::{RocksDbVaultStore, RocksDbHashVault};
