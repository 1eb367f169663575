//! # Axé Attorney Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion benchmarks per subsystem
//! │   ├── ax_01_codec.rs
//! │   └── ax_02_membership.rs
//! │
//! ├── fixtures.rs       # Signed action builders
//! │
//! └── integration/      # Cross-crate flows: bytes → overlay → commit
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ax-tests
//! cargo test -p ax-tests --features rocksdb
//!
//! # Benchmarks
//! cargo bench -p ax-tests
//! ```

pub mod fixtures;
pub mod integration;
