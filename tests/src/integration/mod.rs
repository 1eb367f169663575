//! Cross-crate flows from raw bytes through overlays to committed state.

pub mod flows;
pub mod persistence;
