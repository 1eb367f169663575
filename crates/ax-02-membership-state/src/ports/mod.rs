//! Ports layer - traits at the storage and query seams.

pub mod api;
pub mod vault;
