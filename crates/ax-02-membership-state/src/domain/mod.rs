//! Domain layer: mutation algebra, committed state, speculative overlay and
//! the authorization rules that tie them together.

pub mod authorize;
pub mod config;
pub mod errors;
pub mod mutations;
pub mod overlay;
pub mod state;
