//! # Domain Layer
//!
//! Pure encoding logic with no I/O dependencies.

pub mod codec;
pub mod entities;
pub mod errors;
pub mod wire;
