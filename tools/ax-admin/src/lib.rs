//! AX-Admin: command implementations behind the `ax-admin` binary.
//!
//! Every command returns a `serde_json::Value` or raw bytes; printing is
//! left to `main`.

pub mod commands;
