//! # Domain Models
//!
//! Pure data types for the `zk` toolbox with a single dependency (`serde`).
//! Keep it lean: no I/O, no process spawning, no logging. Just data and defaults.

pub mod config;
pub mod tokens;
