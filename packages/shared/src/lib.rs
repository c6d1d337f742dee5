//! Utilities shared across Kokuban binaries.

pub mod logger;
pub mod time;
