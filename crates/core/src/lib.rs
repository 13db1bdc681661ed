//! conflictsweep core library.
//!
//! This crate provides the pieces needed to mechanically resolve merge-conflict
//! markers left in a working tree: a marker scanner, the resolution passes,
//! per-file outcomes, and the TOML configuration describing which files to
//! sweep.

pub mod config;
pub mod conflict;
pub mod errors;

// Re-exports for convenience.
pub use config::SweepConfig;
pub use conflict::{ConflictResolver, FileOutcome, ResolutionPolicy};
