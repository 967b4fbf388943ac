//! gres: generic type-parameter resolution for a C#-style type system.
//!
//! This crate re-exports the engine crates under one name and carries the
//! process-level plumbing shared by the binaries.

// Common types and limits
pub use gres_common::interner::{Atom, ShardedInterner};
pub use gres_common::limits;

// Resolution engine
pub use gres_solver::*;

// Tracing setup for binaries (GRES_LOG / GRES_LOG_FORMAT)
pub mod tracing_config;
