//! Common types and utilities for the gres resolution engine.
//!
//! This crate provides foundational types used across all gres crates:
//! - String interning (`Atom`, `ShardedInterner`)
//! - Resolution limits and thresholds

// String interning for identifier deduplication
pub mod interner;
pub use interner::{Atom, ShardedInterner};

// Centralized limits and thresholds
pub mod limits;
