//! Tracing configuration for debugging resolution.
//!
//! Supports three output formats controlled by `GRES_LOG_FORMAT`:
//!
//! - `text` (default): standard `tracing-subscriber` flat output
//! - `tree`: hierarchical indented output via `tracing-tree`, one level per
//!   nested bind
//! - `json`: one JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Follow a bind through its dependencies
//! GRES_LOG=debug GRES_LOG_FORMAT=tree gres resolve decls.json
//!
//! # JSON (for tooling)
//! GRES_LOG=debug GRES_LOG_FORMAT=json gres resolve decls.json
//!
//! # Fine-grained filtering
//! GRES_LOG="gres_solver::constraints=trace" gres check decls.json
//! ```
//!
//! The subscriber is only initialised when `GRES_LOG` (or `RUST_LOG`) is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a `GRES_LOG_FORMAT` value. Unrecognised values mean `Text`.
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("GRES_LOG_FORMAT").unwrap_or_default())
    }
}

/// Build an `EnvFilter` from `GRES_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("GRES_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `GRES_LOG` nor `RUST_LOG` is set. All output
/// goes to stderr so it never mixes with reports on stdout.
pub fn init_tracing() {
    let has_gres_log = std::env::var("GRES_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_gres_log && !has_rust_log {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

#[cfg(test)]
#[path = "../tests/tracing_config_tests.rs"]
mod tests;
