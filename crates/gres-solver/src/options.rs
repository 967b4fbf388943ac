//! Resolution options.

use gres_common::limits::MAX_BASE_CLASS_CHAIN_DEPTH;
use serde::{Deserialize, Serialize};

/// Knobs for the constraint resolution rules, fixed per compilation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolutionOptions {
    /// Classify a parameter as a reference type when its effective base
    /// class is a class other than `System.Object`, `System.ValueType` or
    /// `System.Enum` (and as a value type when it is a struct or enum).
    /// When off, only the `class` / `struct` flags decide.
    pub infer_reference_kind_from_base_class: bool,
    /// Maximum base-class links followed by one derivation query.
    pub max_base_class_depth: u32,
}

impl Default for ResolutionOptions {
    fn default() -> Self {
        ResolutionOptions {
            infer_reference_kind_from_base_class: true,
            max_base_class_depth: MAX_BASE_CLASS_CHAIN_DEPTH,
        }
    }
}

impl ResolutionOptions {
    /// Options where only explicit `class` / `struct` flags classify a
    /// parameter.
    pub fn flags_only() -> Self {
        ResolutionOptions {
            infer_reference_kind_from_base_class: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod tests;
