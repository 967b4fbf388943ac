//! Resolution failures.
//!
//! There are exactly two kinds: the declaration graph is structurally
//! unsound (`InvalidDeclaration`), or an entity has no declarative origin an
//! importer could re-bind (`NotImportable`). Names are captured as strings
//! when the error is built because a failed bind rolls back the arena the
//! handles pointed into.

use crate::decl::SymbolKind;
use std::fmt;

/// Errors returned by binding and importing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    InvalidDeclaration(InvalidDeclaration),
    NotImportable(NotImportable),
}

impl ResolutionError {
    pub fn is_invalid_declaration(&self) -> bool {
        matches!(self, Self::InvalidDeclaration(_))
    }

    pub fn is_not_importable(&self) -> bool {
        matches!(self, Self::NotImportable(_))
    }
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDeclaration(inner) => write!(f, "invalid declaration: {inner}"),
            Self::NotImportable(inner) => write!(f, "not importable: {inner}"),
        }
    }
}

impl std::error::Error for ResolutionError {}

impl From<InvalidDeclaration> for ResolutionError {
    fn from(value: InvalidDeclaration) -> Self {
        Self::InvalidDeclaration(value)
    }
}

impl From<NotImportable> for ResolutionError {
    fn from(value: NotImportable) -> Self {
        Self::NotImportable(value)
    }
}

/// Ways a declaration graph can be malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidDeclaration {
    /// A type-parameter-reference points past the end of its owner's
    /// parameter list, or at a method parameter from outside any method.
    TypeParameterOutOfRange {
        type_name: String,
        owner: SymbolKind,
        index: u32,
        available: usize,
    },
    /// A type parameter declaration whose owner kind or ordinal does not
    /// match its position in the declaration.
    MisplacedTypeParameter {
        type_name: String,
        parameter: String,
        declared_owner: SymbolKind,
        declared_index: u32,
        expected_index: u32,
    },
    /// Type parameters constrained by each other in a cycle. `cycle` lists
    /// parameter names starting and ending at the same parameter.
    ConstraintCycle {
        type_name: String,
        cycle: Vec<String>,
    },
    /// Two class constraints of one parameter with no most-derived member.
    ConflictingBaseClasses {
        type_name: String,
        parameter: String,
        first: String,
        second: String,
    },
    /// A definition that (transitively) derives from itself.
    InheritanceCycle { type_name: String },
    /// A different declaration was already bound under the same key.
    DuplicateDefinition { type_name: String },
}

impl fmt::Display for InvalidDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeParameterOutOfRange {
                type_name,
                owner,
                index,
                available,
            } => write!(
                f,
                "in '{type_name}': constraint references {} type parameter #{index}, but only {available} exist",
                owner_label(*owner)
            ),
            Self::MisplacedTypeParameter {
                type_name,
                parameter,
                declared_owner,
                declared_index,
                expected_index,
            } => write!(
                f,
                "in '{type_name}': type parameter '{parameter}' is declared as {} parameter #{declared_index} at position #{expected_index}",
                owner_label(*declared_owner)
            ),
            Self::ConstraintCycle { type_name, cycle } => write!(
                f,
                "in '{type_name}': circular constraint dependency {}",
                cycle.join(" -> ")
            ),
            Self::ConflictingBaseClasses {
                type_name,
                parameter,
                first,
                second,
            } => write!(
                f,
                "in '{type_name}': type parameter '{parameter}' has conflicting base class constraints '{first}' and '{second}'"
            ),
            Self::InheritanceCycle { type_name } => {
                write!(f, "'{type_name}' circularly derives from itself")
            }
            Self::DuplicateDefinition { type_name } => write!(
                f,
                "a different declaration of '{type_name}' is already bound in this compilation"
            ),
        }
    }
}

impl std::error::Error for InvalidDeclaration {}

/// Why an entity could not be imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotImportable {
    /// The entity was created directly in a compilation, not bound from a
    /// declaration.
    SyntheticEntity { name: String },
    /// The handle does not belong to the compilation it was imported from.
    ForeignEntity,
    /// Source and target compilations name things through different
    /// interners, so declaration atoms cannot be carried over.
    InternerMismatch,
    /// The target's project content declares the same type differently.
    ConflictingDeclaration { type_name: String },
}

impl fmt::Display for NotImportable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SyntheticEntity { name } => {
                write!(f, "'{name}' has no declaration to re-bind")
            }
            Self::ForeignEntity => {
                write!(f, "entity does not belong to the source compilation")
            }
            Self::InternerMismatch => {
                write!(f, "source and target compilations use different interners")
            }
            Self::ConflictingDeclaration { type_name } => write!(
                f,
                "the target compilation declares '{type_name}' differently"
            ),
        }
    }
}

impl std::error::Error for NotImportable {}

const fn owner_label(owner: SymbolKind) -> &'static str {
    match owner {
        SymbolKind::TypeDefinition => "type",
        SymbolKind::Method => "method",
    }
}

#[cfg(test)]
#[path = "../tests/error_tests.rs"]
mod tests;
