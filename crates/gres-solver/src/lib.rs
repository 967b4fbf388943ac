//! Generic Type-Parameter Resolution
//!
//! Binds declarations of generic type definitions and methods into a
//! `Compilation` and derives, for every type parameter, the properties a
//! C#-style type checker needs:
//!
//! - **Reference kind**: whether every valid type argument is a reference
//!   type, a value type, or neither is guaranteed.
//! - **Effective base class**: the most-derived class every type argument
//!   derives from.
//! - **Effective interface set**: the interfaces every type argument
//!   implements through its constraints.
//!
//! Declarations (`decl`) are plain values shared through `ProjectContent`.
//! Resolved entities live in the arena of the compilation that bound them,
//! addressed by handles tagged with that compilation (`types`). Entities
//! move between compilations by re-binding their declarations (`import`).
//!
//! Key properties:
//! - Binding is idempotent and transactional: a failed bind leaves no trace.
//! - Type equality within a compilation is `TypeId` equality (interning).
//! - Constraint graphs are resolved in dependency order; cycles are errors.

mod compilation;
mod constraints;
pub mod corlib;
pub mod decl;
pub mod entities;
pub mod error;
mod format;
mod hierarchy;
mod import;
pub mod options;
pub mod project;
pub mod types;

pub use compilation::Compilation;
pub use decl::{
    KnownTypeCode, MethodDecl, SymbolKind, TypeDefDecl, TypeDefKey, TypeKind, TypeParamDecl,
    TypeRef,
};
pub use entities::{Method, TypeDefinition, TypeParamOrigin, TypeParamOwner, TypeParameter};
pub use error::{InvalidDeclaration, NotImportable, ResolutionError};
pub use format::TypeFormatter;
pub use import::Entity;
pub use options::ResolutionOptions;
pub use project::ProjectContent;
pub use types::{CompilationId, MethodId, ReferenceKind, TypeData, TypeDefId, TypeId, TypeParamId};

#[cfg(test)]
#[path = "../tests/test_fixtures.rs"]
pub(crate) mod test_fixtures;
// compilation_tests: loaded from compilation.rs
// hierarchy_tests: loaded from hierarchy.rs
// import_tests: loaded from import.rs
// format_tests: loaded from format.rs
#[cfg(test)]
#[path = "../tests/type_parameter_tests.rs"]
mod type_parameter_tests;
#[cfg(test)]
#[path = "../tests/constraint_error_tests.rs"]
mod constraint_error_tests;
