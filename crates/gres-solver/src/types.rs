//! Handles and type representation.
//!
//! Every resolved entity lives in the arena of exactly one `Compilation`.
//! Handles pair the owning `CompilationId` with an arena index, so a handle
//! from one compilation never compares equal to a handle from another, even
//! when both were produced from the same declaration.
//!
//! Types are interned per compilation: two structurally identical types
//! built in one compilation share a `TypeId`, which makes `TypeId` equality
//! the structural equality of the type system within a compilation.

use crate::decl::TypeDefKey;
use smallvec::SmallVec;

/// Process-unique identifier of a `Compilation`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompilationId(pub u32);

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name {
            compilation: CompilationId,
            index: u32,
        }

        impl $name {
            pub(crate) const fn new(compilation: CompilationId, index: u32) -> Self {
                Self { compilation, index }
            }

            /// The compilation that owns this entity.
            #[inline]
            pub const fn compilation(self) -> CompilationId {
                self.compilation
            }

            /// Arena slot inside the owning compilation.
            #[inline]
            pub const fn index(self) -> u32 {
                self.index
            }

            #[inline]
            pub(crate) const fn slot(self) -> usize {
                self.index as usize
            }
        }
    };
}

define_handle!(
    /// Interned resolved type.
    TypeId
);
define_handle!(
    /// Resolved type definition.
    TypeDefId
);
define_handle!(
    /// Resolved method.
    MethodId
);
define_handle!(
    /// Resolved type parameter.
    TypeParamId
);

/// Structural representation of a resolved type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    /// A type definition used without type arguments. For a generic
    /// definition this is the open definition itself.
    Definition(TypeDefId),
    /// `List<string>`, `C<U, X>`: a generic definition applied to arguments.
    Parameterized {
        definition: TypeDefId,
        type_arguments: SmallVec<[TypeId; 2]>,
    },
    TypeParameter(TypeParamId),
    /// A named reference the project content cannot satisfy.
    Unknown(TypeDefKey),
}

impl TypeData {
    /// The definition this type is built on, if any.
    pub fn definition(&self) -> Option<TypeDefId> {
        match self {
            Self::Definition(def) => Some(*def),
            Self::Parameterized { definition, .. } => Some(*definition),
            Self::TypeParameter(_) | Self::Unknown(_) => None,
        }
    }

    pub fn type_arguments(&self) -> &[TypeId] {
        match self {
            Self::Parameterized { type_arguments, .. } => type_arguments,
            _ => &[],
        }
    }
}

/// Whether a type parameter is guaranteed to be instantiated with a
/// reference type, a value type, or neither.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ReferenceKind {
    Reference,
    Value,
    #[default]
    Unknown,
}

impl ReferenceKind {
    /// `Some(true)` for reference types, `Some(false)` for value types,
    /// `None` when nothing is guaranteed.
    pub const fn as_option(self) -> Option<bool> {
        match self {
            Self::Reference => Some(true),
            Self::Value => Some(false),
            Self::Unknown => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Value => "value",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
