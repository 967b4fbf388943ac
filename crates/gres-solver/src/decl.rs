//! Declaration model.
//!
//! Declarations are the resolution-independent description of type
//! definitions, methods and type parameters, as produced by a parser or
//! metadata loader. They are plain values: they never point into a
//! `Compilation`, and the same declaration can be bound into any number of
//! compilations.
//!
//! Type-parameter-reference constraints are positional
//! (`TypeRef::TypeParameter { owner, index }`) rather than pointers to
//! another declaration, so a declaration graph survives being re-bound or
//! imported elsewhere.

use gres_common::interner::Atom;
use std::sync::Arc;

// =============================================================================
// Kinds
// =============================================================================

/// Kind of entity that owns a type parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    /// `class C<T>`: parameter of a type definition.
    TypeDefinition,
    /// `void M<T>()`: parameter of a method.
    Method,
}

/// Kind of type definition.
///
/// | Kind | Implicit base | Reference type |
/// |------|---------------|----------------|
/// | Class | `System.Object` | yes |
/// | Interface | none | n/a |
/// | Struct | `System.ValueType` | no |
/// | Enum | `System.Enum` | no |
/// | Delegate | `System.Delegate` | yes |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Enum,
    Delegate,
}

impl TypeKind {
    /// Whether a type of this kind takes part in effective base class
    /// computation.
    pub const fn is_class_like(self) -> bool {
        matches!(self, Self::Class | Self::Delegate)
    }

    pub const fn is_value_type(self) -> bool {
        matches!(self, Self::Struct | Self::Enum)
    }
}

/// Core-library types the engine needs to find without knowing their
/// declarations up front.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KnownTypeCode {
    None,
    /// `System.Object`, the universal root.
    Object,
    ValueType,
    Enum,
    Delegate,
    String,
    Int32,
    Boolean,
}

impl KnownTypeCode {
    /// Namespace and name of the known type.
    pub const fn full_name(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::None => None,
            Self::Object => Some(("System", "Object")),
            Self::ValueType => Some(("System", "ValueType")),
            Self::Enum => Some(("System", "Enum")),
            Self::Delegate => Some(("System", "Delegate")),
            Self::String => Some(("System", "String")),
            Self::Int32 => Some(("System", "Int32")),
            Self::Boolean => Some(("System", "Boolean")),
        }
    }
}

// =============================================================================
// TypeRef - unresolved type reference
// =============================================================================

/// An unresolved reference to a type, as written in a constraint, base type
/// list or type argument list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A named type definition, instantiated with `type_arguments` when the
    /// list is non-empty. The arity of the target is the argument count.
    Named {
        namespace: Atom,
        name: Atom,
        type_arguments: Vec<TypeRef>,
    },
    /// A core-library type, looked up through its `KnownTypeCode`.
    Known(KnownTypeCode),
    /// The type parameter at `index` of the enclosing type definition or
    /// method.
    TypeParameter { owner: SymbolKind, index: u32 },
}

impl TypeRef {
    pub fn named(namespace: Atom, name: Atom) -> Self {
        Self::Named {
            namespace,
            name,
            type_arguments: Vec::new(),
        }
    }

    pub fn generic(namespace: Atom, name: Atom, type_arguments: Vec<TypeRef>) -> Self {
        Self::Named {
            namespace,
            name,
            type_arguments,
        }
    }

    pub const fn type_parameter(owner: SymbolKind, index: u32) -> Self {
        Self::TypeParameter { owner, index }
    }

    /// Positional target if this is a type-parameter-reference constraint.
    pub fn as_type_parameter(&self) -> Option<(SymbolKind, u32)> {
        match *self {
            Self::TypeParameter { owner, index } => Some((owner, index)),
            _ => None,
        }
    }
}

// =============================================================================
// Declarations
// =============================================================================

/// A type parameter as declared, before resolution.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeParamDecl {
    pub owner: SymbolKind,
    pub index: u32,
    pub name: Atom,
    /// `where T : class`
    pub has_reference_type_constraint: bool,
    /// `where T : struct`
    pub has_value_type_constraint: bool,
    /// `where T : new()`
    pub has_default_constructor_constraint: bool,
    /// Type constraints in declaration order.
    pub constraints: Vec<TypeRef>,
}

impl TypeParamDecl {
    pub const fn new(owner: SymbolKind, index: u32, name: Atom) -> Self {
        Self {
            owner,
            index,
            name,
            has_reference_type_constraint: false,
            has_value_type_constraint: false,
            has_default_constructor_constraint: false,
            constraints: Vec::new(),
        }
    }

    pub const fn with_reference_type_constraint(mut self) -> Self {
        self.has_reference_type_constraint = true;
        self
    }

    pub const fn with_value_type_constraint(mut self) -> Self {
        self.has_value_type_constraint = true;
        self
    }

    pub const fn with_default_constructor_constraint(mut self) -> Self {
        self.has_default_constructor_constraint = true;
        self
    }

    pub fn with_constraint(mut self, constraint: TypeRef) -> Self {
        self.constraints.push(constraint);
        self
    }
}

/// A method declaration. Only its generic signature matters here.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodDecl {
    pub name: Atom,
    pub type_params: Vec<TypeParamDecl>,
}

impl MethodDecl {
    pub const fn new(name: Atom) -> Self {
        Self {
            name,
            type_params: Vec::new(),
        }
    }

    pub fn with_type_param(mut self, param: TypeParamDecl) -> Self {
        self.type_params.push(param);
        self
    }
}

/// Identity of a type definition declaration: `(namespace, name, arity)`.
///
/// ``List`1`` and a non-generic `List` in the same namespace are distinct.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeDefKey {
    pub namespace: Atom,
    pub name: Atom,
    pub arity: u32,
}

/// A type definition declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeDefDecl {
    pub kind: TypeKind,
    pub known_type_code: KnownTypeCode,
    pub namespace: Atom,
    pub name: Atom,
    pub type_params: Vec<TypeParamDecl>,
    /// Declared base class and interfaces. May mention this definition's
    /// own type parameters (`class D<T> : B<T>`).
    pub base_types: Vec<TypeRef>,
    pub methods: Vec<Arc<MethodDecl>>,
}

impl TypeDefDecl {
    pub const fn new(kind: TypeKind, namespace: Atom, name: Atom) -> Self {
        Self {
            kind,
            known_type_code: KnownTypeCode::None,
            namespace,
            name,
            type_params: Vec::new(),
            base_types: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub const fn class(namespace: Atom, name: Atom) -> Self {
        Self::new(TypeKind::Class, namespace, name)
    }

    pub const fn interface(namespace: Atom, name: Atom) -> Self {
        Self::new(TypeKind::Interface, namespace, name)
    }

    pub const fn structure(namespace: Atom, name: Atom) -> Self {
        Self::new(TypeKind::Struct, namespace, name)
    }

    pub const fn with_known_type_code(mut self, code: KnownTypeCode) -> Self {
        self.known_type_code = code;
        self
    }

    pub fn with_type_param(mut self, param: TypeParamDecl) -> Self {
        self.type_params.push(param);
        self
    }

    pub fn with_base_type(mut self, base: TypeRef) -> Self {
        self.base_types.push(base);
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(Arc::new(method));
        self
    }

    pub fn key(&self) -> TypeDefKey {
        TypeDefKey {
            namespace: self.namespace,
            name: self.name,
            arity: self.type_params.len() as u32,
        }
    }

    /// Position of the first method named `name`.
    pub fn method_index(&self, name: Atom) -> Option<usize> {
        self.methods.iter().position(|m| m.name == name)
    }
}

#[cfg(test)]
#[path = "../tests/decl_tests.rs"]
mod tests;
