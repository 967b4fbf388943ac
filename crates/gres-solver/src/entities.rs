//! Resolved entities stored in a compilation's arena.

use crate::decl::{KnownTypeCode, MethodDecl, SymbolKind, TypeDefDecl, TypeDefKey, TypeKind};
use crate::types::{MethodId, ReferenceKind, TypeDefId, TypeId, TypeParamId};
use gres_common::interner::Atom;
use smallvec::SmallVec;
use std::sync::Arc;

/// A type definition bound into a compilation.
#[derive(Clone, Debug)]
pub struct TypeDefinition {
    pub(crate) id: TypeDefId,
    pub(crate) decl: Arc<TypeDefDecl>,
    pub(crate) self_type: TypeId,
    pub(crate) type_parameters: SmallVec<[TypeParamId; 2]>,
    pub(crate) methods: Vec<MethodId>,
    pub(crate) direct_base_types: Vec<TypeId>,
}

impl TypeDefinition {
    pub fn id(&self) -> TypeDefId {
        self.id
    }

    /// The declaration this definition was bound from.
    pub fn declaration(&self) -> &Arc<TypeDefDecl> {
        &self.decl
    }

    pub fn key(&self) -> TypeDefKey {
        self.decl.key()
    }

    pub fn kind(&self) -> TypeKind {
        self.decl.kind
    }

    pub fn known_type_code(&self) -> KnownTypeCode {
        self.decl.known_type_code
    }

    pub fn namespace(&self) -> Atom {
        self.decl.namespace
    }

    pub fn name(&self) -> Atom {
        self.decl.name
    }

    /// The definition as a type (open when the definition is generic).
    pub fn self_type(&self) -> TypeId {
        self.self_type
    }

    pub fn type_parameters(&self) -> &[TypeParamId] {
        &self.type_parameters
    }

    pub fn methods(&self) -> &[MethodId] {
        &self.methods
    }

    /// Resolved declared base types, in declaration order, followed by the
    /// implicit base (`System.Object`, `System.ValueType`, ...) when no class
    /// base was declared.
    pub fn direct_base_types(&self) -> &[TypeId] {
        &self.direct_base_types
    }
}

/// A method bound into a compilation.
#[derive(Clone, Debug)]
pub struct Method {
    pub(crate) id: MethodId,
    pub(crate) decl: Arc<MethodDecl>,
    pub(crate) declaring_type: TypeDefId,
    pub(crate) index: u32,
    pub(crate) type_parameters: SmallVec<[TypeParamId; 2]>,
}

impl Method {
    pub fn id(&self) -> MethodId {
        self.id
    }

    pub fn declaration(&self) -> &Arc<MethodDecl> {
        &self.decl
    }

    pub fn name(&self) -> Atom {
        self.decl.name
    }

    pub fn declaring_type(&self) -> TypeDefId {
        self.declaring_type
    }

    /// Position of the method in its declaring type's member list.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn type_parameters(&self) -> &[TypeParamId] {
        &self.type_parameters
    }
}

/// The entity a declared type parameter belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeParamOwner {
    TypeDefinition(TypeDefId),
    Method(MethodId),
}

/// Where a type parameter came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeParamOrigin {
    /// Bound from a declaration; positional identity for import.
    Declared(TypeParamOwner),
    /// Created directly in a compilation, with no declaration behind it.
    Synthetic,
}

/// A type parameter bound into a compilation, with its derived properties.
#[derive(Clone, Debug)]
pub struct TypeParameter {
    pub(crate) id: TypeParamId,
    pub(crate) origin: TypeParamOrigin,
    pub(crate) owner_kind: SymbolKind,
    pub(crate) index: u32,
    pub(crate) name: Atom,
    pub(crate) self_type: TypeId,
    pub(crate) has_reference_type_constraint: bool,
    pub(crate) has_value_type_constraint: bool,
    pub(crate) has_default_constructor_constraint: bool,
    pub(crate) constraints: Vec<TypeId>,
    pub(crate) reference_kind: ReferenceKind,
    pub(crate) effective_base_class: TypeId,
    pub(crate) effective_interface_set: Vec<TypeId>,
}

impl TypeParameter {
    pub fn id(&self) -> TypeParamId {
        self.id
    }

    pub fn origin(&self) -> TypeParamOrigin {
        self.origin
    }

    /// Owning definition or method; `None` for synthetic parameters.
    pub fn owner(&self) -> Option<TypeParamOwner> {
        match self.origin {
            TypeParamOrigin::Declared(owner) => Some(owner),
            TypeParamOrigin::Synthetic => None,
        }
    }

    pub fn owner_kind(&self) -> SymbolKind {
        self.owner_kind
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn name(&self) -> Atom {
        self.name
    }

    /// The parameter as a type.
    pub fn self_type(&self) -> TypeId {
        self.self_type
    }

    pub fn has_reference_type_constraint(&self) -> bool {
        self.has_reference_type_constraint
    }

    pub fn has_value_type_constraint(&self) -> bool {
        self.has_value_type_constraint
    }

    /// `new()` declared, or implied by `struct`.
    pub fn has_default_constructor_constraint(&self) -> bool {
        self.has_default_constructor_constraint || self.has_value_type_constraint
    }

    /// Resolved type constraints in declaration order.
    pub fn constraints(&self) -> &[TypeId] {
        &self.constraints
    }

    pub fn reference_kind(&self) -> ReferenceKind {
        self.reference_kind
    }

    /// `Some(true)`: reference type; `Some(false)`: value type; `None`: unknown.
    pub fn is_reference_type(&self) -> Option<bool> {
        self.reference_kind.as_option()
    }

    pub fn effective_base_class(&self) -> TypeId {
        self.effective_base_class
    }

    pub fn effective_interface_set(&self) -> &[TypeId] {
        &self.effective_interface_set
    }
}
