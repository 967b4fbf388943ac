//! Compilation: the binding scope that gives declarations identity.
//!
//! A `Compilation` is an arena. Binding a declaration allocates its resolved
//! entities (definition, methods, type parameters) in the arena and caches
//! them by declaration key, so binding the same declaration again returns the
//! same handles. Handles carry the compilation's id, so entities of two
//! compilations never compare equal even when bound from one declaration.
//!
//! ## Binding passes
//!
//! Binding happens in two phases:
//!
//! 1. **Registration**: allocate the definition, its type parameters and
//!    methods, and resolve its base types. Definitions named by base types
//!    are registered recursively; the cache entry is written first, so
//!    mutually referencing definitions terminate.
//! 2. **Constraint resolution**: every definition registered in the pass is
//!    queued; the queue is drained after registration, computing each type
//!    parameter's derived properties (see `constraints.rs`).
//!
//! A pass is transactional. If any step fails, the arena, the type interner
//! and the declaration cache are truncated back to where the pass started,
//! so no partially resolved entity is ever observable.

use crate::decl::{KnownTypeCode, SymbolKind, TypeDefDecl, TypeDefKey, TypeParamDecl, TypeRef};
use crate::entities::{
    Method, TypeDefinition, TypeParamOrigin, TypeParamOwner, TypeParameter,
};
use crate::error::{InvalidDeclaration, ResolutionError};
use crate::format::TypeFormatter;
use crate::options::ResolutionOptions;
use crate::project::ProjectContent;
use crate::types::{
    CompilationId, MethodId, ReferenceKind, TypeData, TypeDefId, TypeId, TypeParamId,
};
use gres_common::interner::{Atom, ShardedInterner};
use gres_common::limits::INITIAL_TYPE_TABLE_CAPACITY;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, trace};

/// Global counter for assigning unique ids to `Compilation` instances.
static NEXT_COMPILATION_ID: AtomicU32 = AtomicU32::new(1);

/// Type parameters visible while resolving a `TypeRef`.
#[derive(Clone, Debug)]
pub(crate) struct GenericContext {
    pub(crate) definition: Option<TypeDefId>,
    pub(crate) class_params: SmallVec<[TypeParamId; 2]>,
    pub(crate) method_params: Option<SmallVec<[TypeParamId; 2]>>,
}

impl GenericContext {
    pub(crate) fn empty() -> Self {
        Self {
            definition: None,
            class_params: SmallVec::new(),
            method_params: None,
        }
    }

    pub(crate) fn for_definition(definition: TypeDefId, class_params: &[TypeParamId]) -> Self {
        Self {
            definition: Some(definition),
            class_params: SmallVec::from_slice(class_params),
            method_params: None,
        }
    }

    pub(crate) fn with_method(&self, method_params: &[TypeParamId]) -> Self {
        Self {
            definition: self.definition,
            class_params: self.class_params.clone(),
            method_params: Some(SmallVec::from_slice(method_params)),
        }
    }

    fn params(&self, owner: SymbolKind) -> &[TypeParamId] {
        match owner {
            SymbolKind::TypeDefinition => &self.class_params,
            SymbolKind::Method => self.method_params.as_deref().unwrap_or(&[]),
        }
    }

    pub(crate) fn lookup(&self, owner: SymbolKind, index: u32) -> Option<TypeParamId> {
        self.params(owner).get(index as usize).copied()
    }
}

/// Arena lengths at the start of a binding pass.
#[derive(Copy, Clone, Debug)]
struct Checkpoint {
    type_defs: usize,
    methods: usize,
    type_params: usize,
    types: usize,
}

/// A binding scope over a `ProjectContent`.
///
/// Binding and importing take `&mut self`; every read accessor takes
/// `&self`. A compilation is `Send + Sync`, and distinct compilations share
/// no mutable state.
pub struct Compilation {
    id: CompilationId,
    content: Arc<ProjectContent>,
    options: ResolutionOptions,
    type_defs: Vec<TypeDefinition>,
    methods: Vec<Method>,
    type_params: Vec<TypeParameter>,
    types: Vec<TypeData>,
    type_lookup: FxHashMap<TypeData, TypeId>,
    def_cache: FxHashMap<TypeDefKey, TypeDefId>,
    /// Definitions registered in the current pass whose constraints are
    /// not resolved yet.
    pending: Vec<TypeDefId>,
}

impl Compilation {
    /// Create a compilation with default options.
    pub fn new(content: Arc<ProjectContent>) -> Self {
        Self::with_options(content, ResolutionOptions::default())
    }

    pub fn with_options(content: Arc<ProjectContent>, options: ResolutionOptions) -> Self {
        let id = CompilationId(NEXT_COMPILATION_ID.fetch_add(1, Ordering::SeqCst));
        trace!(compilation = id.0, "Compilation::new");
        Self {
            id,
            content,
            options,
            type_defs: Vec::new(),
            methods: Vec::new(),
            type_params: Vec::new(),
            types: Vec::with_capacity(INITIAL_TYPE_TABLE_CAPACITY),
            type_lookup: FxHashMap::default(),
            def_cache: FxHashMap::default(),
            pending: Vec::new(),
        }
    }

    pub fn id(&self) -> CompilationId {
        self.id
    }

    pub fn content(&self) -> &Arc<ProjectContent> {
        &self.content
    }

    pub fn interner(&self) -> &Arc<ShardedInterner> {
        self.content.interner()
    }

    pub fn options(&self) -> &ResolutionOptions {
        &self.options
    }

    pub fn formatter(&self) -> TypeFormatter<'_> {
        TypeFormatter::new(self)
    }

    // -------------------------------------------------------------------------
    // Binding
    // -------------------------------------------------------------------------

    /// Bind a type definition declaration into this compilation.
    ///
    /// Idempotent: binding the same declaration (or an equal one with the
    /// same key) again returns the cached handle. The declaration does not
    /// have to be part of the project content.
    pub fn bind_type_definition(
        &mut self,
        decl: &Arc<TypeDefDecl>,
    ) -> Result<TypeDefId, ResolutionError> {
        if let Some(id) = self.cached_definition(decl)? {
            trace!(compilation = self.id.0, def = id.index(), "bind: cache hit");
            return Ok(id);
        }
        self.in_binding_pass(|this| this.register_type_definition(decl))
    }

    /// Bind the project-content declaration with the given key, if any.
    pub fn bind_by_key(&mut self, key: TypeDefKey) -> Result<Option<TypeDefId>, ResolutionError> {
        if let Some(&id) = self.def_cache.get(&key) {
            return Ok(Some(id));
        }
        self.in_binding_pass(|this| this.lookup_definition(key))
    }

    /// Bind a project-content declaration by namespace, name and arity.
    pub fn bind_by_name(
        &mut self,
        namespace: &str,
        name: &str,
        arity: u32,
    ) -> Result<Option<TypeDefId>, ResolutionError> {
        let key = TypeDefKey {
            namespace: self.interner().intern(namespace),
            name: self.interner().intern(name),
            arity,
        };
        self.bind_by_key(key)
    }

    /// Resolve a type reference outside of any generic context. Positional
    /// type parameter references are out of range here.
    pub fn resolve_type_ref(&mut self, type_ref: &TypeRef) -> Result<TypeId, ResolutionError> {
        let ctx = GenericContext::empty();
        self.in_binding_pass(|this| this.resolve_type_ref_in(type_ref, &ctx))
    }

    /// The type for a core-library type code, or an unknown type when the
    /// project content lacks it.
    pub fn known_type(&mut self, code: KnownTypeCode) -> Result<TypeId, ResolutionError> {
        self.in_binding_pass(|this| this.known_type_in_pass(code))
    }

    /// The universal root type (`System.Object`).
    pub fn root_type(&mut self) -> Result<TypeId, ResolutionError> {
        self.known_type(KnownTypeCode::Object)
    }

    /// Build `definition<type_arguments...>` in this compilation.
    ///
    /// Returns `None` when the argument count does not match the
    /// definition's arity or a handle belongs to another compilation.
    /// With no arguments this is the definition's own type.
    pub fn parameterized_type(
        &mut self,
        definition: TypeDefId,
        type_arguments: impl IntoIterator<Item = TypeId>,
    ) -> Option<TypeId> {
        let def = self.type_definition(definition)?;
        let arity = def.type_parameters.len();
        let self_type = def.self_type;
        let type_arguments: SmallVec<[TypeId; 2]> = type_arguments.into_iter().collect();
        if type_arguments.len() != arity || type_arguments.iter().any(|t| !self.owns_type(*t)) {
            return None;
        }
        if arity == 0 {
            return Some(self_type);
        }
        Some(self.intern(TypeData::Parameterized {
            definition,
            type_arguments,
        }))
    }

    /// Create a type parameter that has no declaration behind it, e.g. a
    /// placeholder used during type inference. It has no constraints, an
    /// unknown reference kind and the root type as its base class, and it
    /// cannot be imported into another compilation.
    pub fn create_synthetic_type_parameter(
        &mut self,
        owner_kind: SymbolKind,
        index: u32,
        name: Atom,
    ) -> Result<TypeParamId, ResolutionError> {
        let root = self.root_type()?;
        let decl = TypeParamDecl::new(owner_kind, index, name);
        let id = self.alloc_type_parameter(TypeParamOrigin::Synthetic, &decl);
        self.param_mut(id).effective_base_class = root;
        trace!(compilation = self.id.0, param = id.index(), "synthetic type parameter");
        Ok(id)
    }

    // -------------------------------------------------------------------------
    // Read accessors
    // -------------------------------------------------------------------------

    pub fn type_definition(&self, id: TypeDefId) -> Option<&TypeDefinition> {
        if id.compilation() != self.id {
            return None;
        }
        self.type_defs.get(id.slot())
    }

    pub fn method(&self, id: MethodId) -> Option<&Method> {
        if id.compilation() != self.id {
            return None;
        }
        self.methods.get(id.slot())
    }

    pub fn type_parameter(&self, id: TypeParamId) -> Option<&TypeParameter> {
        if id.compilation() != self.id {
            return None;
        }
        self.type_params.get(id.slot())
    }

    pub fn type_data(&self, id: TypeId) -> Option<&TypeData> {
        if !self.owns_type(id) {
            return None;
        }
        self.types.get(id.slot())
    }

    /// The definition a type is built on (`GetDefinition`).
    pub fn definition_of(&self, ty: TypeId) -> Option<TypeDefId> {
        self.type_data(ty).and_then(TypeData::definition)
    }

    /// Type arguments of a parameterized type; empty for anything else.
    pub fn type_arguments(&self, ty: TypeId) -> &[TypeId] {
        self.type_data(ty).map(TypeData::type_arguments).unwrap_or(&[])
    }

    /// The type parameter a type stands for, if it is one.
    pub fn as_type_parameter(&self, ty: TypeId) -> Option<TypeParamId> {
        match self.type_data(ty)? {
            TypeData::TypeParameter(p) => Some(*p),
            _ => None,
        }
    }

    /// First method named `name` declared on `definition`.
    pub fn find_method(&self, definition: TypeDefId, name: Atom) -> Option<MethodId> {
        self.type_definition(definition)?
            .methods
            .iter()
            .copied()
            .find(|&m| self.methods[m.slot()].name() == name)
    }

    /// Already-bound definition for a key, without binding anything.
    pub fn lookup_bound(&self, key: &TypeDefKey) -> Option<TypeDefId> {
        self.def_cache.get(key).copied()
    }

    /// All definitions bound so far, in binding order.
    pub fn type_definitions(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.type_defs.iter()
    }

    pub fn bound_definition_count(&self) -> usize {
        self.type_defs.len()
    }

    pub fn interned_type_count(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub(crate) fn owns_type(&self, ty: TypeId) -> bool {
        ty.compilation() == self.id && ty.slot() < self.types.len()
    }

    // -------------------------------------------------------------------------
    // Internal arena access (handles are known to belong to this compilation)
    // -------------------------------------------------------------------------

    #[inline]
    pub(crate) fn def(&self, id: TypeDefId) -> &TypeDefinition {
        &self.type_defs[id.slot()]
    }

    #[inline]
    pub(crate) fn method_entry(&self, id: MethodId) -> &Method {
        &self.methods[id.slot()]
    }

    #[inline]
    pub(crate) fn param(&self, id: TypeParamId) -> &TypeParameter {
        &self.type_params[id.slot()]
    }

    #[inline]
    pub(crate) fn param_mut(&mut self, id: TypeParamId) -> &mut TypeParameter {
        &mut self.type_params[id.slot()]
    }

    #[inline]
    pub(crate) fn data(&self, id: TypeId) -> &TypeData {
        &self.types[id.slot()]
    }

    /// Intern a type, returning the existing id for a structurally equal one.
    pub(crate) fn intern(&mut self, data: TypeData) -> TypeId {
        if let Some(&id) = self.type_lookup.get(&data) {
            return id;
        }
        let id = TypeId::new(self.id, self.types.len() as u32);
        self.types.push(data.clone());
        self.type_lookup.insert(data, id);
        id
    }

    // -------------------------------------------------------------------------
    // Binding passes
    // -------------------------------------------------------------------------

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            type_defs: self.type_defs.len(),
            methods: self.methods.len(),
            type_params: self.type_params.len(),
            types: self.types.len(),
        }
    }

    fn rollback(&mut self, checkpoint: Checkpoint) {
        for def in self.type_defs.drain(checkpoint.type_defs..) {
            self.def_cache.remove(&def.decl.key());
        }
        self.methods.truncate(checkpoint.methods);
        self.type_params.truncate(checkpoint.type_params);
        for data in self.types.drain(checkpoint.types..) {
            self.type_lookup.remove(&data);
        }
        self.pending.clear();
        debug!(
            compilation = self.id.0,
            definitions = self.type_defs.len(),
            "binding pass rolled back"
        );
    }

    /// Run `f`, then resolve constraints of every definition it registered.
    /// On failure the compilation is restored to its state before the call.
    fn in_binding_pass<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ResolutionError>,
    ) -> Result<T, ResolutionError> {
        debug_assert!(self.pending.is_empty(), "binding passes do not nest");
        let checkpoint = self.checkpoint();
        let result = f(self).and_then(|value| {
            self.drain_pending()?;
            Ok(value)
        });
        if result.is_err() {
            self.rollback(checkpoint);
        }
        result
    }

    fn drain_pending(&mut self) -> Result<(), ResolutionError> {
        let mut next = 0;
        while next < self.pending.len() {
            let def = self.pending[next];
            next += 1;
            self.check_inheritance_cycle(def)?;
            self.resolve_definition_constraints(def)?;
        }
        self.pending.clear();
        Ok(())
    }

    /// Cached handle for `decl`'s key, rejecting a different declaration
    /// under the same key.
    fn cached_definition(
        &self,
        decl: &Arc<TypeDefDecl>,
    ) -> Result<Option<TypeDefId>, ResolutionError> {
        let Some(&id) = self.def_cache.get(&decl.key()) else {
            return Ok(None);
        };
        let existing = &self.def(id).decl;
        if !Arc::ptr_eq(existing, decl) && **existing != **decl {
            return Err(InvalidDeclaration::DuplicateDefinition {
                type_name: self.formatter().definition_name(id),
            }
            .into());
        }
        Ok(Some(id))
    }

    /// Find or register the definition for `key`. `None` when neither the
    /// cache nor the project content has it.
    pub(crate) fn lookup_definition(
        &mut self,
        key: TypeDefKey,
    ) -> Result<Option<TypeDefId>, ResolutionError> {
        if let Some(&id) = self.def_cache.get(&key) {
            return Ok(Some(id));
        }
        let Some(decl) = self.content.get(&key).cloned() else {
            return Ok(None);
        };
        self.register_type_definition(&decl).map(Some)
    }

    /// Registration phase for one definition. See the module docs.
    fn register_type_definition(
        &mut self,
        decl: &Arc<TypeDefDecl>,
    ) -> Result<TypeDefId, ResolutionError> {
        if let Some(id) = self.cached_definition(decl)? {
            return Ok(id);
        }
        self.validate_type_params(decl)?;

        let key = decl.key();
        let id = TypeDefId::new(self.id, self.type_defs.len() as u32);
        let self_type = self.intern(TypeData::Definition(id));
        self.type_defs.push(TypeDefinition {
            id,
            decl: Arc::clone(decl),
            self_type,
            type_parameters: SmallVec::new(),
            methods: Vec::new(),
            direct_base_types: Vec::new(),
        });
        self.def_cache.insert(key, id);
        self.pending.push(id);
        trace!(
            compilation = self.id.0,
            def = id.index(),
            name = %self.interner().resolve(key.name),
            arity = key.arity,
            "register type definition"
        );

        let owner = TypeParamOrigin::Declared(TypeParamOwner::TypeDefinition(id));
        let class_params: SmallVec<[TypeParamId; 2]> = decl
            .type_params
            .iter()
            .map(|p| self.alloc_type_parameter(owner, p))
            .collect();
        self.type_defs[id.slot()].type_parameters = class_params.clone();

        for (index, method_decl) in decl.methods.iter().enumerate() {
            let method_id = MethodId::new(self.id, self.methods.len() as u32);
            self.methods.push(Method {
                id: method_id,
                decl: Arc::clone(method_decl),
                declaring_type: id,
                index: index as u32,
                type_parameters: SmallVec::new(),
            });
            let owner = TypeParamOrigin::Declared(TypeParamOwner::Method(method_id));
            let method_params: SmallVec<[TypeParamId; 2]> = method_decl
                .type_params
                .iter()
                .map(|p| self.alloc_type_parameter(owner, p))
                .collect();
            self.methods[method_id.slot()].type_parameters = method_params;
            self.type_defs[id.slot()].methods.push(method_id);
        }

        let ctx = GenericContext::for_definition(id, &class_params);
        let mut bases = Vec::with_capacity(decl.base_types.len() + 1);
        for base in &decl.base_types {
            bases.push(self.resolve_type_ref_in(base, &ctx)?);
        }
        if !bases.iter().any(|&b| self.is_class_like_type(b)) {
            if let Some(implicit) = implicit_base(decl) {
                bases.push(self.known_type_in_pass(implicit)?);
            }
        }
        self.type_defs[id.slot()].direct_base_types = bases;

        Ok(id)
    }

    /// Type parameter declarations must sit at their declared ordinal under
    /// the right owner kind.
    fn validate_type_params(&self, decl: &TypeDefDecl) -> Result<(), ResolutionError> {
        let lists = std::iter::once((SymbolKind::TypeDefinition, &decl.type_params)).chain(
            decl.methods
                .iter()
                .map(|m| (SymbolKind::Method, &m.type_params)),
        );
        for (owner, params) in lists {
            for (position, param) in params.iter().enumerate() {
                if param.owner != owner || param.index as usize != position {
                    return Err(InvalidDeclaration::MisplacedTypeParameter {
                        type_name: self.declaration_name(decl),
                        parameter: self.interner().resolve(param.name).to_string(),
                        declared_owner: param.owner,
                        declared_index: param.index,
                        expected_index: position as u32,
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    pub(crate) fn alloc_type_parameter(
        &mut self,
        origin: TypeParamOrigin,
        decl: &TypeParamDecl,
    ) -> TypeParamId {
        let id = TypeParamId::new(self.id, self.type_params.len() as u32);
        let self_type = self.intern(TypeData::TypeParameter(id));
        self.type_params.push(TypeParameter {
            id,
            origin,
            owner_kind: decl.owner,
            index: decl.index,
            name: decl.name,
            self_type,
            has_reference_type_constraint: decl.has_reference_type_constraint,
            has_value_type_constraint: decl.has_value_type_constraint,
            has_default_constructor_constraint: decl.has_default_constructor_constraint,
            constraints: Vec::new(),
            reference_kind: ReferenceKind::Unknown,
            // Placeholder until constraint resolution runs.
            effective_base_class: self_type,
            effective_interface_set: Vec::new(),
        });
        id
    }

    /// Resolve a `TypeRef` against the project content and `ctx`.
    pub(crate) fn resolve_type_ref_in(
        &mut self,
        type_ref: &TypeRef,
        ctx: &GenericContext,
    ) -> Result<TypeId, ResolutionError> {
        match type_ref {
            TypeRef::TypeParameter { owner, index } => {
                let Some(param) = ctx.lookup(*owner, *index) else {
                    return Err(InvalidDeclaration::TypeParameterOutOfRange {
                        type_name: self.context_name(ctx),
                        owner: *owner,
                        index: *index,
                        available: ctx.params(*owner).len(),
                    }
                    .into());
                };
                Ok(self.param(param).self_type)
            }
            TypeRef::Known(code) => self.known_type_in_pass(*code),
            TypeRef::Named {
                namespace,
                name,
                type_arguments,
            } => {
                let key = TypeDefKey {
                    namespace: *namespace,
                    name: *name,
                    arity: type_arguments.len() as u32,
                };
                let Some(definition) = self.lookup_definition(key)? else {
                    return Ok(self.intern(TypeData::Unknown(key)));
                };
                if type_arguments.is_empty() {
                    return Ok(self.def(definition).self_type);
                }
                let type_arguments = type_arguments
                    .iter()
                    .map(|arg| self.resolve_type_ref_in(arg, ctx))
                    .collect::<Result<SmallVec<[TypeId; 2]>, _>>()?;
                Ok(self.intern(TypeData::Parameterized {
                    definition,
                    type_arguments,
                }))
            }
        }
    }

    pub(crate) fn known_type_in_pass(
        &mut self,
        code: KnownTypeCode,
    ) -> Result<TypeId, ResolutionError> {
        let key = match self.content.known_type_key(code) {
            Some(key) => key,
            None => {
                let (namespace, name) = code.full_name().unwrap_or(("", ""));
                TypeDefKey {
                    namespace: self.interner().intern(namespace),
                    name: self.interner().intern(name),
                    arity: 0,
                }
            }
        };
        match self.lookup_definition(key)? {
            Some(definition) => Ok(self.def(definition).self_type),
            None => Ok(self.intern(TypeData::Unknown(key))),
        }
    }

    fn declaration_name(&self, decl: &TypeDefDecl) -> String {
        self.formatter().key_name(&decl.key())
    }

    pub(crate) fn context_name(&self, ctx: &GenericContext) -> String {
        match ctx.definition {
            Some(def) => self.formatter().definition_name(def),
            None => "<top level>".to_string(),
        }
    }
}

/// Base class a definition gets when it declares none.
fn implicit_base(decl: &TypeDefDecl) -> Option<KnownTypeCode> {
    use crate::decl::TypeKind;
    match decl.kind {
        TypeKind::Class if decl.known_type_code == KnownTypeCode::Object => None,
        TypeKind::Class => Some(KnownTypeCode::Object),
        TypeKind::Struct => Some(KnownTypeCode::ValueType),
        TypeKind::Enum => Some(KnownTypeCode::Enum),
        TypeKind::Delegate => Some(KnownTypeCode::Delegate),
        TypeKind::Interface => None,
    }
}

impl PartialEq for Compilation {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Compilation {}

impl std::fmt::Debug for Compilation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compilation")
            .field("id", &self.id)
            .field("type_definitions", &self.type_defs.len())
            .field("type_parameters", &self.type_params.len())
            .field("types", &self.types.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/compilation_tests.rs"]
mod tests;
