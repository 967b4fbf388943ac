//! Project content: the declarations a compilation resolves names against.

use crate::decl::{KnownTypeCode, TypeDefDecl, TypeDefKey};
use gres_common::interner::{Atom, ShardedInterner};
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::sync::Arc;
use tracing::trace;

/// An immutable-once-shared set of type definition declarations.
///
/// Built by a declaration loader, then wrapped in an `Arc` and handed to any
/// number of `Compilation`s. Iteration order is insertion order.
pub struct ProjectContent {
    interner: Arc<ShardedInterner>,
    type_definitions: IndexMap<TypeDefKey, Arc<TypeDefDecl>, FxBuildHasher>,
    known_types: FxHashMap<KnownTypeCode, TypeDefKey>,
}

impl ProjectContent {
    /// Create an empty project content. Without a core library the
    /// universal root type is unresolvable and shows up as an unknown type.
    pub fn new(interner: Arc<ShardedInterner>) -> Self {
        Self {
            interner,
            type_definitions: IndexMap::default(),
            known_types: FxHashMap::default(),
        }
    }

    /// Create a project content pre-populated with the core library.
    pub fn with_core_library(interner: Arc<ShardedInterner>) -> Self {
        let mut content = Self::new(interner);
        for decl in crate::corlib::core_library(&content.interner) {
            content.add_type_definition(decl);
        }
        content
    }

    pub fn interner(&self) -> &Arc<ShardedInterner> {
        &self.interner
    }

    /// Convenience for `self.interner().intern(s)`.
    pub fn intern(&self, s: &str) -> Atom {
        self.interner.intern(s)
    }

    /// Add a declaration, replacing any previous one with the same key.
    /// Returns the shared handle to the stored declaration.
    pub fn add_type_definition(&mut self, decl: TypeDefDecl) -> Arc<TypeDefDecl> {
        let key = decl.key();
        if decl.known_type_code != KnownTypeCode::None {
            self.known_types.insert(decl.known_type_code, key);
        }
        let decl = Arc::new(decl);
        trace!(
            namespace = %self.interner.resolve(key.namespace),
            name = %self.interner.resolve(key.name),
            arity = key.arity,
            "ProjectContent::add_type_definition"
        );
        self.type_definitions.insert(key, Arc::clone(&decl));
        decl
    }

    /// Builder form of [`add_type_definition`](Self::add_type_definition).
    pub fn with_type_definition(mut self, decl: TypeDefDecl) -> Self {
        self.add_type_definition(decl);
        self
    }

    pub fn get(&self, key: &TypeDefKey) -> Option<&Arc<TypeDefDecl>> {
        self.type_definitions.get(key)
    }

    /// Look up a declaration by namespace, name and arity strings.
    pub fn find(&self, namespace: &str, name: &str, arity: u32) -> Option<&Arc<TypeDefDecl>> {
        let key = TypeDefKey {
            namespace: self.interner.intern(namespace),
            name: self.interner.intern(name),
            arity,
        };
        self.get(&key)
    }

    pub fn known_type_key(&self, code: KnownTypeCode) -> Option<TypeDefKey> {
        self.known_types.get(&code).copied()
    }

    pub fn type_definitions(&self) -> impl Iterator<Item = &Arc<TypeDefDecl>> {
        self.type_definitions.values()
    }

    pub fn len(&self) -> usize {
        self.type_definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.type_definitions.is_empty()
    }
}

impl std::fmt::Debug for ProjectContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectContent")
            .field("type_definitions", &self.type_definitions.len())
            .field("known_types", &self.known_types.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/project_tests.rs"]
mod tests;
