//! Importing entities from one compilation into another.
//!
//! An entity is imported by re-binding the declaration it came from in the
//! target compilation, so an imported entity has exactly the properties it
//! would have had if the target had bound the declaration itself. Entities
//! without a declaration (synthetic type parameters) cannot be imported.
//!
//! Compilations exchanging entities must share one interner: declarations
//! name things by `Atom`, and atoms are only meaningful in their interner.
//!
//! A definition is not importable when the target's project content holds a
//! different declaration under the same key. Binding the source's
//! declaration there would shadow the target's own for every later lookup.
//! Unknown types are looked up again in the target, whose project content
//! may declare what the source's lacked.

use crate::compilation::Compilation;
use crate::entities::{TypeParamOrigin, TypeParamOwner};
use crate::error::{NotImportable, ResolutionError};
use crate::types::{MethodId, TypeData, TypeDefId, TypeId, TypeParamId};
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::debug;

/// Any handle that can cross compilations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Entity {
    Type(TypeId),
    TypeDefinition(TypeDefId),
    Method(MethodId),
    TypeParameter(TypeParamId),
}

impl From<TypeId> for Entity {
    fn from(value: TypeId) -> Self {
        Self::Type(value)
    }
}

impl From<TypeDefId> for Entity {
    fn from(value: TypeDefId) -> Self {
        Self::TypeDefinition(value)
    }
}

impl From<MethodId> for Entity {
    fn from(value: MethodId) -> Self {
        Self::Method(value)
    }
}

impl From<TypeParamId> for Entity {
    fn from(value: TypeParamId) -> Self {
        Self::TypeParameter(value)
    }
}

impl Compilation {
    /// Import `entity` from `source`, returning the corresponding entity of
    /// this compilation. Importing the same entity twice yields the same
    /// handle.
    pub fn import(
        &mut self,
        source: &Compilation,
        entity: Entity,
    ) -> Result<Entity, ResolutionError> {
        self.check_importable_from(source)?;
        let imported = match entity {
            Entity::Type(ty) => Entity::Type(self.import_type(source, ty)?),
            Entity::TypeDefinition(def) => {
                Entity::TypeDefinition(self.import_type_definition(source, def)?)
            }
            Entity::Method(method) => Entity::Method(self.import_method(source, method)?),
            Entity::TypeParameter(param) => {
                Entity::TypeParameter(self.import_type_parameter(source, param)?)
            }
        };
        debug!(
            source = source.id().0,
            target = self.id().0,
            ?entity,
            ?imported,
            "import"
        );
        Ok(imported)
    }

    pub fn import_type_definition(
        &mut self,
        source: &Compilation,
        definition: TypeDefId,
    ) -> Result<TypeDefId, ResolutionError> {
        self.check_importable_from(source)?;
        let decl = source
            .type_definition(definition)
            .map(|def| Arc::clone(&def.decl))
            .ok_or(NotImportable::ForeignEntity)?;
        let key = decl.key();
        if let Some(own) = self.content().get(&key) {
            if !Arc::ptr_eq(own, &decl) && **own != *decl {
                return Err(NotImportable::ConflictingDeclaration {
                    type_name: self.formatter().key_name(&key),
                }
                .into());
            }
        }
        self.bind_type_definition(&decl)
    }

    /// Methods are identified by their position in the declaring type.
    pub fn import_method(
        &mut self,
        source: &Compilation,
        method: MethodId,
    ) -> Result<MethodId, ResolutionError> {
        let (declaring_type, index) = source
            .method(method)
            .map(|m| (m.declaring_type, m.index))
            .ok_or(NotImportable::ForeignEntity)?;
        let target = self.import_type_definition(source, declaring_type)?;
        self.def(target)
            .methods
            .get(index as usize)
            .copied()
            .ok_or_else(|| NotImportable::ForeignEntity.into())
    }

    /// Type parameters are identified by owner and ordinal.
    pub fn import_type_parameter(
        &mut self,
        source: &Compilation,
        param: TypeParamId,
    ) -> Result<TypeParamId, ResolutionError> {
        let entry = source
            .type_parameter(param)
            .ok_or(NotImportable::ForeignEntity)?;
        let index = entry.index as usize;
        let imported = match entry.origin {
            TypeParamOrigin::Synthetic => {
                return Err(NotImportable::SyntheticEntity {
                    name: source.interner().resolve(entry.name).to_string(),
                }
                .into());
            }
            TypeParamOrigin::Declared(TypeParamOwner::TypeDefinition(def)) => {
                let target = self.import_type_definition(source, def)?;
                self.def(target).type_parameters.get(index).copied()
            }
            TypeParamOrigin::Declared(TypeParamOwner::Method(method)) => {
                let target = self.import_method(source, method)?;
                self.method_entry(target).type_parameters.get(index).copied()
            }
        };
        imported.ok_or_else(|| NotImportable::ForeignEntity.into())
    }

    /// Types are rebuilt structurally from their imported parts.
    pub fn import_type(
        &mut self,
        source: &Compilation,
        ty: TypeId,
    ) -> Result<TypeId, ResolutionError> {
        self.check_importable_from(source)?;
        let data = source
            .type_data(ty)
            .cloned()
            .ok_or(NotImportable::ForeignEntity)?;
        match data {
            TypeData::Definition(def) => {
                let target = self.import_type_definition(source, def)?;
                Ok(self.def(target).self_type)
            }
            TypeData::Parameterized {
                definition,
                type_arguments,
            } => {
                let definition = self.import_type_definition(source, definition)?;
                let type_arguments = type_arguments
                    .iter()
                    .map(|&arg| self.import_type(source, arg))
                    .collect::<Result<SmallVec<[TypeId; 2]>, _>>()?;
                Ok(self.intern(TypeData::Parameterized {
                    definition,
                    type_arguments,
                }))
            }
            TypeData::TypeParameter(param) => {
                let target = self.import_type_parameter(source, param)?;
                Ok(self.param(target).self_type)
            }
            TypeData::Unknown(key) => match self.bind_by_key(key)? {
                Some(def) => Ok(self.def(def).self_type),
                None => Ok(self.intern(TypeData::Unknown(key))),
            },
        }
    }

    fn check_importable_from(&self, source: &Compilation) -> Result<(), NotImportable> {
        if Arc::ptr_eq(self.interner(), source.interner()) {
            Ok(())
        } else {
            Err(NotImportable::InternerMismatch)
        }
    }
}

#[cfg(test)]
#[path = "../tests/import_tests.rs"]
mod tests;
