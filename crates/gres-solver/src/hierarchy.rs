//! Base-class chain queries.

use crate::compilation::Compilation;
use crate::error::{InvalidDeclaration, ResolutionError};
use crate::types::{TypeData, TypeDefId, TypeId, TypeParamId};
use gres_common::limits::MAX_INHERITANCE_WALK;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

impl Compilation {
    /// Whether `ty` is a class or delegate type (the kinds that take part
    /// in base class computation).
    pub fn is_class_like_type(&self, ty: TypeId) -> bool {
        self.definition_of(ty)
            .and_then(|def| self.type_definition(def))
            .is_some_and(|def| def.kind().is_class_like())
    }

    /// The direct base class of `ty`, with the type's arguments substituted
    /// into it (`List<string>` for `class StringList : List<string>`,
    /// `B<int>` for `D<int>` where `class D<T> : B<T>`).
    pub fn base_class_of(&mut self, ty: TypeId) -> Option<TypeId> {
        let data = self.type_data(ty)?.clone();
        let def = data.definition()?;
        let base = self
            .def(def)
            .direct_base_types
            .iter()
            .copied()
            .find(|&b| self.is_class_like_type(b))?;
        match data {
            TypeData::Parameterized { type_arguments, .. } => {
                let params = self.def(def).type_parameters.clone();
                Some(self.substitute(base, &params, &type_arguments))
            }
            _ => Some(base),
        }
    }

    /// Whether `ty` is `ancestor` or has it on its base-class chain.
    ///
    /// The walk stops at the configured depth limit or on a revisited type.
    pub fn is_derived_from(&mut self, ty: TypeId, ancestor: TypeId) -> bool {
        let mut visited = FxHashSet::default();
        let mut current = ty;
        for _ in 0..=self.options().max_base_class_depth {
            if current == ancestor {
                return true;
            }
            if !visited.insert(current) {
                return false;
            }
            match self.base_class_of(current) {
                Some(base) => current = base,
                None => return false,
            }
        }
        false
    }

    /// Replace occurrences of `params` in `ty` by the matching `args`.
    pub(crate) fn substitute(
        &mut self,
        ty: TypeId,
        params: &[TypeParamId],
        args: &[TypeId],
    ) -> TypeId {
        match self.data(ty).clone() {
            TypeData::TypeParameter(p) => params
                .iter()
                .position(|&q| q == p)
                .and_then(|i| args.get(i).copied())
                .unwrap_or(ty),
            TypeData::Parameterized {
                definition,
                type_arguments,
            } => {
                let type_arguments: SmallVec<[TypeId; 2]> = type_arguments
                    .iter()
                    .map(|&arg| self.substitute(arg, params, args))
                    .collect();
                self.intern(TypeData::Parameterized {
                    definition,
                    type_arguments,
                })
            }
            TypeData::Definition(_) | TypeData::Unknown(_) => ty,
        }
    }

    /// Reject a definition that appears among its own transitive bases.
    pub(crate) fn check_inheritance_cycle(
        &self,
        definition: TypeDefId,
    ) -> Result<(), ResolutionError> {
        let mut stack = vec![definition];
        let mut visited = FxHashSet::default();
        let mut steps = 0u32;
        while let Some(current) = stack.pop() {
            steps += 1;
            if steps > MAX_INHERITANCE_WALK {
                break;
            }
            for &base in &self.def(current).direct_base_types {
                let Some(base_def) = self.data(base).definition() else {
                    continue;
                };
                if base_def == definition {
                    return Err(InvalidDeclaration::InheritanceCycle {
                        type_name: self.formatter().definition_name(definition),
                    }
                    .into());
                }
                if visited.insert(base_def) {
                    stack.push(base_def);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/hierarchy_tests.rs"]
mod tests;
