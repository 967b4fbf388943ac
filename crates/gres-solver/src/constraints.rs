//! Constraint resolution for type parameters.
//!
//! Runs once per definition, after registration. Parameters of one owner
//! are processed in dependency order: a parameter constrained by another
//! parameter of the same owner (`where U : T`) is computed after it. Outer
//! parameters (a class parameter seen from a method) are always complete
//! because the class's parameters are resolved before any method's.
//!
//! Derived properties, per parameter:
//!
//! - **Effective base class**: the most-derived of the class-like type
//!   constraints and the effective base classes of referenced parameters;
//!   the root type when there is none. `System.ValueType` under `struct`.
//! - **Effective interface set**: interface constraints plus the interface
//!   sets of referenced parameters, in first-seen order without duplicates.
//! - **Reference kind**: `struct` gives value, `class` gives reference;
//!   otherwise inferred from the effective base class when the options
//!   allow it.

use crate::compilation::{Compilation, GenericContext};
use crate::decl::{KnownTypeCode, SymbolKind, TypeKind, TypeParamDecl};
use crate::error::{InvalidDeclaration, ResolutionError};
use crate::types::{ReferenceKind, TypeData, TypeDefId, TypeId, TypeParamId};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

impl Compilation {
    /// Resolve constraints of a definition's own parameters, then of each
    /// method's parameters.
    pub(crate) fn resolve_definition_constraints(
        &mut self,
        definition: TypeDefId,
    ) -> Result<(), ResolutionError> {
        let decl = Arc::clone(&self.def(definition).decl);
        let class_params = self.def(definition).type_parameters.clone();
        let ctx = GenericContext::for_definition(definition, &class_params);
        self.resolve_owner_parameters(
            &ctx,
            SymbolKind::TypeDefinition,
            &decl.type_params,
            &class_params,
        )?;

        for (method_decl, method) in decl.methods.iter().zip(self.def(definition).methods.clone()) {
            let method_params = self.method_entry(method).type_parameters.clone();
            if method_params.is_empty() {
                continue;
            }
            let method_ctx = ctx.with_method(&method_params);
            self.resolve_owner_parameters(
                &method_ctx,
                SymbolKind::Method,
                &method_decl.type_params,
                &method_params,
            )?;
        }
        Ok(())
    }

    fn resolve_owner_parameters(
        &mut self,
        ctx: &GenericContext,
        owner: SymbolKind,
        decls: &[TypeParamDecl],
        params: &[TypeParamId],
    ) -> Result<(), ResolutionError> {
        for (decl, &param) in decls.iter().zip(params) {
            let constraints = decl
                .constraints
                .iter()
                .map(|c| self.resolve_type_ref_in(c, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            self.param_mut(param).constraints = constraints;
        }

        for index in self.dependency_order(ctx, owner, decls)? {
            self.compute_type_parameter(ctx, params[index])?;
        }
        Ok(())
    }

    /// Order parameter positions so that each comes after every same-owner
    /// parameter it is constrained by. Iterative DFS with three-state
    /// marking; reaching an in-progress node is a cycle.
    fn dependency_order(
        &self,
        ctx: &GenericContext,
        owner: SymbolKind,
        decls: &[TypeParamDecl],
    ) -> Result<Vec<usize>, ResolutionError> {
        let deps: Vec<SmallVec<[usize; 2]>> = decls
            .iter()
            .map(|decl| {
                decl.constraints
                    .iter()
                    .filter_map(|c| c.as_type_parameter())
                    .filter(|&(o, _)| o == owner)
                    .map(|(_, index)| index as usize)
                    .collect()
            })
            .collect();

        let mut state = vec![VisitState::Unvisited; decls.len()];
        let mut order = Vec::with_capacity(decls.len());

        for root in 0..decls.len() {
            if state[root] != VisitState::Unvisited {
                continue;
            }
            state[root] = VisitState::InProgress;
            // (node, next dependency to visit)
            let mut stack: Vec<(usize, usize)> = vec![(root, 0)];

            while let Some(top) = stack.last_mut() {
                let node = top.0;
                let Some(&dep) = deps[node].get(top.1) else {
                    state[node] = VisitState::Done;
                    order.push(node);
                    stack.pop();
                    continue;
                };
                top.1 += 1;
                match state[dep] {
                    VisitState::Unvisited => {
                        state[dep] = VisitState::InProgress;
                        stack.push((dep, 0));
                    }
                    VisitState::InProgress => {
                        let start = stack.iter().position(|&(n, _)| n == dep).unwrap_or(0);
                        let interner = self.interner();
                        let cycle = stack[start..]
                            .iter()
                            .map(|&(n, _)| n)
                            .chain(std::iter::once(dep))
                            .map(|n| interner.resolve(decls[n].name).to_string())
                            .collect();
                        return Err(InvalidDeclaration::ConstraintCycle {
                            type_name: self.context_name(ctx),
                            cycle,
                        }
                        .into());
                    }
                    VisitState::Done => {}
                }
            }
        }
        Ok(order)
    }

    fn compute_type_parameter(
        &mut self,
        ctx: &GenericContext,
        param: TypeParamId,
    ) -> Result<(), ResolutionError> {
        let entry = self.param(param);
        let constraints = entry.constraints.clone();
        let has_value_type_constraint = entry.has_value_type_constraint;
        let has_reference_type_constraint = entry.has_reference_type_constraint;

        let mut class_candidates: SmallVec<[TypeId; 2]> = SmallVec::new();
        let mut interfaces: IndexSet<TypeId, FxBuildHasher> = IndexSet::default();

        for constraint in constraints {
            match *self.data(constraint) {
                TypeData::TypeParameter(other) => {
                    let other = self.param(other);
                    let base = other.effective_base_class;
                    interfaces.extend(other.effective_interface_set.iter().copied());
                    if self.is_class_like_type(base) {
                        class_candidates.push(base);
                    }
                }
                TypeData::Definition(def) | TypeData::Parameterized { definition: def, .. } => {
                    let kind = self.def(def).kind();
                    if kind.is_class_like() {
                        class_candidates.push(constraint);
                    } else if kind == TypeKind::Interface {
                        interfaces.insert(constraint);
                    }
                }
                TypeData::Unknown(_) => {}
            }
        }

        let effective_base_class = if has_value_type_constraint {
            self.known_type_in_pass(KnownTypeCode::ValueType)?
        } else if let Some((&first, rest)) = class_candidates.split_first() {
            self.most_derived_base_class(ctx, param, first, rest)?
        } else {
            self.known_type_in_pass(KnownTypeCode::Object)?
        };

        let reference_kind = if has_value_type_constraint {
            ReferenceKind::Value
        } else if has_reference_type_constraint {
            ReferenceKind::Reference
        } else if self.options().infer_reference_kind_from_base_class {
            self.reference_kind_of_base(effective_base_class)
        } else {
            ReferenceKind::Unknown
        };

        let entry = self.param_mut(param);
        entry.effective_base_class = effective_base_class;
        entry.effective_interface_set = interfaces.into_iter().collect();
        entry.reference_kind = reference_kind;

        debug!(
            compilation = self.id().0,
            param = param.index(),
            name = %self.interner().resolve(self.param(param).name),
            reference_kind = %reference_kind,
            base = %self.formatter().reflection_name(effective_base_class),
            interfaces = self.param(param).effective_interface_set.len(),
            "resolved type parameter"
        );
        Ok(())
    }

    /// Fold class candidates down to the one deriving from all others.
    fn most_derived_base_class(
        &mut self,
        ctx: &GenericContext,
        param: TypeParamId,
        first: TypeId,
        rest: &[TypeId],
    ) -> Result<TypeId, ResolutionError> {
        let mut result = first;
        for &candidate in rest {
            if candidate == result || self.is_derived_from(result, candidate) {
                continue;
            }
            if self.is_derived_from(candidate, result) {
                result = candidate;
                continue;
            }
            let formatter = self.formatter();
            return Err(InvalidDeclaration::ConflictingBaseClasses {
                type_name: self.context_name(ctx),
                parameter: self.interner().resolve(self.param(param).name).to_string(),
                first: formatter.reflection_name(result),
                second: formatter.reflection_name(candidate),
            }
            .into());
        }
        Ok(result)
    }

    /// Reference kind implied by an effective base class.
    fn reference_kind_of_base(&self, base: TypeId) -> ReferenceKind {
        let Some(def) = self.definition_of(base) else {
            return ReferenceKind::Unknown;
        };
        let def = self.def(def);
        let kind = def.kind();
        if kind.is_class_like() {
            match def.known_type_code() {
                KnownTypeCode::Object | KnownTypeCode::ValueType | KnownTypeCode::Enum => {
                    ReferenceKind::Unknown
                }
                _ => ReferenceKind::Reference,
            }
        } else if kind.is_value_type() {
            ReferenceKind::Value
        } else {
            ReferenceKind::Unknown
        }
    }
}
