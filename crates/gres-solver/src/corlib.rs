//! The minimal core library every realistic compilation references.

use crate::decl::{
    KnownTypeCode, MethodDecl, SymbolKind, TypeDefDecl, TypeKind, TypeParamDecl, TypeRef,
};
use gres_common::interner::ShardedInterner;

/// Declarations for the `System` types the resolution rules depend on, plus
/// a few generic collection types that show up in constraints.
pub fn core_library(interner: &ShardedInterner) -> Vec<TypeDefDecl> {
    let system = interner.intern("System");
    let generic = interner.intern("System.Collections.Generic");
    let t = interner.intern("T");
    let type_param_t = || TypeParamDecl::new(SymbolKind::TypeDefinition, 0, t);
    let t_ref = TypeRef::type_parameter(SymbolKind::TypeDefinition, 0);

    vec![
        TypeDefDecl::class(system, interner.intern("Object"))
            .with_known_type_code(KnownTypeCode::Object),
        TypeDefDecl::class(system, interner.intern("ValueType"))
            .with_known_type_code(KnownTypeCode::ValueType),
        TypeDefDecl::class(system, interner.intern("Enum"))
            .with_known_type_code(KnownTypeCode::Enum)
            .with_base_type(TypeRef::Known(KnownTypeCode::ValueType)),
        TypeDefDecl::class(system, interner.intern("Delegate"))
            .with_known_type_code(KnownTypeCode::Delegate),
        TypeDefDecl::class(system, interner.intern("String"))
            .with_known_type_code(KnownTypeCode::String),
        TypeDefDecl::new(TypeKind::Struct, system, interner.intern("Int32"))
            .with_known_type_code(KnownTypeCode::Int32),
        TypeDefDecl::new(TypeKind::Struct, system, interner.intern("Boolean"))
            .with_known_type_code(KnownTypeCode::Boolean),
        TypeDefDecl::interface(system, interner.intern("IDisposable")),
        TypeDefDecl::interface(system, interner.intern("IComparable"))
            .with_type_param(type_param_t()),
        TypeDefDecl::interface(generic, interner.intern("IEnumerable"))
            .with_type_param(type_param_t()),
        TypeDefDecl::class(generic, interner.intern("List"))
            .with_type_param(type_param_t())
            .with_base_type(TypeRef::generic(
                generic,
                interner.intern("IEnumerable"),
                vec![t_ref],
            ))
            .with_method(MethodDecl::new(interner.intern("Add")))
            .with_method(
                MethodDecl::new(interner.intern("ConvertAll")).with_type_param(TypeParamDecl::new(
                    SymbolKind::Method,
                    0,
                    interner.intern("TOutput"),
                )),
            ),
    ]
}
