use super::*;
use gres_common::interner::ShardedInterner;

#[test]
fn test_type_kind_classification() {
    assert!(TypeKind::Class.is_class_like());
    assert!(TypeKind::Delegate.is_class_like());
    assert!(!TypeKind::Interface.is_class_like());
    assert!(!TypeKind::Struct.is_class_like());
    assert!(TypeKind::Struct.is_value_type());
    assert!(TypeKind::Enum.is_value_type());
    assert!(!TypeKind::Class.is_value_type());
}

#[test]
fn test_known_type_full_names() {
    assert_eq!(KnownTypeCode::None.full_name(), None);
    assert_eq!(KnownTypeCode::Object.full_name(), Some(("System", "Object")));
    assert_eq!(KnownTypeCode::ValueType.full_name(), Some(("System", "ValueType")));
}

#[test]
fn test_type_parameter_reference_is_positional() {
    let reference = TypeRef::type_parameter(SymbolKind::Method, 2);
    assert_eq!(reference.as_type_parameter(), Some((SymbolKind::Method, 2)));
    assert_eq!(TypeRef::Known(KnownTypeCode::String).as_type_parameter(), None);
}

#[test]
fn test_key_includes_arity() {
    let interner = ShardedInterner::new();
    let ns = interner.intern("N");
    let name = interner.intern("List");
    let plain = TypeDefDecl::class(ns, name);
    let generic = TypeDefDecl::class(ns, name)
        .with_type_param(TypeParamDecl::new(SymbolKind::TypeDefinition, 0, interner.intern("T")));

    assert_eq!(plain.key().arity, 0);
    assert_eq!(generic.key().arity, 1);
    assert_ne!(plain.key(), generic.key());
}

#[test]
fn test_builders_set_flags_and_constraints() {
    let interner = ShardedInterner::new();
    let param = TypeParamDecl::new(SymbolKind::TypeDefinition, 0, interner.intern("T"))
        .with_reference_type_constraint()
        .with_default_constructor_constraint()
        .with_constraint(TypeRef::Known(KnownTypeCode::Object));

    assert!(param.has_reference_type_constraint);
    assert!(!param.has_value_type_constraint);
    assert!(param.has_default_constructor_constraint);
    assert_eq!(param.constraints, vec![TypeRef::Known(KnownTypeCode::Object)]);
}

#[test]
fn test_method_index() {
    let interner = ShardedInterner::new();
    let add = interner.intern("Add");
    let remove = interner.intern("Remove");
    let decl = TypeDefDecl::class(Atom::NONE, interner.intern("C"))
        .with_method(MethodDecl::new(add))
        .with_method(MethodDecl::new(remove));

    assert_eq!(decl.method_index(remove), Some(1));
    assert_eq!(decl.method_index(interner.intern("Missing")), None);
}

#[test]
fn test_equal_declarations_compare_equal() {
    let interner = ShardedInterner::new();
    let build = || {
        TypeDefDecl::structure(interner.intern("N"), interner.intern("S"))
            .with_base_type(TypeRef::named(interner.intern("N"), interner.intern("I")))
    };
    assert_eq!(build(), build());
    assert_ne!(build(), build().with_known_type_code(KnownTypeCode::Int32));
}
