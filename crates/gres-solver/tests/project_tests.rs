use super::*;
use crate::decl::TypeKind;

#[test]
fn test_core_library_registers_known_types() {
    let content = ProjectContent::with_core_library(Arc::new(ShardedInterner::new()));

    for code in [
        KnownTypeCode::Object,
        KnownTypeCode::ValueType,
        KnownTypeCode::Enum,
        KnownTypeCode::Delegate,
        KnownTypeCode::String,
        KnownTypeCode::Int32,
        KnownTypeCode::Boolean,
    ] {
        let key = content.known_type_key(code).expect("known type registered");
        let decl = content.get(&key).expect("declaration present");
        assert_eq!(decl.known_type_code, code);
    }
    assert!(content.find("System.Collections.Generic", "List", 1).is_some());
    assert!(content.find("System", "IDisposable", 0).is_some());
}

#[test]
fn test_empty_content() {
    let content = ProjectContent::new(Arc::new(ShardedInterner::new()));
    assert!(content.is_empty());
    assert_eq!(content.known_type_key(KnownTypeCode::Object), None);
}

#[test]
fn test_add_replaces_same_key_and_keeps_order() {
    let interner = Arc::new(ShardedInterner::new());
    let mut content = ProjectContent::new(Arc::clone(&interner));
    let a = interner.intern("A");
    let b = interner.intern("B");

    content.add_type_definition(TypeDefDecl::class(Atom::NONE, a));
    content.add_type_definition(TypeDefDecl::class(Atom::NONE, b));
    let replaced = content.add_type_definition(TypeDefDecl::interface(Atom::NONE, a));

    assert_eq!(content.len(), 2);
    assert_eq!(replaced.kind, TypeKind::Interface);
    let names: Vec<Atom> = content.type_definitions().map(|d| d.name).collect();
    assert_eq!(names, vec![a, b]);
    let stored = content.find("", "A", 0).expect("present");
    assert!(Arc::ptr_eq(stored, &replaced));
}

#[test]
fn test_builder_form() {
    let interner = Arc::new(ShardedInterner::new());
    let name = interner.intern("C");
    let content = ProjectContent::new(Arc::clone(&interner))
        .with_type_definition(TypeDefDecl::class(Atom::NONE, name));
    assert_eq!(content.len(), 1);
    assert_eq!(content.intern("C"), name);
}
