use super::*;
use crate::decl::{KnownTypeCode, MethodDecl, SymbolKind, TypeDefDecl, TypeRef};
use crate::project::ProjectContent;
use crate::test_fixtures::*;
use gres_common::interner::ShardedInterner;

/// class C<U, X> where X : List<string> { void M<Y>() where Y : class, X }
fn class_c(ctx: &TestContext) -> TypeDefDecl {
    ctx.class("C")
        .with_type_param(ctx.type_param(0, "U"))
        .with_type_param(ctx.type_param(1, "X").with_constraint(ctx.list_of(string_ref())))
        .with_method(
            MethodDecl::new(ctx.atom("M")).with_type_param(
                ctx.method_param(0, "Y")
                    .with_reference_type_constraint()
                    .with_constraint(class_param(1)),
            ),
        )
}

struct Pair {
    c1: Compilation,
    c2: Compilation,
    decl: Arc<TypeDefDecl>,
}

fn two_compilations() -> Pair {
    let mut ctx = TestContext::new();
    let decl = ctx.add(class_c(&ctx));
    let content = ctx.freeze();
    Pair {
        c1: Compilation::new(Arc::clone(&content)),
        c2: Compilation::new(content),
        decl,
    }
}

#[test]
fn test_import_parameterized_type_of_class_and_method_parameters() {
    let Pair { mut c1, mut c2, decl } = two_compilations();

    // C<X, Y> where X is C's second parameter and Y is M's first.
    let d1 = c1.bind_type_definition(&decl).expect("binds");
    let def1 = c1.type_definition(d1).expect("bound");
    let x1 = def1.type_parameters()[1];
    let m1 = def1.methods()[0];
    let y1 = c1.method(m1).expect("bound").type_parameters()[0];
    let x1_ty = c1.type_parameter(x1).expect("bound").self_type();
    let y1_ty = c1.type_parameter(y1).expect("bound").self_type();
    let parameterized1 = c1.parameterized_type(d1, [x1_ty, y1_ty]).expect("arity 2");

    let imported = c2.import_type(&c1, parameterized1).expect("importable");

    let d2 = c2.bind_type_definition(&decl).expect("binds");
    let def2 = c2.type_definition(d2).expect("bound");
    let x2 = def2.type_parameters()[1];
    let y2 = c2.method(def2.methods()[0]).expect("bound").type_parameters()[0];
    let x2_ty = c2.type_parameter(x2).expect("bound").self_type();
    let y2_ty = c2.type_parameter(y2).expect("bound").self_type();
    let expected = c2.parameterized_type(d2, [x2_ty, y2_ty]).expect("arity 2");

    assert_eq!(imported, expected);
    assert_ne!(imported, parameterized1);
    assert_eq!(c2.type_arguments(imported), &[x2_ty, y2_ty]);
    assert_eq!(reflection_name(&c2, imported), "C`2[[`1],[``0]]");
}

#[test]
fn test_import_type_parameter_matches_direct_bind() {
    let Pair { mut c1, mut c2, decl } = two_compilations();

    let d1 = c1.bind_type_definition(&decl).expect("binds");
    let m1 = c1.type_definition(d1).expect("bound").methods()[0];
    let y1 = c1.method(m1).expect("bound").type_parameters()[0];

    let imported = c2.import_type_parameter(&c1, y1).expect("importable");
    let d2 = c2.bind_type_definition(&decl).expect("binds");
    let m2 = c2.type_definition(d2).expect("bound").methods()[0];
    let y2 = c2.method(m2).expect("bound").type_parameters()[0];

    assert_eq!(imported, y2);
    assert_ne!(imported, y1);

    let source = c1.type_parameter(y1).expect("bound");
    let target = c2.type_parameter(imported).expect("bound");
    assert_eq!(target.owner(), Some(TypeParamOwner::Method(m2)));
    assert_eq!(target.index(), source.index());
    assert_eq!(target.name(), source.name());
    assert_eq!(target.reference_kind(), source.reference_kind());
    assert_eq!(
        reflection_name(&c2, target.effective_base_class()),
        reflection_name(&c1, source.effective_base_class())
    );
}

#[test]
fn test_import_is_idempotent() {
    let Pair { mut c1, mut c2, decl } = two_compilations();

    let d1 = c1.bind_type_definition(&decl).expect("binds");
    let self1 = c1.type_definition(d1).expect("bound").self_type();
    let definitions_before = c2.bound_definition_count();

    let first = c2.import(&c1, Entity::TypeDefinition(d1)).expect("importable");
    let definitions_after = c2.bound_definition_count();
    let second = c2.import(&c1, Entity::TypeDefinition(d1)).expect("importable");
    assert_eq!(first, second);
    assert!(definitions_after > definitions_before);
    assert_eq!(c2.bound_definition_count(), definitions_after);

    let ty_first = c2.import(&c1, self1.into()).expect("importable");
    let ty_second = c2.import(&c1, self1.into()).expect("importable");
    assert_eq!(ty_first, ty_second);
}

#[test]
fn test_import_method() {
    let Pair { mut c1, mut c2, decl } = two_compilations();

    let d1 = c1.bind_type_definition(&decl).expect("binds");
    let m1 = c1.type_definition(d1).expect("bound").methods()[0];

    let Entity::Method(m2) = c2.import(&c1, Entity::Method(m1)).expect("importable") else {
        panic!("method imports as a method");
    };
    let method = c2.method(m2).expect("bound");
    assert_eq!(method.index(), 0);
    assert_eq!(method.name(), c1.method(m1).expect("bound").name());
    assert_eq!(c2.lookup_bound(&decl.key()), Some(method.declaring_type()));
}

#[test]
fn test_import_known_and_constructed_types() {
    let ctx = TestContext::new();
    let list_of_int = ctx.list_of(TypeRef::Known(KnownTypeCode::Int32));
    let content = ctx.freeze();
    let mut c1 = Compilation::new(Arc::clone(&content));
    let mut c2 = Compilation::new(content);

    let list_of_int = c1.resolve_type_ref(&list_of_int).expect("resolves");
    let string1 = c1.known_type(KnownTypeCode::String).expect("resolves");

    let string2 = c2.import_type(&c1, string1).expect("importable");
    assert_eq!(string2, c2.known_type(KnownTypeCode::String).expect("resolves"));

    let list2 = c2.import_type(&c1, list_of_int).expect("importable");
    assert_eq!(
        reflection_name(&c2, list2),
        "System.Collections.Generic.List`1[[System.Int32]]"
    );
}

#[test]
fn test_import_unknown_type() {
    let ctx = TestContext::new();
    let missing = ctx.named("Missing");
    let content = ctx.freeze();
    let mut c1 = Compilation::new(Arc::clone(&content));
    let mut c2 = Compilation::new(content);

    let unknown = c1.resolve_type_ref(&missing).expect("resolves");
    let imported = c2.import_type(&c1, unknown).expect("importable");
    assert!(matches!(c2.type_data(imported), Some(TypeData::Unknown(_))));
    assert_eq!(reflection_name(&c2, imported), "Missing");
}

#[test]
fn test_import_unknown_type_resolves_in_target_content() {
    let ctx = TestContext::new();
    let mut other = ctx.sibling();
    let foo = ctx.named("Foo");
    other.add(other.class("Foo"));
    let mut c1 = Compilation::new(ctx.freeze());
    let mut c2 = Compilation::new(other.freeze());

    let unknown = c1.resolve_type_ref(&foo).expect("resolves");
    assert!(matches!(c1.type_data(unknown), Some(TypeData::Unknown(_))));

    let imported = c2.import_type(&c1, unknown).expect("importable");
    let direct = c2.resolve_type_ref(&foo).expect("resolves");
    assert_eq!(imported, direct);
    assert!(matches!(c2.type_data(imported), Some(TypeData::Definition(_))));
}

#[test]
fn test_import_rejects_definition_declared_differently_in_target() {
    let mut ctx = TestContext::new();
    let mut other = ctx.sibling();
    let source_decl = ctx.add(ctx.class("Foo"));
    let target_decl = other.add(other.class("Foo").with_base_type(other.named("Bar")));
    other.add(other.class("Bar"));
    let mut c1 = Compilation::new(ctx.freeze());
    let mut c2 = Compilation::new(other.freeze());

    let d1 = c1.bind_type_definition(&source_decl).expect("binds");
    assert_eq!(
        c2.import_type_definition(&c1, d1),
        Err(ResolutionError::NotImportable(
            NotImportable::ConflictingDeclaration {
                type_name: "Foo".to_string(),
            }
        ))
    );

    // The target's own declaration is still the one found by name.
    let own = c2.bind_by_name("", "Foo", 0).expect("binds").expect("present");
    assert!(Arc::ptr_eq(
        c2.type_definition(own).expect("bound").declaration(),
        &target_decl
    ));
}

#[test]
fn test_import_accepts_equal_declaration_from_other_content() {
    let mut ctx = TestContext::new();
    let mut other = ctx.sibling();
    let source_decl = ctx.add(class_c(&ctx));
    let target_decl = other.add(class_c(&other));
    let mut c1 = Compilation::new(ctx.freeze());
    let mut c2 = Compilation::new(other.freeze());

    let d1 = c1.bind_type_definition(&source_decl).expect("binds");
    let imported = c2.import_type_definition(&c1, d1).expect("importable");
    assert_eq!(c2.bind_type_definition(&target_decl), Ok(imported));
}

#[test]
fn test_import_declaration_outside_project_content() {
    let ctx = TestContext::new();
    let loose = Arc::new(class_c(&ctx));
    let content = ctx.freeze();
    let mut c1 = Compilation::new(Arc::clone(&content));
    let mut c2 = Compilation::new(content);

    let d1 = c1.bind_type_definition(&loose).expect("binds");
    let d2 = c2.import_type_definition(&c1, d1).expect("importable");
    assert!(Arc::ptr_eq(
        c2.type_definition(d2).expect("bound").declaration(),
        &loose
    ));
}

#[test]
fn test_synthetic_type_parameter_is_not_importable() {
    let Pair { mut c1, mut c2, .. } = two_compilations();
    let name = c1.interner().intern("T");

    let synthetic = c1
        .create_synthetic_type_parameter(SymbolKind::TypeDefinition, 0, name)
        .expect("created");
    let synthetic_ty = c1.type_parameter(synthetic).expect("bound").self_type();

    assert_eq!(
        c2.import_type_parameter(&c1, synthetic),
        Err(ResolutionError::NotImportable(NotImportable::SyntheticEntity {
            name: "T".to_string(),
        }))
    );

    // A parameterized type mentioning it fails as a whole.
    let list = c1
        .bind_by_name("System.Collections.Generic", "List", 1)
        .expect("binds")
        .expect("present");
    let list_of_synthetic = c1.parameterized_type(list, [synthetic_ty]).expect("arity 1");
    let err = c2.import_type(&c1, list_of_synthetic).expect_err("not importable");
    assert!(err.is_not_importable());
}

#[test]
fn test_foreign_handle_is_not_importable() {
    let Pair { c1, mut c2, decl } = two_compilations();
    let d2 = c2.bind_type_definition(&decl).expect("binds");

    // d2 belongs to c2, not to the claimed source c1.
    let mut c3 = Compilation::new(Arc::clone(c1.content()));
    assert_eq!(
        c3.import(&c1, Entity::TypeDefinition(d2)),
        Err(ResolutionError::NotImportable(NotImportable::ForeignEntity))
    );
}

#[test]
fn test_import_requires_shared_interner() {
    let Pair { mut c1, decl, .. } = two_compilations();
    let d1 = c1.bind_type_definition(&decl).expect("binds");

    let other = Arc::new(ProjectContent::with_core_library(Arc::new(ShardedInterner::new())));
    let mut c3 = Compilation::new(other);
    assert_eq!(
        c3.import(&c1, d1.into()),
        Err(ResolutionError::NotImportable(NotImportable::InternerMismatch))
    );
}
