use super::*;

const SAMPLE: &str = r#"{
  "types": [
    {
      "namespace": "Demo",
      "name": "C",
      "typeParameters": [
        { "name": "T", "constraints": [{ "type": "System.Collections.Generic.List", "args": ["string"] }] },
        { "name": "U", "class": true, "new": true, "constraints": [{ "param": "T" }] }
      ],
      "methods": [
        { "name": "M", "typeParameters": [{ "name": "T", "constraints": [{ "param": "U" }, "System.IDisposable"] }] }
      ]
    },
    { "name": "Point", "kind": "struct" }
  ]
}"#;

fn load_sample() -> LoadedProject {
    parse(SAMPLE)
        .expect("sample parses")
        .into_project(true)
        .expect("sample converts")
}

#[test]
fn test_parse_defaults() {
    let file = parse(r#"{ "types": [{ "name": "A" }] }"#).expect("parses");
    assert_eq!(file.options, ResolutionOptions::default());
    assert_eq!(file.types.len(), 1);
    let ty = &file.types[0];
    assert_eq!(ty.kind, KindJson::Class);
    assert!(ty.namespace.is_empty());
    assert!(ty.type_parameters.is_empty());
    assert!(ty.base_types.is_empty());
}

#[test]
fn test_parse_options() {
    let file = parse(
        r#"{ "options": { "inferReferenceKindFromBaseClass": false, "maxBaseClassDepth": 4 }, "types": [] }"#,
    )
    .expect("parses");
    assert!(!file.options.infer_reference_kind_from_base_class);
    assert_eq!(file.options.max_base_class_depth, 4);
}

#[test]
fn test_unknown_kind_is_rejected() {
    assert!(parse(r#"{ "types": [{ "name": "A", "kind": "record" }] }"#).is_err());
}

#[test]
fn test_convert_type_parameters_and_constraints() {
    let project = load_sample();
    assert_eq!(project.declarations.len(), 2);
    let interner = project.content.interner();

    let c = &project.declarations[0];
    assert_eq!(&*interner.resolve(c.namespace), "Demo");
    assert_eq!(c.key().arity, 2);

    let t = &c.type_params[0];
    assert_eq!(t.owner, SymbolKind::TypeDefinition);
    assert_eq!(t.index, 0);
    assert_eq!(
        t.constraints,
        vec![TypeRef::generic(
            interner.intern("System.Collections.Generic"),
            interner.intern("List"),
            vec![TypeRef::Known(KnownTypeCode::String)],
        )]
    );

    let u = &c.type_params[1];
    assert!(u.has_reference_type_constraint);
    assert!(u.has_default_constructor_constraint);
    assert!(!u.has_value_type_constraint);
    assert_eq!(
        u.constraints,
        vec![TypeRef::type_parameter(SymbolKind::TypeDefinition, 0)]
    );

    let point = &project.declarations[1];
    assert_eq!(point.kind, TypeKind::Struct);
    assert_eq!(point.namespace, gres_common::Atom::NONE);
}

#[test]
fn test_method_parameter_shadows_type_parameter() {
    let project = load_sample();
    let interner = project.content.interner();
    let method = &project.declarations[0].methods[0];
    let t = &method.type_params[0];

    assert_eq!(t.owner, SymbolKind::Method);
    assert_eq!(
        t.constraints,
        vec![
            TypeRef::type_parameter(SymbolKind::TypeDefinition, 1),
            TypeRef::named(interner.intern("System"), interner.intern("IDisposable")),
        ]
    );
}

#[test]
fn test_declarations_are_added_to_content() {
    let project = load_sample();
    assert!(project.content.find("Demo", "C", 2).is_some());
    assert!(project.content.find("System", "Object", 0).is_some());

    let without = parse(SAMPLE)
        .expect("parses")
        .into_project(false)
        .expect("converts");
    assert!(without.content.find("System", "Object", 0).is_none());
    assert_eq!(without.content.len(), 2);
}

#[test]
fn test_unknown_parameter_name() {
    let file = parse(
        r#"{ "types": [{ "name": "A", "typeParameters": [{ "name": "T", "constraints": [{ "param": "Q" }] }] }] }"#,
    )
    .expect("parses");
    let err = file.into_project(true).err().expect("unknown parameter");
    let message = format!("{err:#}");
    assert!(message.contains("in type 'A'"), "{message}");
    assert!(message.contains("unknown type parameter 'Q'"), "{message}");
}

#[test]
fn test_positional_references_are_passed_through() {
    let file = parse(
        r#"{ "types": [{ "name": "A", "typeParameters": [{ "name": "T", "constraints": [{ "typeParam": 3 }, { "methodParam": 0 }] }] }] }"#,
    )
    .expect("parses");
    let project = file.into_project(true).expect("converts");
    assert_eq!(
        project.declarations[0].type_params[0].constraints,
        vec![
            TypeRef::type_parameter(SymbolKind::TypeDefinition, 3),
            TypeRef::type_parameter(SymbolKind::Method, 0),
        ]
    );
}

#[test]
fn test_duplicate_type_is_rejected() {
    let file = parse(r#"{ "types": [{ "name": "A" }, { "name": "A", "kind": "interface" }] }"#)
        .expect("parses");
    let err = file.into_project(true).err().expect("duplicate");
    assert!(err.to_string().contains("declared twice"));
}

#[test]
fn test_keywords_only_apply_without_arguments() {
    let interner = ShardedInterner::new();
    assert_eq!(
        named_ref(&interner, "int", Vec::new()),
        TypeRef::Known(KnownTypeCode::Int32)
    );
    assert_eq!(
        named_ref(&interner, "object", Vec::new()),
        TypeRef::Known(KnownTypeCode::Object)
    );
    assert_eq!(
        named_ref(&interner, "Widget", Vec::new()),
        TypeRef::named(gres_common::Atom::NONE, interner.intern("Widget"))
    );
}

#[test]
fn test_load_reports_missing_file() {
    let err = load(Path::new("/definitely/not/here.json")).err().expect("missing");
    assert!(err.to_string().contains("failed to read"));
}
