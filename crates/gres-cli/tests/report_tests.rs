use super::*;

fn sample() -> Vec<TypeReport> {
    vec![
        TypeReport {
            name: "C`1".to_string(),
            kind: "class",
            type_parameters: vec![
                TypeParamReport {
                    name: "T".to_string(),
                    owner: "C`1".to_string(),
                    index: 0,
                    reference_kind: "reference",
                    effective_base_class: "System.String".to_string(),
                    interfaces: Vec::new(),
                    has_default_constructor_constraint: false,
                },
                TypeParamReport {
                    name: "X".to_string(),
                    owner: "C`1.M".to_string(),
                    index: 0,
                    reference_kind: "unknown",
                    effective_base_class: "System.Object".to_string(),
                    interfaces: vec!["System.IDisposable".to_string(), "I2".to_string()],
                    has_default_constructor_constraint: true,
                },
            ],
            error: None,
        },
        TypeReport {
            name: "Bad`2".to_string(),
            kind: "interface",
            type_parameters: Vec::new(),
            error: Some("invalid declaration: boom".to_string()),
        },
    ]
}

#[test]
fn test_render_plain_text() {
    let text = Reporter::new(false).render(&sample());
    let expected = "\
class C`1
  T (`0): reference
    base: System.String
  X (C`1.M ``0): unknown, new()
    base: System.Object
    interfaces: System.IDisposable, I2

interface Bad`2
  error: invalid declaration: boom
";
    assert_eq!(text, expected);
}

#[test]
fn test_render_type_without_parameters() {
    let report = TypeReport {
        name: "S".to_string(),
        kind: "struct",
        type_parameters: Vec::new(),
        error: None,
    };
    assert_eq!(
        Reporter::new(false).render(&[report]),
        "struct S\n  (no type parameters)\n"
    );
}

#[test]
fn test_render_errors_only_lists_failures() {
    let text = Reporter::new(false).render_errors("decls.json", &sample());
    assert_eq!(text, "decls.json - error Bad`2: invalid declaration: boom\n");
}

#[test]
fn test_summary() {
    let reporter = Reporter::new(false);
    let reports = sample();
    assert_eq!(reporter.summary(&reports), "1 of 2 type(s) failed to resolve");
    assert_eq!(reporter.summary(&reports[..1]), "1 type(s) resolved");
}
