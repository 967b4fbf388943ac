use super::*;

#[test]
fn test_defaults() {
    let options = ResolutionOptions::default();
    assert!(options.infer_reference_kind_from_base_class);
    assert_eq!(options.max_base_class_depth, MAX_BASE_CLASS_CHAIN_DEPTH);
    assert!(!ResolutionOptions::flags_only().infer_reference_kind_from_base_class);
}

#[test]
fn test_deserialize_partial_camel_case() {
    let options: ResolutionOptions =
        serde_json::from_str(r#"{ "inferReferenceKindFromBaseClass": false }"#).expect("valid json");
    assert_eq!(options, ResolutionOptions::flags_only());

    let options: ResolutionOptions = serde_json::from_str("{}").expect("valid json");
    assert_eq!(options, ResolutionOptions::default());
}

#[test]
fn test_serialize_round_trip_field_names() {
    let json = serde_json::to_value(ResolutionOptions::default()).expect("serializable");
    assert_eq!(json["inferReferenceKindFromBaseClass"], true);
    assert_eq!(json["maxBaseClassDepth"], MAX_BASE_CLASS_CHAIN_DEPTH);
}
