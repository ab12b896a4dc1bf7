//! The annotation propagation protocol: producer values, the `true`
//! sentinel, absence, and union semantics.

use json_schema_core::{compile, KeywordCategory};
use serde_json::{json, Value};

#[test]
fn properties_reports_the_names_it_matched() {
    let schema = compile(json!({
        "properties": {"test": true, "other": true}
    }))
    .unwrap();
    let properties = schema.keyword_by_name("properties").unwrap();
    assert_eq!(
        properties.as_annotation().value_for(&json!({"test": 1, "foo": 2})),
        json!(["test"])
    );
    assert_eq!(
        properties.as_annotation().value_for(&json!({"foo": 2})),
        json!([])
    );
}

#[test]
fn pattern_properties_reports_matched_names() {
    let schema = compile(json!({
        "patternProperties": {"^x-": true, "id$": true}
    }))
    .unwrap();
    let keyword = schema.keyword_by_name("patternProperties").unwrap();
    assert_eq!(
        keyword
            .as_annotation()
            .value_for(&json!({"x-a": 1, "user-id": 2, "plain": 3})),
        json!(["x-a", "user-id"])
    );
}

#[test]
fn additional_properties_reports_exactly_the_leftovers() {
    let schema = compile(json!({
        "properties": {"test": true},
        "additionalProperties": true
    }))
    .unwrap();
    let additional = schema.keyword_by_name("additionalProperties").unwrap();
    assert_eq!(
        additional.as_annotation().value_for(&json!({"test": 1, "foo": 1})),
        json!(["foo"])
    );
}

#[test]
fn additional_properties_takes_the_union_of_both_producers() {
    let schema = compile(json!({
        "properties": {"a": true},
        "patternProperties": {"^x-": true},
        "additionalProperties": true
    }))
    .unwrap();
    let additional = schema.keyword_by_name("additionalProperties").unwrap();
    let instance = json!({"a": 1, "x-b": 2, "c": 3});
    // `a` is matched by properties, `x-b` by patternProperties; only `c`
    // is additional
    assert_eq!(additional.as_annotation().value_for(&instance), json!(["c"]));
}

#[test]
fn annotation_values_are_per_instance() {
    let schema = compile(json!({
        "properties": {"a": true},
        "additionalProperties": true
    }))
    .unwrap();
    let additional = schema.keyword_by_name("additionalProperties").unwrap();
    assert_eq!(
        additional.as_annotation().value_for(&json!({"a": 1, "b": 2})),
        json!(["b"])
    );
    // Re-asking for a different instance reflects that instance, nothing is
    // carried over
    assert_eq!(
        additional.as_annotation().value_for(&json!({"a": 1})),
        json!([])
    );
}

#[test]
fn prefix_items_reports_covered_index_or_true() {
    let schema = compile(json!({
        "prefixItems": [true, true]
    }))
    .unwrap();
    let prefix = schema.keyword_by_name("prefixItems").unwrap();
    assert_eq!(prefix.as_annotation().value_for(&json!([1, 2, 3])), json!(1));
    // Prefix covers the entire array
    assert_eq!(
        prefix.as_annotation().value_for(&json!([1, 2])),
        Value::Bool(true)
    );
    assert_eq!(
        prefix.as_annotation().value_for(&json!([1])),
        Value::Bool(true)
    );
}

#[test]
fn contains_reports_indices_or_true() {
    let schema = compile(json!({
        "contains": {"type": "string"}
    }))
    .unwrap();
    let contains = schema.keyword_by_name("contains").unwrap();
    assert_eq!(
        contains
            .as_annotation()
            .value_for(&json!(["foo", "bar", 1, "baz"])),
        json!([0, 1, 3])
    );
    assert_eq!(
        contains.as_annotation().value_for(&json!(["foo", "bar"])),
        Value::Bool(true)
    );
    assert_eq!(contains.as_annotation().value_for(&json!([1, 2])), json!([]));
}

#[test]
fn if_reports_the_condition_outcome() {
    let schema = compile(json!({
        "if": {"type": "string"}
    }))
    .unwrap();
    let condition = schema.keyword_by_name("if").unwrap();
    assert_eq!(
        condition.as_annotation().value_for(&json!("x")),
        Value::Bool(true)
    );
    assert_eq!(
        condition.as_annotation().value_for(&json!(1)),
        Value::Bool(false)
    );
}

#[test]
fn categories_reflect_the_capability_model() {
    let schema = compile(json!({
        "properties": {"a": true},
        "minLength": 1,
        "$ref": "#"
    }))
    .unwrap();

    let properties = schema.keyword_by_name("properties").unwrap();
    assert!(properties.supports(KeywordCategory::Applicator));
    assert!(properties.supports(KeywordCategory::Annotation));
    assert!(!properties.supports(KeywordCategory::Assertion));

    let min_length = schema.keyword_by_name("minLength").unwrap();
    assert!(min_length.supports(KeywordCategory::Assertion));
    assert!(!min_length.supports(KeywordCategory::Applicator));

    let reference = schema.keyword_by_name("$ref").unwrap();
    assert!(reference.supports(KeywordCategory::Applicator));
    assert!(reference.has_name("$ref"));
}

#[test]
#[should_panic(expected = "does not support the applicator capability")]
fn missing_capability_fails_loudly() {
    let schema = compile(json!({"minLength": 1})).unwrap();
    let min_length = schema.keyword_by_name("minLength").unwrap();
    // An assertion-only keyword has no applicator view
    let _ = min_length.as_applicator();
}

#[test]
fn keywords_round_trip_their_parsed_shape() {
    let schema = compile(json!({
        "properties": {"a": {"type": "integer"}},
        "pattern": "^a",
        "required": ["a"]
    }))
    .unwrap();
    assert_eq!(
        schema.keyword_by_name("properties").unwrap().to_value(),
        json!({"a": {"type": "integer"}})
    );
    assert_eq!(
        schema.keyword_by_name("pattern").unwrap().to_value(),
        json!("^a")
    );
    assert_eq!(
        schema.keyword_by_name("required").unwrap().to_value(),
        json!(["a"])
    );
}
