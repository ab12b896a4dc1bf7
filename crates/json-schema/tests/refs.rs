//! Reference resolution: `$defs`, anchors, embedded `$id` resources,
//! external documents and the dynamic scope.

use json_schema_core::{compile, Schema, SchemaBuilder, SchemaError, SchemaResolver};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Test double serving raw schema documents by URI.
struct FixedDocuments {
    documents: HashMap<String, Value>,
}

impl FixedDocuments {
    fn new(entries: &[(&str, Value)]) -> Arc<Self> {
        Arc::new(Self {
            documents: entries
                .iter()
                .map(|(uri, doc)| (uri.to_string(), doc.clone()))
                .collect(),
        })
    }
}

impl SchemaResolver for FixedDocuments {
    fn resolve(&self, uri: &str) -> Option<Value> {
        self.documents.get(uri).cloned()
    }
}

#[test]
fn local_ref_into_defs() {
    let schema = compile(json!({
        "$defs": {"positiveInteger": {"type": "integer"}},
        "$ref": "#/$defs/positiveInteger"
    }))
    .unwrap();
    let validator = schema.validator();
    assert!(validator.is_valid(&json!(1)));
    assert!(!validator.is_valid(&json!("invalid")));
}

#[test]
fn ref_by_anchor_name() {
    let schema = compile(json!({
        "$defs": {"x": {"$anchor": "positive", "exclusiveMinimum": 0}},
        "$ref": "#positive"
    }))
    .unwrap();
    let validator = schema.validator();
    assert!(validator.is_valid(&json!(3)));
    assert!(!validator.is_valid(&json!(-3)));
}

#[test]
fn unresolved_local_ref_is_a_load_error() {
    assert!(matches!(
        compile(json!({"$ref": "#/$defs/missing"})),
        Err(SchemaError::UnresolvedReference { .. })
    ));
    assert!(matches!(
        compile(json!({"$ref": "#nowhere"})),
        Err(SchemaError::UnresolvedReference { .. })
    ));
}

#[test]
fn relative_ref_without_a_base_is_a_load_error() {
    assert!(compile(json!({"$ref": "other.json"})).is_err());
}

#[test]
fn malformed_defs_entry_is_a_load_error() {
    assert!(matches!(
        compile(json!({"$defs": {"bad": {"pattern": "("}}})),
        Err(SchemaError::InvalidPattern { .. })
    ));
}

#[test]
fn external_ref_through_the_resolver() {
    let resolver = FixedDocuments::new(&[(
        "https://example.com/item",
        json!({"$defs": {"id": {"type": "integer"}}, "$ref": "#/$defs/id"}),
    )]);
    let schema = SchemaBuilder::new()
        .resolver(resolver)
        .build(json!({
            "$id": "https://example.com/root",
            "items": {"$ref": "item"}
        }))
        .unwrap();
    let validator = schema.validator();
    assert!(validator.is_valid(&json!([1, 2])));
    assert!(!validator.is_valid(&json!([1, "x"])));
}

#[test]
fn external_ref_with_pointer_fragment() {
    let resolver = FixedDocuments::new(&[(
        "https://example.com/shared",
        json!({"$defs": {"name": {"type": "string", "minLength": 1}}}),
    )]);
    let schema = SchemaBuilder::new()
        .resolver(resolver)
        .build(json!({"$ref": "https://example.com/shared#/$defs/name"}))
        .unwrap();
    let validator = schema.validator();
    assert!(validator.is_valid(&json!("x")));
    assert!(!validator.is_valid(&json!("")));
    assert!(!validator.is_valid(&json!(1)));
}

#[test]
fn unknown_external_document_is_a_load_error() {
    let result = SchemaBuilder::new()
        .resolver(FixedDocuments::new(&[]))
        .build(json!({"$ref": "https://example.com/absent"}));
    assert!(matches!(
        result,
        Err(SchemaError::UnresolvedReference { .. })
    ));
}

#[test]
fn embedded_id_resource_resolves_without_a_resolver() {
    let schema = compile(json!({
        "$id": "https://example.com/root",
        "$defs": {
            "item": {"$id": "item.json", "type": "integer"}
        },
        "$ref": "item.json"
    }))
    .unwrap();
    let validator = schema.validator();
    assert!(validator.is_valid(&json!(5)));
    assert!(!validator.is_valid(&json!("5")));
}

#[test]
fn recursive_schema_follows_the_instance() {
    let schema = compile(json!({
        "$defs": {
            "node": {
                "type": "object",
                "properties": {"next": {"$ref": "#/$defs/node"}}
            }
        },
        "$ref": "#/$defs/node"
    }))
    .unwrap();
    let validator = schema.validator();
    assert!(validator.is_valid(&json!({"next": {"next": {}}})));
    assert!(!validator.is_valid(&json!({"next": {"next": 1}})));
}

#[test]
fn dynamic_ref_resolves_in_the_outermost_document() {
    let generic = json!({
        "$id": "https://example.com/generic",
        "$dynamicRef": "#T",
        "$defs": {
            "content": {"$dynamicAnchor": "T", "type": "string"}
        }
    });
    let resolver = FixedDocuments::new(&[("https://example.com/generic", generic.clone())]);

    // Alone, the generic document falls back to its own anchor
    let standalone = SchemaBuilder::new().build(generic).unwrap();
    assert!(standalone.validator().is_valid(&json!("text")));
    assert!(!standalone.validator().is_valid(&json!(5)));

    // Referenced from a document that re-declares the dynamic anchor, the
    // outermost declaration wins
    let specific = SchemaBuilder::new()
        .resolver(resolver)
        .build(json!({
            "$id": "https://example.com/specific",
            "$defs": {
                "content": {"$dynamicAnchor": "T", "type": "integer"}
            },
            "$ref": "https://example.com/generic"
        }))
        .unwrap();
    let validator = specific.validator();
    assert!(validator.is_valid(&json!(5)));
    assert!(!validator.is_valid(&json!("text")));
}

#[test]
fn dynamic_ref_falls_back_to_static_resolution() {
    // No `$dynamicAnchor` anywhere: behaves like `$ref` to the plain anchor
    let schema = compile(json!({
        "$defs": {"x": {"$anchor": "target", "type": "boolean"}},
        "$dynamicRef": "#target"
    }))
    .unwrap();
    let validator = schema.validator();
    assert!(validator.is_valid(&json!(true)));
    assert!(!validator.is_valid(&json!(1)));
}

#[test]
fn unbounded_recursion_reports_a_failure() {
    let schema = compile(json!({"$ref": "#"})).unwrap();
    let failures = schema.validator().validate(&json!({}));
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].keyword, "$ref");
    assert!(failures[0].message.contains("recursion limit"));
}

#[test]
fn sub_schema_navigation_by_pointer() {
    let schema = compile(json!({
        "$defs": {"positiveInteger": {"type": "integer", "exclusiveMinimum": 0}}
    }))
    .unwrap();
    let sub = schema
        .sub_schema_at("/$defs/positiveInteger")
        .unwrap()
        .unwrap();
    assert!(sub.validator().is_valid(&json!(1)));
    assert!(!sub.validator().is_valid(&json!(0)));
    assert!(matches!(sub.owner(), Schema::Object(_)));
}
