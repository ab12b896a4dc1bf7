//! The validator entry points and the dynamic evaluation scope.

use crate::error::ValidationFailure;
use crate::schema::{DocumentCtx, Schema};
use serde_json::Value;
use std::sync::Arc;

/// Bound on nested reference expansion during one validation, converting
/// runaway recursive schemas into a validation failure instead of unbounded
/// recursion.
pub(crate) const REF_EXPANSION_LIMIT: usize = 64;

/// Validates instances against one schema. Cheap to construct; safe to use
/// from many threads, each validation call carries its own scope.
#[derive(Debug, Clone)]
pub struct Validator {
    schema: Schema,
}

impl Validator {
    pub(crate) fn new(schema: Schema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Runs every active keyword and returns all failures; producers still
    /// run for their consumers even when an earlier keyword already failed.
    pub fn validate(&self, instance: &Value) -> Vec<ValidationFailure> {
        let mut scope = Scope::new();
        if let Schema::Object(object) = &self.schema {
            scope.push_document(object.doc().clone());
        }
        self.schema.evaluate(instance, &[], &mut scope)
    }

    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validate(instance).is_empty()
    }
}

/// The dynamic evaluation scope of one validation call: the stack of
/// documents actually traversed, outermost first, plus the reference
/// expansion depth.
#[derive(Debug, Default)]
pub struct Scope {
    documents: Vec<Arc<DocumentCtx>>,
    depth: usize,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_document(&mut self, doc: Arc<DocumentCtx>) {
        self.documents.push(doc);
    }

    pub(crate) fn pop_document(&mut self) {
        self.documents.pop();
    }

    /// The outermost document in scope declaring a matching
    /// `$dynamicAnchor`, together with the anchor's pointer.
    pub(crate) fn find_dynamic_anchor(&self, name: &str) -> Option<(Arc<DocumentCtx>, String)> {
        self.documents.iter().find_map(|doc| {
            doc.dynamic_anchor(name)
                .map(|pointer| (doc.clone(), pointer.to_string()))
        })
    }

    pub(crate) fn enter_reference(&mut self) -> bool {
        if self.depth >= REF_EXPANSION_LIMIT {
            return false;
        }
        self.depth += 1;
        true
    }

    pub(crate) fn leave_reference(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::compile;
    use serde_json::json;

    #[test]
    fn test_is_valid_matches_validate_emptiness() {
        let schema = compile(json!({
            "type": "object",
            "required": ["a"],
            "properties": {"a": {"type": "integer"}}
        }))
        .unwrap();
        let validator = schema.validator();

        for instance in [
            json!({"a": 1}),
            json!({"a": "x"}),
            json!({}),
            json!(null),
            json!([1, 2]),
        ] {
            assert_eq!(
                validator.is_valid(&instance),
                validator.validate(&instance).is_empty(),
            );
        }
    }

    #[test]
    fn test_all_keywords_report_not_just_the_first() {
        let schema = compile(json!({
            "type": "string",
            "minLength": 3
        }))
        .unwrap();
        let failures = schema.validator().validate(&json!(1));
        // `type` fails and `minLength` passes vacuously on a non-string
        assert_eq!(failures.len(), 1);

        let failures = schema.validator().validate(&json!("a"));
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].keyword, "minLength");
    }

    #[test]
    fn test_failures_point_into_the_instance() {
        let schema = compile(json!({
            "properties": {"outer": {"items": {"type": "integer"}}}
        }))
        .unwrap();
        let failures = schema
            .validator()
            .validate(&json!({"outer": [1, "bad", 3]}));
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].instance_location, "/outer/1");
        assert_eq!(failures[0].keyword, "type");
    }

    #[test]
    fn test_recursion_limit_is_a_failure_not_a_crash() {
        // Self-referential schema with no base case
        let schema = compile(json!({"$ref": "#"})).unwrap();
        let failures = schema.validator().validate(&json!(1));
        assert_eq!(failures.len(), 1);
        assert!(failures[0].message.contains("recursion"));
    }
}
