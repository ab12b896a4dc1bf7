//! Resolution of one schema object's active keyword set.
//!
//! The active set is the intersection of the object's property names with
//! the keyword types exposed by the document's active vocabularies, in the
//! object's declaration order; the first vocabulary in declaration order
//! wins when several define the same name. Property names matching no
//! active vocabulary are inert.
//!
//! Keywords with a fixed affected-by relationship are constructed in a
//! second pass so they receive handles to their already-built annotation
//! producers, which keeps the dependency explicit, acyclic, and resolved
//! once per schema instead of once per instance.

use crate::error::SchemaError;
use crate::keyword::{Keyword, KeywordCategory, KeywordCtx, KeywordType};
use crate::schema::DocumentCtx;
use crate::vocabulary::Vocabulary;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::sync::Arc;

/// The affects table fixed by the specification: consumer keyword to the
/// ordered annotation producers it observes.
static AFFECTED_BY: &[(&str, &[&str])] = &[
    ("additionalProperties", &["properties", "patternProperties"]),
    ("items", &["prefixItems"]),
    ("minContains", &["contains"]),
    ("maxContains", &["contains"]),
    ("then", &["if"]),
    ("else", &["if"]),
];

fn affected_by(name: &str) -> Option<&'static [&'static str]> {
    AFFECTED_BY
        .iter()
        .find(|(consumer, _)| *consumer == name)
        .map(|(_, producers)| *producers)
}

fn find_keyword_type(vocabularies: &[Vocabulary], name: &str) -> Option<KeywordType> {
    vocabularies
        .iter()
        .find_map(|vocabulary| vocabulary.find_keyword_type_by_name(name))
}

/// The ordered, deduplicated set of active keywords of one schema object.
#[derive(Debug)]
pub struct Keywords {
    entries: IndexMap<&'static str, Keyword>,
}

impl Keywords {
    pub(crate) fn resolve(
        object: &Map<String, Value>,
        doc: &Arc<DocumentCtx>,
        location: &str,
    ) -> Result<Self, SchemaError> {
        let vocabularies = doc.vocabularies();
        let mut built: IndexMap<&'static str, Keyword> = IndexMap::new();

        // Producers and plain keywords first
        for (name, value) in object {
            if affected_by(name).is_some() {
                continue;
            }
            if let Some(keyword_type) = find_keyword_type(vocabularies, name) {
                let ctx = KeywordCtx::new(doc, location);
                built.insert(keyword_type.name, keyword_type.create_keyword(&ctx, value)?);
            }
        }

        // Then the affected keywords, wired to their producer handles
        for (name, value) in object {
            let Some(producer_names) = affected_by(name) else {
                continue;
            };
            if let Some(keyword_type) = find_keyword_type(vocabularies, name) {
                let producers: Vec<Keyword> = producer_names
                    .iter()
                    .filter_map(|producer| built.get(producer).cloned())
                    .filter(|producer| producer.supports(KeywordCategory::Annotation))
                    .collect();
                let ctx = KeywordCtx::with_producers(doc, location, producers);
                built.insert(keyword_type.name, keyword_type.create_keyword(&ctx, value)?);
            }
        }

        // Present the set in the schema object's declaration order
        let mut entries = IndexMap::with_capacity(built.len());
        for name in object.keys() {
            if let Some((key, keyword)) = built.get_key_value(name.as_str()) {
                entries.insert(*key, keyword.clone());
            }
        }
        Ok(Self { entries })
    }

    /// Case-sensitive exact lookup; unknown names are `None`, never an
    /// error.
    pub fn by_name(&self, name: &str) -> Option<&Keyword> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyword> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::test_support::test_document;
    use serde_json::json;

    #[test]
    fn test_unknown_names_are_inert() {
        let doc = test_document(json!({"type": "string", "x-vendor": 1, "title": "t"}));
        let object = doc.raw().as_object().unwrap().clone();
        let keywords = Keywords::resolve(&object, &doc, "").unwrap();
        assert_eq!(keywords.len(), 1);
        assert!(keywords.by_name("type").is_some());
        assert!(keywords.by_name("x-vendor").is_none());
        // Lookup is case-sensitive
        assert!(keywords.by_name("Type").is_none());
    }

    #[test]
    fn test_declaration_order_is_preserved() {
        let doc = test_document(json!({"minimum": 1, "type": "integer", "maximum": 3}));
        let object = doc.raw().as_object().unwrap().clone();
        let keywords = Keywords::resolve(&object, &doc, "").unwrap();
        let names: Vec<&str> = keywords.iter().map(|k| k.name()).collect();
        assert_eq!(names, vec!["minimum", "type", "maximum"]);
    }

    #[test]
    fn test_consumers_receive_producer_handles() {
        let doc = test_document(json!({
            "additionalProperties": false,
            "properties": {"a": true}
        }));
        let object = doc.raw().as_object().unwrap().clone();
        let keywords = Keywords::resolve(&object, &doc, "").unwrap();
        let additional = keywords.by_name("additionalProperties").unwrap();
        // `a` is covered by properties, `b` is additional
        let annotation = additional
            .as_annotation()
            .value_for(&json!({"a": 1, "b": 2}));
        assert_eq!(annotation, json!(["b"]));
    }

    #[test]
    fn test_bad_keyword_value_aborts_resolution() {
        let doc = test_document(json!({"pattern": 5}));
        let object = doc.raw().as_object().unwrap().clone();
        assert!(matches!(
            Keywords::resolve(&object, &doc, ""),
            Err(SchemaError::InvalidKeywordValue { .. })
        ));
    }
}
