//! Vocabularies: named tables of keyword types, and the registry that
//! resolves `$vocabulary` declarations to them.
//!
//! The three compiled-in vocabularies (core, applicator, validation) are the
//! mandatory set. Non-official vocabulary URIs can be satisfied through a
//! pluggable [`LazyVocabularies`] lookup; official URIs never take that
//! path, so a schema cannot swap out the semantics of `properties` or
//! `type` by registering a lookalike vocabulary.

pub mod applicator;
pub mod core;
pub mod validation;

use crate::error::SchemaError;
use crate::keyword::KeywordType;
use crate::uri::is_official_vocabulary;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A pure lookup table of keyword types, identified by URI.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    uri: String,
    types: Arc<HashMap<&'static str, KeywordType>>,
}

impl Vocabulary {
    pub fn new(uri: impl Into<String>, types: Vec<KeywordType>) -> Self {
        Self {
            uri: uri.into(),
            types: Arc::new(types.into_iter().map(|t| (t.name, t)).collect()),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn find_keyword_type_by_name(&self, name: &str) -> Option<KeywordType> {
        self.types.get(name).copied()
    }
}

/// One `(uri, required)` entry decoded from a `$vocabulary` object.
/// Equality is by URI.
#[derive(Debug, Clone)]
pub struct VocabularyDefinition {
    uri: String,
    required: bool,
}

impl VocabularyDefinition {
    pub fn new(uri: impl Into<String>, required: bool) -> Self {
        Self {
            uri: uri.into(),
            required,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

impl PartialEq for VocabularyDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri
    }
}

impl Eq for VocabularyDefinition {}

/// Pluggable lookup for non-official, user-registered vocabularies.
///
/// Resolution must be idempotent and safe to invoke concurrently; resolved
/// vocabularies are interchangeable values, not singletons.
pub trait LazyVocabularies: Send + Sync {
    fn find_vocabulary(&self, uri: &str) -> Option<Vocabulary>;
}

/// Resolves vocabulary URIs to vocabularies: compiled-in tables first, then
/// the lazy lookup for non-official URIs.
#[derive(Clone, Default)]
pub struct VocabularyRegistry {
    lazy: Option<Arc<dyn LazyVocabularies>>,
}

impl VocabularyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lazy(lazy: Arc<dyn LazyVocabularies>) -> Self {
        Self { lazy: Some(lazy) }
    }

    /// Finds a vocabulary by URI.
    ///
    /// Official URIs are only ever satisfied by the compiled-in tables.
    pub fn find_vocabulary(&self, uri: &str) -> Option<Vocabulary> {
        if let Some(builtin) = builtin(uri) {
            return Some(builtin);
        }
        if is_official_vocabulary(uri) {
            return None;
        }
        self.lazy.as_ref()?.find_vocabulary(uri)
    }
}

impl std::fmt::Debug for VocabularyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VocabularyRegistry")
            .field("lazy", &self.lazy.is_some())
            .finish()
    }
}

fn builtin(uri: &str) -> Option<Vocabulary> {
    match uri {
        core::URI => Some(Vocabulary::new(core::URI, core::keyword_types())),
        applicator::URI => Some(Vocabulary::new(applicator::URI, applicator::keyword_types())),
        validation::URI => Some(Vocabulary::new(validation::URI, validation::keyword_types())),
        _ => None,
    }
}

/// The vocabularies every usable schema must carry: core plus the two base
/// vocabularies.
pub const MANDATORY: &[&str] = &[core::URI, applicator::URI, validation::URI];

/// The active set when a document declares no `$vocabulary`.
pub fn default_definitions() -> Vec<VocabularyDefinition> {
    MANDATORY
        .iter()
        .map(|uri| VocabularyDefinition::new(*uri, true))
        .collect()
}

/// Decodes a `$vocabulary` object into definitions, in declaration order.
pub fn decode_definitions(value: &Value) -> Result<Vec<VocabularyDefinition>, SchemaError> {
    let map = value.as_object().ok_or(SchemaError::MalformedVocabulary)?;
    let mut definitions = Vec::with_capacity(map.len());
    for (uri, required) in map {
        let required = required.as_bool().ok_or(SchemaError::MalformedVocabulary)?;
        definitions.push(VocabularyDefinition::new(uri.clone(), required));
    }
    for mandatory in MANDATORY {
        let declared = definitions
            .iter()
            .find(|d| d.uri() == *mandatory)
            .map(VocabularyDefinition::is_required);
        if declared != Some(true) {
            return Err(SchemaError::MandatoryVocabulary(mandatory.to_string()));
        }
    }
    Ok(definitions)
}

/// Resolves definitions to vocabularies in declaration order.
///
/// A required definition that cannot be resolved is a configuration error;
/// unresolvable optional vocabularies are silently skipped.
pub fn resolve_definitions(
    registry: &VocabularyRegistry,
    definitions: &[VocabularyDefinition],
) -> Result<Vec<Vocabulary>, SchemaError> {
    let mut vocabularies = Vec::with_capacity(definitions.len());
    for definition in definitions {
        match registry.find_vocabulary(definition.uri()) {
            Some(vocabulary) => vocabularies.push(vocabulary),
            None if definition.is_required() => {
                return Err(SchemaError::UnknownVocabulary(definition.uri().to_string()))
            }
            None => {}
        }
    }
    Ok(vocabularies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_definition_equality_is_by_uri() {
        let a = VocabularyDefinition::new("https://example.com/v", true);
        let b = VocabularyDefinition::new("https://example.com/v", false);
        assert_eq!(a, b);
    }

    #[test]
    fn test_builtin_lookup() {
        let registry = VocabularyRegistry::new();
        let vocabulary = registry.find_vocabulary(core::URI).unwrap();
        assert!(vocabulary.find_keyword_type_by_name("$ref").is_some());
        assert!(vocabulary.find_keyword_type_by_name("type").is_none());
    }

    #[test]
    fn test_official_uris_never_use_lazy_lookup() {
        struct Hijack;
        impl LazyVocabularies for Hijack {
            fn find_vocabulary(&self, uri: &str) -> Option<Vocabulary> {
                Some(Vocabulary::new(uri, vec![]))
            }
        }
        let registry = VocabularyRegistry::with_lazy(Arc::new(Hijack));
        let unimplemented_official = "https://json-schema.org/draft/2020-12/vocab/format-assertion";
        assert!(registry.find_vocabulary(unimplemented_official).is_none());
        assert!(registry
            .find_vocabulary("https://example.com/vocab/custom")
            .is_some());
    }

    #[test]
    fn test_decode_requires_mandatory_vocabularies() {
        let err = decode_definitions(&json!({core::URI: false})).unwrap_err();
        assert!(matches!(err, SchemaError::MandatoryVocabulary(_)));

        let err = decode_definitions(&json!({core::URI: true, validation::URI: true})).unwrap_err();
        assert!(matches!(err, SchemaError::MandatoryVocabulary(_)));
    }

    #[test]
    fn test_decode_preserves_declaration_order() {
        let defs = decode_definitions(&json!({
            validation::URI: true,
            core::URI: true,
            applicator::URI: true,
        }))
        .unwrap();
        assert_eq!(defs[0].uri(), validation::URI);
        assert_eq!(defs[1].uri(), core::URI);
    }

    #[test]
    fn test_resolve_skips_unresolvable_optional() {
        let registry = VocabularyRegistry::new();
        let mut defs = default_definitions();
        defs.push(VocabularyDefinition::new("https://example.com/opt", false));
        let vocabularies = resolve_definitions(&registry, &defs).unwrap();
        assert_eq!(vocabularies.len(), 3);

        defs.push(VocabularyDefinition::new("https://example.com/req", true));
        assert!(matches!(
            resolve_definitions(&registry, &defs),
            Err(SchemaError::UnknownVocabulary(_))
        ));
    }
}
