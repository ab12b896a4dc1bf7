//! The schema model: documents, schemas, sub-schemas and the builder entry
//! point.
//!
//! A loaded document is shared immutably behind [`DocumentCtx`]: the raw
//! JSON tree plus everything a keyword needs to resolve references inside
//! it (anchor maps, embedded `$id` resources, the active vocabularies and
//! the pluggable collaborators). Schemas address positions in that tree by
//! JSON Pointer and compile bottom-up: building an object schema resolves
//! its keyword set, which in turn compiles the sub-schemas those keywords
//! own.

use crate::error::{SchemaError, ValidationFailure};
use crate::instance_type::InstanceType;
use crate::keyword::{Keyword, KeywordCategory};
use crate::keyword_set::Keywords;
use crate::uri;
use crate::validator::{Scope, Validator};
use crate::vocabulary::{self, Vocabulary, VocabularyDefinition, VocabularyRegistry};
use json_schema_pointer::{append_token, get_by_pointer, parse_pointer};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Supplies raw schema documents for absolute `$ref` targets outside the
/// current document.
pub trait SchemaResolver: Send + Sync {
    fn resolve(&self, uri: &str) -> Option<Value>;
}

/// One loaded schema document and its resolution context.
pub struct DocumentCtx {
    raw: Value,
    base: Option<Url>,
    definitions: Vec<VocabularyDefinition>,
    vocabularies: Vec<Vocabulary>,
    anchors: HashMap<String, String>,
    dynamic_anchors: HashMap<String, String>,
    resources: HashMap<String, String>,
    registry: VocabularyRegistry,
    resolver: Option<Arc<dyn SchemaResolver>>,
}

impl fmt::Debug for DocumentCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentCtx")
            .field("base", &self.base)
            .field("definitions", &self.definitions)
            .field("anchors", &self.anchors)
            .field("dynamic_anchors", &self.dynamic_anchors)
            .field("resources", &self.resources)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct ScanMaps {
    anchors: HashMap<String, String>,
    dynamic_anchors: HashMap<String, String>,
    resources: HashMap<String, String>,
}

impl DocumentCtx {
    pub(crate) fn new(
        raw: Value,
        registry: VocabularyRegistry,
        resolver: Option<Arc<dyn SchemaResolver>>,
    ) -> Result<Arc<Self>, SchemaError> {
        let map = match &raw {
            Value::Object(map) => Some(map),
            Value::Bool(_) => None,
            other => {
                return Err(SchemaError::NotASchema {
                    pointer: String::new(),
                    kind: value_kind(other),
                })
            }
        };

        let mut base = None;
        let mut maps = ScanMaps::default();
        let mut definitions = vocabulary::default_definitions();
        if let Some(map) = map {
            if let Some(id) = map.get("$id") {
                let id = id.as_str().ok_or(SchemaError::InvalidKeywordValue {
                    keyword: "$id",
                    expected: "a URI reference string",
                })?;
                let resolved = uri::resolve(None, id)?;
                let mut stripped = resolved;
                stripped.set_fragment(None);
                base = Some(stripped);
            }
            scan(&raw, &base, "", &mut maps)?;
            if let Some(value) = map.get("$vocabulary") {
                definitions = vocabulary::decode_definitions(value)?;
            }
        }
        let vocabularies = vocabulary::resolve_definitions(&registry, &definitions)?;

        Ok(Arc::new(Self {
            raw,
            base,
            definitions,
            vocabularies,
            anchors: maps.anchors,
            dynamic_anchors: maps.dynamic_anchors,
            resources: maps.resources,
            registry,
            resolver,
        }))
    }

    /// Context for an external document reached through `$ref`, sharing the
    /// referencing document's collaborators.
    pub(crate) fn for_external(raw: Value, parent: &DocumentCtx) -> Result<Arc<Self>, SchemaError> {
        Self::new(raw, parent.registry.clone(), parent.resolver.clone())
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub(crate) fn value_at(&self, pointer: &str) -> Option<&Value> {
        get_by_pointer(&self.raw, pointer)
    }

    pub(crate) fn vocabularies(&self) -> &[Vocabulary] {
        &self.vocabularies
    }

    /// The vocabulary definitions active for this document, in declaration
    /// order.
    pub fn vocabulary_definitions(&self) -> &[VocabularyDefinition] {
        &self.definitions
    }

    pub(crate) fn anchor(&self, name: &str) -> Option<&str> {
        self.anchors.get(name).map(String::as_str)
    }

    pub(crate) fn dynamic_anchor(&self, name: &str) -> Option<&str> {
        self.dynamic_anchors.get(name).map(String::as_str)
    }

    /// The pointer of the resource a document-level URI names: the document
    /// root for its own base URI, or an embedded `$id` resource.
    pub(crate) fn resource_pointer(&self, document_uri: &str) -> Option<&str> {
        self.resources.get(document_uri).map(String::as_str)
    }

    pub(crate) fn resolve_external(&self, document_uri: &str) -> Option<Value> {
        self.resolver.as_ref()?.resolve(document_uri)
    }

    /// The `$id` base URI in scope at `location`, found by walking the raw
    /// tree from the root and applying every `$id` along the way.
    pub(crate) fn base_for(&self, location: &str) -> Result<Option<Url>, SchemaError> {
        let mut base = self.base.clone();
        let mut node = &self.raw;
        for token in parse_pointer(location) {
            node = match node {
                Value::Object(map) => map.get(&token),
                Value::Array(arr) => token.parse::<usize>().ok().and_then(|i| arr.get(i)),
                _ => None,
            }
            .ok_or_else(|| SchemaError::MissingSchema {
                pointer: location.to_string(),
            })?;
            if let Value::Object(map) = node {
                if let Some(Value::String(id)) = map.get("$id") {
                    let resolved = uri::resolve(base.as_ref(), id)?;
                    let mut stripped = resolved;
                    stripped.set_fragment(None);
                    base = Some(stripped);
                }
            }
        }
        Ok(base)
    }
}

/// Records `$id` resources, `$anchor` and `$dynamicAnchor` declarations of
/// the whole document in one pass. A `$dynamicAnchor` also registers as a
/// plain anchor so static fallback resolution can find it.
fn scan(
    value: &Value,
    base: &Option<Url>,
    pointer: &str,
    maps: &mut ScanMaps,
) -> Result<(), SchemaError> {
    match value {
        Value::Object(map) => {
            let mut local_base = base.clone();
            if let Some(Value::String(id)) = map.get("$id") {
                let resolved = uri::resolve(local_base.as_ref(), id)?;
                let mut stripped = resolved;
                stripped.set_fragment(None);
                maps.resources.insert(stripped.to_string(), pointer.to_string());
                local_base = Some(stripped);
            }
            if let Some(Value::String(name)) = map.get("$anchor") {
                if maps
                    .anchors
                    .insert(name.clone(), pointer.to_string())
                    .is_some()
                {
                    return Err(SchemaError::DuplicateAnchor(name.clone()));
                }
            }
            if let Some(Value::String(name)) = map.get("$dynamicAnchor") {
                if maps
                    .dynamic_anchors
                    .insert(name.clone(), pointer.to_string())
                    .is_some()
                {
                    return Err(SchemaError::DuplicateAnchor(name.clone()));
                }
                maps.anchors
                    .entry(name.clone())
                    .or_insert_with(|| pointer.to_string());
            }
            for (key, child) in map {
                scan(child, &local_base, &append_token(pointer, key), maps)?;
            }
        }
        Value::Array(arr) => {
            for (index, child) in arr.iter().enumerate() {
                scan(child, base, &append_token(pointer, &index.to_string()), maps)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A JSON Schema: the universal boolean schemas or an object-backed schema.
///
/// Handles are cheap to clone and share; everything behind them is
/// immutable after construction.
#[derive(Debug, Clone)]
pub enum Schema {
    Boolean(bool),
    Object(Arc<ObjectSchema>),
}

/// An object-backed schema at a fixed location inside its document.
#[derive(Debug)]
pub struct ObjectSchema {
    raw: Map<String, Value>,
    doc: Arc<DocumentCtx>,
    location: String,
    keywords: Keywords,
}

impl Schema {
    /// The `true` schema: accepts everything, exposes no keywords.
    pub fn empty() -> Schema {
        Schema::Boolean(true)
    }

    pub(crate) fn compile_at(doc: &Arc<DocumentCtx>, location: &str) -> Result<Schema, SchemaError> {
        let value = doc
            .value_at(location)
            .ok_or_else(|| SchemaError::MissingSchema {
                pointer: location.to_string(),
            })?;
        match value {
            Value::Bool(accept) => Ok(Schema::Boolean(*accept)),
            Value::Object(map) => {
                let keywords = Keywords::resolve(map, doc, location)?;
                Ok(Schema::Object(Arc::new(ObjectSchema {
                    raw: map.clone(),
                    doc: doc.clone(),
                    location: location.to_string(),
                    keywords,
                })))
            }
            other => Err(SchemaError::NotASchema {
                pointer: location.to_string(),
                kind: value_kind(other),
            }),
        }
    }

    pub fn validator(&self) -> Validator {
        Validator::new(self.clone())
    }

    /// Fast path: does the instance conform, without failure detail.
    pub fn apply_to(&self, instance: &Value) -> bool {
        self.validator().is_valid(instance)
    }

    /// The active keyword with this exact name, if any.
    pub fn keyword_by_name(&self, name: &str) -> Option<Keyword> {
        match self {
            Schema::Object(object) => object.keywords.by_name(name).cloned(),
            Schema::Boolean(_) => None,
        }
    }

    pub fn value_type(&self) -> InstanceType {
        match self {
            Schema::Boolean(_) => InstanceType::Boolean,
            Schema::Object(_) => InstanceType::Object,
        }
    }

    /// Renders the schema back into the key/value shape it was parsed from.
    pub fn to_value(&self) -> Value {
        match self {
            Schema::Boolean(accept) => Value::Bool(*accept),
            Schema::Object(object) => Value::Object(object.raw.clone()),
        }
    }

    /// The schema stored directly under `name`, owned by this schema.
    pub fn sub_schema(&self, name: &str) -> Result<Option<SubSchema>, SchemaError> {
        let Schema::Object(object) = self else {
            return Ok(None);
        };
        if !object.raw.contains_key(name) {
            return Ok(None);
        }
        let schema = Schema::compile_at(&object.doc, &append_token(&object.location, name))?;
        Ok(Some(SubSchema::new(schema, self.clone())))
    }

    /// The schemas in the array under `name`, for array-valued keywords
    /// such as `prefixItems`.
    pub fn sub_schemas(&self, name: &str) -> Result<Option<Vec<SubSchema>>, SchemaError> {
        let Schema::Object(object) = self else {
            return Ok(None);
        };
        let Some(Value::Array(items)) = object.raw.get(name) else {
            return Ok(None);
        };
        let base = append_token(&object.location, name);
        let mut sub_schemas = Vec::with_capacity(items.len());
        for index in 0..items.len() {
            let schema = Schema::compile_at(&object.doc, &append_token(&base, &index.to_string()))?;
            sub_schemas.push(SubSchema::new(schema, self.clone()));
        }
        Ok(Some(sub_schemas))
    }

    /// The schema a JSON Pointer relative to this schema addresses.
    pub fn sub_schema_at(&self, pointer: &str) -> Result<Option<SubSchema>, SchemaError> {
        let Schema::Object(object) = self else {
            return Ok(None);
        };
        let absolute = format!("{}{}", object.location, pointer);
        if object.doc.value_at(&absolute).is_none() {
            return Ok(None);
        }
        let schema = Schema::compile_at(&object.doc, &absolute)?;
        Ok(Some(SubSchema::new(schema, self.clone())))
    }

    pub(crate) fn evaluate(
        &self,
        instance: &Value,
        location: &[String],
        scope: &mut Scope,
    ) -> Vec<ValidationFailure> {
        match self {
            Schema::Boolean(true) => Vec::new(),
            Schema::Boolean(false) => vec![ValidationFailure::new(
                "false",
                location,
                "the `false` schema rejects every instance",
            )],
            Schema::Object(object) => object.evaluate(instance, location, scope),
        }
    }
}

impl ObjectSchema {
    /// Runs every active assertion and applicator; failures accumulate, the
    /// evaluation never stops at the first one.
    fn evaluate(
        &self,
        instance: &Value,
        location: &[String],
        scope: &mut Scope,
    ) -> Vec<ValidationFailure> {
        let mut failures = Vec::new();
        for keyword in self.keywords.iter() {
            if keyword.supports(KeywordCategory::Assertion)
                && !keyword.as_assertion().is_valid_for(instance)
            {
                failures.push(ValidationFailure::new(
                    keyword.name(),
                    location,
                    format!("instance is not valid against `{}`", keyword.name()),
                ));
            }
            if keyword.supports(KeywordCategory::Applicator) {
                failures.extend(keyword.as_applicator().apply(instance, location, scope));
            }
        }
        failures
    }

    pub(crate) fn doc(&self) -> &Arc<DocumentCtx> {
        &self.doc
    }

    /// JSON Pointer of this schema within its document.
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn keywords(&self) -> &Keywords {
        &self.keywords
    }
}

/// A schema embedded within, and owned by, another schema.
///
/// The owner handle is a read-only back-reference and stays the same
/// instance for the sub-schema's lifetime.
#[derive(Debug, Clone)]
pub struct SubSchema {
    schema: Schema,
    owner: Schema,
}

impl SubSchema {
    pub(crate) fn new(schema: Schema, owner: Schema) -> Self {
        Self { schema, owner }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn owner(&self) -> &Schema {
        &self.owner
    }

    pub fn validator(&self) -> Validator {
        self.schema.validator()
    }

    /// Descends further; the returned sub-schema keeps the same root owner.
    pub fn sub_schema(&self, name: &str) -> Result<Option<SubSchema>, SchemaError> {
        Ok(self
            .schema
            .sub_schema(name)?
            .map(|inner| SubSchema::new(inner.schema, self.owner.clone())))
    }

    pub fn sub_schemas(&self, name: &str) -> Result<Option<Vec<SubSchema>>, SchemaError> {
        Ok(self.schema.sub_schemas(name)?.map(|inner| {
            inner
                .into_iter()
                .map(|sub| SubSchema::new(sub.schema, self.owner.clone()))
                .collect()
        }))
    }

    pub fn sub_schema_at(&self, pointer: &str) -> Result<Option<SubSchema>, SchemaError> {
        Ok(self
            .schema
            .sub_schema_at(pointer)?
            .map(|inner| SubSchema::new(inner.schema, self.owner.clone())))
    }
}

/// Builder for schemas: carries the vocabulary registry and the external
/// schema resolver.
#[derive(Clone, Default)]
pub struct SchemaBuilder {
    registry: VocabularyRegistry,
    resolver: Option<Arc<dyn SchemaResolver>>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(mut self, registry: VocabularyRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn resolver(mut self, resolver: Arc<dyn SchemaResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Loads a schema document. Configuration problems abort construction;
    /// there is no partially-usable schema.
    pub fn build(&self, raw: Value) -> Result<Schema, SchemaError> {
        let doc = DocumentCtx::new(raw, self.registry.clone(), self.resolver.clone())?;
        Schema::compile_at(&doc, "")
    }
}

/// Loads a schema document with the default registry and no external
/// resolver.
pub fn compile(raw: Value) -> Result<Schema, SchemaError> {
    SchemaBuilder::new().build(raw)
}
