//! Applicator keywords: each applies one or more sub-schemas to the
//! instance or to derived parts of it.
//!
//! `properties`, `patternProperties`, `prefixItems`, `contains` and `if`
//! double as annotation producers; `additionalProperties`, `items`, `then`
//! and `else` consume those annotations through producer handles wired at
//! schema-load time. Annotation values follow a three-valued convention:
//! the boolean `true` means "covers everything", a concrete array or number
//! means partial coverage, and an absent producer means nothing is covered.

use crate::error::{SchemaError, ValidationFailure};
use crate::keyword::{
    Annotation, Applicator, Keyword, KeywordBehavior, KeywordCategory, KeywordCtx,
};
use crate::schema::Schema;
use crate::validator::Scope;
use indexmap::IndexMap;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashSet;

const APPLICATOR: &[KeywordCategory] = &[KeywordCategory::Applicator];
const APPLICATOR_ANNOTATION: &[KeywordCategory] =
    &[KeywordCategory::Applicator, KeywordCategory::Annotation];

fn invalid(keyword: &'static str, expected: &'static str) -> SchemaError {
    SchemaError::InvalidKeywordValue { keyword, expected }
}

fn child_location(location: &[String], token: impl AsRef<str>) -> Vec<String> {
    let mut child = location.to_vec();
    child.push(token.as_ref().to_string());
    child
}

// ----------------------------------------------------------------- properties

#[derive(Debug)]
struct PropertiesKeyword {
    schemas: IndexMap<String, Schema>,
    raw: Value,
}

impl KeywordBehavior for PropertiesKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        APPLICATOR_ANNOTATION
    }

    fn to_value(&self) -> Value {
        self.raw.clone()
    }

    fn find_applicator(&self) -> Option<&dyn Applicator> {
        Some(self)
    }

    fn find_annotation(&self) -> Option<&dyn Annotation> {
        Some(self)
    }
}

impl Applicator for PropertiesKeyword {
    fn apply(
        &self,
        instance: &Value,
        location: &[String],
        scope: &mut Scope,
    ) -> Vec<ValidationFailure> {
        let obj = match instance.as_object() {
            Some(obj) => obj,
            None => return Vec::new(),
        };
        let mut failures = Vec::new();
        for (name, schema) in &self.schemas {
            if let Some(value) = obj.get(name) {
                failures.extend(schema.evaluate(value, &child_location(location, name), scope));
            }
        }
        failures
    }
}

impl Annotation for PropertiesKeyword {
    /// The property names this keyword matched on the instance.
    fn value_for(&self, instance: &Value) -> Value {
        let obj = match instance.as_object() {
            Some(obj) => obj,
            None => return Value::Bool(true),
        };
        Value::Array(
            obj.keys()
                .filter(|name| self.schemas.contains_key(*name))
                .map(|name| Value::String(name.clone()))
                .collect(),
        )
    }
}

pub(crate) fn create_properties(
    ctx: &KeywordCtx<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    let map = value
        .as_object()
        .ok_or_else(|| invalid("properties", "an object of schemas"))?;
    let mut schemas = IndexMap::with_capacity(map.len());
    for name in map.keys() {
        schemas.insert(name.clone(), ctx.sub_schema_in("properties", name)?);
    }
    Ok(Keyword::new(
        "properties",
        PropertiesKeyword {
            schemas,
            raw: value.clone(),
        },
    ))
}

// ----------------------------------------------------------------- patternProperties

#[derive(Debug)]
struct PatternPropertiesKeyword {
    patterns: Vec<(Regex, Schema)>,
    raw: Value,
}

impl PatternPropertiesKeyword {
    fn matching_schemas<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Schema> {
        self.patterns
            .iter()
            .filter(move |(regex, _)| regex.is_match(name))
            .map(|(_, schema)| schema)
    }
}

impl KeywordBehavior for PatternPropertiesKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        APPLICATOR_ANNOTATION
    }

    fn to_value(&self) -> Value {
        self.raw.clone()
    }

    fn find_applicator(&self) -> Option<&dyn Applicator> {
        Some(self)
    }

    fn find_annotation(&self) -> Option<&dyn Annotation> {
        Some(self)
    }
}

impl Applicator for PatternPropertiesKeyword {
    fn apply(
        &self,
        instance: &Value,
        location: &[String],
        scope: &mut Scope,
    ) -> Vec<ValidationFailure> {
        let obj = match instance.as_object() {
            Some(obj) => obj,
            None => return Vec::new(),
        };
        let mut failures = Vec::new();
        for (name, value) in obj {
            for schema in self.matching_schemas(name) {
                failures.extend(schema.evaluate(value, &child_location(location, name), scope));
            }
        }
        failures
    }
}

impl Annotation for PatternPropertiesKeyword {
    fn value_for(&self, instance: &Value) -> Value {
        let obj = match instance.as_object() {
            Some(obj) => obj,
            None => return Value::Bool(true),
        };
        Value::Array(
            obj.keys()
                .filter(|name| self.matching_schemas(name).next().is_some())
                .map(|name| Value::String(name.clone()))
                .collect(),
        )
    }
}

pub(crate) fn create_pattern_properties(
    ctx: &KeywordCtx<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    let map = value
        .as_object()
        .ok_or_else(|| invalid("patternProperties", "an object of schemas keyed by patterns"))?;
    let mut patterns = Vec::with_capacity(map.len());
    for pattern in map.keys() {
        let regex = Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
            keyword: "patternProperties",
            pattern: pattern.clone(),
            source,
        })?;
        patterns.push((regex, ctx.sub_schema_in("patternProperties", pattern)?));
    }
    Ok(Keyword::new(
        "patternProperties",
        PatternPropertiesKeyword {
            patterns,
            raw: value.clone(),
        },
    ))
}

// ----------------------------------------------------------------- additionalProperties

#[derive(Debug)]
struct AdditionalPropertiesKeyword {
    schema: Schema,
    producers: Vec<Keyword>,
    raw: Value,
}

impl AdditionalPropertiesKeyword {
    /// Union of the property names the producers matched. `None` means a
    /// producer reported the `true` sentinel: everything is covered.
    fn covered_names(&self, instance: &Value) -> Option<HashSet<String>> {
        let mut covered = HashSet::new();
        for producer in &self.producers {
            match producer.as_annotation().value_for(instance) {
                Value::Bool(true) => return None,
                Value::Array(names) => {
                    covered.extend(names.iter().filter_map(|n| n.as_str().map(str::to_string)));
                }
                _ => {}
            }
        }
        Some(covered)
    }

    fn additional<'a>(&self, obj: &'a Map<String, Value>, instance: &Value) -> Vec<&'a String> {
        match self.covered_names(instance) {
            None => Vec::new(),
            Some(covered) => obj.keys().filter(|name| !covered.contains(*name)).collect(),
        }
    }
}

impl KeywordBehavior for AdditionalPropertiesKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        APPLICATOR_ANNOTATION
    }

    fn to_value(&self) -> Value {
        self.raw.clone()
    }

    fn find_applicator(&self) -> Option<&dyn Applicator> {
        Some(self)
    }

    fn find_annotation(&self) -> Option<&dyn Annotation> {
        Some(self)
    }
}

impl Applicator for AdditionalPropertiesKeyword {
    fn apply(
        &self,
        instance: &Value,
        location: &[String],
        scope: &mut Scope,
    ) -> Vec<ValidationFailure> {
        let obj = match instance.as_object() {
            Some(obj) => obj,
            None => return Vec::new(),
        };
        let mut failures = Vec::new();
        for name in self.additional(obj, instance) {
            let value = &obj[name.as_str()];
            failures.extend(
                self.schema
                    .evaluate(value, &child_location(location, name), scope),
            );
        }
        failures
    }
}

impl Annotation for AdditionalPropertiesKeyword {
    /// The property names this keyword itself applied to.
    fn value_for(&self, instance: &Value) -> Value {
        let obj = match instance.as_object() {
            Some(obj) => obj,
            None => return Value::Bool(true),
        };
        Value::Array(
            self.additional(obj, instance)
                .into_iter()
                .map(|name| Value::String(name.clone()))
                .collect(),
        )
    }
}

pub(crate) fn create_additional_properties(
    ctx: &KeywordCtx<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::new(
        "additionalProperties",
        AdditionalPropertiesKeyword {
            schema: ctx.sub_schema("additionalProperties")?,
            producers: ctx.producers().to_vec(),
            raw: value.clone(),
        },
    ))
}

// ----------------------------------------------------------------- propertyNames

#[derive(Debug)]
struct PropertyNamesKeyword {
    schema: Schema,
}

impl KeywordBehavior for PropertyNamesKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        APPLICATOR
    }

    fn to_value(&self) -> Value {
        self.schema.to_value()
    }

    fn find_applicator(&self) -> Option<&dyn Applicator> {
        Some(self)
    }
}

impl Applicator for PropertyNamesKeyword {
    fn apply(
        &self,
        instance: &Value,
        location: &[String],
        scope: &mut Scope,
    ) -> Vec<ValidationFailure> {
        let obj = match instance.as_object() {
            Some(obj) => obj,
            None => return Vec::new(),
        };
        let mut failures = Vec::new();
        for name in obj.keys() {
            // The property name itself is the instance here
            let name_instance = Value::String(name.clone());
            failures.extend(
                self.schema
                    .evaluate(&name_instance, &child_location(location, name), scope),
            );
        }
        failures
    }
}

pub(crate) fn create_property_names(
    ctx: &KeywordCtx<'_>,
    _value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::new(
        "propertyNames",
        PropertyNamesKeyword {
            schema: ctx.sub_schema("propertyNames")?,
        },
    ))
}

// ----------------------------------------------------------------- dependentSchemas

#[derive(Debug)]
struct DependentSchemasKeyword {
    schemas: IndexMap<String, Schema>,
    raw: Value,
}

impl KeywordBehavior for DependentSchemasKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        APPLICATOR
    }

    fn to_value(&self) -> Value {
        self.raw.clone()
    }

    fn find_applicator(&self) -> Option<&dyn Applicator> {
        Some(self)
    }
}

impl Applicator for DependentSchemasKeyword {
    fn apply(
        &self,
        instance: &Value,
        location: &[String],
        scope: &mut Scope,
    ) -> Vec<ValidationFailure> {
        let obj = match instance.as_object() {
            Some(obj) => obj,
            None => return Vec::new(),
        };
        let mut failures = Vec::new();
        for (trigger, schema) in &self.schemas {
            if obj.contains_key(trigger) {
                failures.extend(schema.evaluate(instance, location, scope));
            }
        }
        failures
    }
}

pub(crate) fn create_dependent_schemas(
    ctx: &KeywordCtx<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    let map = value
        .as_object()
        .ok_or_else(|| invalid("dependentSchemas", "an object of schemas"))?;
    let mut schemas = IndexMap::with_capacity(map.len());
    for name in map.keys() {
        schemas.insert(name.clone(), ctx.sub_schema_in("dependentSchemas", name)?);
    }
    Ok(Keyword::new(
        "dependentSchemas",
        DependentSchemasKeyword {
            schemas,
            raw: value.clone(),
        },
    ))
}

// ----------------------------------------------------------------- prefixItems

#[derive(Debug)]
struct PrefixItemsKeyword {
    schemas: Vec<Schema>,
    raw: Value,
}

impl KeywordBehavior for PrefixItemsKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        APPLICATOR_ANNOTATION
    }

    fn to_value(&self) -> Value {
        self.raw.clone()
    }

    fn find_applicator(&self) -> Option<&dyn Applicator> {
        Some(self)
    }

    fn find_annotation(&self) -> Option<&dyn Annotation> {
        Some(self)
    }
}

impl Applicator for PrefixItemsKeyword {
    fn apply(
        &self,
        instance: &Value,
        location: &[String],
        scope: &mut Scope,
    ) -> Vec<ValidationFailure> {
        let arr = match instance.as_array() {
            Some(arr) => arr,
            None => return Vec::new(),
        };
        let mut failures = Vec::new();
        for (index, (element, schema)) in arr.iter().zip(&self.schemas).enumerate() {
            failures.extend(schema.evaluate(
                element,
                &child_location(location, index.to_string()),
                scope,
            ));
        }
        failures
    }
}

impl Annotation for PrefixItemsKeyword {
    /// The highest array index this keyword covered, or `true` when the
    /// prefix covers the entire array.
    fn value_for(&self, instance: &Value) -> Value {
        let arr = match instance.as_array() {
            Some(arr) => arr,
            None => return Value::Bool(true),
        };
        if self.schemas.len() >= arr.len() {
            Value::Bool(true)
        } else {
            Value::Number(((self.schemas.len() - 1) as u64).into())
        }
    }
}

pub(crate) fn create_prefix_items(
    ctx: &KeywordCtx<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    let expected = "a non-empty array of schemas";
    let items = value
        .as_array()
        .ok_or_else(|| invalid("prefixItems", expected))?;
    if items.is_empty() {
        return Err(invalid("prefixItems", expected));
    }
    Ok(Keyword::new(
        "prefixItems",
        PrefixItemsKeyword {
            schemas: ctx.sub_schemas("prefixItems", items.len())?,
            raw: value.clone(),
        },
    ))
}

// ----------------------------------------------------------------- items

#[derive(Debug)]
struct ItemsKeyword {
    schema: Schema,
    producers: Vec<Keyword>,
    raw: Value,
}

impl ItemsKeyword {
    /// First array index this keyword checks: one past the highest index the
    /// producers covered.
    fn start_index(&self, instance: &Value, len: usize) -> usize {
        self.producers
            .iter()
            .map(|producer| match producer.as_annotation().value_for(instance) {
                Value::Bool(true) => len,
                Value::Number(covered) => covered.as_u64().map_or(0, |c| c as usize + 1),
                _ => 0,
            })
            .max()
            .unwrap_or(0)
    }
}

impl KeywordBehavior for ItemsKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        APPLICATOR_ANNOTATION
    }

    fn to_value(&self) -> Value {
        self.raw.clone()
    }

    fn find_applicator(&self) -> Option<&dyn Applicator> {
        Some(self)
    }

    fn find_annotation(&self) -> Option<&dyn Annotation> {
        Some(self)
    }
}

impl Applicator for ItemsKeyword {
    fn apply(
        &self,
        instance: &Value,
        location: &[String],
        scope: &mut Scope,
    ) -> Vec<ValidationFailure> {
        let arr = match instance.as_array() {
            Some(arr) => arr,
            None => return Vec::new(),
        };
        let start = self.start_index(instance, arr.len()).min(arr.len());
        let mut failures = Vec::new();
        for (index, element) in arr.iter().enumerate().skip(start) {
            failures.extend(schema_at_index(&self.schema, element, location, index, scope));
        }
        failures
    }
}

impl Annotation for ItemsKeyword {
    fn value_for(&self, _instance: &Value) -> Value {
        // `items` covers every element past the prefix
        Value::Bool(true)
    }
}

fn schema_at_index(
    schema: &Schema,
    element: &Value,
    location: &[String],
    index: usize,
    scope: &mut Scope,
) -> Vec<ValidationFailure> {
    schema.evaluate(element, &child_location(location, index.to_string()), scope)
}

pub(crate) fn create_items(ctx: &KeywordCtx<'_>, value: &Value) -> Result<Keyword, SchemaError> {
    Ok(Keyword::new(
        "items",
        ItemsKeyword {
            schema: ctx.sub_schema("items")?,
            producers: ctx.producers().to_vec(),
            raw: value.clone(),
        },
    ))
}

// ----------------------------------------------------------------- contains

#[derive(Debug)]
struct ContainsKeyword {
    schema: Schema,
}

impl KeywordBehavior for ContainsKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        APPLICATOR_ANNOTATION
    }

    fn to_value(&self) -> Value {
        self.schema.to_value()
    }

    fn find_applicator(&self) -> Option<&dyn Applicator> {
        Some(self)
    }

    fn find_annotation(&self) -> Option<&dyn Annotation> {
        Some(self)
    }
}

impl Applicator for ContainsKeyword {
    fn apply(
        &self,
        instance: &Value,
        location: &[String],
        scope: &mut Scope,
    ) -> Vec<ValidationFailure> {
        let arr = match instance.as_array() {
            Some(arr) => arr,
            None => return Vec::new(),
        };
        let mut matched = 0usize;
        for (index, element) in arr.iter().enumerate() {
            if self
                .schema
                .evaluate(element, &child_location(location, index.to_string()), scope)
                .is_empty()
            {
                matched += 1;
            }
        }
        if matched == 0 {
            return vec![ValidationFailure::new(
                "contains",
                location,
                "no array element matches the `contains` schema",
            )];
        }
        Vec::new()
    }
}

impl Annotation for ContainsKeyword {
    /// The indices of matching elements, or `true` when every element
    /// matches.
    fn value_for(&self, instance: &Value) -> Value {
        let arr = match instance.as_array() {
            Some(arr) => arr,
            None => return Value::Bool(true),
        };
        let hits: Vec<usize> = arr
            .iter()
            .enumerate()
            .filter(|(_, element)| self.schema.apply_to(element))
            .map(|(index, _)| index)
            .collect();
        if !arr.is_empty() && hits.len() == arr.len() {
            Value::Bool(true)
        } else {
            Value::Array(
                hits.into_iter()
                    .map(|index| Value::Number((index as u64).into()))
                    .collect(),
            )
        }
    }
}

pub(crate) fn create_contains(
    ctx: &KeywordCtx<'_>,
    _value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::new(
        "contains",
        ContainsKeyword {
            schema: ctx.sub_schema("contains")?,
        },
    ))
}

// ----------------------------------------------------------------- allOf / anyOf / oneOf / not

fn expect_schema_array(
    keyword: &'static str,
    value: &Value,
) -> Result<usize, SchemaError> {
    let expected = "a non-empty array of schemas";
    let items = value.as_array().ok_or_else(|| invalid(keyword, expected))?;
    if items.is_empty() {
        return Err(invalid(keyword, expected));
    }
    Ok(items.len())
}

#[derive(Debug)]
struct AllOfKeyword {
    schemas: Vec<Schema>,
    raw: Value,
}

impl KeywordBehavior for AllOfKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        APPLICATOR
    }

    fn to_value(&self) -> Value {
        self.raw.clone()
    }

    fn find_applicator(&self) -> Option<&dyn Applicator> {
        Some(self)
    }
}

impl Applicator for AllOfKeyword {
    fn apply(
        &self,
        instance: &Value,
        location: &[String],
        scope: &mut Scope,
    ) -> Vec<ValidationFailure> {
        let mut failures = Vec::new();
        for schema in &self.schemas {
            failures.extend(schema.evaluate(instance, location, scope));
        }
        failures
    }
}

pub(crate) fn create_all_of(ctx: &KeywordCtx<'_>, value: &Value) -> Result<Keyword, SchemaError> {
    let len = expect_schema_array("allOf", value)?;
    Ok(Keyword::new(
        "allOf",
        AllOfKeyword {
            schemas: ctx.sub_schemas("allOf", len)?,
            raw: value.clone(),
        },
    ))
}

#[derive(Debug)]
struct AnyOfKeyword {
    schemas: Vec<Schema>,
    raw: Value,
}

impl KeywordBehavior for AnyOfKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        APPLICATOR
    }

    fn to_value(&self) -> Value {
        self.raw.clone()
    }

    fn find_applicator(&self) -> Option<&dyn Applicator> {
        Some(self)
    }
}

impl Applicator for AnyOfKeyword {
    fn apply(
        &self,
        instance: &Value,
        location: &[String],
        scope: &mut Scope,
    ) -> Vec<ValidationFailure> {
        let mut any = false;
        for schema in &self.schemas {
            if schema.evaluate(instance, location, scope).is_empty() {
                any = true;
            }
        }
        if any {
            Vec::new()
        } else {
            vec![ValidationFailure::new(
                "anyOf",
                location,
                "instance matches none of the `anyOf` schemas",
            )]
        }
    }
}

pub(crate) fn create_any_of(ctx: &KeywordCtx<'_>, value: &Value) -> Result<Keyword, SchemaError> {
    let len = expect_schema_array("anyOf", value)?;
    Ok(Keyword::new(
        "anyOf",
        AnyOfKeyword {
            schemas: ctx.sub_schemas("anyOf", len)?,
            raw: value.clone(),
        },
    ))
}

#[derive(Debug)]
struct OneOfKeyword {
    schemas: Vec<Schema>,
    raw: Value,
}

impl KeywordBehavior for OneOfKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        APPLICATOR
    }

    fn to_value(&self) -> Value {
        self.raw.clone()
    }

    fn find_applicator(&self) -> Option<&dyn Applicator> {
        Some(self)
    }
}

impl Applicator for OneOfKeyword {
    fn apply(
        &self,
        instance: &Value,
        location: &[String],
        scope: &mut Scope,
    ) -> Vec<ValidationFailure> {
        let matches = self
            .schemas
            .iter()
            .filter(|schema| schema.evaluate(instance, location, scope).is_empty())
            .count();
        if matches == 1 {
            Vec::new()
        } else {
            vec![ValidationFailure::new(
                "oneOf",
                location,
                format!("instance matches {matches} of the `oneOf` schemas, expected exactly one"),
            )]
        }
    }
}

pub(crate) fn create_one_of(ctx: &KeywordCtx<'_>, value: &Value) -> Result<Keyword, SchemaError> {
    let len = expect_schema_array("oneOf", value)?;
    Ok(Keyword::new(
        "oneOf",
        OneOfKeyword {
            schemas: ctx.sub_schemas("oneOf", len)?,
            raw: value.clone(),
        },
    ))
}

#[derive(Debug)]
struct NotKeyword {
    schema: Schema,
}

impl KeywordBehavior for NotKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        APPLICATOR
    }

    fn to_value(&self) -> Value {
        self.schema.to_value()
    }

    fn find_applicator(&self) -> Option<&dyn Applicator> {
        Some(self)
    }
}

impl Applicator for NotKeyword {
    fn apply(
        &self,
        instance: &Value,
        location: &[String],
        scope: &mut Scope,
    ) -> Vec<ValidationFailure> {
        if self.schema.evaluate(instance, location, scope).is_empty() {
            vec![ValidationFailure::new(
                "not",
                location,
                "instance must not match the `not` schema",
            )]
        } else {
            Vec::new()
        }
    }
}

pub(crate) fn create_not(ctx: &KeywordCtx<'_>, _value: &Value) -> Result<Keyword, SchemaError> {
    Ok(Keyword::new(
        "not",
        NotKeyword {
            schema: ctx.sub_schema("not")?,
        },
    ))
}

// ----------------------------------------------------------------- if / then / else

#[derive(Debug)]
struct IfKeyword {
    schema: Schema,
}

impl KeywordBehavior for IfKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        APPLICATOR_ANNOTATION
    }

    fn to_value(&self) -> Value {
        self.schema.to_value()
    }

    fn find_applicator(&self) -> Option<&dyn Applicator> {
        Some(self)
    }

    fn find_annotation(&self) -> Option<&dyn Annotation> {
        Some(self)
    }
}

impl Applicator for IfKeyword {
    /// The condition itself never fails the instance; its outcome reaches
    /// `then`/`else` through the annotation.
    fn apply(
        &self,
        _instance: &Value,
        _location: &[String],
        _scope: &mut Scope,
    ) -> Vec<ValidationFailure> {
        Vec::new()
    }
}

impl Annotation for IfKeyword {
    fn value_for(&self, instance: &Value) -> Value {
        Value::Bool(self.schema.apply_to(instance))
    }
}

pub(crate) fn create_if(ctx: &KeywordCtx<'_>, _value: &Value) -> Result<Keyword, SchemaError> {
    Ok(Keyword::new(
        "if",
        IfKeyword {
            schema: ctx.sub_schema("if")?,
        },
    ))
}

#[derive(Debug)]
struct ConditionalKeyword {
    schema: Schema,
    expect: bool,
    producers: Vec<Keyword>,
}

impl KeywordBehavior for ConditionalKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        APPLICATOR
    }

    fn to_value(&self) -> Value {
        self.schema.to_value()
    }

    fn find_applicator(&self) -> Option<&dyn Applicator> {
        Some(self)
    }
}

impl Applicator for ConditionalKeyword {
    fn apply(
        &self,
        instance: &Value,
        location: &[String],
        scope: &mut Scope,
    ) -> Vec<ValidationFailure> {
        // Without an `if` sibling the branch is inert
        let producer = match self.producers.first() {
            Some(producer) => producer,
            None => return Vec::new(),
        };
        match producer.as_annotation().value_for(instance) {
            Value::Bool(outcome) if outcome == self.expect => {
                self.schema.evaluate(instance, location, scope)
            }
            _ => Vec::new(),
        }
    }
}

pub(crate) fn create_then(ctx: &KeywordCtx<'_>, _value: &Value) -> Result<Keyword, SchemaError> {
    Ok(Keyword::new(
        "then",
        ConditionalKeyword {
            schema: ctx.sub_schema("then")?,
            expect: true,
            producers: ctx.producers().to_vec(),
        },
    ))
}

pub(crate) fn create_else(ctx: &KeywordCtx<'_>, _value: &Value) -> Result<Keyword, SchemaError> {
    Ok(Keyword::new(
        "else",
        ConditionalKeyword {
            schema: ctx.sub_schema("else")?,
            expect: false,
            producers: ctx.producers().to_vec(),
        },
    ))
}
