//! Core vocabulary keywords: identifiers, `$defs`, and the two reference
//! applicators.
//!
//! `$ref` targets are resolved to a document and JSON Pointer at schema-load
//! time, so an absent target aborts construction; the target schema itself
//! is compiled on demand during validation. `$dynamicRef` keeps that
//! statically resolved target as its fallback and searches the dynamic
//! scope, outermost document first, for a matching `$dynamicAnchor`.

use crate::error::{SchemaError, ValidationFailure};
use crate::keyword::{
    Annotation, Applicator, Identifier, Keyword, KeywordBehavior, KeywordCategory, KeywordCtx,
};
use crate::schema::{DocumentCtx, Schema};
use crate::uri;
use crate::validator::Scope;
use serde_json::Value;
use std::sync::Arc;

const IDENTIFIER: &[KeywordCategory] = &[KeywordCategory::Identifier];
const ANNOTATION: &[KeywordCategory] = &[KeywordCategory::Annotation];
const APPLICATOR: &[KeywordCategory] = &[KeywordCategory::Applicator];

fn invalid(keyword: &'static str, expected: &'static str) -> SchemaError {
    SchemaError::InvalidKeywordValue { keyword, expected }
}

// ----------------------------------------------------------------- identifiers

#[derive(Debug)]
struct IdentifierKeyword {
    value: String,
}

impl KeywordBehavior for IdentifierKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        IDENTIFIER
    }

    fn to_value(&self) -> Value {
        Value::String(self.value.clone())
    }

    fn find_identifier(&self) -> Option<&dyn Identifier> {
        Some(self)
    }
}

impl Identifier for IdentifierKeyword {
    fn uri(&self) -> &str {
        &self.value
    }
}

fn identifier(keyword: &'static str, value: &Value) -> Result<Keyword, SchemaError> {
    let value = value
        .as_str()
        .ok_or_else(|| invalid(keyword, "a string"))?
        .to_string();
    Ok(Keyword::new(keyword, IdentifierKeyword { value }))
}

pub(crate) fn create_schema(_ctx: &KeywordCtx<'_>, value: &Value) -> Result<Keyword, SchemaError> {
    identifier("$schema", value)
}

pub(crate) fn create_id(_ctx: &KeywordCtx<'_>, value: &Value) -> Result<Keyword, SchemaError> {
    identifier("$id", value)
}

pub(crate) fn create_anchor(_ctx: &KeywordCtx<'_>, value: &Value) -> Result<Keyword, SchemaError> {
    identifier("$anchor", value)
}

pub(crate) fn create_dynamic_anchor(
    _ctx: &KeywordCtx<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    identifier("$dynamicAnchor", value)
}

// ----------------------------------------------------------------- annotations

#[derive(Debug)]
struct ValueAnnotationKeyword {
    value: Value,
}

impl KeywordBehavior for ValueAnnotationKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        ANNOTATION
    }

    fn to_value(&self) -> Value {
        self.value.clone()
    }

    fn find_annotation(&self) -> Option<&dyn Annotation> {
        Some(self)
    }
}

impl Annotation for ValueAnnotationKeyword {
    fn value_for(&self, _instance: &Value) -> Value {
        self.value.clone()
    }
}

pub(crate) fn create_comment(_ctx: &KeywordCtx<'_>, value: &Value) -> Result<Keyword, SchemaError> {
    if !value.is_string() {
        return Err(invalid("$comment", "a string"));
    }
    Ok(Keyword::new(
        "$comment",
        ValueAnnotationKeyword {
            value: value.clone(),
        },
    ))
}

pub(crate) fn create_vocabulary(
    _ctx: &KeywordCtx<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    // Shape check only; the document context decides the active set
    let map = value.as_object().ok_or(SchemaError::MalformedVocabulary)?;
    if map.values().any(|required| !required.is_boolean()) {
        return Err(SchemaError::MalformedVocabulary);
    }
    Ok(Keyword::new(
        "$vocabulary",
        ValueAnnotationKeyword {
            value: value.clone(),
        },
    ))
}

// ----------------------------------------------------------------- $defs

#[derive(Debug)]
struct DefsKeyword {
    raw: Value,
}

impl KeywordBehavior for DefsKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        ANNOTATION
    }

    fn to_value(&self) -> Value {
        self.raw.clone()
    }

    fn find_annotation(&self) -> Option<&dyn Annotation> {
        Some(self)
    }
}

impl Annotation for DefsKeyword {
    fn value_for(&self, _instance: &Value) -> Value {
        self.raw.clone()
    }
}

pub(crate) fn create_defs(ctx: &KeywordCtx<'_>, value: &Value) -> Result<Keyword, SchemaError> {
    let map = value
        .as_object()
        .ok_or_else(|| invalid("$defs", "an object of schemas"))?;
    // Compile every definition eagerly so malformed ones fail at load time
    for name in map.keys() {
        ctx.sub_schema_in("$defs", name)?;
    }
    Ok(Keyword::new("$defs", DefsKeyword { raw: value.clone() }))
}

// ----------------------------------------------------------------- references

/// A statically resolved reference target: a pointer into the owning
/// document or into an external one.
#[derive(Debug, Clone)]
pub(crate) enum RefTarget {
    Local(String),
    External(Arc<DocumentCtx>, String),
}

#[derive(Debug)]
struct RefKeyword {
    doc: Arc<DocumentCtx>,
    target: RefTarget,
    reference: String,
}

impl KeywordBehavior for RefKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        APPLICATOR
    }

    fn to_value(&self) -> Value {
        Value::String(self.reference.clone())
    }

    fn find_applicator(&self) -> Option<&dyn Applicator> {
        Some(self)
    }
}

impl Applicator for RefKeyword {
    fn apply(
        &self,
        instance: &Value,
        location: &[String],
        scope: &mut Scope,
    ) -> Vec<ValidationFailure> {
        if !scope.enter_reference() {
            return vec![recursion_failure("$ref", location)];
        }
        let failures = apply_target(&self.doc, &self.target, instance, location, scope, "$ref");
        scope.leave_reference();
        failures
    }
}

pub(crate) fn create_ref(ctx: &KeywordCtx<'_>, value: &Value) -> Result<Keyword, SchemaError> {
    let reference = value.as_str().ok_or_else(|| invalid("$ref", "a URI reference string"))?;
    let target = resolve_target(ctx.doc(), ctx.location(), reference, "$ref")?;
    Ok(Keyword::new(
        "$ref",
        RefKeyword {
            doc: ctx.doc().clone(),
            target,
            reference: reference.to_string(),
        },
    ))
}

#[derive(Debug)]
struct DynamicRefKeyword {
    doc: Arc<DocumentCtx>,
    anchor: Option<String>,
    fallback: RefTarget,
    reference: String,
}

impl KeywordBehavior for DynamicRefKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        APPLICATOR
    }

    fn to_value(&self) -> Value {
        Value::String(self.reference.clone())
    }

    fn find_applicator(&self) -> Option<&dyn Applicator> {
        Some(self)
    }
}

impl Applicator for DynamicRefKeyword {
    fn apply(
        &self,
        instance: &Value,
        location: &[String],
        scope: &mut Scope,
    ) -> Vec<ValidationFailure> {
        if !scope.enter_reference() {
            return vec![recursion_failure("$dynamicRef", location)];
        }
        let dynamic = self
            .anchor
            .as_deref()
            .and_then(|name| scope.find_dynamic_anchor(name));
        let failures = match dynamic {
            Some((doc, pointer)) => {
                let target = RefTarget::External(doc, pointer);
                apply_target(&self.doc, &target, instance, location, scope, "$dynamicRef")
            }
            None => apply_target(
                &self.doc,
                &self.fallback,
                instance,
                location,
                scope,
                "$dynamicRef",
            ),
        };
        scope.leave_reference();
        failures
    }
}

pub(crate) fn create_dynamic_ref(
    ctx: &KeywordCtx<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    let reference = value
        .as_str()
        .ok_or_else(|| invalid("$dynamicRef", "a URI reference string"))?;
    let (_, fragment) = uri::split_fragment(reference);
    let anchor = match fragment {
        Some(f) if !f.is_empty() && !f.starts_with('/') => Some(f.to_string()),
        _ => None,
    };
    let fallback = resolve_target(ctx.doc(), ctx.location(), reference, "$dynamicRef")?;
    Ok(Keyword::new(
        "$dynamicRef",
        DynamicRefKeyword {
            doc: ctx.doc().clone(),
            anchor,
            fallback,
            reference: reference.to_string(),
        },
    ))
}

fn recursion_failure(keyword: &str, location: &[String]) -> ValidationFailure {
    ValidationFailure::new(keyword, location, "reference recursion limit exceeded")
}

/// Compiles the target schema on demand and evaluates the instance against
/// it, entering the target document's dynamic scope when it differs from
/// the referencing one.
fn apply_target(
    owner: &Arc<DocumentCtx>,
    target: &RefTarget,
    instance: &Value,
    location: &[String],
    scope: &mut Scope,
    keyword: &str,
) -> Vec<ValidationFailure> {
    let (doc, pointer) = match target {
        RefTarget::Local(pointer) => (owner.clone(), pointer.as_str()),
        RefTarget::External(doc, pointer) => (doc.clone(), pointer.as_str()),
    };
    match Schema::compile_at(&doc, pointer) {
        Ok(schema) => {
            let foreign = !Arc::ptr_eq(owner, &doc);
            if foreign {
                scope.push_document(doc.clone());
            }
            let failures = schema.evaluate(instance, location, scope);
            if foreign {
                scope.pop_document();
            }
            failures
        }
        Err(err) => vec![ValidationFailure::new(
            keyword,
            location,
            format!("referenced schema is not usable: {err}"),
        )],
    }
}

/// Resolves a reference to a (document, pointer) target at load time.
///
/// Fragment-only references stay within the owning document: a pointer
/// fragment addresses the document tree, anything else is an anchor name.
/// Other references resolve against the `$id` base in scope at `location`;
/// when the resulting URI names this document or one of its embedded
/// resources the target stays local, otherwise the registered schema
/// resolver supplies the external document.
pub(crate) fn resolve_target(
    doc: &Arc<DocumentCtx>,
    location: &str,
    reference: &str,
    keyword: &'static str,
) -> Result<RefTarget, SchemaError> {
    let unresolved = || SchemaError::UnresolvedReference {
        keyword,
        reference: reference.to_string(),
    };
    let (head, fragment) = uri::split_fragment(reference);
    if head.is_empty() {
        let pointer = fragment_pointer(doc, "", fragment.unwrap_or("")).ok_or_else(unresolved)?;
        return Ok(RefTarget::Local(pointer));
    }

    let base = doc.base_for(location)?;
    let resolved = uri::resolve(base.as_ref(), reference)?;
    let document_uri = uri::without_fragment(&resolved);
    let fragment = resolved.fragment().unwrap_or("");

    if let Some(resource_root) = doc.resource_pointer(&document_uri) {
        let resource_root = resource_root.to_string();
        let pointer = fragment_pointer(doc, &resource_root, fragment).ok_or_else(unresolved)?;
        return Ok(RefTarget::Local(pointer));
    }

    let raw = doc.resolve_external(&document_uri).ok_or_else(unresolved)?;
    let external = DocumentCtx::for_external(raw, doc)?;
    let pointer = fragment_pointer(&external, "", fragment).ok_or_else(unresolved)?;
    Ok(RefTarget::External(external, pointer))
}

/// Turns a fragment into a checked pointer within `doc`, relative to the
/// root of the resource at `resource_root`.
fn fragment_pointer(doc: &Arc<DocumentCtx>, resource_root: &str, fragment: &str) -> Option<String> {
    if fragment.is_empty() {
        return doc.value_at(resource_root).map(|_| resource_root.to_string());
    }
    if fragment.starts_with('/') {
        let pointer = format!("{resource_root}{fragment}");
        return doc.value_at(&pointer).map(|_| pointer);
    }
    doc.anchor(fragment).map(str::to_string)
}
