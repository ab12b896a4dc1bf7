//! Keyword category contracts and the keyword/keyword-type model.
//!
//! A keyword holds one or more capabilities: assertion (pure boolean
//! predicate), applicator (applies a sub-schema to the instance or parts of
//! it), annotation (side value consumed by sibling keywords or tooling) and
//! identifier (names a schema or establishes a base). Capabilities are
//! implemented a la carte per keyword; callers probe with
//! [`Keyword::supports`] and take the capability view with the `as_*`
//! accessors, which fail loudly when the category is absent.

use crate::error::{SchemaError, ValidationFailure};
use crate::schema::{DocumentCtx, Schema};
use crate::validator::Scope;
use json_schema_pointer::append_token;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// The semantic roles a keyword can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordCategory {
    Applicator,
    Annotation,
    Assertion,
    Identifier,
}

/// A pure boolean constraint on the instance itself.
pub trait Assertion: fmt::Debug {
    fn is_valid_for(&self, instance: &Value) -> bool;
}

/// Applies an embedded sub-schema to the instance or to derived parts of it.
pub trait Applicator: fmt::Debug {
    /// Collects failures for the instance at `location` within the current
    /// dynamic `scope`. An applicator whose domain does not match the
    /// instance shape passes vacuously.
    fn apply(
        &self,
        instance: &Value,
        location: &[String],
        scope: &mut Scope,
    ) -> Vec<ValidationFailure>;

    /// Fast path: does the instance pass, without failure detail.
    fn apply_to(&self, instance: &Value) -> bool {
        self.apply(instance, &[], &mut Scope::new()).is_empty()
    }
}

/// Computes a side value for a specific instance.
///
/// Annotation values are a pure function of (keyword, instance) and are
/// never cached across instances.
pub trait Annotation: fmt::Debug {
    fn value_for(&self, instance: &Value) -> Value;
}

/// Names a schema resource or establishes a resolution base.
pub trait Identifier: fmt::Debug {
    fn uri(&self) -> &str;
}

/// The behavior behind a [`Keyword`]: its categories, capability views and
/// serialization hook.
pub trait KeywordBehavior: Send + Sync + fmt::Debug {
    fn categories(&self) -> &'static [KeywordCategory];

    /// The keyword value as it was parsed, for round-tripping.
    fn to_value(&self) -> Value;

    fn find_assertion(&self) -> Option<&dyn Assertion> {
        None
    }

    fn find_applicator(&self) -> Option<&dyn Applicator> {
        None
    }

    fn find_annotation(&self) -> Option<&dyn Annotation> {
        None
    }

    fn find_identifier(&self) -> Option<&dyn Identifier> {
        None
    }
}

/// An active keyword of one schema object. Immutable once constructed;
/// handles are cheap to clone and share.
#[derive(Debug, Clone)]
pub struct Keyword {
    name: &'static str,
    behavior: Arc<dyn KeywordBehavior>,
}

impl Keyword {
    pub fn new(name: &'static str, behavior: impl KeywordBehavior + 'static) -> Self {
        Self {
            name,
            behavior: Arc::new(behavior),
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.name == name
    }

    pub fn categories(&self) -> &'static [KeywordCategory] {
        self.behavior.categories()
    }

    pub fn supports(&self, category: KeywordCategory) -> bool {
        self.categories().contains(&category)
    }

    /// The assertion view. Panics when the keyword does not declare the
    /// assertion category; that is a wiring bug in the engine, not a data
    /// error.
    pub fn as_assertion(&self) -> &dyn Assertion {
        self.behavior.find_assertion().unwrap_or_else(|| {
            panic!("keyword `{}` does not support the assertion capability", self.name)
        })
    }

    /// The applicator view. Panics when the category is absent.
    pub fn as_applicator(&self) -> &dyn Applicator {
        self.behavior.find_applicator().unwrap_or_else(|| {
            panic!("keyword `{}` does not support the applicator capability", self.name)
        })
    }

    /// The annotation view. Panics when the category is absent.
    pub fn as_annotation(&self) -> &dyn Annotation {
        self.behavior.find_annotation().unwrap_or_else(|| {
            panic!("keyword `{}` does not support the annotation capability", self.name)
        })
    }

    /// The identifier view. Panics when the category is absent.
    pub fn as_identifier(&self) -> &dyn Identifier {
        self.behavior.find_identifier().unwrap_or_else(|| {
            panic!("keyword `{}` does not support the identifier capability", self.name)
        })
    }

    /// The keyword value as parsed, for round-tripping schemas.
    pub fn to_value(&self) -> Value {
        self.behavior.to_value()
    }
}

/// The factory function behind a [`KeywordType`].
pub type KeywordFactory = fn(&KeywordCtx<'_>, &Value) -> Result<Keyword, SchemaError>;

/// A named, stateless keyword factory. Types are shared across schemas and
/// grouped into vocabularies.
#[derive(Debug, Clone, Copy)]
pub struct KeywordType {
    pub name: &'static str,
    pub create: KeywordFactory,
}

impl KeywordType {
    pub fn create_keyword(
        &self,
        ctx: &KeywordCtx<'_>,
        value: &Value,
    ) -> Result<Keyword, SchemaError> {
        (self.create)(ctx, value)
    }
}

/// Construction context handed to keyword factories: the owning document,
/// the location of the owning schema object, and, for keywords affected by
/// sibling annotations, the already-built producer handles.
pub struct KeywordCtx<'a> {
    doc: &'a Arc<DocumentCtx>,
    location: &'a str,
    producers: Vec<Keyword>,
}

impl<'a> KeywordCtx<'a> {
    pub(crate) fn new(doc: &'a Arc<DocumentCtx>, location: &'a str) -> Self {
        Self {
            doc,
            location,
            producers: Vec::new(),
        }
    }

    pub(crate) fn with_producers(
        doc: &'a Arc<DocumentCtx>,
        location: &'a str,
        producers: Vec<Keyword>,
    ) -> Self {
        Self {
            doc,
            location,
            producers,
        }
    }

    pub fn doc(&self) -> &Arc<DocumentCtx> {
        self.doc
    }

    /// JSON Pointer of the schema object owning the keyword under
    /// construction.
    pub fn location(&self) -> &str {
        self.location
    }

    /// Producer handles for annotation-affected keywords, in the order the
    /// affects table declares them. Empty for everything else.
    pub fn producers(&self) -> &[Keyword] {
        &self.producers
    }

    /// Compiles the schema stored directly under `keyword`.
    pub fn sub_schema(&self, keyword: &str) -> Result<Schema, SchemaError> {
        let pointer = append_token(self.location, keyword);
        Schema::compile_at(self.doc, &pointer)
    }

    /// Compiles the schema at `keyword`/`name`, for object-valued keywords
    /// such as `properties`.
    pub fn sub_schema_in(&self, keyword: &str, name: &str) -> Result<Schema, SchemaError> {
        let pointer = append_token(&append_token(self.location, keyword), name);
        Schema::compile_at(self.doc, &pointer)
    }

    /// Compiles every schema in the array under `keyword`, for array-valued
    /// keywords such as `prefixItems`.
    pub fn sub_schemas(&self, keyword: &str, len: usize) -> Result<Vec<Schema>, SchemaError> {
        let base = append_token(self.location, keyword);
        (0..len)
            .map(|i| Schema::compile_at(self.doc, &append_token(&base, &i.to_string())))
            .collect()
    }
}
