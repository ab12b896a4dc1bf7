//! JSON Schema (2020-12) structural validation engine.
//!
//! Schema documents compile into immutable, shareable [`Schema`] values:
//! `$vocabulary` selects the active vocabularies, the vocabulary tables turn
//! the schema object's properties into typed keywords, and keywords with a
//! fixed affects relationship (such as `properties` feeding
//! `additionalProperties`) are wired to their annotation producers at load
//! time. Validation runs every active keyword, accumulates failures and
//! resolves `$ref`/`$dynamicRef` against the dynamic scope.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//!
//! let schema = json_schema_core::compile(json!({
//!     "type": "object",
//!     "properties": {"name": {"type": "string"}},
//!     "additionalProperties": false
//! }))
//! .unwrap();
//!
//! let validator = schema.validator();
//! assert!(validator.is_valid(&json!({"name": "a"})));
//! assert!(!validator.is_valid(&json!({"name": "a", "extra": 1})));
//! ```

pub mod equal;
pub mod error;
pub mod instance_type;
pub mod keyword;
pub mod keyword_set;
mod keywords;
pub mod schema;
pub mod uri;
pub mod validator;
pub mod vocabulary;

pub use error::{SchemaError, ValidationFailure};
pub use instance_type::InstanceType;
pub use keyword::{
    Annotation, Applicator, Assertion, Identifier, Keyword, KeywordBehavior, KeywordCategory,
    KeywordCtx, KeywordType,
};
pub use keyword_set::Keywords;
pub use schema::{compile, ObjectSchema, Schema, SchemaBuilder, SchemaResolver, SubSchema};
pub use validator::{Scope, Validator};
pub use vocabulary::{
    LazyVocabularies, Vocabulary, VocabularyDefinition, VocabularyRegistry,
};
