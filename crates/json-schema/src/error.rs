//! Error taxonomy: load-time configuration errors and validation failures.
//!
//! Configuration problems abort schema construction with [`SchemaError`];
//! there is no partially-usable schema. Validation problems are plain data
//! ([`ValidationFailure`]) accumulated by the validator and returned to the
//! caller.

use json_schema_pointer::format_pointer;
use thiserror::Error;

/// A fatal problem with the schema document itself, detected at load time.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("a schema must be a boolean or an object, found {kind} at `{pointer}`")]
    NotASchema { pointer: String, kind: &'static str },

    #[error("no schema value at `{pointer}`")]
    MissingSchema { pointer: String },

    #[error("keyword `{keyword}` expects {expected}")]
    InvalidKeywordValue {
        keyword: &'static str,
        expected: &'static str,
    },

    #[error("invalid regular expression `{pattern}` in `{keyword}`: {source}")]
    InvalidPattern {
        keyword: &'static str,
        pattern: String,
        source: regex::Error,
    },

    #[error("`$vocabulary` must be an object mapping vocabulary URIs to booleans")]
    MalformedVocabulary,

    #[error("vocabulary `{0}` is required but cannot be resolved")]
    UnknownVocabulary(String),

    #[error("vocabulary `{0}` is mandatory and cannot be disabled or omitted")]
    MandatoryVocabulary(String),

    #[error("`{keyword}` target `{reference}` cannot be resolved")]
    UnresolvedReference {
        keyword: &'static str,
        reference: String,
    },

    #[error("URI reference `{0}` cannot be resolved against the current base")]
    UnresolvableUri(String),

    #[error("duplicate anchor `{0}` in schema document")]
    DuplicateAnchor(String),
}

/// One validation failure: the failing keyword and where in the instance it
/// was detected, as a JSON Pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub keyword: String,
    pub instance_location: String,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(keyword: &str, location: &[String], message: impl Into<String>) -> Self {
        Self {
            keyword: keyword.to_string(),
            instance_location: format_pointer(location),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.keyword, self.message, self.instance_location)
    }
}
