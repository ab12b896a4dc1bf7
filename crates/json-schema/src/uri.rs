//! Thin helpers over `url::Url` for `$id` base resolution and reference
//! splitting.

use crate::error::SchemaError;
use url::Url;

/// Prefix of the official 2020-12 vocabulary URIs. These are never satisfied
/// by external lookup.
pub const OFFICIAL_VOCABULARY_PREFIX: &str = "https://json-schema.org/draft/2020-12/vocab/";

/// Whether a vocabulary URI claims to be an official 2020-12 vocabulary.
pub fn is_official_vocabulary(uri: &str) -> bool {
    uri.starts_with(OFFICIAL_VOCABULARY_PREFIX)
}

/// Splits a URI reference into its non-fragment part and its fragment.
pub fn split_fragment(reference: &str) -> (&str, Option<&str>) {
    match reference.find('#') {
        Some(idx) => (&reference[..idx], Some(&reference[idx + 1..])),
        None => (reference, None),
    }
}

/// Resolves a URI reference against an optional base.
///
/// Absolute references resolve on their own; relative references require a
/// base and fail with [`SchemaError::UnresolvableUri`] without one.
pub fn resolve(base: Option<&Url>, reference: &str) -> Result<Url, SchemaError> {
    match base {
        Some(base) => base
            .join(reference)
            .map_err(|_| SchemaError::UnresolvableUri(reference.to_string())),
        None => Url::parse(reference)
            .map_err(|_| SchemaError::UnresolvableUri(reference.to_string())),
    }
}

/// The URI without its fragment, as a string key for document lookup.
pub fn without_fragment(url: &Url) -> String {
    let mut stripped = url.clone();
    stripped.set_fragment(None);
    stripped.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fragment() {
        assert_eq!(split_fragment("#/$defs/a"), ("", Some("/$defs/a")));
        assert_eq!(split_fragment("#anchor"), ("", Some("anchor")));
        assert_eq!(
            split_fragment("https://example.com/s#frag"),
            ("https://example.com/s", Some("frag"))
        );
        assert_eq!(split_fragment("other.json"), ("other.json", None));
    }

    #[test]
    fn test_resolve_relative_against_base() {
        let base = Url::parse("https://example.com/schemas/root.json").unwrap();
        let resolved = resolve(Some(&base), "item.json").unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/schemas/item.json");
    }

    #[test]
    fn test_resolve_relative_without_base_fails() {
        assert!(resolve(None, "item.json").is_err());
        assert!(resolve(None, "https://example.com/s").is_ok());
    }

    #[test]
    fn test_without_fragment() {
        let url = Url::parse("https://example.com/s#/$defs/a").unwrap();
        assert_eq!(without_fragment(&url), "https://example.com/s");
    }

    #[test]
    fn test_official_vocabulary_prefix() {
        assert!(is_official_vocabulary(
            "https://json-schema.org/draft/2020-12/vocab/core"
        ));
        assert!(!is_official_vocabulary("https://example.com/vocab/custom"));
    }
}
