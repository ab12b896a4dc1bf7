//! JSON Pointer (RFC 6901) utilities.
//!
//! Helper functions for [JSON Pointer (RFC 6901)](https://tools.ietf.org/html/rfc6901):
//! escaping of reference tokens, conversion between pointer strings and token
//! vectors, and value lookup in a JSON document.
//!
//! # Example
//!
//! ```
//! use json_schema_pointer::{parse_pointer, format_pointer, get};
//!
//! let path = parse_pointer("/foo/bar");
//! assert_eq!(path, vec!["foo".to_string(), "bar".to_string()]);
//! assert_eq!(format_pointer(&path), "/foo/bar");
//!
//! let doc = serde_json::json!({"foo": {"bar": 42}});
//! assert_eq!(get(&doc, &path), Some(&serde_json::json!(42)));
//! ```

use serde_json::Value;
use thiserror::Error;

/// Unescapes a JSON Pointer reference token.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// # Example
///
/// ```
/// use json_schema_pointer::unescape_token;
///
/// assert_eq!(unescape_token("a~0b"), "a~b");
/// assert_eq!(unescape_token("c~1d"), "c/d");
/// assert_eq!(unescape_token("plain"), "plain");
/// ```
pub fn unescape_token(token: &str) -> String {
    if !token.contains('~') {
        return token.to_string();
    }
    // Order matters: ~1 must be replaced before ~0
    token.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer reference token.
///
/// Per RFC 6901, `~` is replaced with `~0` and `/` is replaced with `~1`.
///
/// # Example
///
/// ```
/// use json_schema_pointer::escape_token;
///
/// assert_eq!(escape_token("a~b"), "a~0b");
/// assert_eq!(escape_token("c/d"), "c~1d");
/// assert_eq!(escape_token("plain"), "plain");
/// ```
pub fn escape_token(token: &str) -> String {
    if !token.contains('/') && !token.contains('~') {
        return token.to_string();
    }
    // Order matters: ~ must be escaped before /
    token.replace('~', "~0").replace('/', "~1")
}

/// Parses a JSON Pointer string into reference tokens.
///
/// The empty string is the root pointer and yields no tokens; every other
/// pointer must start with `/`.
///
/// # Example
///
/// ```
/// use json_schema_pointer::parse_pointer;
///
/// assert_eq!(parse_pointer(""), Vec::<String>::new());
/// assert_eq!(parse_pointer("/"), vec![""]);
/// assert_eq!(parse_pointer("/foo/bar"), vec!["foo", "bar"]);
/// assert_eq!(parse_pointer("/a~0b/c~1d"), vec!["a~b", "c/d"]);
/// ```
pub fn parse_pointer(pointer: &str) -> Vec<String> {
    if pointer.is_empty() {
        return Vec::new();
    }
    pointer[1..].split('/').map(unescape_token).collect()
}

/// Formats reference tokens into a JSON Pointer string.
///
/// Returns the empty string for the root pointer (no tokens).
///
/// # Example
///
/// ```
/// use json_schema_pointer::format_pointer;
///
/// assert_eq!(format_pointer(&[]), "");
/// assert_eq!(format_pointer(&["foo".to_string(), "c/d".to_string()]), "/foo/c~1d");
/// ```
pub fn format_pointer(tokens: &[String]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push('/');
        out.push_str(&escape_token(token));
    }
    out
}

/// Appends a single reference token to a pointer string.
///
/// # Example
///
/// ```
/// use json_schema_pointer::append_token;
///
/// assert_eq!(append_token("", "foo"), "/foo");
/// assert_eq!(append_token("/$defs", "a/b"), "/$defs/a~1b");
/// ```
pub fn append_token(pointer: &str, token: &str) -> String {
    let mut out = String::with_capacity(pointer.len() + token.len() + 1);
    out.push_str(pointer);
    out.push('/');
    out.push_str(&escape_token(token));
    out
}

/// Checks whether a string is a valid non-negative array index.
///
/// Leading zeros are rejected except for `"0"` itself.
///
/// # Example
///
/// ```
/// use json_schema_pointer::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("42"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index(""));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    let bytes = index.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_digit())
}

/// Gets a value from a JSON document by reference tokens.
///
/// Returns `None` when the path does not exist. Explicit `null` values are
/// returned as `Some(&Value::Null)`.
///
/// # Example
///
/// ```
/// use json_schema_pointer::get;
/// use serde_json::json;
///
/// let doc = json!({"a": {"b": [1, 2, 3]}});
/// let path = vec!["a".to_string(), "b".to_string(), "1".to_string()];
/// assert_eq!(get(&doc, &path), Some(&json!(2)));
/// assert_eq!(get(&doc, &["missing".to_string()]), None);
/// ```
pub fn get<'a>(doc: &'a Value, tokens: &[String]) -> Option<&'a Value> {
    let mut current = doc;
    for token in tokens {
        match current {
            Value::Array(arr) => {
                if !is_valid_index(token) {
                    return None;
                }
                let idx: usize = token.parse().ok()?;
                current = arr.get(idx)?;
            }
            Value::Object(map) => {
                current = map.get(token)?;
            }
            _ => return None,
        }
    }
    Some(current)
}

/// Gets a value from a JSON document by pointer string.
///
/// # Example
///
/// ```
/// use json_schema_pointer::get_by_pointer;
/// use serde_json::json;
///
/// let doc = json!({"$defs": {"a~b": true}});
/// assert_eq!(get_by_pointer(&doc, "/$defs/a~0b"), Some(&json!(true)));
/// assert_eq!(get_by_pointer(&doc, ""), Some(&doc));
/// ```
pub fn get_by_pointer<'a>(doc: &'a Value, pointer: &str) -> Option<&'a Value> {
    get(doc, &parse_pointer(pointer))
}

/// Validates the shape of a JSON Pointer string.
///
/// # Errors
///
/// Returns [`PointerError::MissingLeadingSlash`] for non-empty pointers that
/// do not start with `/` and [`PointerError::InvalidEscape`] for `~` escapes
/// other than `~0` and `~1`.
pub fn validate_pointer(pointer: &str) -> Result<(), PointerError> {
    if pointer.is_empty() {
        return Ok(());
    }
    if !pointer.starts_with('/') {
        return Err(PointerError::MissingLeadingSlash);
    }
    let bytes = pointer.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'~' {
            match bytes.get(i + 1) {
                Some(b'0') | Some(b'1') => i += 1,
                _ => return Err(PointerError::InvalidEscape),
            }
        }
        i += 1;
    }
    Ok(())
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("POINTER_MISSING_LEADING_SLASH")]
    MissingLeadingSlash,
    #[error("POINTER_INVALID_ESCAPE")]
    InvalidEscape,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unescape_token() {
        assert_eq!(unescape_token("foo"), "foo");
        assert_eq!(unescape_token("a~0b"), "a~b");
        assert_eq!(unescape_token("c~1d"), "c/d");
        assert_eq!(unescape_token("a~0b~1c"), "a~b/c");
        assert_eq!(unescape_token("~0~0"), "~~");
        assert_eq!(unescape_token("~1~1"), "//");
    }

    #[test]
    fn test_escape_token() {
        assert_eq!(escape_token("foo"), "foo");
        assert_eq!(escape_token("a~b"), "a~0b");
        assert_eq!(escape_token("c/d"), "c~1d");
        assert_eq!(escape_token("a~b/c"), "a~0b~1c");
    }

    #[test]
    fn test_parse_pointer() {
        assert_eq!(parse_pointer(""), Vec::<String>::new());
        assert_eq!(parse_pointer("/"), vec![""]);
        assert_eq!(parse_pointer("/foo/bar"), vec!["foo", "bar"]);
        assert_eq!(parse_pointer("/a~0b/c~1d"), vec!["a~b", "c/d"]);
        assert_eq!(parse_pointer("/foo///"), vec!["foo", "", "", ""]);
    }

    #[test]
    fn test_format_pointer() {
        assert_eq!(format_pointer(&[]), "");
        assert_eq!(format_pointer(&["foo".to_string()]), "/foo");
        assert_eq!(
            format_pointer(&["a~b".to_string(), "c/d".to_string()]),
            "/a~0b/c~1d"
        );
        assert_eq!(format_pointer(&["".to_string()]), "/");
    }

    #[test]
    fn test_roundtrip() {
        for pointer in ["", "/", "/foo", "/foo/bar", "/a~0b/c~1d/1", "/foo///"] {
            assert_eq!(format_pointer(&parse_pointer(pointer)), pointer);
        }
    }

    #[test]
    fn test_append_token() {
        assert_eq!(append_token("", "properties"), "/properties");
        assert_eq!(append_token("/properties", "a~b"), "/properties/a~0b");
    }

    #[test]
    fn test_is_valid_index() {
        assert!(is_valid_index("0"));
        assert!(is_valid_index("123"));
        assert!(!is_valid_index("-1"));
        assert!(!is_valid_index("1.5"));
        assert!(!is_valid_index("01"));
        assert!(!is_valid_index(""));
    }

    #[test]
    fn test_get_object() {
        let doc = json!({"foo": {"bar": 42}});
        assert_eq!(
            get(&doc, &["foo".to_string(), "bar".to_string()]),
            Some(&json!(42))
        );
        assert_eq!(get(&doc, &["missing".to_string()]), None);
    }

    #[test]
    fn test_get_array() {
        let doc = json!([1, 2, 3]);
        assert_eq!(get(&doc, &["1".to_string()]), Some(&json!(2)));
        assert_eq!(get(&doc, &["3".to_string()]), None);
        assert_eq!(get(&doc, &["01".to_string()]), None);
    }

    #[test]
    fn test_get_root() {
        let doc = json!({"a": 1});
        assert_eq!(get(&doc, &[]), Some(&doc));
    }

    #[test]
    fn test_get_explicit_null() {
        let doc = json!({"foo": null});
        assert_eq!(get(&doc, &["foo".to_string()]), Some(&Value::Null));
    }

    #[test]
    fn test_get_by_pointer() {
        let doc = json!({"$defs": {"positiveInteger": {"type": "integer"}}});
        assert_eq!(
            get_by_pointer(&doc, "/$defs/positiveInteger"),
            Some(&json!({"type": "integer"}))
        );
        assert_eq!(get_by_pointer(&doc, "/$defs/missing"), None);
    }

    #[test]
    fn test_validate_pointer() {
        assert!(validate_pointer("").is_ok());
        assert!(validate_pointer("/foo/a~0b").is_ok());
        assert_eq!(
            validate_pointer("foo"),
            Err(PointerError::MissingLeadingSlash)
        );
        assert_eq!(validate_pointer("/a~2b"), Err(PointerError::InvalidEscape));
        assert_eq!(validate_pointer("/a~"), Err(PointerError::InvalidEscape));
    }
}
