//! Assertion keywords of the validation vocabulary.
//!
//! Every keyword here is a pure boolean predicate on the instance. A keyword
//! whose domain does not match the instance shape passes vacuously, so
//! `minLength` on a number is true, not an error. `minContains` and
//! `maxContains` additionally consume the `contains` annotation of their
//! sibling keyword.

use crate::equal::{compare_numbers, is_multiple_of, json_equal};
use crate::error::SchemaError;
use crate::instance_type::InstanceType;
use crate::keyword::{Assertion, Keyword, KeywordBehavior, KeywordCategory, KeywordCtx};
use indexmap::IndexMap;
use regex::Regex;
use serde_json::{Number, Value};
use std::cmp::Ordering;

const ASSERTION: &[KeywordCategory] = &[KeywordCategory::Assertion];

fn invalid(keyword: &'static str, expected: &'static str) -> SchemaError {
    SchemaError::InvalidKeywordValue { keyword, expected }
}

fn expect_count(keyword: &'static str, value: &Value) -> Result<u64, SchemaError> {
    if let Value::Number(n) = value {
        if let Some(u) = n.as_u64() {
            return Ok(u);
        }
        // Integer-valued floats such as 2.0 are accepted
        if let Some(f) = n.as_f64() {
            if f >= 0.0 && f.fract() == 0.0 {
                return Ok(f as u64);
            }
        }
    }
    Err(invalid(keyword, "a non-negative integer"))
}

fn expect_number(keyword: &'static str, value: &Value) -> Result<Number, SchemaError> {
    match value {
        Value::Number(n) => Ok(n.clone()),
        _ => Err(invalid(keyword, "a number")),
    }
}

// ----------------------------------------------------------------- type

#[derive(Debug)]
struct TypeKeyword {
    accepted: Vec<InstanceType>,
    raw: Value,
}

impl KeywordBehavior for TypeKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        ASSERTION
    }

    fn to_value(&self) -> Value {
        self.raw.clone()
    }

    fn find_assertion(&self) -> Option<&dyn Assertion> {
        Some(self)
    }
}

impl Assertion for TypeKeyword {
    fn is_valid_for(&self, instance: &Value) -> bool {
        self.accepted.iter().any(|t| t.is_instance(instance))
    }
}

pub(crate) fn create_type(_ctx: &KeywordCtx<'_>, value: &Value) -> Result<Keyword, SchemaError> {
    let expected = "a JSON type name or an array of type names";
    let accepted = match value {
        Value::String(name) => {
            vec![InstanceType::from_name(name).ok_or_else(|| invalid("type", expected))?]
        }
        Value::Array(names) => names
            .iter()
            .map(|n| {
                n.as_str()
                    .and_then(InstanceType::from_name)
                    .ok_or_else(|| invalid("type", expected))
            })
            .collect::<Result<Vec<_>, _>>()?,
        _ => return Err(invalid("type", expected)),
    };
    Ok(Keyword::new(
        "type",
        TypeKeyword {
            accepted,
            raw: value.clone(),
        },
    ))
}

// ----------------------------------------------------------------- enum / const

#[derive(Debug)]
struct EnumKeyword {
    candidates: Vec<Value>,
}

impl KeywordBehavior for EnumKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        ASSERTION
    }

    fn to_value(&self) -> Value {
        Value::Array(self.candidates.clone())
    }

    fn find_assertion(&self) -> Option<&dyn Assertion> {
        Some(self)
    }
}

impl Assertion for EnumKeyword {
    fn is_valid_for(&self, instance: &Value) -> bool {
        self.candidates.iter().any(|c| json_equal(c, instance))
    }
}

pub(crate) fn create_enum(_ctx: &KeywordCtx<'_>, value: &Value) -> Result<Keyword, SchemaError> {
    let candidates = value
        .as_array()
        .ok_or_else(|| invalid("enum", "an array of values"))?
        .clone();
    Ok(Keyword::new("enum", EnumKeyword { candidates }))
}

#[derive(Debug)]
struct ConstKeyword {
    expected: Value,
}

impl KeywordBehavior for ConstKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        ASSERTION
    }

    fn to_value(&self) -> Value {
        self.expected.clone()
    }

    fn find_assertion(&self) -> Option<&dyn Assertion> {
        Some(self)
    }
}

impl Assertion for ConstKeyword {
    fn is_valid_for(&self, instance: &Value) -> bool {
        json_equal(&self.expected, instance)
    }
}

pub(crate) fn create_const(_ctx: &KeywordCtx<'_>, value: &Value) -> Result<Keyword, SchemaError> {
    Ok(Keyword::new(
        "const",
        ConstKeyword {
            expected: value.clone(),
        },
    ))
}

// ----------------------------------------------------------------- numbers

#[derive(Debug)]
struct MultipleOfKeyword {
    divisor: Number,
}

impl KeywordBehavior for MultipleOfKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        ASSERTION
    }

    fn to_value(&self) -> Value {
        Value::Number(self.divisor.clone())
    }

    fn find_assertion(&self) -> Option<&dyn Assertion> {
        Some(self)
    }
}

impl Assertion for MultipleOfKeyword {
    fn is_valid_for(&self, instance: &Value) -> bool {
        match instance {
            Value::Number(n) => is_multiple_of(n, &self.divisor),
            _ => true,
        }
    }
}

pub(crate) fn create_multiple_of(
    _ctx: &KeywordCtx<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    let divisor = expect_number("multipleOf", value)?;
    if divisor.as_f64().unwrap_or(0.0) <= 0.0 {
        return Err(invalid("multipleOf", "a number strictly greater than zero"));
    }
    Ok(Keyword::new("multipleOf", MultipleOfKeyword { divisor }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberBound {
    Minimum,
    Maximum,
    ExclusiveMinimum,
    ExclusiveMaximum,
}

#[derive(Debug)]
struct NumberLimitKeyword {
    limit: Number,
    bound: NumberBound,
}

impl KeywordBehavior for NumberLimitKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        ASSERTION
    }

    fn to_value(&self) -> Value {
        Value::Number(self.limit.clone())
    }

    fn find_assertion(&self) -> Option<&dyn Assertion> {
        Some(self)
    }
}

impl Assertion for NumberLimitKeyword {
    fn is_valid_for(&self, instance: &Value) -> bool {
        let n = match instance {
            Value::Number(n) => n,
            _ => return true,
        };
        let ordering = compare_numbers(n, &self.limit);
        match self.bound {
            NumberBound::Minimum => ordering != Ordering::Less,
            NumberBound::Maximum => ordering != Ordering::Greater,
            NumberBound::ExclusiveMinimum => ordering == Ordering::Greater,
            NumberBound::ExclusiveMaximum => ordering == Ordering::Less,
        }
    }
}

fn number_limit(
    keyword: &'static str,
    bound: NumberBound,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    let limit = expect_number(keyword, value)?;
    Ok(Keyword::new(keyword, NumberLimitKeyword { limit, bound }))
}

pub(crate) fn create_minimum(_ctx: &KeywordCtx<'_>, value: &Value) -> Result<Keyword, SchemaError> {
    number_limit("minimum", NumberBound::Minimum, value)
}

pub(crate) fn create_maximum(_ctx: &KeywordCtx<'_>, value: &Value) -> Result<Keyword, SchemaError> {
    number_limit("maximum", NumberBound::Maximum, value)
}

pub(crate) fn create_exclusive_minimum(
    _ctx: &KeywordCtx<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    number_limit("exclusiveMinimum", NumberBound::ExclusiveMinimum, value)
}

pub(crate) fn create_exclusive_maximum(
    _ctx: &KeywordCtx<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    number_limit("exclusiveMaximum", NumberBound::ExclusiveMaximum, value)
}

// ----------------------------------------------------------------- strings

#[derive(Debug)]
struct LengthLimitKeyword {
    limit: u64,
    lower: bool,
}

impl KeywordBehavior for LengthLimitKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        ASSERTION
    }

    fn to_value(&self) -> Value {
        Value::Number(self.limit.into())
    }

    fn find_assertion(&self) -> Option<&dyn Assertion> {
        Some(self)
    }
}

impl Assertion for LengthLimitKeyword {
    fn is_valid_for(&self, instance: &Value) -> bool {
        let s = match instance {
            Value::String(s) => s,
            _ => return true,
        };
        // Length is counted in Unicode code points, not bytes
        let length = s.chars().count() as u64;
        if self.lower {
            length >= self.limit
        } else {
            length <= self.limit
        }
    }
}

pub(crate) fn create_min_length(
    _ctx: &KeywordCtx<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    let limit = expect_count("minLength", value)?;
    Ok(Keyword::new(
        "minLength",
        LengthLimitKeyword { limit, lower: true },
    ))
}

pub(crate) fn create_max_length(
    _ctx: &KeywordCtx<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    let limit = expect_count("maxLength", value)?;
    Ok(Keyword::new(
        "maxLength",
        LengthLimitKeyword {
            limit,
            lower: false,
        },
    ))
}

#[derive(Debug)]
struct PatternKeyword {
    pattern: String,
    regex: Regex,
}

impl KeywordBehavior for PatternKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        ASSERTION
    }

    fn to_value(&self) -> Value {
        Value::String(self.pattern.clone())
    }

    fn find_assertion(&self) -> Option<&dyn Assertion> {
        Some(self)
    }
}

impl Assertion for PatternKeyword {
    fn is_valid_for(&self, instance: &Value) -> bool {
        match instance {
            Value::String(s) => self.regex.is_match(s),
            _ => true,
        }
    }
}

pub(crate) fn create_pattern(_ctx: &KeywordCtx<'_>, value: &Value) -> Result<Keyword, SchemaError> {
    let pattern = value
        .as_str()
        .ok_or_else(|| invalid("pattern", "a regular expression string"))?;
    let regex = Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
        keyword: "pattern",
        pattern: pattern.to_string(),
        source,
    })?;
    Ok(Keyword::new(
        "pattern",
        PatternKeyword {
            pattern: pattern.to_string(),
            regex,
        },
    ))
}

// ----------------------------------------------------------------- arrays

#[derive(Debug)]
struct ItemsLimitKeyword {
    limit: u64,
    lower: bool,
}

impl KeywordBehavior for ItemsLimitKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        ASSERTION
    }

    fn to_value(&self) -> Value {
        Value::Number(self.limit.into())
    }

    fn find_assertion(&self) -> Option<&dyn Assertion> {
        Some(self)
    }
}

impl Assertion for ItemsLimitKeyword {
    fn is_valid_for(&self, instance: &Value) -> bool {
        let arr = match instance {
            Value::Array(arr) => arr,
            _ => return true,
        };
        let count = arr.len() as u64;
        if self.lower {
            count >= self.limit
        } else {
            count <= self.limit
        }
    }
}

pub(crate) fn create_min_items(
    _ctx: &KeywordCtx<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    let limit = expect_count("minItems", value)?;
    Ok(Keyword::new("minItems", ItemsLimitKeyword { limit, lower: true }))
}

pub(crate) fn create_max_items(
    _ctx: &KeywordCtx<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    let limit = expect_count("maxItems", value)?;
    Ok(Keyword::new(
        "maxItems",
        ItemsLimitKeyword {
            limit,
            lower: false,
        },
    ))
}

#[derive(Debug)]
struct UniqueItemsKeyword {
    unique: bool,
}

impl KeywordBehavior for UniqueItemsKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        ASSERTION
    }

    fn to_value(&self) -> Value {
        Value::Bool(self.unique)
    }

    fn find_assertion(&self) -> Option<&dyn Assertion> {
        Some(self)
    }
}

impl Assertion for UniqueItemsKeyword {
    fn is_valid_for(&self, instance: &Value) -> bool {
        if !self.unique {
            return true;
        }
        let arr = match instance {
            Value::Array(arr) => arr,
            _ => return true,
        };
        for (i, a) in arr.iter().enumerate() {
            for b in &arr[i + 1..] {
                if json_equal(a, b) {
                    return false;
                }
            }
        }
        true
    }
}

pub(crate) fn create_unique_items(
    _ctx: &KeywordCtx<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    let unique = value
        .as_bool()
        .ok_or_else(|| invalid("uniqueItems", "a boolean"))?;
    Ok(Keyword::new("uniqueItems", UniqueItemsKeyword { unique }))
}

// ----------------------------------------------------------------- contains bounds

/// `minContains`/`maxContains` consume the `contains` annotation: `true`
/// means every element matched, an array carries the matching indices, and
/// an absent producer means counting imposes no constraint at all.
#[derive(Debug)]
struct ContainsBoundKeyword {
    limit: u64,
    lower: bool,
    producers: Vec<Keyword>,
}

impl ContainsBoundKeyword {
    fn matched_count(&self, instance: &Value, total: usize) -> Option<usize> {
        let producer = self.producers.first()?;
        match producer.as_annotation().value_for(instance) {
            Value::Bool(true) => Some(total),
            Value::Array(hits) => Some(hits.len()),
            _ => Some(0),
        }
    }
}

impl KeywordBehavior for ContainsBoundKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        ASSERTION
    }

    fn to_value(&self) -> Value {
        Value::Number(self.limit.into())
    }

    fn find_assertion(&self) -> Option<&dyn Assertion> {
        Some(self)
    }
}

impl Assertion for ContainsBoundKeyword {
    fn is_valid_for(&self, instance: &Value) -> bool {
        let arr = match instance {
            Value::Array(arr) => arr,
            _ => return true,
        };
        let count = match self.matched_count(instance, arr.len()) {
            Some(count) => count as u64,
            // No `contains` in this schema: counting imposes no constraint
            None => return true,
        };
        if self.lower {
            count >= self.limit
        } else {
            count <= self.limit
        }
    }
}

pub(crate) fn create_min_contains(
    ctx: &KeywordCtx<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    let limit = expect_count("minContains", value)?;
    Ok(Keyword::new(
        "minContains",
        ContainsBoundKeyword {
            limit,
            lower: true,
            producers: ctx.producers().to_vec(),
        },
    ))
}

pub(crate) fn create_max_contains(
    ctx: &KeywordCtx<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    let limit = expect_count("maxContains", value)?;
    Ok(Keyword::new(
        "maxContains",
        ContainsBoundKeyword {
            limit,
            lower: false,
            producers: ctx.producers().to_vec(),
        },
    ))
}

// ----------------------------------------------------------------- objects

#[derive(Debug)]
struct PropertiesLimitKeyword {
    limit: u64,
    lower: bool,
}

impl KeywordBehavior for PropertiesLimitKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        ASSERTION
    }

    fn to_value(&self) -> Value {
        Value::Number(self.limit.into())
    }

    fn find_assertion(&self) -> Option<&dyn Assertion> {
        Some(self)
    }
}

impl Assertion for PropertiesLimitKeyword {
    fn is_valid_for(&self, instance: &Value) -> bool {
        let obj = match instance {
            Value::Object(obj) => obj,
            _ => return true,
        };
        let count = obj.len() as u64;
        if self.lower {
            count >= self.limit
        } else {
            count <= self.limit
        }
    }
}

pub(crate) fn create_min_properties(
    _ctx: &KeywordCtx<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    let limit = expect_count("minProperties", value)?;
    Ok(Keyword::new(
        "minProperties",
        PropertiesLimitKeyword { limit, lower: true },
    ))
}

pub(crate) fn create_max_properties(
    _ctx: &KeywordCtx<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    let limit = expect_count("maxProperties", value)?;
    Ok(Keyword::new(
        "maxProperties",
        PropertiesLimitKeyword {
            limit,
            lower: false,
        },
    ))
}

#[derive(Debug)]
struct RequiredKeyword {
    names: Vec<String>,
}

impl KeywordBehavior for RequiredKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        ASSERTION
    }

    fn to_value(&self) -> Value {
        Value::Array(self.names.iter().cloned().map(Value::String).collect())
    }

    fn find_assertion(&self) -> Option<&dyn Assertion> {
        Some(self)
    }
}

impl Assertion for RequiredKeyword {
    fn is_valid_for(&self, instance: &Value) -> bool {
        let obj = match instance {
            Value::Object(obj) => obj,
            _ => return true,
        };
        self.names.iter().all(|name| obj.contains_key(name))
    }
}

fn expect_name_array(keyword: &'static str, value: &Value) -> Result<Vec<String>, SchemaError> {
    value
        .as_array()
        .ok_or_else(|| invalid(keyword, "an array of property names"))?
        .iter()
        .map(|n| {
            n.as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid(keyword, "an array of property names"))
        })
        .collect()
}

pub(crate) fn create_required(
    _ctx: &KeywordCtx<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    let names = expect_name_array("required", value)?;
    Ok(Keyword::new("required", RequiredKeyword { names }))
}

#[derive(Debug)]
struct DependentRequiredKeyword {
    dependencies: IndexMap<String, Vec<String>>,
}

impl KeywordBehavior for DependentRequiredKeyword {
    fn categories(&self) -> &'static [KeywordCategory] {
        ASSERTION
    }

    fn to_value(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (name, required) in &self.dependencies {
            map.insert(
                name.clone(),
                Value::Array(required.iter().cloned().map(Value::String).collect()),
            );
        }
        Value::Object(map)
    }

    fn find_assertion(&self) -> Option<&dyn Assertion> {
        Some(self)
    }
}

impl Assertion for DependentRequiredKeyword {
    fn is_valid_for(&self, instance: &Value) -> bool {
        let obj = match instance {
            Value::Object(obj) => obj,
            _ => return true,
        };
        self.dependencies.iter().all(|(trigger, required)| {
            !obj.contains_key(trigger) || required.iter().all(|name| obj.contains_key(name))
        })
    }
}

pub(crate) fn create_dependent_required(
    _ctx: &KeywordCtx<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    let expected = "an object mapping property names to arrays of property names";
    let map = value
        .as_object()
        .ok_or_else(|| invalid("dependentRequired", expected))?;
    let mut dependencies = IndexMap::with_capacity(map.len());
    for (name, required) in map {
        dependencies.insert(name.clone(), expect_name_array("dependentRequired", required)?);
    }
    Ok(Keyword::new(
        "dependentRequired",
        DependentRequiredKeyword { dependencies },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::test_support::test_document;
    use serde_json::json;

    fn assertion(keyword: &Keyword) -> &dyn Assertion {
        keyword.as_assertion()
    }

    #[test]
    fn test_type_single_and_union() {
        let doc = test_document(json!({}));
        let ctx = KeywordCtx::new(&doc, "");
        let kw = create_type(&ctx, &json!("integer")).unwrap();
        assert!(assertion(&kw).is_valid_for(&json!(1)));
        assert!(assertion(&kw).is_valid_for(&json!(1.0)));
        assert!(!assertion(&kw).is_valid_for(&json!(1.5)));

        let kw = create_type(&ctx, &json!(["string", "null"])).unwrap();
        assert!(assertion(&kw).is_valid_for(&json!(null)));
        assert!(assertion(&kw).is_valid_for(&json!("x")));
        assert!(!assertion(&kw).is_valid_for(&json!(2)));
    }

    #[test]
    fn test_type_rejects_unknown_names() {
        let doc = test_document(json!({}));
        let ctx = KeywordCtx::new(&doc, "");
        assert!(create_type(&ctx, &json!("float")).is_err());
        assert!(create_type(&ctx, &json!(42)).is_err());
    }

    #[test]
    fn test_enum_numeric_equivalence() {
        let doc = test_document(json!({}));
        let ctx = KeywordCtx::new(&doc, "");
        let kw = create_enum(&ctx, &json!([1, "a"])).unwrap();
        assert!(assertion(&kw).is_valid_for(&json!(1.0)));
        assert!(assertion(&kw).is_valid_for(&json!("a")));
        assert!(!assertion(&kw).is_valid_for(&json!(2)));
    }

    #[test]
    fn test_const_numeric_equivalence() {
        let doc = test_document(json!({}));
        let ctx = KeywordCtx::new(&doc, "");
        let kw = create_const(&ctx, &json!(1.0)).unwrap();
        assert!(assertion(&kw).is_valid_for(&json!(1.00)));
        assert!(assertion(&kw).is_valid_for(&json!(1)));
        assert!(!assertion(&kw).is_valid_for(&json!("1")));
    }

    #[test]
    fn test_number_limits() {
        let doc = test_document(json!({}));
        let ctx = KeywordCtx::new(&doc, "");
        let min = create_minimum(&ctx, &json!(2)).unwrap();
        assert!(assertion(&min).is_valid_for(&json!(2)));
        assert!(!assertion(&min).is_valid_for(&json!(1.9)));
        assert!(assertion(&min).is_valid_for(&json!("not a number")));

        let emax = create_exclusive_maximum(&ctx, &json!(5)).unwrap();
        assert!(assertion(&emax).is_valid_for(&json!(4.9)));
        assert!(!assertion(&emax).is_valid_for(&json!(5)));
    }

    #[test]
    fn test_multiple_of() {
        let doc = test_document(json!({}));
        let ctx = KeywordCtx::new(&doc, "");
        let kw = create_multiple_of(&ctx, &json!(0.5)).unwrap();
        assert!(assertion(&kw).is_valid_for(&json!(2.5)));
        assert!(!assertion(&kw).is_valid_for(&json!(2.3)));
        assert!(create_multiple_of(&ctx, &json!(0)).is_err());
        assert!(create_multiple_of(&ctx, &json!(-2)).is_err());
    }

    #[test]
    fn test_length_counts_code_points() {
        let doc = test_document(json!({}));
        let ctx = KeywordCtx::new(&doc, "");
        let kw = create_max_length(&ctx, &json!(3)).unwrap();
        assert!(assertion(&kw).is_valid_for(&json!("äöü")));
        assert!(!assertion(&kw).is_valid_for(&json!("abcd")));
    }

    #[test]
    fn test_pattern_is_unanchored() {
        let doc = test_document(json!({}));
        let ctx = KeywordCtx::new(&doc, "");
        let kw = create_pattern(&ctx, &json!("b+c")).unwrap();
        assert!(assertion(&kw).is_valid_for(&json!("abbbcd")));
        assert!(!assertion(&kw).is_valid_for(&json!("ab")));
        assert!(assertion(&kw).is_valid_for(&json!(12)));
    }

    #[test]
    fn test_pattern_rejects_invalid_regex() {
        let doc = test_document(json!({}));
        let ctx = KeywordCtx::new(&doc, "");
        assert!(matches!(
            create_pattern(&ctx, &json!("(unclosed")),
            Err(SchemaError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_unique_items_mathematical_equality() {
        let doc = test_document(json!({}));
        let ctx = KeywordCtx::new(&doc, "");
        let kw = create_unique_items(&ctx, &json!(true)).unwrap();
        assert!(!assertion(&kw).is_valid_for(&json!([1.0, 1.00, 1])));
        assert!(assertion(&kw).is_valid_for(&json!([1, 2, 3])));

        let off = create_unique_items(&ctx, &json!(false)).unwrap();
        assert!(assertion(&off).is_valid_for(&json!([1, 1])));
    }

    #[test]
    fn test_required_and_dependent_required() {
        let doc = test_document(json!({}));
        let ctx = KeywordCtx::new(&doc, "");
        let kw = create_required(&ctx, &json!(["a"])).unwrap();
        assert!(assertion(&kw).is_valid_for(&json!({"a": 1})));
        assert!(!assertion(&kw).is_valid_for(&json!({"b": 1})));

        let kw = create_dependent_required(&ctx, &json!({"a": ["b"]})).unwrap();
        assert!(assertion(&kw).is_valid_for(&json!({"a": 1, "b": 2})));
        assert!(assertion(&kw).is_valid_for(&json!({"c": 1})));
        assert!(!assertion(&kw).is_valid_for(&json!({"a": 1})));
    }

    #[test]
    fn test_contains_bounds_auto_pass_without_contains() {
        let doc = test_document(json!({}));
        let ctx = KeywordCtx::new(&doc, "");
        let kw = create_min_contains(&ctx, &json!(2)).unwrap();
        // No `contains` sibling was wired: counting imposes no constraint
        assert!(assertion(&kw).is_valid_for(&json!([1])));
    }
}
