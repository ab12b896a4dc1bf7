//! Deep JSON equality with mathematical number comparison.
//!
//! `enum`, `const` and `uniqueItems` compare numbers by value, not by
//! lexical representation: `1`, `1.0` and `1.00` are all equal.

use serde_json::{Number, Value};
use std::cmp::Ordering;

/// Deep equality over JSON values with numeric equivalence.
pub fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| json_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter().all(|(key, va)| match b.get(key) {
                    Some(vb) => json_equal(va, vb),
                    None => false,
                })
        }
        _ => false,
    }
}

/// Mathematical equality of two JSON numbers.
pub fn numbers_equal(a: &Number, b: &Number) -> bool {
    compare_numbers(a, b) == Ordering::Equal
}

/// Mathematical ordering of two JSON numbers.
///
/// Integer-backed values compare exactly; as soon as a float is involved
/// both sides compare as `f64`, which covers every representation the host
/// value model can produce (JSON has no NaN).
pub fn compare_numbers(a: &Number, b: &Number) -> Ordering {
    if let (Some(x), Some(y)) = (integral(a), integral(b)) {
        return x.cmp(&y);
    }
    let x = a.as_f64().unwrap_or(0.0);
    let y = b.as_f64().unwrap_or(0.0);
    x.partial_cmp(&y).unwrap_or(Ordering::Equal)
}

/// Whether `n` is a whole multiple of `divisor`.
pub fn is_multiple_of(n: &Number, divisor: &Number) -> bool {
    if let (Some(x), Some(d)) = (integral(n), integral(divisor)) {
        return d != 0 && x % d == 0;
    }
    let x = n.as_f64().unwrap_or(0.0);
    let d = divisor.as_f64().unwrap_or(0.0);
    if d == 0.0 {
        return false;
    }
    let quotient = x / d;
    (quotient - quotient.round()).abs() < 1e-9
}

/// Exact integral value for integer-backed numbers and for floats that carry
/// a zero fractional part within exact `f64` range.
fn integral(n: &Number) -> Option<i128> {
    if let Some(i) = n.as_i64() {
        return Some(i as i128);
    }
    if let Some(u) = n.as_u64() {
        return Some(u as i128);
    }
    let f = n.as_f64()?;
    if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 {
        return Some(f as i128);
    }
    None
}
