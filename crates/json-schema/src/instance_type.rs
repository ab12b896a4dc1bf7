//! Instance type classification over the JSON value kinds.

use serde_json::Value;

/// The JSON instance types known to the validation vocabulary.
///
/// `Integer` refines `Number`: a number whose value has a zero fractional
/// part once trailing zeros are stripped, so `1.0` classifies as `Integer`
/// while `1.2` does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceType {
    Null,
    Boolean,
    Object,
    Array,
    String,
    Number,
    Integer,
}

impl InstanceType {
    /// Classifies a JSON value.
    pub fn of(value: &Value) -> InstanceType {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Object(_) => Self::Object,
            Value::Array(_) => Self::Array,
            Value::String(_) => Self::String,
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    Self::Integer
                } else {
                    match n.as_f64() {
                        Some(f) if f.fract() == 0.0 => Self::Integer,
                        _ => Self::Number,
                    }
                }
            }
        }
    }

    /// Checks whether the value belongs to this type.
    ///
    /// `Number` accepts integers as well; `Integer` accepts only numbers
    /// with a zero fractional part.
    pub fn is_instance(self, value: &Value) -> bool {
        let actual = Self::of(value);
        match self {
            Self::Number => matches!(actual, Self::Number | Self::Integer),
            other => actual == other,
        }
    }

    /// Parses a `type` keyword name.
    pub fn from_name(name: &str) -> Option<InstanceType> {
        match name {
            "null" => Some(Self::Null),
            "boolean" => Some(Self::Boolean),
            "object" => Some(Self::Object),
            "array" => Some(Self::Array),
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "integer" => Some(Self::Integer),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
        }
    }
}

impl std::fmt::Display for InstanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classification() {
        assert_eq!(InstanceType::of(&json!(null)), InstanceType::Null);
        assert_eq!(InstanceType::of(&json!(true)), InstanceType::Boolean);
        assert_eq!(InstanceType::of(&json!({})), InstanceType::Object);
        assert_eq!(InstanceType::of(&json!([])), InstanceType::Array);
        assert_eq!(InstanceType::of(&json!("x")), InstanceType::String);
        assert_eq!(InstanceType::of(&json!(1)), InstanceType::Integer);
        assert_eq!(InstanceType::of(&json!(-3)), InstanceType::Integer);
        assert_eq!(InstanceType::of(&json!(1.2)), InstanceType::Number);
    }

    #[test]
    fn test_number_with_zero_fraction_is_integer() {
        assert_eq!(InstanceType::of(&json!(1.0)), InstanceType::Integer);
        assert_eq!(InstanceType::of(&json!(-2.0)), InstanceType::Integer);
    }

    #[test]
    fn test_number_accepts_integer() {
        assert!(InstanceType::Number.is_instance(&json!(1)));
        assert!(InstanceType::Number.is_instance(&json!(1.5)));
        assert!(InstanceType::Integer.is_instance(&json!(1.0)));
        assert!(!InstanceType::Integer.is_instance(&json!(1.5)));
    }

    #[test]
    fn test_null_is_not_everything_else() {
        assert!(InstanceType::Null.is_instance(&json!(null)));
        assert!(!InstanceType::Null.is_instance(&json!(0)));
        assert!(!InstanceType::Object.is_instance(&json!(null)));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(InstanceType::from_name("integer"), Some(InstanceType::Integer));
        assert_eq!(InstanceType::from_name("Integer"), None);
        assert_eq!(InstanceType::from_name("float"), None);
    }
}
