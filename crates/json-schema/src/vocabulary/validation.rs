//! The 2020-12 validation vocabulary table.

use crate::keyword::KeywordType;
use crate::keywords;

pub const URI: &str = "https://json-schema.org/draft/2020-12/vocab/validation";

pub fn keyword_types() -> Vec<KeywordType> {
    vec![
        KeywordType {
            name: "type",
            create: keywords::validation::create_type,
        },
        KeywordType {
            name: "enum",
            create: keywords::validation::create_enum,
        },
        KeywordType {
            name: "const",
            create: keywords::validation::create_const,
        },
        KeywordType {
            name: "multipleOf",
            create: keywords::validation::create_multiple_of,
        },
        KeywordType {
            name: "minimum",
            create: keywords::validation::create_minimum,
        },
        KeywordType {
            name: "maximum",
            create: keywords::validation::create_maximum,
        },
        KeywordType {
            name: "exclusiveMinimum",
            create: keywords::validation::create_exclusive_minimum,
        },
        KeywordType {
            name: "exclusiveMaximum",
            create: keywords::validation::create_exclusive_maximum,
        },
        KeywordType {
            name: "minLength",
            create: keywords::validation::create_min_length,
        },
        KeywordType {
            name: "maxLength",
            create: keywords::validation::create_max_length,
        },
        KeywordType {
            name: "pattern",
            create: keywords::validation::create_pattern,
        },
        KeywordType {
            name: "minItems",
            create: keywords::validation::create_min_items,
        },
        KeywordType {
            name: "maxItems",
            create: keywords::validation::create_max_items,
        },
        KeywordType {
            name: "uniqueItems",
            create: keywords::validation::create_unique_items,
        },
        KeywordType {
            name: "minContains",
            create: keywords::validation::create_min_contains,
        },
        KeywordType {
            name: "maxContains",
            create: keywords::validation::create_max_contains,
        },
        KeywordType {
            name: "minProperties",
            create: keywords::validation::create_min_properties,
        },
        KeywordType {
            name: "maxProperties",
            create: keywords::validation::create_max_properties,
        },
        KeywordType {
            name: "required",
            create: keywords::validation::create_required,
        },
        KeywordType {
            name: "dependentRequired",
            create: keywords::validation::create_dependent_required,
        },
    ]
}
