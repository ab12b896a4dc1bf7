//! The 2020-12 applicator vocabulary table.

use crate::keyword::KeywordType;
use crate::keywords;

pub const URI: &str = "https://json-schema.org/draft/2020-12/vocab/applicator";

pub fn keyword_types() -> Vec<KeywordType> {
    vec![
        KeywordType {
            name: "properties",
            create: keywords::applicator::create_properties,
        },
        KeywordType {
            name: "patternProperties",
            create: keywords::applicator::create_pattern_properties,
        },
        KeywordType {
            name: "additionalProperties",
            create: keywords::applicator::create_additional_properties,
        },
        KeywordType {
            name: "propertyNames",
            create: keywords::applicator::create_property_names,
        },
        KeywordType {
            name: "dependentSchemas",
            create: keywords::applicator::create_dependent_schemas,
        },
        KeywordType {
            name: "prefixItems",
            create: keywords::applicator::create_prefix_items,
        },
        KeywordType {
            name: "items",
            create: keywords::applicator::create_items,
        },
        KeywordType {
            name: "contains",
            create: keywords::applicator::create_contains,
        },
        KeywordType {
            name: "allOf",
            create: keywords::applicator::create_all_of,
        },
        KeywordType {
            name: "anyOf",
            create: keywords::applicator::create_any_of,
        },
        KeywordType {
            name: "oneOf",
            create: keywords::applicator::create_one_of,
        },
        KeywordType {
            name: "not",
            create: keywords::applicator::create_not,
        },
        KeywordType {
            name: "if",
            create: keywords::applicator::create_if,
        },
        KeywordType {
            name: "then",
            create: keywords::applicator::create_then,
        },
        KeywordType {
            name: "else",
            create: keywords::applicator::create_else,
        },
    ]
}
