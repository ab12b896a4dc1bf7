//! The 2020-12 core vocabulary table.

use crate::keyword::KeywordType;
use crate::keywords;

pub const URI: &str = "https://json-schema.org/draft/2020-12/vocab/core";

pub fn keyword_types() -> Vec<KeywordType> {
    vec![
        KeywordType {
            name: "$schema",
            create: keywords::core::create_schema,
        },
        KeywordType {
            name: "$id",
            create: keywords::core::create_id,
        },
        KeywordType {
            name: "$anchor",
            create: keywords::core::create_anchor,
        },
        KeywordType {
            name: "$dynamicAnchor",
            create: keywords::core::create_dynamic_anchor,
        },
        KeywordType {
            name: "$ref",
            create: keywords::core::create_ref,
        },
        KeywordType {
            name: "$dynamicRef",
            create: keywords::core::create_dynamic_ref,
        },
        KeywordType {
            name: "$defs",
            create: keywords::core::create_defs,
        },
        KeywordType {
            name: "$comment",
            create: keywords::core::create_comment,
        },
        KeywordType {
            name: "$vocabulary",
            create: keywords::core::create_vocabulary,
        },
    ]
}
