//! Front matter parsing, normalization and serialization
//!
//! A post is a YAML mapping between two `---` delimiter lines followed by a
//! free-text body. Parsing is lenient: anything that does not look like a
//! delimited block is treated as body only.

use crate::core::value::{yaml_to_json, FieldType};
use crate::error::{NanopostError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Front matter delimiter line
pub const DELIMITER: &str = "---";

/// Insertion-ordered front matter mapping
pub type Frontmatter = Map<String, Value>;

/// Field schema in either of its accepted shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrontmatterSchema {
    /// Legacy form: field names only, types inferred from current values
    Fields(Vec<String>),
    /// Explicit field name to type mapping
    Typed(BTreeMap<String, FieldType>),
}

impl FrontmatterSchema {
    /// Resolve to an explicit type map against the given front matter.
    ///
    /// List-form fields that are absent from `frontmatter` are dropped,
    /// since there is no value to infer from and nothing to coerce.
    pub fn to_type_map(&self, frontmatter: &Frontmatter) -> BTreeMap<String, FieldType> {
        match self {
            Self::Typed(types) => types.clone(),
            Self::Fields(fields) => fields
                .iter()
                .filter_map(|field| {
                    frontmatter
                        .get(field)
                        .map(|value| (field.clone(), FieldType::infer(value)))
                })
                .collect(),
        }
    }
}

/// Front matter and body of a parsed document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedDocument {
    pub frontmatter: Frontmatter,
    pub body: String,
}

impl ParsedDocument {
    fn body_only(content: &str) -> Self {
        Self {
            frontmatter: Frontmatter::new(),
            body: content.trim().to_string(),
        }
    }
}

/// Parse a document's front matter and body.
pub fn parse_frontmatter(content: &str) -> Result<ParsedDocument> {
    parse_frontmatter_from(content, Path::new("<input>"))
}

/// Parse a document, naming `source` in any error.
///
/// Without an opening delimiter, or without a later `\n---`, the whole
/// trimmed document is the body. A YAML block that is not a mapping yields
/// empty front matter; a block that is not valid YAML is an error.
pub fn parse_frontmatter_from(content: &str, source: &Path) -> Result<ParsedDocument> {
    let trimmed = content.trim_start();
    if !trimmed.starts_with(DELIMITER) {
        return Ok(ParsedDocument::body_only(content));
    }

    let open = DELIMITER.len();
    let close_marker = "\n---";
    let end = match trimmed[open..].find(close_marker) {
        Some(offset) => open + offset,
        None => return Ok(ParsedDocument::body_only(content)),
    };

    // skip the single character (normally the newline) after the opening delimiter
    let yaml_block = {
        let after_open = &trimmed[open..end];
        let mut chars = after_open.chars();
        chars.next();
        chars.as_str()
    };
    let body = trimmed[end + close_marker.len()..].trim().to_string();

    let parsed: serde_yaml::Value = serde_yaml::from_str(yaml_block)
        .map_err(|e| NanopostError::invalid_front_matter(source, e.to_string()))?;

    let frontmatter = match yaml_to_json(parsed) {
        Value::Object(map) => map,
        _ => Frontmatter::new(),
    };

    Ok(ParsedDocument { frontmatter, body })
}

/// Coerce schema-typed fields in place and return the front matter.
///
/// Fields missing from the front matter, and fields the schema does not
/// mention, are left as they are.
pub fn normalize_frontmatter(mut frontmatter: Frontmatter, schema: &FrontmatterSchema) -> Frontmatter {
    for (field, field_type) in schema.to_type_map(&frontmatter) {
        if let Some(slot) = frontmatter.get_mut(&field) {
            let current = std::mem::take(slot);
            *slot = field_type.coerce(current);
        }
    }
    frontmatter
}

/// Serialize front matter and body into a Markdown document.
///
/// Output is `---`, the YAML block, `---`, a blank line, the body and a
/// single trailing newline. An empty body ends the document right after the
/// closing delimiter.
pub fn to_markdown(
    frontmatter: &Frontmatter,
    body: &str,
    schema: Option<&FrontmatterSchema>,
) -> Result<String> {
    let normalized = match schema {
        Some(schema) => normalize_frontmatter(frontmatter.clone(), schema),
        None => frontmatter.clone(),
    };

    let yaml = serde_yaml::to_string(&normalized)?;
    let yaml = yaml.trim_end();
    let body = body.trim_end();

    if body.is_empty() {
        Ok(format!("{DELIMITER}\n{yaml}\n{DELIMITER}\n"))
    } else {
        Ok(format!("{DELIMITER}\n{yaml}\n{DELIMITER}\n\n{body}\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fm(value: Value) -> Frontmatter {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_parse_with_front_matter() {
        let doc = parse_frontmatter("---\ntitle: Hello\ntags: [a, b]\n---\n\n# Body\n\nText.\n").unwrap();
        assert_eq!(doc.frontmatter, fm(json!({"title": "Hello", "tags": ["a", "b"]})));
        assert_eq!(doc.body, "# Body\n\nText.");
    }

    #[test]
    fn test_parse_without_front_matter() {
        let doc = parse_frontmatter("\n  Just some text.  \n").unwrap();
        assert!(doc.frontmatter.is_empty());
        assert_eq!(doc.body, "Just some text.");
    }

    #[test]
    fn test_parse_leading_whitespace_before_delimiter() {
        let doc = parse_frontmatter("\n\n---\ntitle: Spaced\n---\nbody").unwrap();
        assert_eq!(doc.frontmatter, fm(json!({"title": "Spaced"})));
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn test_parse_missing_closing_delimiter_is_body() {
        let content = "---\ntitle: Oops\nno closing line here\n";
        let doc = parse_frontmatter(content).unwrap();
        assert!(doc.frontmatter.is_empty());
        assert_eq!(doc.body, content.trim());
    }

    #[test]
    fn test_parse_non_mapping_yields_empty() {
        let doc = parse_frontmatter("---\n- a\n- b\n---\nbody").unwrap();
        assert!(doc.frontmatter.is_empty());
        assert_eq!(doc.body, "body");

        let doc = parse_frontmatter("---\njust a string\n---\nbody").unwrap();
        assert!(doc.frontmatter.is_empty());
    }

    #[test]
    fn test_parse_empty_block() {
        let doc = parse_frontmatter("---\n---\nbody").unwrap();
        assert!(doc.frontmatter.is_empty());
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn test_parse_invalid_yaml_is_error() {
        let err = parse_frontmatter("---\ntitle: [unclosed\n---\nbody").unwrap_err();
        assert!(matches!(err, NanopostError::InvalidFrontMatter { .. }));
    }

    #[test]
    fn test_to_markdown_layout() {
        let out = to_markdown(&fm(json!({"title": "Test"})), "body", None).unwrap();
        assert_eq!(out, "---\ntitle: Test\n---\n\nbody\n");
    }

    #[test]
    fn test_to_markdown_empty_body() {
        let out = to_markdown(&fm(json!({"title": "Empty"})), "", None).unwrap();
        assert!(out.starts_with("---\n"));
        assert!(out[4..].contains("---\n"));
        assert!(out.ends_with('\n'));
        assert!(!out.ends_with("\n\n"));
    }

    #[test]
    fn test_to_markdown_trims_trailing_whitespace() {
        let out = to_markdown(&fm(json!({"title": "Test"})), "body with trailing space   \n\n\n", None).unwrap();
        assert!(out.ends_with("body with trailing space\n"));
    }

    #[test]
    fn test_to_markdown_preserves_field_order() {
        let out = to_markdown(
            &fm(json!({"type": "note", "title": "Post", "date": "2024-01-15", "tags": ["typescript", "cli"]})),
            "body",
            None,
        )
        .unwrap();
        let type_at = out.find("type:").unwrap();
        let title_at = out.find("title:").unwrap();
        let tags_at = out.find("tags:").unwrap();
        assert!(type_at < title_at && title_at < tags_at);
        assert!(out.contains("- typescript"));
        assert!(out.contains("- cli"));
    }

    #[test]
    fn test_round_trip() {
        let cases = [
            (json!({"title": "Hello World", "date": "2024-01-15"}), "Some body text"),
            (json!({"title": "Nested", "meta": {"a": 1, "b": [true, false]}}), "  padded body  \n"),
            (json!({"count": 3, "ratio": 0.25, "draft": false, "note": "yes"}), "line one\n\nline two"),
            (json!({}), "only body"),
        ];
        for (value, body) in cases {
            let original = fm(value);
            let text = to_markdown(&original, body, None).unwrap();
            let parsed = parse_frontmatter(&text).unwrap();
            assert_eq!(parsed.frontmatter, original);
            assert_eq!(parsed.body, body.trim());
        }
    }

    #[test]
    fn test_normalize_typed_schema() {
        let schema = FrontmatterSchema::Typed(BTreeMap::from([
            ("draft".to_string(), FieldType::Boolean),
            ("categories".to_string(), FieldType::Array),
            ("priority".to_string(), FieldType::Number),
            ("missing".to_string(), FieldType::String),
        ]));
        let out = normalize_frontmatter(
            fm(json!({"draft": "true", "categories": "Website, Feature", "priority": "2", "other": "1"})),
            &schema,
        );
        assert_eq!(out["draft"], json!(true));
        assert_eq!(out["categories"], json!(["Website", "Feature"]));
        assert_eq!(out["priority"], json!(2));
        assert_eq!(out["other"], json!("1"));
        assert!(!out.contains_key("missing"));
    }

    #[test]
    fn test_normalize_list_schema_infers_types() {
        let schema = FrontmatterSchema::Fields(vec!["tags".into(), "count".into(), "title".into()]);
        let input = fm(json!({"tags": ["a"], "count": 4, "title": "T"}));
        assert_eq!(normalize_frontmatter(input.clone(), &schema), input);
    }

    #[test]
    fn test_to_markdown_applies_schema() {
        let schema = FrontmatterSchema::Typed(BTreeMap::from([("draft".to_string(), FieldType::Boolean)]));
        let out = to_markdown(&fm(json!({"draft": "yes"})), "b", Some(&schema)).unwrap();
        assert!(out.contains("draft: true"));
    }

    #[test]
    fn test_schema_deserializes_both_shapes() {
        let list: FrontmatterSchema = serde_json::from_value(json!(["title", "tags"])).unwrap();
        assert_eq!(list, FrontmatterSchema::Fields(vec!["title".into(), "tags".into()]));

        let typed: FrontmatterSchema = serde_json::from_value(json!({"draft": "boolean"})).unwrap();
        assert_eq!(
            typed,
            FrontmatterSchema::Typed(BTreeMap::from([("draft".to_string(), FieldType::Boolean)]))
        );
    }
}
