//! Structural validation of raw configuration JSON
//!
//! Runs before the merge with defaults so that error messages can name the
//! exact field a user wrote.

use crate::error::{NanopostError, Result};
use serde_json::{Map, Value};

fn invalid(message: impl Into<String>) -> NanopostError {
    NanopostError::config_validation(message)
}

fn as_object<'a>(value: &'a Value, field: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| invalid(format!("{field} must be an object")))
}

/// Check that a parsed `config.json` has the expected shape.
pub fn validate_config(raw: &Value) -> Result<()> {
    let obj = raw
        .as_object()
        .ok_or_else(|| invalid("root must be an object"))?;

    let post_types = obj
        .get("postTypes")
        .ok_or_else(|| invalid("postTypes is required"))?;
    let post_types = as_object(post_types, "postTypes")?;
    if post_types.is_empty() {
        return Err(invalid("postTypes must contain at least one post type"));
    }

    for (type_name, type_config) in post_types {
        validate_post_type(type_name, type_config)?;
    }

    let default_type = obj
        .get("defaultType")
        .ok_or_else(|| invalid("defaultType is required"))?;
    let default_type = default_type
        .as_str()
        .ok_or_else(|| invalid("defaultType must be a string"))?;
    if !post_types.contains_key(default_type) {
        return Err(invalid(format!(
            "defaultType \"{default_type}\" does not exist in postTypes"
        )));
    }

    if let Some(editor) = obj.get("editor") {
        if !editor.is_string() {
            return Err(invalid("editor must be a string"));
        }
    }

    if let Some(plugins) = obj.get("plugins") {
        let plugins = plugins
            .as_array()
            .ok_or_else(|| invalid("plugins must be an array"))?;
        for (i, plugin) in plugins.iter().enumerate() {
            let has_name = plugin.get("name").map(Value::is_string).unwrap_or(false);
            if !has_name {
                return Err(invalid(format!("plugins[{i}] must have a \"name\" string")));
            }
        }
    }

    Ok(())
}

fn validate_post_type(type_name: &str, type_config: &Value) -> Result<()> {
    let field = format!("postTypes.{type_name}");
    let tc = as_object(type_config, &field)?;

    let content_dir_ok = tc
        .get("contentDir")
        .and_then(Value::as_str)
        .map(|dir| !dir.is_empty())
        .unwrap_or(false);
    if !content_dir_ok {
        return Err(invalid(format!("{field}.contentDir must be a non-empty string")));
    }

    if let Some(filename) = tc.get("filename") {
        let filename = as_object(filename, &format!("{field}.filename"))?;
        if let Some(max) = filename.get("maxSlugLength") {
            let positive_integer = max.as_u64().map(|n| n > 0).unwrap_or(false);
            if !positive_integer {
                return Err(invalid(format!(
                    "{field}.filename.maxSlugLength must be a positive number"
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(raw: Value) -> String {
        validate_config(&raw).unwrap_err().to_string()
    }

    fn minimal() -> Value {
        json!({"defaultType": "default", "postTypes": {"default": {"contentDir": "posts"}}})
    }

    #[test]
    fn test_root_must_be_object() {
        for raw in [json!("string"), json!(42), json!(null), json!([])] {
            assert!(message(raw).contains("root must be an object"));
        }
    }

    #[test]
    fn test_post_types_required() {
        assert!(message(json!({})).contains("postTypes is required"));
        assert!(message(json!({"postTypes": []})).contains("postTypes must be an object"));
        assert!(message(json!({"postTypes": {}}))
            .contains("postTypes must contain at least one post type"));
    }

    #[test]
    fn test_content_dir_rules() {
        let not_string = json!({"defaultType": "default", "postTypes": {"default": {"contentDir": 42}}});
        let empty = json!({"defaultType": "default", "postTypes": {"default": {"contentDir": ""}}});
        let missing = json!({"defaultType": "default", "postTypes": {"default": {}}});
        for raw in [not_string, empty, missing] {
            assert!(message(raw).contains("postTypes.default.contentDir must be a non-empty string"));
        }
    }

    #[test]
    fn test_post_type_must_be_object() {
        let raw = json!({"defaultType": "a", "postTypes": {"a": "posts"}});
        assert!(message(raw).contains("postTypes.a must be an object"));
    }

    #[test]
    fn test_filename_rules() {
        let raw = json!({"defaultType": "default", "postTypes": {"default": {"contentDir": "posts", "filename": "bad"}}});
        assert!(message(raw).contains("filename must be an object"));

        for bad in [json!(-5), json!(0), json!("ten"), json!(2.5)] {
            let raw = json!({
                "defaultType": "default",
                "postTypes": {"default": {"contentDir": "posts", "filename": {"maxSlugLength": bad}}}
            });
            assert!(message(raw).contains("filename.maxSlugLength must be a positive number"));
        }
    }

    #[test]
    fn test_default_type_rules() {
        let missing = json!({"postTypes": {"default": {"contentDir": "posts"}}});
        assert!(message(missing).contains("defaultType is required"));

        let wrong_type = json!({"defaultType": 1, "postTypes": {"default": {"contentDir": "posts"}}});
        assert!(message(wrong_type).contains("defaultType must be a string"));

        let dangling = json!({"defaultType": "blog", "postTypes": {"default": {"contentDir": "posts"}}});
        assert!(message(dangling).contains("defaultType \"blog\" does not exist in postTypes"));
    }

    #[test]
    fn test_editor_and_plugins() {
        let mut raw = minimal();
        raw["editor"] = json!(123);
        assert!(message(raw).contains("editor must be a string"));

        let mut raw = minimal();
        raw["plugins"] = json!("bad");
        assert!(message(raw).contains("plugins must be an array"));

        let mut raw = minimal();
        raw["plugins"] = json!([{"name": "ok"}, {"enabled": true}]);
        assert!(message(raw).contains("plugins[1] must have a \"name\" string"));

        let mut raw = minimal();
        raw["plugins"] = json!([{"name": "test-plugin", "enabled": true}]);
        assert!(validate_config(&raw).is_ok());
    }

    #[test]
    fn test_minimal_is_valid() {
        assert!(validate_config(&minimal()).is_ok());
    }
}
