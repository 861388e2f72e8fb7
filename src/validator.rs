//! Meta-schema check of a schema document before conversion.

use serde_json::Value;
use tracing::debug;

use crate::error::LoadError;

/// Check that `schema` is a well-formed JSON Schema document.
///
/// The draft named by `$schema` decides the meta-schema. Documents without
/// `$schema` are checked as Draft 7, which still allows the array form of
/// `items`; under 2020-12 that form is rejected.
///
/// # Errors
///
/// Returns `LoadError::InvalidSchema` with the location of the first
/// meta-schema violation, or when `$schema` names an unknown draft.
pub fn check_schema(schema: &Value) -> Result<(), LoadError> {
    let compiled = if schema.get("$schema").is_some() {
        jsonschema::validator_for(schema)
    } else {
        jsonschema::draft7::new(schema)
    };
    compiled.map_err(|e| {
        let path = e.instance_path.to_string();
        debug!(path = %path, "schema failed meta-schema check");
        LoadError::InvalidSchema {
            path: if path.is_empty() { "/".to_string() } else { path },
            message: e.to_string(),
        }
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_object_schema() {
        let schema = json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "minLength": 2, "maxLength": 3 },
                "roles": { "type": "array", "items": [{ "type": "string" }] }
            },
            "required": ["name"]
        });
        assert!(check_schema(&schema).is_ok());
    }

    #[test]
    fn rejects_unknown_type() {
        let schema = json!({
            "type": "object",
            "properties": { "prop": { "type": "int" } }
        });
        let result = check_schema(&schema);
        assert!(matches!(result, Err(LoadError::InvalidSchema { .. })));
    }

    #[test]
    fn rejects_negative_max_length() {
        let schema = json!({
            "type": "object",
            "properties": { "s": { "type": "string", "maxLength": -1 } }
        });
        assert!(check_schema(&schema).is_err());
    }

    #[test]
    fn draft_2020_12_rejects_array_items() {
        let schema = json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object",
            "properties": {
                "roles": { "type": "array", "items": [{ "type": "string" }] }
            }
        });
        let result = check_schema(&schema);
        assert!(matches!(result, Err(LoadError::InvalidSchema { .. })));
    }

    #[test]
    fn draft_2020_12_accepts_object_items() {
        let schema = json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object",
            "properties": {
                "roles": { "type": "array", "items": { "type": "string" } }
            }
        });
        assert!(check_schema(&schema).is_ok());
    }

    #[test]
    fn declared_draft_7_accepts_array_items() {
        let schema = json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "properties": {
                "roles": { "type": "array", "items": [{ "type": "string" }] }
            }
        });
        assert!(check_schema(&schema).is_ok());
    }
}
