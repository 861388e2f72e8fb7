//! Parsed JSON Schema tree consumed by the converter.
//!
//! Only the keywords the converter reads are kept: `type`, `properties`,
//! `required`, `maxLength` and `items`. Everything else is ignored.

use std::fmt;

use serde_json::{Map, Value};

use crate::error::LoadError;

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Append a key to a JSON Pointer, escaping `~` and `/` (RFC 6901).
pub fn pointer_push(path: &str, key: &str) -> String {
    format!("{}/{}", path, key.replace('~', "~0").replace('/', "~1"))
}

/// Declared type of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
    /// No `type` keyword on the node.
    #[default]
    Unset,
}

impl SchemaType {
    /// Parse a JSON Schema type keyword.
    ///
    /// Returns `None` for unknown values (caller should error).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "string" => Some(SchemaType::String),
            "number" => Some(SchemaType::Number),
            "integer" => Some(SchemaType::Integer),
            "boolean" => Some(SchemaType::Boolean),
            "object" => Some(SchemaType::Object),
            "array" => Some(SchemaType::Array),
            "null" => Some(SchemaType::Null),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Integer => "integer",
            SchemaType::Boolean => "boolean",
            SchemaType::Object => "object",
            SchemaType::Array => "array",
            SchemaType::Null => "null",
            SchemaType::Unset => "unset",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Item schemas declared by an array node.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Items {
    #[default]
    None,
    Single(Box<SchemaNode>),
    /// Positional item schemas (`items: [a, b, ...]` with other than one entry).
    Tuple(Vec<SchemaNode>),
}

/// One schema subtree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaNode {
    pub schema_type: SchemaType,
    /// Child schemas in document order.
    pub properties: Vec<(String, SchemaNode)>,
    pub required: Vec<String>,
    pub max_length: Option<u64>,
    pub items: Items,
}

impl SchemaNode {
    /// Build a schema tree from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::InvalidSchema` when a keyword the converter relies
    /// on has the wrong shape, or a `type` names an unknown type.
    pub fn from_value(value: &Value) -> Result<Self, LoadError> {
        parse_node(value, "")
    }

    /// Whether `key` appears in this node's `required` list.
    pub fn is_required(&self, key: &str) -> bool {
        self.required.iter().any(|r| r == key)
    }

    /// Look up a child schema by property key.
    pub fn property(&self, key: &str) -> Option<&SchemaNode> {
        self.properties
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, node)| node)
    }
}

// --- Internal implementation ---

fn invalid(path: &str, message: impl Into<String>) -> LoadError {
    LoadError::InvalidSchema {
        path: if path.is_empty() { "/".to_string() } else { path.to_string() },
        message: message.into(),
    }
}

fn parse_node(value: &Value, path: &str) -> Result<SchemaNode, LoadError> {
    let Value::Object(map) = value else {
        return Err(invalid(
            path,
            format!("expected schema object, got {}", json_type_name(value)),
        ));
    };

    Ok(SchemaNode {
        schema_type: parse_type(map, path)?,
        properties: parse_properties(map, path)?,
        required: parse_required(map, path)?,
        max_length: parse_max_length(map, path)?,
        items: parse_items(map, path)?,
    })
}

fn parse_type(map: &Map<String, Value>, path: &str) -> Result<SchemaType, LoadError> {
    let type_path = pointer_push(path, "type");
    match map.get("type") {
        None => Ok(SchemaType::Unset),
        Some(Value::String(s)) => SchemaType::parse(s)
            .ok_or_else(|| invalid(&type_path, format!("unknown type \"{}\"", s))),
        Some(Value::Array(_)) => Err(invalid(&type_path, "multiple types are not supported")),
        Some(other) => Err(invalid(
            &type_path,
            format!("expected string, got {}", json_type_name(other)),
        )),
    }
}

fn parse_properties(
    map: &Map<String, Value>,
    path: &str,
) -> Result<Vec<(String, SchemaNode)>, LoadError> {
    let props_path = pointer_push(path, "properties");
    match map.get("properties") {
        None => Ok(Vec::new()),
        Some(Value::Object(props)) => props
            .iter()
            .map(|(key, child)| {
                let node = parse_node(child, &pointer_push(&props_path, key))?;
                Ok((key.clone(), node))
            })
            .collect(),
        Some(other) => Err(invalid(
            &props_path,
            format!("expected object, got {}", json_type_name(other)),
        )),
    }
}

fn parse_required(map: &Map<String, Value>, path: &str) -> Result<Vec<String>, LoadError> {
    let required_path = pointer_push(path, "required");
    match map.get("required") {
        None => Ok(Vec::new()),
        Some(Value::Array(arr)) => arr
            .iter()
            .map(|v| {
                v.as_str().map(String::from).ok_or_else(|| {
                    invalid(
                        &required_path,
                        format!("expected array of strings, found {}", json_type_name(v)),
                    )
                })
            })
            .collect(),
        Some(other) => Err(invalid(
            &required_path,
            format!("expected array, got {}", json_type_name(other)),
        )),
    }
}

fn parse_max_length(map: &Map<String, Value>, path: &str) -> Result<Option<u64>, LoadError> {
    match map.get("maxLength") {
        None => Ok(None),
        Some(v) => v.as_u64().map(Some).ok_or_else(|| {
            invalid(
                &pointer_push(path, "maxLength"),
                "expected non-negative integer",
            )
        }),
    }
}

fn parse_items(map: &Map<String, Value>, path: &str) -> Result<Items, LoadError> {
    let items_path = pointer_push(path, "items");
    match map.get("items") {
        None => Ok(Items::None),
        Some(item) if item.is_object() => {
            Ok(Items::Single(Box::new(parse_node(item, &items_path)?)))
        }
        Some(Value::Array(arr)) => {
            let mut nodes = arr
                .iter()
                .enumerate()
                .map(|(i, item)| parse_node(item, &pointer_push(&items_path, &i.to_string())))
                .collect::<Result<Vec<_>, _>>()?;
            if nodes.len() == 1 {
                Ok(Items::Single(Box::new(nodes.remove(0))))
            } else {
                Ok(Items::Tuple(nodes))
            }
        }
        Some(other) => Err(invalid(
            &items_path,
            format!("expected object or array, got {}", json_type_name(other)),
        )),
    }
}
