use serde_json::{Map, Number, Value};

/// One (sub)schema of a document, reduced to the fields sample synthesis reads.
///
/// Built once from a JSON value and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    /// Explicit `example`, returned verbatim when present (including `null`).
    pub example: Option<Value>,
    pub kind: SchemaKind,
}

/// Closed set of schema kinds, each carrying only the fields relevant to it.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    String(StringSchema),
    Integer(IntegerSchema),
    Number(NumberSchema),
    Boolean(BooleanSchema),
    Array(ArraySchema),
    Object(ObjectSchema),
    Null {
        enum_values: Vec<Value>,
    },
    /// `type` missing (`type_name` is `None`) or not one of the known kinds.
    Unknown {
        type_name: Option<String>,
        enum_values: Vec<Value>,
    },
}

impl SchemaKind {
    /// Name of the kind as it appears in a `type` keyword.
    pub fn name(&self) -> &str {
        match self {
            SchemaKind::String(_) => "string",
            SchemaKind::Integer(_) => "integer",
            SchemaKind::Number(_) => "number",
            SchemaKind::Boolean(_) => "boolean",
            SchemaKind::Array(_) => "array",
            SchemaKind::Object(_) => "object",
            SchemaKind::Null { .. } => "null",
            SchemaKind::Unknown {
                type_name: Some(name),
                ..
            } => name.as_str(),
            SchemaKind::Unknown { type_name: None, .. } => "unknown",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringSchema {
    /// `default`, kept only when it is a string.
    pub default: Option<String>,
    /// `const`, kept only when it is a string.
    pub const_value: Option<String>,
    pub enum_values: Vec<Value>,
    pub pattern: Option<String>,
    pub format: Option<String>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

/// `minimum` / `maximum` / `exclusiveMinimum` as declared.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumericBounds {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_minimum: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegerSchema {
    /// `default`, kept only when it is an integral number.
    pub default: Option<i64>,
    pub bounds: NumericBounds,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberSchema {
    /// `default`, kept only when it is numeric.
    pub default: Option<Number>,
    pub bounds: NumericBounds,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BooleanSchema {
    pub default: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArraySchema {
    /// Item schema; the first element when `items` is a list.
    pub items: Option<Box<SchemaNode>>,
    pub min_items: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    /// Properties in document declaration order.
    pub properties: Vec<Property>,
    /// Absent when the keyword is missing, `null` or `false`.
    pub additional_properties: Option<Box<SchemaNode>>,
}

/// Named subschema, used for object properties and table columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub schema: SchemaNode,
}

impl SchemaNode {
    /// Build a node from a JSON value. Total: shapes that are not schema
    /// objects become [`SchemaKind::Unknown`].
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self {
                example: None,
                kind: SchemaKind::Unknown {
                    type_name: None,
                    enum_values: Vec::new(),
                },
            };
        };

        let enum_values = object
            .get("enum")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let kind = match resolve_type(object) {
            Some(name) => match name.as_str() {
                "string" => SchemaKind::String(StringSchema {
                    default: string_field(object, "default"),
                    const_value: string_field(object, "const"),
                    enum_values,
                    pattern: string_field(object, "pattern"),
                    format: string_field(object, "format"),
                    min_length: length_field(object, "minLength"),
                    max_length: length_field(object, "maxLength"),
                }),
                "integer" => SchemaKind::Integer(IntegerSchema {
                    default: object.get("default").and_then(integral),
                    bounds: NumericBounds::from_object(object),
                }),
                "number" => SchemaKind::Number(NumberSchema {
                    default: match object.get("default") {
                        Some(Value::Number(number)) => Some(number.clone()),
                        _ => None,
                    },
                    bounds: NumericBounds::from_object(object),
                }),
                "boolean" => SchemaKind::Boolean(BooleanSchema {
                    default: object.get("default").and_then(Value::as_bool),
                }),
                "array" => SchemaKind::Array(ArraySchema {
                    items: items_schema(object.get("items")).map(Box::new),
                    min_items: object.get("minItems").and_then(Value::as_u64),
                }),
                "object" => SchemaKind::Object(ObjectSchema {
                    properties: properties(object.get("properties")),
                    additional_properties: match object.get("additionalProperties") {
                        None | Some(Value::Null | Value::Bool(false)) => None,
                        Some(schema) => Some(Box::new(SchemaNode::from_value(schema))),
                    },
                }),
                "null" => SchemaKind::Null { enum_values },
                _ => SchemaKind::Unknown {
                    type_name: Some(name.clone()),
                    enum_values,
                },
            },
            None => SchemaKind::Unknown {
                type_name: None,
                enum_values,
            },
        };

        Self {
            example: object.get("example").cloned(),
            kind,
        }
    }
}

impl NumericBounds {
    fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            minimum: object.get("minimum").and_then(Value::as_f64),
            maximum: object.get("maximum").and_then(Value::as_f64),
            // Draft-4 boolean `exclusiveMinimum` carries no bound and is ignored.
            exclusive_minimum: object.get("exclusiveMinimum").and_then(Value::as_f64),
        }
    }
}

/// Ordered `properties` of a schema object; anything else yields no properties.
pub(crate) fn properties(value: Option<&Value>) -> Vec<Property> {
    value
        .and_then(Value::as_object)
        .map(|entries| {
            entries
                .iter()
                .map(|(name, schema)| Property {
                    name: name.clone(),
                    schema: SchemaNode::from_value(schema),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Resolve `type`: the first non-`null` entry of a list, falling back to the
/// list's first element when every entry is `null`.
fn resolve_type(object: &Map<String, Value>) -> Option<String> {
    match object.get("type")? {
        Value::String(name) => Some(name.clone()),
        Value::Array(entries) => {
            let picked = entries
                .iter()
                .find(|entry| entry.as_str() != Some("null"))
                .or_else(|| entries.first())?;
            Some(match picked {
                Value::String(name) => name.clone(),
                other => other.to_string(),
            })
        }
        other => Some(other.to_string()),
    }
}

fn items_schema(value: Option<&Value>) -> Option<SchemaNode> {
    match value? {
        Value::Array(entries) => entries.first().map(SchemaNode::from_value),
        schema => Some(SchemaNode::from_value(schema)),
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

fn length_field(object: &Map<String, Value>, key: &str) -> Option<usize> {
    object
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|value| usize::try_from(value).ok())
}

fn integral(value: &Value) -> Option<i64> {
    if let Some(value) = value.as_i64() {
        return Some(value);
    }
    let value = value.as_f64()?;
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nullable_type_list_resolves_first_non_null() {
        let node =
            SchemaNode::from_value(&json!({ "type": ["null", "string"], "format": "uuid" }));
        match node.kind {
            SchemaKind::String(schema) => assert_eq!(schema.format.as_deref(), Some("uuid")),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn null_only_type_list_falls_back_to_null() {
        let node = SchemaNode::from_value(&json!({ "type": ["null"] }));
        assert_eq!(node.kind.name(), "null");
    }

    #[test]
    fn empty_type_list_is_unknown() {
        let node = SchemaNode::from_value(&json!({ "type": [] }));
        assert!(matches!(node.kind, SchemaKind::Unknown { type_name: None, .. }));
    }

    #[test]
    fn defaults_of_the_wrong_type_are_dropped() {
        let node =
            SchemaNode::from_value(&json!({ "type": "string", "default": 5, "const": true }));
        let SchemaKind::String(schema) = node.kind else {
            panic!("expected string kind");
        };
        assert!(schema.default.is_none());
        assert!(schema.const_value.is_none());

        let node = SchemaNode::from_value(&json!({ "type": "integer", "default": 2.5 }));
        let SchemaKind::Integer(schema) = node.kind else {
            panic!("expected integer kind");
        };
        assert!(schema.default.is_none());

        let node = SchemaNode::from_value(&json!({ "type": "integer", "default": 4.0 }));
        let SchemaKind::Integer(schema) = node.kind else {
            panic!("expected integer kind");
        };
        assert_eq!(schema.default, Some(4));
    }

    #[test]
    fn properties_keep_declaration_order() {
        let node = SchemaNode::from_value(&json!({
            "type": "object",
            "properties": {
                "zeta": { "type": "string" },
                "alpha": { "type": "integer" },
                "mid": { "type": "boolean" }
            },
            "additionalProperties": false
        }));
        let SchemaKind::Object(schema) = node.kind else {
            panic!("expected object kind");
        };
        let names: Vec<_> = schema.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
        assert!(schema.additional_properties.is_none());
    }

    #[test]
    fn items_list_uses_first_element() {
        let node = SchemaNode::from_value(&json!({
            "type": "array",
            "items": [{ "type": "integer" }, { "type": "string" }],
            "minItems": 2
        }));
        let SchemaKind::Array(schema) = node.kind else {
            panic!("expected array kind");
        };
        assert_eq!(schema.min_items, Some(2));
        let items = schema.items.expect("item schema");
        assert_eq!(items.kind.name(), "integer");
    }

    #[test]
    fn non_object_schema_is_unknown() {
        let node = SchemaNode::from_value(&json!(true));
        assert!(node.example.is_none());
        assert_eq!(node.kind.name(), "unknown");
    }
}
