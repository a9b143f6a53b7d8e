//! Schema-driven value synthesis.
//!
//! Precedence: an explicit `example` wins, otherwise the resolved kind picks
//! the generator. Object and array schemas recurse.

mod primitives;
mod semantic;

use serde_json::{Map, Value};
use tracing::debug;

use pgschema_core::{ArraySchema, ObjectSchema, SchemaKind, SchemaNode, TableSchema};

pub use semantic::sample_uuid;

/// Key under which an `additionalProperties` sample is stored.
pub const ADDITIONAL_PROPERTIES_KEY: &str = "additional_example";

/// Synthesize one sample value for `property` of `table`.
pub fn synthesize(table: &str, property: &str, node: &SchemaNode) -> Value {
    if let Some(example) = &node.example {
        return example.clone();
    }

    match &node.kind {
        SchemaKind::String(schema) => semantic::sample_string(table, property, schema),
        SchemaKind::Integer(schema) => primitives::sample_integer(schema),
        SchemaKind::Number(schema) => primitives::sample_number(schema),
        SchemaKind::Boolean(schema) => Value::Bool(schema.default.unwrap_or(true)),
        SchemaKind::Array(schema) => sample_array(table, property, schema),
        SchemaKind::Object(schema) => Value::Object(sample_object(table, property, schema)),
        SchemaKind::Unknown {
            type_name: None,
            enum_values,
        } => first_enum_value(enum_values).cloned().unwrap_or(Value::Null),
        SchemaKind::Null { enum_values } | SchemaKind::Unknown { enum_values, .. } => {
            enum_values.first().cloned().unwrap_or(Value::Null)
        }
    }
}

/// Synthesize one value per declared column, in declaration order.
pub fn synthesize_row(table: &TableSchema) -> Map<String, Value> {
    let row: Map<String, Value> = table
        .columns
        .iter()
        .map(|column| {
            (
                column.name.clone(),
                synthesize(&table.name, &column.name, &column.schema),
            )
        })
        .collect();
    debug!(table = %table.name, columns = row.len(), "synthesized sample row");
    row
}

/// One item repeated `max(1, minItems)` times. Every element is its own
/// owned value, so nested items never alias each other.
fn sample_array(table: &str, property: &str, schema: &ArraySchema) -> Value {
    let Some(items) = &schema.items else {
        return Value::Array(Vec::new());
    };
    let item = synthesize(table, &format!("{property}_item"), items);
    let length = usize::try_from(schema.min_items.unwrap_or(0).max(1)).unwrap_or(1);
    Value::Array(vec![item; length])
}

fn sample_object(table: &str, property: &str, schema: &ObjectSchema) -> Map<String, Value> {
    let mut object = Map::new();
    for nested in &schema.properties {
        object.insert(
            nested.name.clone(),
            synthesize(table, &nested.name, &nested.schema),
        );
    }
    if let Some(additional) = &schema.additional_properties {
        object.insert(
            ADDITIONAL_PROPERTIES_KEY.to_string(),
            synthesize(table, &format!("{property}_value"), additional),
        );
    }
    object
}

/// First non-null entry, or the first entry when every entry is null.
pub(crate) fn first_enum_value(values: &[Value]) -> Option<&Value> {
    values
        .iter()
        .find(|value| !value.is_null())
        .or_else(|| values.first())
}
