use serde_json::{Number, Value};

use pgschema_core::{IntegerSchema, NumberSchema, NumericBounds};

pub(super) fn sample_integer(schema: &IntegerSchema) -> Value {
    if let Some(default) = schema.default {
        return Value::from(default);
    }
    let NumericBounds {
        minimum,
        maximum,
        exclusive_minimum,
    } = schema.bounds;

    let value = match (minimum, maximum, exclusive_minimum) {
        (Some(min), Some(max), _) => round_half_up((min + max) / 2.0),
        (Some(min), None, _) => min.ceil(),
        (None, _, Some(exclusive)) => (exclusive + 1.0).ceil(),
        (None, Some(max), None) => max.floor(),
        (None, None, None) => 1.0,
    };
    number_value(value)
}

pub(super) fn sample_number(schema: &NumberSchema) -> Value {
    if let Some(default) = &schema.default {
        return Value::Number(default.clone());
    }
    let NumericBounds {
        minimum,
        maximum,
        exclusive_minimum,
    } = schema.bounds;

    let value = match (minimum, maximum, exclusive_minimum) {
        (Some(min), Some(max), _) => (min + max) / 2.0,
        (Some(min), None, _) => min,
        (None, _, Some(exclusive)) => exclusive + 1.0,
        (None, Some(max), None) => max,
        (None, None, None) => 1.0,
    };
    number_value(value)
}

/// Halves round towards positive infinity: 41.5 -> 42, -2.5 -> -2.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Integral values are emitted as JSON integers, everything else as floats.
fn number_value(value: f64) -> Value {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        return Value::from(value as i64);
    }
    Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
