//! Numeric widening.
//!
//! Matching is insensitive to the bit width of numeric arguments: before a
//! matcher is consulted, fixed-width numerics are re-expressed in the widest
//! representation of their category. Signed, unsigned and floating-point
//! categories are never mixed.

use crate::value::Value;

/// Widen a fixed-width numeric to `i64`, `u64` or `f64`. Every other value
/// is returned unchanged.
pub fn widen(value: &Value) -> Value {
    match *value {
        Value::I8(v) => Value::I64(v as i64),
        Value::I16(v) => Value::I64(v as i64),
        Value::I32(v) => Value::I64(v as i64),
        Value::U8(v) => Value::U64(v as u64),
        Value::U16(v) => Value::U64(v as u64),
        Value::U32(v) => Value::U64(v as u64),
        Value::F32(v) => Value::F64(v as f64),
        _ => value.clone(),
    }
}

/// Deep normal form used for structural equivalence: references are
/// dereferenced and every nested scalar is widened.
pub fn normalize(value: &Value) -> Value {
    match value {
        Value::Ref(inner) => normalize(inner),
        Value::List(items) => Value::List(items.iter().map(normalize).collect()),
        Value::Map(entries) => Value::Map(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), normalize(v)))
                .collect(),
        ),
        Value::Record { type_name, fields } => Value::Record {
            type_name: type_name.clone(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.clone(), normalize(v)))
                .collect(),
        },
        other => widen(other),
    }
}
