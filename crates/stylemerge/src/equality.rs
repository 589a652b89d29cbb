//! Value comparison used when merging.
//!
//! Sources are compared structurally with [`deep_equal`]. Metadata values are
//! compared with [`shallow_equal`], under which two structured values coming
//! from separate documents never match.

use serde_json::{Number, Value};

/// Structural equality over JSON values.
///
/// Arrays match by length and element-wise; objects match when they have the
/// same key set and every value matches; numbers match by numeric value, so
/// `1` equals `1.0`. Values of different kinds never match.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len() && left.iter().zip(right).all(|(l, r)| deep_equal(l, r))
        }
        (Value::Object(left), Value::Object(right)) => {
            left.len() == right.len()
                && left
                    .iter()
                    .all(|(key, l)| right.get(key).is_some_and(|r| deep_equal(l, r)))
        }
        (Value::Number(left), Value::Number(right)) => numbers_equal(left, right),
        _ => a == b,
    }
}

/// Primitive equality. Arrays and objects are never shallow-equal.
pub fn shallow_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Array(_) | Value::Object(_), _) | (_, Value::Array(_) | Value::Object(_)) => false,
        (Value::Number(left), Value::Number(right)) => numbers_equal(left, right),
        _ => a == b,
    }
}

fn numbers_equal(left: &Number, right: &Number) -> bool {
    if left == right {
        return true;
    }
    // Two integers that differ stay different even if they round to the same float.
    if !left.is_f64() && !right.is_f64() {
        return false;
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(l), Some(r)) => l == r,
        _ => false,
    }
}
