//! Value conversion helpers.
//!
//! Two families live here. The `coerce_*` functions implement setter
//! coercion and accept any value that the declared type can be derived from.
//! The `*_value` functions implement dict loading, where values are assigned
//! directly and only the JSON shape is checked.

use crate::datetime::{datetime_parse, datetime_string};
use crate::error::{Error, Result};
use crate::object::Dict;
use serde_json::Value;

fn coercion(property: &str, expected: &'static str, value: &Value) -> Error {
    Error::Coercion {
        property: property.to_string(),
        expected,
        value: value.to_string(),
    }
}

/// Coerces a value to a string.
///
/// # Errors
/// Returns `Error::Coercion` for null, arrays and objects.
pub fn coerce_string(property: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(coercion(property, "string", other)),
    }
}

/// Coerces a value to an integer.
///
/// Floats are truncated toward zero, strings are parsed and booleans map to
/// `0`/`1`.
///
/// # Errors
/// Returns `Error::Coercion` if the value has no integer reading or does not
/// fit in an `i64`.
pub fn coerce_int(property: &str, value: &Value) -> Result<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            if n.is_u64() {
                return Err(coercion(property, "int", value));
            }
            match n.as_f64().map(f64::trunc) {
                // 2^63 is exact as an f64; anything at or above it overflows.
                Some(f) if f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
                _ => Err(coercion(property, "int", value)),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| coercion(property, "int", value)),
        Value::Bool(b) => Ok(i64::from(*b)),
        other => Err(coercion(property, "int", other)),
    }
}

/// Coerces a value to a float.
///
/// # Errors
/// Returns `Error::Coercion` if the value has no numeric reading or reads as
/// NaN or an infinity.
pub fn coerce_float(property: &str, value: &Value) -> Result<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    parsed
        .filter(|f| f.is_finite())
        .ok_or_else(|| coercion(property, "float", value))
}

/// Checks that a float can be stored in a model.
///
/// JSON has no encoding for NaN or the infinities, so such values would not
/// survive a dict round trip.
///
/// # Errors
/// Returns `Error::Coercion` for non-finite values.
pub fn finite_float(property: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::Coercion {
            property: property.to_string(),
            expected: "float",
            value: value.to_string(),
        })
    }
}

/// Coerces a value to a boolean using truthiness.
///
/// Null, zero, empty strings and empty containers are false.
#[must_use]
pub fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Coerces a value to the canonical datetime string.
///
/// # Errors
/// Returns `Error::Coercion` for non-strings and `Error::Datetime` for
/// strings that are not canonical datetimes.
pub fn coerce_datetime(property: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(datetime_string(&datetime_parse(s)?)),
        other => Err(coercion(property, "datetime", other)),
    }
}

/// Reads a string value.
///
/// # Errors
/// Returns `Error::InvalidValue` if the value is not a string.
pub fn string_value(property: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::invalid_value(property, "string"))
}

/// Reads an integer value.
///
/// # Errors
/// Returns `Error::InvalidValue` if the value is not an integer.
pub fn int_value(property: &str, value: &Value) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| Error::invalid_value(property, "int"))
}

/// Reads a float value. Integers are widened.
///
/// # Errors
/// Returns `Error::InvalidValue` if the value is not a number.
pub fn float_value(property: &str, value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| Error::invalid_value(property, "float"))
}

/// Reads a boolean value.
///
/// # Errors
/// Returns `Error::InvalidValue` if the value is not a boolean.
pub fn bool_value(property: &str, value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| Error::invalid_value(property, "bool"))
}

/// Reads an array value.
///
/// # Errors
/// Returns `Error::InvalidValue` if the value is not an array.
pub fn array_value<'a>(property: &str, value: &'a Value) -> Result<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| Error::invalid_value(property, "array"))
}

/// Reads a mapping value.
///
/// # Errors
/// Returns `Error::InvalidValue` if the value is not an object.
pub fn dict_value<'a>(property: &str, value: &'a Value) -> Result<&'a Dict> {
    value
        .as_object()
        .ok_or_else(|| Error::invalid_value(property, "object"))
}

/// Renders a value as a primary key segment.
///
/// Strings are used verbatim, null becomes empty, anything else is rendered
/// as JSON.
#[must_use]
pub fn key_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_string() {
        assert_eq!(coerce_string("p", &json!("abc")).unwrap(), "abc");
        assert_eq!(coerce_string("p", &json!(42)).unwrap(), "42");
        assert_eq!(coerce_string("p", &json!(true)).unwrap(), "true");
        assert!(coerce_string("p", &json!(null)).is_err());
        assert!(coerce_string("p", &json!([1])).is_err());
    }

    #[test]
    fn test_coerce_int() {
        assert_eq!(coerce_int("p", &json!(10)).unwrap(), 10);
        assert_eq!(coerce_int("p", &json!(3.9)).unwrap(), 3);
        assert_eq!(coerce_int("p", &json!(" 17 ")).unwrap(), 17);
        assert_eq!(coerce_int("p", &json!(true)).unwrap(), 1);
        assert!(matches!(
            coerce_int("counter", &json!("abc")),
            Err(Error::Coercion { expected: "int", .. })
        ));
    }

    #[test]
    fn test_coerce_int_out_of_range() {
        assert_eq!(coerce_int("p", &json!(-1e18)).unwrap(), -1_000_000_000_000_000_000);
        assert!(coerce_int("p", &json!(1e19)).is_err());
        assert!(coerce_int("p", &json!(-1e300)).is_err());
        assert!(coerce_int("p", &json!(u64::MAX)).is_err());
        assert!(coerce_int("p", &json!("9223372036854775808")).is_err());
        assert_eq!(coerce_int("p", &json!(i64::MAX)).unwrap(), i64::MAX);
    }

    #[test]
    fn test_coerce_float() {
        assert_eq!(coerce_float("p", &json!(2)).unwrap(), 2.0);
        assert_eq!(coerce_float("p", &json!("2.5")).unwrap(), 2.5);
        assert!(coerce_float("p", &json!("two")).is_err());
    }

    #[test]
    fn test_coerce_float_rejects_non_finite() {
        for text in ["NaN", "inf", "-inf", "infinity", "1e400"] {
            assert!(
                matches!(
                    coerce_float("ratio", &json!(text)),
                    Err(Error::Coercion { expected: "float", .. })
                ),
                "{text}"
            );
        }
        assert_eq!(finite_float("ratio", 0.5).unwrap(), 0.5);
        assert!(finite_float("ratio", f64::NAN).is_err());
        assert!(finite_float("ratio", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_coerce_bool() {
        assert!(coerce_bool(&json!(true)));
        assert!(coerce_bool(&json!(1)));
        assert!(coerce_bool(&json!("false")));
        assert!(!coerce_bool(&json!(0)));
        assert!(!coerce_bool(&json!("")));
        assert!(!coerce_bool(&json!(null)));
        assert!(!coerce_bool(&json!([])));
    }

    #[test]
    fn test_coerce_datetime_canonicalizes() {
        let value = coerce_datetime("p", &json!("2024-01-02T03:04:05Z")).unwrap();
        assert_eq!(value, "2024-01-02T03:04:05.000000Z");
        assert!(coerce_datetime("p", &json!(5)).is_err());
        assert!(matches!(
            coerce_datetime("p", &json!("nope")),
            Err(Error::Datetime(_))
        ));
    }

    #[test]
    fn test_key_string() {
        assert_eq!(key_string(&json!("42")), "42");
        assert_eq!(key_string(&json!(42)), "42");
        assert_eq!(key_string(&json!(null)), "");
        assert_eq!(key_string(&json!(true)), "true");
    }

    #[test]
    fn test_direct_value_readers() {
        assert_eq!(string_value("p", &json!("x")).unwrap(), "x");
        assert!(string_value("p", &json!(1)).is_err());
        assert_eq!(int_value("p", &json!(7)).unwrap(), 7);
        assert!(int_value("p", &json!(7.5)).is_err());
        assert_eq!(float_value("p", &json!(7)).unwrap(), 7.0);
        assert!(bool_value("p", &json!(false)).is_ok());
        assert_eq!(array_value("p", &json!([1, 2])).unwrap().len(), 2);
        assert!(dict_value("p", &json!([])).is_err());
    }
}
