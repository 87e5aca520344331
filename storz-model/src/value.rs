//! Property values held by model instances.

use crate::instance::StructObject;
use chrono::{DateTime, Utc};
use serde_json::Value;
use indexmap::IndexMap;
use std::collections::BTreeMap;
use storz_core::datetime_string;

/// Value stored in one property slot.
///
/// Primitive and passthrough values are kept as plain JSON values, struct
/// references as owned instances, and containers element by element.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// String, number, boolean, canonical datetime string or opaque value.
    Primitive(Value),
    /// Struct instance, or none when the reference was cleared.
    Object(Option<StructObject>),
    /// Ordered sequence.
    Array(Vec<FieldValue>),
    /// String-keyed mapping, iterated in insertion order.
    Map(IndexMap<String, FieldValue>),
}

impl FieldValue {
    /// Returns the string if this is a string primitive.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Primitive(v) => v.as_str(),
            _ => None,
        }
    }

    /// Returns the integer if this is an integer primitive.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Primitive(v) => v.as_i64(),
            _ => None,
        }
    }

    /// Returns the number if this is a numeric primitive.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Primitive(v) => v.as_f64(),
            _ => None,
        }
    }

    /// Returns the boolean if this is a boolean primitive.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Primitive(v) => v.as_bool(),
            _ => None,
        }
    }

    /// Returns the raw primitive value.
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Primitive(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the struct instance, if present.
    #[must_use]
    pub fn as_object(&self) -> Option<&StructObject> {
        match self {
            Self::Object(obj) => obj.as_ref(),
            _ => None,
        }
    }

    /// Returns the struct instance mutably, if present.
    pub fn as_object_mut(&mut self) -> Option<&mut StructObject> {
        match self {
            Self::Object(obj) => obj.as_mut(),
            _ => None,
        }
    }

    /// Returns the elements of an array value.
    #[must_use]
    pub fn as_array(&self) -> Option<&[FieldValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the array elements mutably.
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<FieldValue>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries of a map value.
    #[must_use]
    pub fn as_map(&self) -> Option<&IndexMap<String, FieldValue>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the map entries mutably.
    pub fn as_map_mut(&mut self) -> Option<&mut IndexMap<String, FieldValue>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns true for a null primitive or a cleared struct reference.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Primitive(Value::Null) | Self::Object(None))
    }

    /// Short name of the value shape, used in error messages.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Primitive(Value::Null) => "null",
            Self::Primitive(Value::Bool(_)) => "bool",
            Self::Primitive(Value::Number(_)) => "number",
            Self::Primitive(Value::String(_)) => "string",
            Self::Primitive(Value::Array(_)) => "json array",
            Self::Primitive(Value::Object(_)) => "json object",
            Self::Object(_) => "struct",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Primitive(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Primitive(Value::from(value))
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Primitive(Value::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Primitive(Value::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Primitive(Value::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Primitive(Value::from(value))
    }
}

/// Temporal values are stored in canonical string form.
impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Primitive(Value::from(datetime_string(&value)))
    }
}

impl From<StructObject> for FieldValue {
    fn from(value: StructObject) -> Self {
        Self::Object(Some(value))
    }
}

impl From<Option<StructObject>> for FieldValue {
    fn from(value: Option<StructObject>) -> Self {
        Self::Object(value)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FieldValue>> From<IndexMap<String, T>> for FieldValue {
    fn from(entries: IndexMap<String, T>) -> Self {
        Self::Map(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

/// Entries are inserted in key order.
impl<T: Into<FieldValue>> From<BTreeMap<String, T>> for FieldValue {
    fn from(entries: BTreeMap<String, T>) -> Self {
        Self::Map(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_conversions() {
        assert_eq!(FieldValue::from("a").as_str(), Some("a"));
        assert_eq!(FieldValue::from(3_i64).as_i64(), Some(3));
        assert_eq!(FieldValue::from(1.5).as_f64(), Some(1.5));
        assert_eq!(FieldValue::from(true).as_bool(), Some(true));
        assert_eq!(FieldValue::from(json!({"a": 1})).shape(), "json object");
    }

    #[test]
    fn test_datetime_is_stored_canonically() {
        let when = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        let value = FieldValue::from(when);
        assert_eq!(value.as_str(), Some("2024-05-06T07:08:09.000000Z"));
    }

    #[test]
    fn test_containers() {
        let array = FieldValue::from(vec!["a", "b"]);
        assert_eq!(array.as_array().map(<[FieldValue]>::len), Some(2));

        let mut entries = BTreeMap::new();
        entries.insert("k".to_string(), 1_i64);
        let map = FieldValue::from(entries);
        assert_eq!(map.as_map().and_then(|m| m["k"].as_i64()), Some(1));
    }

    #[test]
    fn test_map_keeps_insertion_order() {
        let mut entries = IndexMap::new();
        entries.insert("zeta".to_string(), 1_i64);
        entries.insert("alpha".to_string(), 2_i64);
        let map = FieldValue::from(entries);
        let keys: Vec<_> = map.as_map().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn test_null() {
        assert!(FieldValue::Object(None).is_null());
        assert!(FieldValue::from(Value::Null).is_null());
        assert!(!FieldValue::from(0_i64).is_null());
    }
}
