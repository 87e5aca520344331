//! Helpers operating on any generated model through its schema.

use crate::error::Result;
use crate::object::{Object, SchemaHolder};

/// Deep-copies a resource by looking up a fresh instance of its kind.
///
/// # Errors
/// Returns `Error::NoSuchObject` if the schema does not know the kind, or
/// any error raised by the JSON round trip.
pub fn clone_object(obj: &dyn Object, schema: &dyn SchemaHolder) -> Result<Box<dyn Object>> {
    let mut ret = schema.object_for_kind(obj.metadata().kind())?;
    ret.from_json(&obj.to_json()?)?;
    Ok(ret)
}

/// Decodes a resource of the given kind from JSON text.
///
/// # Errors
/// Returns `Error::NoSuchObject` for unknown kinds and JSON errors for
/// malformed input.
pub fn unmarshal_object(body: &str, schema: &dyn SchemaHolder, kind: &str) -> Result<Box<dyn Object>> {
    let mut resource = schema.object_for_kind(kind)?;
    resource.from_json(body)?;
    Ok(resource)
}
