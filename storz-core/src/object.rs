//! Capability traits implemented by generated types.
//!
//! Every generated struct is [`Serializable`]. Every generated resource is
//! additionally an [`Object`], and resources that declare external fields are
//! also marked [`ExternalHolder`]. The generated schema registry implements
//! [`SchemaHolder`].

use crate::error::{Error, Result};
use crate::meta::Meta;
use serde_json::Value;

/// Ordered mapping from property name to plain data.
pub type Dict = serde_json::Map<String, Value>;

/// Dict and JSON conversion.
pub trait Serializable {
    /// Converts the value into its plain-data mapping.
    fn to_dict(&self) -> Dict;

    /// Populates the value from a plain-data mapping.
    ///
    /// Unknown keys and null values are skipped.
    ///
    /// # Errors
    /// Returns an error if a declared property has the wrong shape.
    fn from_dict(&mut self, data: &Dict) -> Result<()>;

    /// Encodes the value as JSON text.
    ///
    /// # Errors
    /// Returns `Error::Json` if encoding fails.
    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_dict())?)
    }

    /// Populates the value from JSON text.
    ///
    /// # Errors
    /// Returns `Error::Json` for malformed text and `Error::InvalidValue` if
    /// the top-level value is not an object.
    fn from_json(&mut self, text: &str) -> Result<()> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(data) => self.from_dict(&data),
            _ => Err(Error::invalid_value("$", "object")),
        }
    }
}

/// An identity-bearing resource.
pub trait Object: Serializable {
    /// Returns the resource metadata.
    fn metadata(&self) -> &Meta;

    /// Returns the resource metadata mutably.
    fn metadata_mut(&mut self) -> &mut Meta;

    /// Deep-copies the resource through a JSON round trip.
    ///
    /// # Errors
    /// Returns an error if the round trip fails.
    fn clone_object(&self) -> Result<Box<dyn Object>>;

    /// Computes the primary key from the current field values.
    fn primary_key(&self) -> String;
}

/// Marker for resources that carry user-settable external fields.
pub trait ExternalHolder: Object {}

/// Registry of all resource kinds in one generated model.
pub trait SchemaHolder {
    /// Returns a fresh factory-built resource for the given kind.
    ///
    /// # Errors
    /// Returns `Error::NoSuchObject` if the kind is not registered.
    fn object_for_kind(&self, kind: &str) -> Result<Box<dyn Object>>;

    /// Returns the declared resource names in declaration order.
    fn types(&self) -> &[String];
}
