//! Resource metadata.

use crate::convert::{int_value, string_value};
use crate::datetime::{datetime_parse, datetime_string};
use crate::error::Result;
use crate::identity::ObjectIdentity;
use crate::object::{Dict, Serializable};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Metadata carried by every resource.
///
/// Created by [`meta_factory`]; never supplied by users directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Meta {
    kind: String,
    identity: ObjectIdentity,
    created: String,
    updated: String,
    revision: i64,
}

/// Creates metadata for a resource of the given kind with a fresh identity.
#[must_use]
pub fn meta_factory(kind: impl Into<String>) -> Meta {
    Meta {
        kind: kind.into(),
        identity: ObjectIdentity::random(),
        created: String::new(),
        updated: String::new(),
        revision: 0,
    }
}

impl Meta {
    /// Returns the resource kind.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Sets the resource kind.
    pub fn set_kind(&mut self, kind: impl Into<String>) {
        self.kind = kind.into();
    }

    /// Returns the resource identity.
    #[must_use]
    pub fn identity(&self) -> &ObjectIdentity {
        &self.identity
    }

    /// Sets the resource identity.
    pub fn set_identity(&mut self, identity: ObjectIdentity) {
        self.identity = identity;
    }

    /// Returns the creation time.
    ///
    /// # Errors
    /// Returns `Error::Datetime` if the creation time was never set.
    pub fn created(&self) -> Result<DateTime<Utc>> {
        datetime_parse(&self.created)
    }

    /// Sets the creation time.
    pub fn set_created(&mut self, created: &DateTime<Utc>) {
        self.created = datetime_string(created);
    }

    /// Returns the last update time.
    ///
    /// # Errors
    /// Returns `Error::Datetime` if the update time was never set.
    pub fn updated(&self) -> Result<DateTime<Utc>> {
        datetime_parse(&self.updated)
    }

    /// Sets the last update time.
    pub fn set_updated(&mut self, updated: &DateTime<Utc>) {
        self.updated = datetime_string(updated);
    }

    /// Returns the revision counter.
    #[must_use]
    pub const fn revision(&self) -> i64 {
        self.revision
    }

    /// Sets the revision counter.
    pub fn set_revision(&mut self, revision: i64) {
        self.revision = revision;
    }
}

impl Serializable for Meta {
    fn to_dict(&self) -> Dict {
        let mut data = Dict::new();
        data.insert("kind".to_string(), Value::from(self.kind.clone()));
        data.insert(
            "identity".to_string(),
            Value::from(self.identity.to_string()),
        );
        data.insert("created".to_string(), Value::from(self.created.clone()));
        data.insert("updated".to_string(), Value::from(self.updated.clone()));
        data.insert("revision".to_string(), Value::from(self.revision));
        data
    }

    fn from_dict(&mut self, data: &Dict) -> Result<()> {
        for (key, raw) in data {
            if raw.is_null() {
                continue;
            }
            match key.as_str() {
                "kind" => self.kind = string_value(key, raw)?,
                "identity" => self.identity = ObjectIdentity::new(string_value(key, raw)?),
                "created" => self.created = string_value(key, raw)?,
                "updated" => self.updated = string_value(key, raw)?,
                "revision" => self.revision = int_value(key, raw)?,
                _ => {}
            }
        }
        Ok(())
    }
}
