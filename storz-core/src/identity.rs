//! Object identities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity wrapping a path-like string.
///
/// Resource identities take the form `{prefix}/{primary_key}`. An identity
/// without a `/` is a bare id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectIdentity(String);

impl ObjectIdentity {
    /// Creates an identity from the given string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a fresh random bare id.
    #[must_use]
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Returns the raw identity string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the normalized `{type}/{key}` path.
    ///
    /// Bare ids map to `id/{id}`.
    #[must_use]
    pub fn path(&self) -> String {
        match self.0.split_once('/') {
            Some((prefix, rest)) => {
                let key = rest.split('/').next().unwrap_or_default();
                format!("{}/{}", prefix.to_lowercase(), key)
            }
            None => format!("id/{}", self.0),
        }
    }

    /// Returns true if this is a bare id rather than a prefixed path.
    #[must_use]
    pub fn is_id(&self) -> bool {
        !self.0.contains('/')
    }

    /// Returns the type segment of the path.
    #[must_use]
    pub fn object_type(&self) -> String {
        let path = self.path();
        path.split('/').next().unwrap_or_default().to_string()
    }

    /// Returns the key segment of the path.
    #[must_use]
    pub fn key(&self) -> String {
        let path = self.path();
        path.split('/').nth(1).unwrap_or_default().to_string()
    }

    /// Returns the length of the identity string.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the identity string is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ObjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectIdentity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ObjectIdentity {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for ObjectIdentity {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ObjectIdentity {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
