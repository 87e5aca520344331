//! Error types for Storz runtime operations.

use thiserror::Error;

/// Core error type for model runtime operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Kind lookup did not match any registered resource.
    #[error("object does not exist: kind '{kind}'")]
    NoSuchObject {
        /// Requested kind.
        kind: String,
    },

    /// Property is not declared on the type.
    #[error("unknown property '{property}' on '{type_name}'")]
    UnknownProperty {
        /// Type name.
        type_name: String,
        /// Property name.
        property: String,
    },

    /// Setter input could not be coerced to the declared type.
    #[error("cannot coerce {value} to {expected} for property '{property}'")]
    Coercion {
        /// Property name.
        property: String,
        /// Expected type.
        expected: &'static str,
        /// Offending value, rendered as JSON.
        value: String,
    },

    /// Dict value has the wrong shape for the declared property.
    #[error("invalid value for property '{property}': expected {expected}")]
    InvalidValue {
        /// Property name.
        property: String,
        /// Expected shape.
        expected: &'static str,
    },

    /// Value belongs to a different generated type.
    #[error("type mismatch: expected '{expected}', got '{actual}'")]
    TypeMismatch {
        /// Expected type name.
        expected: String,
        /// Actual type name.
        actual: String,
    },

    /// Datetime string is not in canonical form.
    #[error("datetime parse error: {0}")]
    Datetime(#[from] chrono::ParseError),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates a no-such-object error for the given kind.
    pub fn no_such_object(kind: impl Into<String>) -> Self {
        Self::NoSuchObject { kind: kind.into() }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(property: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidValue {
            property: property.into(),
            expected,
        }
    }

    /// Creates an unknown property error.
    pub fn unknown_property(type_name: impl Into<String>, property: impl Into<String>) -> Self {
        Self::UnknownProperty {
            type_name: type_name.into(),
            property: property.into(),
        }
    }
}

/// Result type alias for Storz runtime operations.
pub type Result<T> = std::result::Result<T, Error>;
