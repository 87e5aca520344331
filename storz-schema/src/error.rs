//! Error types for model loading and validation.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for model loading operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// YAML decoding error.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON decoding error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Type entry with an unsupported kind.
    #[error("unknown kind '{kind}' for type '{name}'")]
    UnknownKind {
        /// Declared kind.
        kind: String,
        /// Type name.
        name: String,
    },

    /// Malformed property type declaration.
    #[error("invalid type '{type_name}' for property '{property}': {reason}")]
    InvalidType {
        /// Property name.
        property: String,
        /// Declared type.
        type_name: String,
        /// Why the declaration was rejected.
        reason: String,
    },

    /// Map with a non-string key type.
    #[error("map key type '{key_type}' for property '{property}' must be string")]
    InvalidMapKey {
        /// Property name.
        property: String,
        /// Declared key type.
        key_type: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind}: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (struct, object).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// Error raised while loading a specific file.
    #[error("{}: {source}", path.display())]
    InFile {
        /// Model file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Box<ParseError>,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for schema registry construction and validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Property type names neither a primitive nor a declared struct.
    #[error("struct {owner} property {property}: unknown type: {type_name}")]
    UnknownType {
        /// Owning struct.
        owner: String,
        /// Property name.
        property: String,
        /// Unknown type name.
        type_name: String,
    },

    /// Duplicate struct or resource name.
    #[error("duplicate {kind}: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (struct, object).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// Two properties with the same name in one struct.
    #[error("struct {owner} declares property '{property}' more than once")]
    DuplicateProperty {
        /// Owning struct.
        owner: String,
        /// Property name.
        property: String,
    },

    /// Resource without external and internal structs.
    #[error("resource {name} has no internal and external")]
    EmptyResource {
        /// Resource name.
        name: String,
    },

    /// Resource references an undeclared struct.
    #[error("resource {resource} {role}: unknown type: {name}")]
    UnknownStruct {
        /// Resource name.
        resource: String,
        /// `external` or `internal`.
        role: &'static str,
        /// Referenced struct name.
        name: String,
    },

    /// Primary key path does not resolve to a scalar value.
    #[error("resource {resource} primary key '{path}': {reason}")]
    InvalidPrimaryKey {
        /// Resource name.
        resource: String,
        /// Declared path.
        path: String,
        /// Why it does not resolve.
        reason: String,
    },

    /// Structs reference each other in a cycle.
    #[error("circular type reference detected: {path}")]
    CircularReference {
        /// Structs involved in the cycle.
        path: String,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl ParseError {
    /// Creates an invalid type error.
    pub fn invalid_type(
        property: impl Into<String>,
        type_name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidType {
            property: property.into(),
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Attaches the file the error was raised in.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Self::InFile {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

impl SchemaError {
    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates an invalid primary key error.
    pub fn invalid_primary_key(
        resource: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidPrimaryKey {
            resource: resource.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }
}
