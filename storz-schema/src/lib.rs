//! # Storz Schema
//!
//! Model schema descriptors and loading.
//!
//! This crate provides:
//! - Property, struct and resource descriptors forming the code generation IR
//! - The schema registry with kind lookup and dependency ordering
//! - YAML and JSON model loading, including directory walks
//! - Schema validation

pub mod error;
pub mod naming;
pub mod parser;
pub mod registry;
pub mod types;
pub mod validation;

pub use error::{ParseError, SchemaError};
pub use parser::{Model, load_model_dir, parse_model, parse_model_json, parse_type_decl};
pub use registry::{SchemaRegistry, SchemaRegistryBuilder};
pub use types::{
    Container, DefaultValue, PrimaryKeyRule, PropertyDescriptor, PropertyType,
    ResourceDescriptor, StructDescriptor,
};

/// Builds a registry from a YAML model document.
///
/// # Errors
/// Returns `SchemaError` if parsing or validation fails.
pub fn registry_from_yaml(yaml: &str) -> Result<SchemaRegistry, SchemaError> {
    let model = parse_model(yaml)?;
    SchemaRegistry::builder().model(model).build()
}

/// Builds a registry from every model file under a directory.
///
/// # Errors
/// Returns `SchemaError` if reading, parsing or validation fails.
pub fn registry_from_dir(path: &std::path::Path) -> Result<SchemaRegistry, SchemaError> {
    let model = load_model_dir(path)?;
    SchemaRegistry::builder().model(model).build()
}
