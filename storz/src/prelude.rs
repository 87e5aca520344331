//! Prelude module for convenient imports.
//!
//! ```ignore
//! use storz::prelude::*;
//! ```

// Runtime contract
pub use storz_core::error::{Error as CoreError, Result as CoreResult};
pub use storz_core::{
    Dict, ExternalHolder, Meta, Object, ObjectIdentity, SchemaHolder, Serializable, clone_object,
    unmarshal_object,
};

// Schema types
pub use storz_schema::{
    PropertyDescriptor, PropertyType, ResourceDescriptor, SchemaError, SchemaRegistry,
    StructDescriptor, registry_from_dir, registry_from_yaml,
};

// Code generation
pub use storz_codegen::{CodegenError, Generator, GeneratorOptions, Target};

// In-process models
pub use storz_model::{FieldValue, ModelSchema, ResourceObject, StructObject};
