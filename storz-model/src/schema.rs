//! Model schema: a registry compiled into factories.

use crate::error::CompileError;
use crate::handler::{StructTable, StructType};
use crate::instance::{CompiledResource, ResourceObject, StructObject};
use std::sync::Arc;
use storz_core::{Error, Object, ObjectIdentity, Result, SchemaHolder};
use storz_schema::SchemaRegistry;

/// Registry of compiled structs and resources.
#[derive(Debug, Clone)]
pub struct ModelSchema {
    structs: Arc<StructTable>,
    resources: Vec<Arc<CompiledResource>>,
    types: Vec<String>,
}

impl ModelSchema {
    /// Compiles every descriptor of a registry.
    ///
    /// All structs share one table, so nested references may point at any
    /// struct, the referencing one included.
    ///
    /// # Errors
    /// Returns `CompileError::UnresolvedStruct` if a reference cannot be
    /// resolved.
    pub fn compile(registry: &SchemaRegistry) -> std::result::Result<Self, CompileError> {
        let structs = StructTable::compile(registry.structs())?;

        let lookup = |owner: &str, name: &Option<String>| {
            name.as_ref()
                .map(|name| {
                    structs
                        .position(name)
                        .map(|idx| StructType::new(&structs, idx))
                        .ok_or_else(|| CompileError::UnresolvedStruct {
                            owner: owner.to_string(),
                            name: name.clone(),
                        })
                })
                .transpose()
        };

        let mut resources = Vec::with_capacity(registry.resources().len());
        for descriptor in registry.resources() {
            resources.push(Arc::new(CompiledResource {
                external: lookup(&descriptor.name, &descriptor.external)?,
                internal: lookup(&descriptor.name, &descriptor.internal)?,
                descriptor: descriptor.clone(),
            }));
        }

        Ok(Self {
            structs,
            resources,
            types: registry.types().into_iter().map(str::to_string).collect(),
        })
    }

    /// Loads, validates and compiles a YAML model.
    ///
    /// # Errors
    /// Returns `CompileError::Schema` if the model is invalid.
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, CompileError> {
        Self::compile(&storz_schema::registry_from_yaml(yaml)?)
    }

    /// Returns a fresh instance of the named struct.
    ///
    /// # Errors
    /// Returns `Error::NoSuchObject` if the struct is not declared.
    pub fn struct_factory(&self, name: &str) -> Result<StructObject> {
        self.structs
            .position(name)
            .map(|idx| StructObject::factory(&StructType::new(&self.structs, idx)))
            .ok_or_else(|| Error::no_such_object(name))
    }

    /// Returns a fresh instance of the resource matching `kind`.
    ///
    /// The bare name, the identity prefix and the prefix-with-slash form are
    /// accepted; resources are checked in declaration order.
    ///
    /// # Errors
    /// Returns `Error::NoSuchObject` if no resource matches.
    pub fn resource_factory(&self, kind: &str) -> Result<ResourceObject> {
        self.resource(kind).map(ResourceObject::factory)
    }

    /// Builds `{prefix}/{primary_key}` for the resource matching `kind`.
    ///
    /// # Errors
    /// Returns `Error::NoSuchObject` if no resource matches.
    pub fn identity(&self, kind: &str, primary_key: &str) -> Result<ObjectIdentity> {
        let resource = self.resource(kind)?;
        Ok(ObjectIdentity::new(resource.descriptor.identity(primary_key)))
    }

    /// Returns the prefix-only identity for the resource matching `kind`.
    ///
    /// # Errors
    /// Returns `Error::NoSuchObject` if no resource matches.
    pub fn kind_identity(&self, kind: &str) -> Result<ObjectIdentity> {
        let resource = self.resource(kind)?;
        Ok(ObjectIdentity::new(resource.descriptor.kind_identity()))
    }

    fn resource(&self, kind: &str) -> Result<&Arc<CompiledResource>> {
        self.resources
            .iter()
            .find(|r| r.descriptor.matches_kind(kind))
            .ok_or_else(|| Error::no_such_object(kind))
    }
}

impl SchemaHolder for ModelSchema {
    fn object_for_kind(&self, kind: &str) -> Result<Box<dyn Object>> {
        Ok(Box::new(self.resource_factory(kind)?))
    }

    fn types(&self) -> &[String] {
        &self.types
    }
}
