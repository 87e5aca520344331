//! Schema registry.
//!
//! The registry is the complete, validated and immutable set of struct and
//! resource descriptors for one generation run.

use crate::error::SchemaError;
use crate::parser::Model;
use crate::types::{PropertyType, ResourceDescriptor, StructDescriptor};
use crate::validation::validate_registry;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Validated set of descriptors for one generation run.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    structs: Vec<StructDescriptor>,
    resources: Vec<ResourceDescriptor>,
    struct_index: HashMap<String, usize>,
    resource_index: HashMap<String, usize>,
    /// Struct indices, dependencies first.
    dependency_order: Vec<usize>,
}

impl SchemaRegistry {
    /// Returns a builder for a new registry.
    #[must_use]
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::new()
    }

    /// Returns structs in declaration order.
    #[must_use]
    pub fn structs(&self) -> &[StructDescriptor] {
        &self.structs
    }

    /// Returns structs ordered so each comes after the structs it references.
    pub fn structs_in_dependency_order(&self) -> impl Iterator<Item = &StructDescriptor> {
        self.dependency_order.iter().map(|&idx| &self.structs[idx])
    }

    /// Returns resources in declaration order.
    #[must_use]
    pub fn resources(&self) -> &[ResourceDescriptor] {
        &self.resources
    }

    /// Looks up a struct by name.
    #[must_use]
    pub fn get_struct(&self, name: &str) -> Option<&StructDescriptor> {
        self.struct_index.get(name).map(|&idx| &self.structs[idx])
    }

    /// Looks up a resource by name.
    #[must_use]
    pub fn get_resource(&self, name: &str) -> Option<&ResourceDescriptor> {
        self.resource_index.get(name).map(|&idx| &self.resources[idx])
    }

    /// Resolves a kind to its resource.
    ///
    /// The bare name, the identity prefix and the prefix-with-slash form are
    /// all accepted; resources are checked in declaration order.
    #[must_use]
    pub fn resource_for_kind(&self, kind: &str) -> Option<&ResourceDescriptor> {
        self.resources.iter().find(|r| r.matches_kind(kind))
    }

    /// Returns the declared resource names in declaration order.
    #[must_use]
    pub fn types(&self) -> Vec<&str> {
        self.resources.iter().map(|r| r.name.as_str()).collect()
    }

    /// Returns true if a struct with the given name exists.
    #[must_use]
    pub fn has_struct(&self, name: &str) -> bool {
        self.struct_index.contains_key(name)
    }

    /// Returns true if the registry declares nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.structs.is_empty() && self.resources.is_empty()
    }
}

/// Builder for [`SchemaRegistry`].
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistryBuilder {
    structs: Vec<StructDescriptor>,
    resources: Vec<ResourceDescriptor>,
    strict: bool,
}

impl SchemaRegistryBuilder {
    /// Creates an empty builder in lenient mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects unrecognized property types instead of passing them through.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Adds a struct descriptor.
    #[must_use]
    pub fn add_struct(mut self, descriptor: StructDescriptor) -> Self {
        self.structs.push(descriptor);
        self
    }

    /// Adds a resource descriptor.
    #[must_use]
    pub fn add_resource(mut self, descriptor: ResourceDescriptor) -> Self {
        self.resources.push(descriptor);
        self
    }

    /// Adds every declaration of a loaded model.
    #[must_use]
    pub fn model(mut self, model: Model) -> Self {
        self.structs.extend(model.structs);
        self.resources.extend(model.resources);
        self
    }

    /// Resolves type references, validates and freezes the registry.
    ///
    /// # Errors
    /// Returns `SchemaError` for duplicate names, unresolvable references,
    /// invalid primary keys or circular struct references.
    pub fn build(self) -> Result<SchemaRegistry, SchemaError> {
        let mut struct_index = HashMap::with_capacity(self.structs.len());
        for (idx, s) in self.structs.iter().enumerate() {
            if struct_index.insert(s.name.clone(), idx).is_some() {
                return Err(SchemaError::duplicate("struct", &s.name));
            }
        }

        let mut resource_index = HashMap::with_capacity(self.resources.len());
        for (idx, r) in self.resources.iter().enumerate() {
            if resource_index.insert(r.name.clone(), idx).is_some() {
                return Err(SchemaError::duplicate("object", &r.name));
            }
        }

        let mut structs = self.structs;
        for s in &mut structs {
            let mut seen = HashSet::new();
            for p in &mut s.properties {
                if !seen.insert(p.name.clone()) {
                    return Err(SchemaError::DuplicateProperty {
                        owner: s.name.clone(),
                        property: p.name.clone(),
                    });
                }
                p.ty = resolve_type(&s.name, &p.name, &p.ty, &struct_index, self.strict)?;
            }
        }

        let dependency_order = dependency_order(&structs, &struct_index)?;

        let registry = SchemaRegistry {
            structs,
            resources: self.resources,
            struct_index,
            resource_index,
            dependency_order,
        };
        validate_registry(&registry)?;

        tracing::debug!(
            structs = registry.structs.len(),
            resources = registry.resources.len(),
            "schema registry built"
        );
        Ok(registry)
    }
}

fn resolve_type(
    owner: &str,
    property: &str,
    ty: &PropertyType,
    known: &HashMap<String, usize>,
    strict: bool,
) -> Result<PropertyType, SchemaError> {
    let name = match ty {
        PropertyType::Complex(name) | PropertyType::Other(name) => name,
        primitive => return Ok(primitive.clone()),
    };

    if known.contains_key(name) {
        return Ok(PropertyType::Complex(name.clone()));
    }
    if strict {
        return Err(SchemaError::UnknownType {
            owner: owner.to_string(),
            property: property.to_string(),
            type_name: name.clone(),
        });
    }

    tracing::warn!(
        "struct {} property {}: unknown type {}, values pass through unchanged",
        owner,
        property,
        name
    );
    Ok(PropertyType::Other(name.clone()))
}

/// Orders structs so that structs held by scalar properties come first.
///
/// Structs without pending dependencies are taken in declaration order on
/// each pass. Array and map references do not constrain the order, so
/// recursive shapes such as trees are accepted.
fn dependency_order(
    structs: &[StructDescriptor],
    index: &HashMap<String, usize>,
) -> Result<Vec<usize>, SchemaError> {
    let mut pending: Vec<BTreeSet<usize>> = structs
        .iter()
        .map(|s| {
            s.scalar_dependencies()
                .into_iter()
                .filter_map(|name| index.get(name).copied())
                .collect()
        })
        .collect();

    let mut ordered = Vec::with_capacity(structs.len());
    let mut placed = vec![false; structs.len()];

    while ordered.len() < structs.len() {
        let ready: Vec<usize> = (0..structs.len())
            .filter(|&idx| !placed[idx] && pending[idx].is_empty())
            .collect();

        if ready.is_empty() {
            let cycle: Vec<&str> = (0..structs.len())
                .filter(|&idx| !placed[idx])
                .map(|idx| structs[idx].name.as_str())
                .collect();
            return Err(SchemaError::CircularReference {
                path: cycle.join(" -> "),
            });
        }

        for idx in ready {
            placed[idx] = true;
            ordered.push(idx);
            for deps in &mut pending {
                deps.remove(&idx);
            }
        }
    }

    Ok(ordered)
}
