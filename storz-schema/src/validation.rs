//! Schema validation utilities.
//!
//! Validation runs as the last step of registry construction, after type
//! references have been resolved.

use crate::error::SchemaError;
use crate::registry::SchemaRegistry;
use crate::types::{PropertyType, ResourceDescriptor};

/// Metadata fields a primary key may read.
pub const METADATA_KEY_FIELDS: [&str; 3] = ["identity", "kind", "revision"];

/// Validates resources of a registry.
///
/// # Errors
/// Returns `SchemaError` describing the first problem found.
pub fn validate_registry(registry: &SchemaRegistry) -> Result<(), SchemaError> {
    for resource in registry.resources() {
        validate_resource(registry, resource)?;
    }
    Ok(())
}

/// Validates a resource definition.
fn validate_resource(
    registry: &SchemaRegistry,
    resource: &ResourceDescriptor,
) -> Result<(), SchemaError> {
    if resource.external.is_none() && resource.internal.is_none() {
        return Err(SchemaError::EmptyResource {
            name: resource.name.clone(),
        });
    }

    for (role, name) in [
        ("external", &resource.external),
        ("internal", &resource.internal),
    ] {
        if let Some(name) = name {
            if !registry.has_struct(name) {
                return Err(SchemaError::UnknownStruct {
                    resource: resource.name.clone(),
                    role,
                    name: name.clone(),
                });
            }
        }
    }

    if resource.identity_prefix.is_empty() || resource.identity_prefix.contains('/') {
        return Err(SchemaError::Validation {
            message: format!(
                "resource {} identity prefix '{}' must be non-empty and contain no '/'",
                resource.name, resource.identity_prefix
            ),
        });
    }

    validate_primary_key(registry, resource)
}

/// Checks that the primary key path resolves to a scalar value.
fn validate_primary_key(
    registry: &SchemaRegistry,
    resource: &ResourceDescriptor,
) -> Result<(), SchemaError> {
    let rule = &resource.primary_key;
    let fail = |reason: String| {
        SchemaError::invalid_primary_key(&resource.name, rule.to_string(), reason)
    };

    let tail = rule.tail();
    let mut current = match rule.root() {
        "metadata" => {
            return match tail {
                [field] if METADATA_KEY_FIELDS.contains(&field.as_str()) => Ok(()),
                _ => Err(fail(format!(
                    "metadata keys must be one of {}",
                    METADATA_KEY_FIELDS.join(", ")
                ))),
            };
        }
        "external" => resource.external.as_deref(),
        "internal" => resource.internal.as_deref(),
        other => {
            return Err(fail(format!(
                "path must start with metadata, external or internal, not '{other}'"
            )));
        }
    }
    .ok_or_else(|| fail(format!("resource declares no {}", rule.root())))?;

    if tail.is_empty() {
        return Err(fail("path must name a property".to_string()));
    }

    for (pos, segment) in tail.iter().enumerate() {
        let descriptor = registry
            .get_struct(current)
            .ok_or_else(|| fail(format!("unknown struct {current}")))?;
        let property = descriptor
            .property(segment)
            .ok_or_else(|| fail(format!("struct {current} has no property {segment}")))?;

        if !property.is_scalar() {
            return Err(fail(format!("property {segment} is a container")));
        }

        let last = pos + 1 == tail.len();
        match (&property.ty, last) {
            (PropertyType::Complex(name), false) => current = name,
            (PropertyType::Complex(_), true) => {
                return Err(fail(format!("property {segment} is a struct")));
            }
            (_, false) => {
                return Err(fail(format!("property {segment} has no fields")));
            }
            (_, true) => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry_from_yaml;
    use crate::types::{PrimaryKeyRule, PropertyDescriptor, StructDescriptor};

    fn base() -> crate::registry::SchemaRegistryBuilder {
        let nested = StructDescriptor::new("Nested")
            .with_property(PropertyDescriptor::scalar("id", PropertyType::Int))
            .with_property(PropertyDescriptor::array("tags", PropertyType::String));
        let external = StructDescriptor::new("External")
            .with_property(PropertyDescriptor::scalar("name", PropertyType::String))
            .with_property(PropertyDescriptor::scalar(
                "nested",
                PropertyType::Complex("Nested".into()),
            ));
        SchemaRegistry::builder().add_struct(nested).add_struct(external)
    }

    fn with_key(path: &str) -> Result<SchemaRegistry, SchemaError> {
        base()
            .add_resource(
                ResourceDescriptor::new("Thing")
                    .with_external("External")
                    .with_primary_key(PrimaryKeyRule::parse(path)),
            )
            .build()
    }

    #[test]
    fn test_validate_valid_schema() {
        let yaml = r#"
types:
  - kind: Struct
    name: External
    properties:
      - name: name
        type: string
  - kind: Object
    name: Thing
    external: External
    primarykey: external.name
"#;
        assert!(registry_from_yaml(yaml).is_ok());
    }

    #[test]
    fn test_empty_resource() {
        let result = base().add_resource(ResourceDescriptor::new("Thing")).build();
        assert!(matches!(result, Err(SchemaError::EmptyResource { .. })));
    }

    #[test]
    fn test_unknown_external() {
        let result = base()
            .add_resource(ResourceDescriptor::new("Thing").with_internal("Missing"))
            .build();
        assert!(matches!(
            result,
            Err(SchemaError::UnknownStruct { role: "internal", .. })
        ));
    }

    #[test]
    fn test_valid_primary_keys() {
        assert!(with_key("metadata.identity").is_ok());
        assert!(with_key("metadata.kind").is_ok());
        assert!(with_key("external.name").is_ok());
        assert!(with_key("external.nested.id").is_ok());
    }

    #[test]
    fn test_invalid_primary_keys() {
        for path in [
            "metadata.created",
            "metadata",
            "external",
            "internal.name",
            "external.missing",
            "external.nested",
            "external.nested.tags",
            "external.name.length",
            "owner.name",
        ] {
            assert!(
                matches!(with_key(path), Err(SchemaError::InvalidPrimaryKey { .. })),
                "path {path} should be rejected"
            );
        }
    }

    #[test]
    fn test_identity_prefix_with_slash() {
        let result = base()
            .add_resource(
                ResourceDescriptor::new("Thing")
                    .with_external("External")
                    .with_identity_prefix("a/b"),
            )
            .build();
        assert!(matches!(result, Err(SchemaError::Validation { .. })));
    }
}
