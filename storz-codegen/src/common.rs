//! Helpers shared by the class-based targets.

use crate::error::CodegenError;
use crate::target::Target;
use std::collections::HashSet;
use std::fmt::Write as _;
use storz_schema::naming::is_identifier;
use storz_schema::{ResourceDescriptor, SchemaRegistry, StructDescriptor};

/// Methods every generated struct class defines itself.
pub(crate) const RESERVED_ACCESSORS: [&str; 4] = ["ToDict", "FromDict", "ToJson", "FromJson"];

/// Quotes a string literal for Python, JavaScript or Rust source.
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Checks that a struct can be emitted as a class with `X()`/`SetX()`
/// accessors: names must be identifiers and accessors must be distinct.
pub(crate) fn check_struct_accessors(
    target: Target,
    descriptor: &StructDescriptor,
    forbidden: &[&str],
) -> Result<(), CodegenError> {
    check_type_name(target, &descriptor.name)?;

    let mut seen = HashSet::new();
    for property in &descriptor.properties {
        if !is_identifier(&property.name) {
            return Err(CodegenError::render(
                target,
                &descriptor.name,
                format!("property '{}' is not an identifier", property.name),
            ));
        }
        let accessor = property.capitalized_name();
        if RESERVED_ACCESSORS.contains(&accessor.as_str()) || forbidden.contains(&accessor.as_str())
        {
            return Err(CodegenError::render(
                target,
                &descriptor.name,
                format!("property '{}' shadows method {accessor}", property.name),
            ));
        }
        if !seen.insert(accessor.clone()) {
            return Err(CodegenError::render(
                target,
                &descriptor.name,
                format!("properties collide on accessor {accessor}"),
            ));
        }
    }
    Ok(())
}

/// Module-level names bound by the generated prelude or schema.
const RESERVED_MODULE_NAMES: [&str; 6] = [
    "Schema",
    "_Schema",
    "datetime",
    "factoryToken",
    "json",
    "store",
];

/// Checks that a type name is usable as a class name.
pub(crate) fn check_type_name(target: Target, name: &str) -> Result<(), CodegenError> {
    if !is_identifier(name) {
        return Err(CodegenError::render(target, name, "name is not an identifier"));
    }
    if RESERVED_MODULE_NAMES.contains(&name) {
        return Err(CodegenError::render(
            target,
            name,
            "name is bound by the generated module",
        ));
    }
    Ok(())
}

/// Module-level names bound by a generated class: the interface, its
/// factory and the private implementation.
pub(crate) fn class_names(name: &str) -> Vec<String> {
    vec![name.to_string(), format!("{name}Factory"), format!("_{name}")]
}

/// Module-level names bound by a generated resource class, including its
/// identity helpers and kind constants.
pub(crate) fn resource_class_names(name: &str) -> Vec<String> {
    let mut names = class_names(name);
    names.extend([
        format!("{name}Identity"),
        format!("{name}KindIdentity"),
        format!("{name}Kind"),
    ]);
    names
}

/// Resolves the accessor chain of a resource's primary key, e.g.
/// `["External", "Name"]` for `external.name`.
pub(crate) fn primary_key_chain(
    target: Target,
    registry: &SchemaRegistry,
    resource: &ResourceDescriptor,
) -> Result<Vec<String>, CodegenError> {
    let rule = &resource.primary_key;
    let mut chain = vec![match rule.root() {
        "metadata" => "Metadata".to_string(),
        "external" => "External".to_string(),
        "internal" => "Internal".to_string(),
        other => {
            return Err(CodegenError::render(
                target,
                &resource.name,
                format!("primary key root '{other}' is not addressable"),
            ));
        }
    }];

    let mut owner = match rule.root() {
        "external" => resource.external.as_deref(),
        "internal" => resource.internal.as_deref(),
        _ => None,
    };
    for segment in rule.tail() {
        let property = owner
            .and_then(|name| registry.get_struct(name))
            .and_then(|s| s.property(segment));
        owner = property.and_then(|p| p.ty.struct_name());
        chain.push(match property {
            Some(p) => p.capitalized_name(),
            None => storz_schema::naming::capitalize(segment),
        });
    }
    Ok(chain)
}

/// Renders the comment banner with the given line prefix.
pub(crate) fn banner(prefix: &str, header: &str) -> String {
    header
        .lines()
        .map(|line| format!("{prefix} {line}").trim_end().to_string() + "\n")
        .collect()
}
