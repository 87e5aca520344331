//! Schema descriptor definitions.
//!
//! This module contains the language-neutral descriptors that drive every
//! emission target: properties, structs and resources.

use crate::naming::capitalize;
use std::collections::BTreeSet;
use std::fmt;

/// Primitive type names that never reference a struct.
pub const PRIMITIVE_TYPES: [&str; 5] = ["string", "int", "float", "bool", "datetime"];

/// Declared type of a property, or of its elements for containers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyType {
    /// UTF-8 string.
    String,
    /// Signed integer.
    Int,
    /// Floating point number.
    Float,
    /// Boolean.
    Bool,
    /// Timestamp, stored as its canonical string.
    Datetime,
    /// Reference to a declared struct.
    Complex(String),
    /// Unrecognized type, stored and restored unchanged.
    Other(String),
}

impl PropertyType {
    /// Parses a type name. Non-primitive names are tentatively complex until
    /// the registry resolves them.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "string" => Self::String,
            "int" => Self::Int,
            "float" => Self::Float,
            "bool" => Self::Bool,
            "datetime" => Self::Datetime,
            other => Self::Complex(other.to_string()),
        }
    }

    /// Returns the declared type name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Datetime => "datetime",
            Self::Complex(name) | Self::Other(name) => name,
        }
    }

    /// Returns true if the type references another struct.
    #[must_use]
    pub const fn is_complex(&self) -> bool {
        matches!(self, Self::Complex(_))
    }

    /// Returns true if the type is one of the primitive types.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        !matches!(self, Self::Complex(_) | Self::Other(_))
    }

    /// Returns the referenced struct name for complex types.
    #[must_use]
    pub fn struct_name(&self) -> Option<&str> {
        match self {
            Self::Complex(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the zero value of a scalar of this type.
    #[must_use]
    pub fn zero_value(&self) -> DefaultValue {
        match self {
            Self::String => DefaultValue::EmptyString,
            Self::Int => DefaultValue::Zero,
            Self::Float => DefaultValue::ZeroFloat,
            Self::Bool => DefaultValue::False,
            Self::Datetime => DefaultValue::ZeroDatetime,
            Self::Complex(name) => DefaultValue::Factory(name.clone()),
            Self::Other(_) => DefaultValue::Null,
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Container shape of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Container {
    /// Single value.
    #[default]
    Scalar,
    /// Ordered sequence.
    Array,
    /// String-keyed mapping.
    Map,
}

/// Target-neutral description of a zero value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DefaultValue {
    /// Empty string.
    EmptyString,
    /// Integer zero.
    Zero,
    /// Float zero.
    ZeroFloat,
    /// Boolean false.
    False,
    /// Zero datetime in canonical form.
    ZeroDatetime,
    /// Null.
    Null,
    /// Empty sequence.
    EmptyArray,
    /// Empty mapping.
    EmptyMap,
    /// Fresh instance from the named struct's factory.
    Factory(String),
}

/// One field of a struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// Property name; also the dict key.
    pub name: String,
    /// Value type, or element type for containers.
    pub ty: PropertyType,
    /// Container shape.
    pub container: Container,
}

impl PropertyDescriptor {
    /// Creates a property descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: PropertyType, container: Container) -> Self {
        Self {
            name: name.into(),
            ty,
            container,
        }
    }

    /// Creates a scalar property.
    #[must_use]
    pub fn scalar(name: impl Into<String>, ty: PropertyType) -> Self {
        Self::new(name, ty, Container::Scalar)
    }

    /// Creates an array property.
    #[must_use]
    pub fn array(name: impl Into<String>, ty: PropertyType) -> Self {
        Self::new(name, ty, Container::Array)
    }

    /// Creates a string-keyed map property.
    #[must_use]
    pub fn map(name: impl Into<String>, ty: PropertyType) -> Self {
        Self::new(name, ty, Container::Map)
    }

    /// Returns the default value for this property.
    #[must_use]
    pub fn default_value(&self) -> DefaultValue {
        match self.container {
            Container::Scalar => self.ty.zero_value(),
            Container::Array => DefaultValue::EmptyArray,
            Container::Map => DefaultValue::EmptyMap,
        }
    }

    /// Returns the default for one element of a container property.
    ///
    /// `None` for scalars.
    #[must_use]
    pub fn complex_type_value_default(&self) -> Option<DefaultValue> {
        match self.container {
            Container::Scalar => None,
            Container::Array | Container::Map => Some(self.ty.zero_value()),
        }
    }

    /// Returns true if the value or its elements reference a struct.
    #[must_use]
    pub const fn is_complex_type(&self) -> bool {
        self.ty.is_complex()
    }

    /// Returns true for array properties.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self.container, Container::Array)
    }

    /// Returns true for map properties.
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self.container, Container::Map)
    }

    /// Returns true for scalar properties.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self.container, Container::Scalar)
    }

    /// Returns the name with its first character uppercased.
    #[must_use]
    pub fn capitalized_name(&self) -> String {
        capitalize(&self.name)
    }

    /// Returns the declaration in model syntax.
    #[must_use]
    pub fn declared_type(&self) -> String {
        match self.container {
            Container::Scalar => self.ty.name().to_string(),
            Container::Array => format!("[]{}", self.ty),
            Container::Map => format!("map[string]{}", self.ty),
        }
    }
}

/// A plain serializable value type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDescriptor {
    /// Struct name.
    pub name: String,
    /// Properties in declaration order.
    pub properties: Vec<PropertyDescriptor>,
}

impl StructDescriptor {
    /// Creates an empty struct descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// Adds a property, builder style.
    #[must_use]
    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    /// Adds a property.
    pub fn add_property(&mut self, property: PropertyDescriptor) {
        self.properties.push(property);
    }

    /// Looks up a property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Returns the names of structs referenced by this struct.
    #[must_use]
    pub fn dependencies(&self) -> BTreeSet<&str> {
        self.properties
            .iter()
            .filter_map(|p| p.ty.struct_name())
            .collect()
    }

    /// Returns the names of structs held directly by a scalar property.
    ///
    /// Only these references force a nested instance into the zero value, so
    /// only these may not form a cycle. Arrays and maps start empty.
    #[must_use]
    pub fn scalar_dependencies(&self) -> BTreeSet<&str> {
        self.properties
            .iter()
            .filter(|p| p.is_scalar())
            .filter_map(|p| p.ty.struct_name())
            .collect()
    }
}

/// Dotted path from a resource to the value that forms its primary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrimaryKeyRule {
    segments: Vec<String>,
}

impl PrimaryKeyRule {
    /// Parses a dotted path such as `external.name`.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path.split('.').map(|s| s.trim().to_string()).collect(),
        }
    }

    /// Returns the path segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the first segment: `metadata`, `external` or `internal`.
    #[must_use]
    pub fn root(&self) -> &str {
        self.segments.first().map_or("", String::as_str)
    }

    /// Returns the segments after the root.
    #[must_use]
    pub fn tail(&self) -> &[String] {
        self.segments.get(1..).unwrap_or_default()
    }
}

impl Default for PrimaryKeyRule {
    fn default() -> Self {
        Self::parse("metadata.identity")
    }
}

impl fmt::Display for PrimaryKeyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// An identity-bearing entity built from metadata plus external and internal
/// structs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Resource name; also its kind.
    pub name: String,
    /// Struct holding user-settable fields.
    pub external: Option<String>,
    /// Struct holding system-managed fields.
    pub internal: Option<String>,
    /// Rule computing the primary key.
    pub primary_key: PrimaryKeyRule,
    /// Prefix of namespaced identities.
    pub identity_prefix: String,
}

impl ResourceDescriptor {
    /// Creates a resource keyed by its metadata identity, with the lowercase
    /// name as identity prefix.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let identity_prefix = name.to_lowercase();
        Self {
            name,
            external: None,
            internal: None,
            primary_key: PrimaryKeyRule::default(),
            identity_prefix,
        }
    }

    /// Sets the external struct.
    #[must_use]
    pub fn with_external(mut self, name: impl Into<String>) -> Self {
        self.external = Some(name.into());
        self
    }

    /// Sets the internal struct.
    #[must_use]
    pub fn with_internal(mut self, name: impl Into<String>) -> Self {
        self.internal = Some(name.into());
        self
    }

    /// Sets the primary key rule.
    #[must_use]
    pub fn with_primary_key(mut self, rule: PrimaryKeyRule) -> Self {
        self.primary_key = rule;
        self
    }

    /// Overrides the identity prefix.
    #[must_use]
    pub fn with_identity_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.identity_prefix = prefix.into();
        self
    }

    /// Builds the identity string `{prefix}/{primary_key}`.
    #[must_use]
    pub fn identity(&self, primary_key: &str) -> String {
        format!("{}/{}", self.identity_prefix, primary_key)
    }

    /// Returns the prefix-only identity used for prefix scans.
    #[must_use]
    pub fn kind_identity(&self) -> String {
        self.identity("")
    }

    /// Returns true if `kind` names this resource in any accepted form.
    #[must_use]
    pub fn matches_kind(&self, kind: &str) -> bool {
        kind == self.name || kind == self.identity_prefix || kind == self.kind_identity()
    }

    /// Returns the accepted kind spellings, deduplicated, in match order.
    #[must_use]
    pub fn kind_aliases(&self) -> Vec<String> {
        let mut aliases = vec![self.name.clone()];
        for alias in [self.identity_prefix.clone(), self.kind_identity()] {
            if !aliases.contains(&alias) {
                aliases.push(alias);
            }
        }
        aliases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_defaults() {
        let cases = [
            (PropertyType::String, DefaultValue::EmptyString),
            (PropertyType::Int, DefaultValue::Zero),
            (PropertyType::Float, DefaultValue::ZeroFloat),
            (PropertyType::Bool, DefaultValue::False),
            (PropertyType::Datetime, DefaultValue::ZeroDatetime),
            (PropertyType::Other("blob".into()), DefaultValue::Null),
            (
                PropertyType::Complex("Nested".into()),
                DefaultValue::Factory("Nested".into()),
            ),
        ];
        for (ty, expected) in cases {
            assert_eq!(PropertyDescriptor::scalar("p", ty).default_value(), expected);
        }
    }

    #[test]
    fn test_container_defaults() {
        let tags = PropertyDescriptor::array("tags", PropertyType::String);
        assert_eq!(tags.default_value(), DefaultValue::EmptyArray);
        assert_eq!(
            tags.complex_type_value_default(),
            Some(DefaultValue::EmptyString)
        );

        let children = PropertyDescriptor::map("children", PropertyType::Complex("Node".into()));
        assert_eq!(children.default_value(), DefaultValue::EmptyMap);
        assert_eq!(
            children.complex_type_value_default(),
            Some(DefaultValue::Factory("Node".into()))
        );
        assert!(children.is_complex_type());
        assert!(children.is_map());
    }

    #[test]
    fn test_scalar_has_no_element_default() {
        let count = PropertyDescriptor::scalar("count", PropertyType::Int);
        assert_eq!(count.complex_type_value_default(), None);
    }

    #[test]
    fn test_declared_type() {
        assert_eq!(
            PropertyDescriptor::map("m", PropertyType::Int).declared_type(),
            "map[string]int"
        );
        assert_eq!(
            PropertyDescriptor::array("a", PropertyType::Complex("X".into())).declared_type(),
            "[]X"
        );
    }

    #[test]
    fn test_struct_dependencies() {
        let s = StructDescriptor::new("World")
            .with_property(PropertyDescriptor::scalar("name", PropertyType::String))
            .with_property(PropertyDescriptor::scalar(
                "nested",
                PropertyType::Complex("Nested".into()),
            ))
            .with_property(PropertyDescriptor::array(
                "list",
                PropertyType::Complex("Nested".into()),
            ));
        assert_eq!(s.dependencies().into_iter().collect::<Vec<_>>(), ["Nested"]);
        assert_eq!(
            s.scalar_dependencies().into_iter().collect::<Vec<_>>(),
            ["Nested"]
        );

        let tree = StructDescriptor::new("Node").with_property(PropertyDescriptor::array(
            "children",
            PropertyType::Complex("Node".into()),
        ));
        assert_eq!(tree.dependencies().into_iter().collect::<Vec<_>>(), ["Node"]);
        assert!(tree.scalar_dependencies().is_empty());
        assert!(s.property("name").is_some());
        assert!(s.property("missing").is_none());
    }

    #[test]
    fn test_primary_key_rule() {
        let rule = PrimaryKeyRule::default();
        assert_eq!(rule.root(), "metadata");
        assert_eq!(rule.tail(), ["identity"]);
        assert_eq!(rule.to_string(), "metadata.identity");
    }

    #[test]
    fn test_resource_identity() {
        let r = ResourceDescriptor::new("User").with_external("UserExternal");
        assert_eq!(r.identity_prefix, "user");
        assert_eq!(r.identity("42"), "user/42");
        assert_eq!(r.kind_identity(), "user/");
        assert!(r.matches_kind("User"));
        assert!(r.matches_kind("user"));
        assert!(r.matches_kind("user/"));
        assert!(!r.matches_kind("users"));
        assert_eq!(r.kind_aliases(), ["User", "user", "user/"]);
    }

    #[test]
    fn test_kind_aliases_dedup() {
        let r = ResourceDescriptor::new("user");
        assert_eq!(r.kind_aliases(), ["user", "user/"]);
    }
}
