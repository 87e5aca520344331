//! Rust code generation.
//!
//! Generated types keep their fields private and expose an associated
//! `factory()` as the only constructor. Every descriptor is checked to parse
//! as Rust items before it is accepted.

pub mod resources;
pub mod structs;

pub use resources::ResourceGenerator;
pub use structs::StructGenerator;

use crate::common::{banner, check_type_name, quote};
use crate::error::CodegenError;
use crate::generator::GeneratorOptions;
use crate::target::{Renderer, Target};
use storz_schema::naming::{is_identifier, to_screaming_snake_case, to_snake_case};
use storz_schema::{
    Container, DefaultValue, PropertyDescriptor, PropertyType, ResourceDescriptor, SchemaRegistry,
    StructDescriptor,
};

/// Names the generated module already binds.
const RESERVED_TYPE_NAMES: [&str; 17] = [
    "DateTime",
    "Dict",
    "Error",
    "ExternalHolder",
    "IndexMap",
    "Meta",
    "Object",
    "ObjectIdentity",
    "Option",
    "Result",
    "Schema",
    "SchemaHolder",
    "Serializable",
    "String",
    "Utc",
    "Value",
    "Vec",
];

/// Renderer for Rust modules.
pub struct RustRenderer<'a> {
    options: &'a GeneratorOptions,
}

impl<'a> RustRenderer<'a> {
    /// Creates a new Rust renderer.
    #[must_use]
    pub fn new(options: &'a GeneratorOptions) -> Self {
        Self { options }
    }
}

impl Renderer for RustRenderer<'_> {
    fn target(&self) -> Target {
        Target::Rust
    }

    fn render_prelude(&self, _registry: &SchemaRegistry) -> String {
        let rt = &self.options.rust_runtime;
        let mut output = banner("//", self.options.banner());
        output.push('\n');
        output.push_str("#[allow(unused_imports)]\n");
        output.push_str(&format!("use {rt}::chrono::{{DateTime, Utc}};\n"));
        output.push_str("#[allow(unused_imports)]\n");
        output.push_str(&format!("use {rt}::indexmap::IndexMap;\n"));
        output.push_str("#[allow(unused_imports)]\n");
        output.push_str(&format!("use {rt}::serde_json::Value;\n"));
        output.push_str("#[allow(unused_imports)]\n");
        output.push_str(&format!(
            "use {rt}::{{\n    DATETIME_ZERO, Dict, Error, ExternalHolder, Meta, Object, ObjectIdentity, \
             Result, SchemaHolder,\n    Serializable, convert, datetime_parse, datetime_string, \
             meta_factory,\n}};\n"
        ));
        output
    }

    fn render_struct(
        &self,
        _registry: &SchemaRegistry,
        descriptor: &StructDescriptor,
    ) -> Result<String, CodegenError> {
        check_rust_type_name(&descriptor.name)?;
        let code = StructGenerator::new(descriptor).generate()?;
        check_items(&descriptor.name, &code)?;
        Ok(code)
    }

    fn render_resource(
        &self,
        registry: &SchemaRegistry,
        descriptor: &ResourceDescriptor,
    ) -> Result<String, CodegenError> {
        check_rust_type_name(&descriptor.name)?;
        let code = ResourceGenerator::new(registry, descriptor).generate()?;
        check_items(&descriptor.name, &code)?;
        Ok(code)
    }

    fn struct_names(&self, descriptor: &StructDescriptor) -> Vec<String> {
        vec![descriptor.name.clone()]
    }

    /// Type and value names share one set, so a type spelled like a
    /// constant is rejected even though Rust would accept it.
    fn resource_names(&self, descriptor: &ResourceDescriptor) -> Vec<String> {
        let prefix = to_screaming_snake_case(&descriptor.name);
        let snake = to_snake_case(&descriptor.name);
        vec![
            descriptor.name.clone(),
            format!("{prefix}_KIND"),
            format!("{prefix}_KIND_IDENTITY"),
            format!("{snake}_identity"),
            format!("{snake}_kind_identity"),
        ]
    }

    fn render_schema(&self, resources: &[&ResourceDescriptor]) -> Result<String, CodegenError> {
        let mut output = String::new();

        output.push_str("\n/// Registry of every resource kind in this model.\n");
        output.push_str("#[derive(Debug, Clone)]\n");
        output.push_str("pub struct Schema {\n");
        output.push_str("    objects: Vec<String>,\n");
        output.push_str("}\n\n");

        output.push_str("/// Returns the model schema.\n");
        output.push_str("#[must_use]\n");
        output.push_str("pub fn schema() -> Schema {\n");
        output.push_str("    Schema {\n");
        output.push_str("        objects: vec![\n");
        for resource in resources {
            output.push_str(&format!("            {}.to_string(),\n", quote(&resource.name)));
        }
        output.push_str("        ],\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output.push_str("impl SchemaHolder for Schema {\n");
        output.push_str("    fn object_for_kind(&self, kind: &str) -> Result<Box<dyn Object>> {\n");
        output.push_str("        match kind {\n");
        for resource in resources {
            let aliases: Vec<String> = resource.kind_aliases().iter().map(|a| quote(a)).collect();
            output.push_str(&format!(
                "            {} => Ok(Box::new({}::factory())),\n",
                aliases.join(" | "),
                resource.name
            ));
        }
        output.push_str("            _ => Err(Error::no_such_object(kind)),\n");
        output.push_str("        }\n");
        output.push_str("    }\n\n");
        output.push_str("    fn types(&self) -> &[String] {\n");
        output.push_str("        &self.objects\n");
        output.push_str("    }\n");
        output.push_str("}\n");

        check_items("Schema", &output)?;
        Ok(output)
    }

    fn finish(&self, source: String) -> Result<String, CodegenError> {
        syn::parse_file(&source)
            .map_err(|e| CodegenError::generation(format!("generated Rust does not parse: {e}")))?;
        Ok(source)
    }
}

fn check_items(descriptor: &str, code: &str) -> Result<(), CodegenError> {
    syn::parse_file(code)
        .map(|_| ())
        .map_err(|e| CodegenError::render(Target::Rust, descriptor, e.to_string()))
}

fn check_rust_type_name(name: &str) -> Result<(), CodegenError> {
    check_type_name(Target::Rust, name)?;
    if RESERVED_TYPE_NAMES.contains(&name) || syn::parse_str::<syn::Ident>(name).is_err() {
        return Err(CodegenError::render(
            Target::Rust,
            name,
            "name is reserved in generated Rust",
        ));
    }
    Ok(())
}

/// Returns the field identifier for a property, using a raw identifier for
/// keywords.
pub(crate) fn field_ident(owner: &str, property: &str) -> Result<String, CodegenError> {
    let snake = to_snake_case(property);
    if is_identifier(&snake) {
        if syn::parse_str::<syn::Ident>(&snake).is_ok() {
            return Ok(snake);
        }
        let raw = format!("r#{snake}");
        if syn::parse_str::<syn::Ident>(&raw).is_ok() {
            return Ok(raw);
        }
    }
    Err(CodegenError::render(
        Target::Rust,
        owner,
        format!("property '{property}' has no Rust identifier"),
    ))
}

/// Returns the Rust type of one element.
pub(crate) fn element_type(ty: &PropertyType) -> String {
    match ty {
        PropertyType::String | PropertyType::Datetime => "String".to_string(),
        PropertyType::Int => "i64".to_string(),
        PropertyType::Float => "f64".to_string(),
        PropertyType::Bool => "bool".to_string(),
        PropertyType::Complex(name) => name.clone(),
        PropertyType::Other(_) => "Value".to_string(),
    }
}

/// Returns the Rust type of a property slot.
pub(crate) fn field_type(property: &PropertyDescriptor) -> String {
    let element = element_type(&property.ty);
    match (property.container, &property.ty) {
        (Container::Array, _) => format!("Vec<{element}>"),
        (Container::Map, _) => format!("IndexMap<String, {element}>"),
        (Container::Scalar, PropertyType::Complex(_)) => format!("Option<{element}>"),
        (Container::Scalar, _) => element,
    }
}

/// Returns the Rust expression of a default value.
pub(crate) fn default_expr(value: &DefaultValue) -> String {
    match value {
        DefaultValue::EmptyString => "String::new()".to_string(),
        DefaultValue::Zero => "0".to_string(),
        DefaultValue::ZeroFloat => "0.0".to_string(),
        DefaultValue::False => "false".to_string(),
        DefaultValue::ZeroDatetime => "DATETIME_ZERO.to_string()".to_string(),
        DefaultValue::Null => "Value::Null".to_string(),
        DefaultValue::EmptyArray => "Vec::new()".to_string(),
        DefaultValue::EmptyMap => "IndexMap::new()".to_string(),
        DefaultValue::Factory(name) => format!("Some({name}::factory())"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storz_schema::registry_from_yaml;

    #[test]
    fn test_field_ident() {
        assert_eq!(field_ident("S", "createdAt").unwrap(), "created_at");
        assert_eq!(field_ident("S", "type").unwrap(), "r#type");
        assert!(field_ident("S", "self").is_err());
        assert!(field_ident("S", "9lives").is_err());
    }

    #[test]
    fn test_field_types() {
        let tags = PropertyDescriptor::array("tags", PropertyType::String);
        let address = PropertyDescriptor::scalar("address", PropertyType::Complex("Address".into()));
        let contacts = PropertyDescriptor::map("contacts", PropertyType::Complex("Address".into()));
        assert_eq!(field_type(&tags), "Vec<String>");
        assert_eq!(field_type(&address), "Option<Address>");
        assert_eq!(field_type(&contacts), "IndexMap<String, Address>");
    }

    #[test]
    fn test_reserved_type_name() {
        assert!(check_rust_type_name("Meta").is_err());
        assert!(check_rust_type_name("fn").is_err());
        assert!(check_rust_type_name("Account").is_ok());
    }

    #[test]
    fn test_schema_parses() {
        let registry = registry_from_yaml(
            r#"
types:
  - kind: Struct
    name: Spec
    properties:
      - name: id
        type: string
  - kind: Object
    name: Account
    external: Spec
"#,
        )
        .unwrap();
        let options = GeneratorOptions::default();
        let resources: Vec<_> = registry.resources().iter().collect();
        let schema = RustRenderer::new(&options).render_schema(&resources).unwrap();
        assert!(schema.contains(
            "            \"Account\" | \"account\" | \"account/\" => Ok(Box::new(Account::factory())),\n"
        ));
        assert!(syn::parse_file(&schema).is_ok());
    }

    #[test]
    fn test_resource_names() {
        let options = GeneratorOptions::default();
        let renderer = RustRenderer::new(&options);
        let names = renderer.resource_names(&ResourceDescriptor::new("UserA"));
        assert_eq!(
            names,
            [
                "UserA",
                "USER_A_KIND",
                "USER_A_KIND_IDENTITY",
                "user_a_identity",
                "user_a_kind_identity"
            ]
        );
        let other = renderer.resource_names(&ResourceDescriptor::new("User_A"));
        assert!(other.iter().skip(1).eq(names.iter().skip(1)));
    }

    #[test]
    fn test_prelude_parses() {
        let registry = registry_from_yaml("types: []\n").unwrap();
        let options = GeneratorOptions::default();
        let prelude = RustRenderer::new(&options).render_prelude(&registry);
        assert!(prelude.contains("use storz_core::chrono::{DateTime, Utc};\n"));
        assert!(syn::parse_file(&prelude).is_ok());
    }
}
