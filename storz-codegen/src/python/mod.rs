//! Python code generation.
//!
//! Every class is emitted as a public interface whose constructor and
//! methods raise, a `{Name}Factory()` function, and a private `_{Name}`
//! implementation returned by the factory.

pub mod resources;
pub mod structs;

pub use resources::ResourceGenerator;
pub use structs::StructGenerator;

use crate::common::{
    banner, check_struct_accessors, check_type_name, class_names, quote, resource_class_names,
};
use crate::error::CodegenError;
use crate::generator::GeneratorOptions;
use crate::target::{Renderer, Target};
use storz_schema::{
    Container, DefaultValue, PropertyDescriptor, PropertyType, ResourceDescriptor, SchemaRegistry,
    StructDescriptor,
};

/// Accessors that would turn into Python keywords.
const PYTHON_KEYWORD_ACCESSORS: [&str; 3] = ["True", "False", "None"];

/// Renderer for Python modules.
pub struct PythonRenderer<'a> {
    options: &'a GeneratorOptions,
}

impl<'a> PythonRenderer<'a> {
    /// Creates a new Python renderer.
    #[must_use]
    pub fn new(options: &'a GeneratorOptions) -> Self {
        Self { options }
    }
}

impl Renderer for PythonRenderer<'_> {
    fn target(&self) -> Target {
        Target::Python
    }

    fn render_prelude(&self, _registry: &SchemaRegistry) -> String {
        let mut output = banner("#", self.options.banner());
        output.push_str("# flake8: noqa\n\n");
        output.push_str("import json\n");
        output.push_str("from datetime import datetime\n\n");
        output.push_str(&format!(
            "from {}.store import store\n",
            self.options.python_runtime
        ));
        output
    }

    fn render_struct(
        &self,
        _registry: &SchemaRegistry,
        descriptor: &StructDescriptor,
    ) -> Result<String, CodegenError> {
        check_struct_accessors(Target::Python, descriptor, &PYTHON_KEYWORD_ACCESSORS)?;
        Ok(StructGenerator::new(descriptor).generate())
    }

    fn render_resource(
        &self,
        registry: &SchemaRegistry,
        descriptor: &ResourceDescriptor,
    ) -> Result<String, CodegenError> {
        check_type_name(Target::Python, &descriptor.name)?;
        ResourceGenerator::new(registry, descriptor).generate()
    }

    fn struct_names(&self, descriptor: &StructDescriptor) -> Vec<String> {
        class_names(&descriptor.name)
    }

    fn resource_names(&self, descriptor: &ResourceDescriptor) -> Vec<String> {
        resource_class_names(&descriptor.name)
    }

    fn render_schema(&self, resources: &[&ResourceDescriptor]) -> Result<String, CodegenError> {
        let mut output = String::new();

        output.push_str("\n\nclass _Schema(store.SchemaHolder):\n");
        output.push_str("    def __init__(self, objects):\n");
        output.push_str("        self.objects = objects\n\n");
        output.push_str("    def ObjectForKind(self, kind: str) -> store.Object:\n");
        for resource in resources {
            let aliases: Vec<String> = resource.kind_aliases().iter().map(|a| quote(a)).collect();
            output.push_str(&format!("        if kind in ({}):\n", aliases.join(", ")));
            output.push_str(&format!("            return {}Factory()\n", resource.name));
        }
        output.push_str("        raise Exception(\"object does not exist\")\n\n");
        output.push_str("    def Types(self) -> list:\n");
        output.push_str("        return list(self.objects)\n\n\n");

        output.push_str("def Schema() -> store.SchemaHolder:\n");
        output.push_str("    objects = [\n");
        for resource in resources {
            output.push_str(&format!("        {},\n", quote(&resource.name)));
        }
        output.push_str("    ]\n");
        output.push_str("    return _Schema(objects)\n");

        Ok(output)
    }
}

/// Returns the type hint of a property.
pub(crate) fn type_hint(property: &PropertyDescriptor) -> String {
    match property.container {
        Container::Array => "list".to_string(),
        Container::Map => "dict".to_string(),
        Container::Scalar => match &property.ty {
            PropertyType::String => "str".to_string(),
            PropertyType::Int => "int".to_string(),
            PropertyType::Float => "float".to_string(),
            PropertyType::Bool => "bool".to_string(),
            PropertyType::Datetime => "datetime".to_string(),
            PropertyType::Complex(name) => name.clone(),
            PropertyType::Other(_) => "object".to_string(),
        },
    }
}

/// Returns the Python expression of a default value.
pub(crate) fn default_expr(value: &DefaultValue) -> String {
    match value {
        DefaultValue::EmptyString => "\"\"".to_string(),
        DefaultValue::Zero => "0".to_string(),
        DefaultValue::ZeroFloat => "0.0".to_string(),
        DefaultValue::False => "False".to_string(),
        DefaultValue::ZeroDatetime => quote(storz_core::DATETIME_ZERO),
        DefaultValue::Null => "None".to_string(),
        DefaultValue::EmptyArray => "[]".to_string(),
        DefaultValue::EmptyMap => "{}".to_string(),
        DefaultValue::Factory(name) => format!("{name}Factory()"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storz_schema::registry_from_yaml;

    const YAML: &str = r#"
types:
  - kind: Struct
    name: UserSpec
    properties:
      - name: name
        type: string
  - kind: Object
    name: User
    external: UserSpec
    primarykey: external.name
"#;

    #[test]
    fn test_schema_lookup_covers_aliases() {
        let registry = registry_from_yaml(YAML).unwrap();
        let options = GeneratorOptions::default();
        let renderer = PythonRenderer::new(&options);
        let resources: Vec<_> = registry.resources().iter().collect();
        let schema = renderer.render_schema(&resources).unwrap();

        assert!(schema.contains("if kind in (\"User\", \"user\", \"user/\"):"));
        assert!(schema.contains("return UserFactory()"));
        assert!(schema.contains("raise Exception(\"object does not exist\")"));
        assert!(schema.contains("        \"User\",\n"));
    }

    #[test]
    fn test_prelude_uses_runtime_root() {
        let registry = registry_from_yaml(YAML).unwrap();
        let options = GeneratorOptions::default().with_python_runtime("acme");
        let prelude = PythonRenderer::new(&options).render_prelude(&registry);
        assert!(prelude.starts_with("# Code generated by storz. DO NOT EDIT.\n"));
        assert!(prelude.contains("from acme.store import store\n"));
    }

    #[test]
    fn test_keyword_accessor_rejected() {
        let registry = registry_from_yaml(YAML).unwrap();
        let options = GeneratorOptions::default();
        let descriptor = StructDescriptor::new("Flags")
            .with_property(PropertyDescriptor::scalar("none", PropertyType::Bool));
        let result = PythonRenderer::new(&options).render_struct(&registry, &descriptor);
        assert!(matches!(result, Err(CodegenError::Render { .. })));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(default_expr(&DefaultValue::False), "False");
        assert_eq!(default_expr(&DefaultValue::Factory("A".into())), "AFactory()");
        assert_eq!(
            default_expr(&DefaultValue::ZeroDatetime),
            "\"0001-01-01T00:00:00.000000Z\""
        );
    }
}
