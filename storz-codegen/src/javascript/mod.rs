//! JavaScript code generation.
//!
//! Emits a CommonJS module. Public classes refuse construction unless
//! called with a module-private token, which only the `{Name}Factory()`
//! functions hold.

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
use storz_schema::{DefaultValue, ResourceDescriptor, SchemaRegistry, StructDescriptor};

pub(crate) const CONSTRUCTOR_GUARD: &str = "        if (token !== factoryToken) {\n            \
     throw new Error(\"cannot initialize like this. use the factory method\");\n        }\n";

/// Renderer for JavaScript modules.
pub struct JavaScriptRenderer<'a> {
    options: &'a GeneratorOptions,
}

impl<'a> JavaScriptRenderer<'a> {
    /// Creates a new JavaScript renderer.
    #[must_use]
    pub fn new(options: &'a GeneratorOptions) -> Self {
        Self { options }
    }
}

impl Renderer for JavaScriptRenderer<'_> {
    fn target(&self) -> Target {
        Target::JavaScript
    }

    fn render_prelude(&self, _registry: &SchemaRegistry) -> String {
        let mut output = banner("//", self.options.banner());
        output.push_str("\"use strict\";\n\n");
        output.push_str(&format!(
            "const store = require({});\n\n",
            quote(&self.options.javascript_runtime)
        ));
        output.push_str("const factoryToken = Symbol(\"factory\");\n");
        output
    }

    fn render_struct(
        &self,
        _registry: &SchemaRegistry,
        descriptor: &StructDescriptor,
    ) -> Result<String, CodegenError> {
        check_struct_accessors(Target::JavaScript, descriptor, &[])?;
        Ok(StructGenerator::new(descriptor).generate())
    }

    fn render_resource(
        &self,
        registry: &SchemaRegistry,
        descriptor: &ResourceDescriptor,
    ) -> Result<String, CodegenError> {
        check_type_name(Target::JavaScript, &descriptor.name)?;
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

        output.push_str("\nclass _Schema extends store.SchemaHolder {\n");
        output.push_str("    constructor(objects) {\n");
        output.push_str("        super();\n");
        output.push_str("        this.objects = objects;\n");
        output.push_str("    }\n\n");
        output.push_str("    ObjectForKind(kind) {\n");
        output.push_str("        switch (kind) {\n");
        for resource in resources {
            for alias in resource.kind_aliases() {
                output.push_str(&format!("            case {}:\n", quote(&alias)));
            }
            output.push_str(&format!("                return {}Factory();\n", resource.name));
        }
        output.push_str("            default:\n");
        output.push_str("                throw new Error(\"object does not exist\");\n");
        output.push_str("        }\n");
        output.push_str("    }\n\n");
        output.push_str("    Types() {\n");
        output.push_str("        return this.objects.slice();\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output.push_str("function Schema() {\n");
        output.push_str("    return new _Schema([\n");
        for resource in resources {
            output.push_str(&format!("        {},\n", quote(&resource.name)));
        }
        output.push_str("    ]);\n");
        output.push_str("}\n");

        Ok(output)
    }

    fn render_epilogue(
        &self,
        structs: &[&StructDescriptor],
        resources: &[&ResourceDescriptor],
    ) -> String {
        let mut output = String::from("\nmodule.exports = {\n");
        for descriptor in structs {
            output.push_str(&format!("    {0},\n    {0}Factory,\n", descriptor.name));
        }
        for descriptor in resources {
            output.push_str(&format!(
                "    {0},\n    {0}Factory,\n    {0}Identity,\n    {0}KindIdentity,\n    {0}Kind,\n",
                descriptor.name
            ));
        }
        output.push_str("    Schema,\n");
        output.push_str("};\n");
        output
    }
}

/// Returns the JavaScript expression of a default value.
pub(crate) fn default_expr(value: &DefaultValue) -> String {
    match value {
        DefaultValue::EmptyString => "\"\"".to_string(),
        DefaultValue::Zero => "0".to_string(),
        DefaultValue::ZeroFloat => "0.0".to_string(),
        DefaultValue::False => "false".to_string(),
        DefaultValue::ZeroDatetime => quote(storz_core::DATETIME_ZERO),
        DefaultValue::Null => "null".to_string(),
        DefaultValue::EmptyArray => "[]".to_string(),
        DefaultValue::EmptyMap => "{}".to_string(),
        DefaultValue::Factory(name) => format!("{name}Factory()"),
    }
}
