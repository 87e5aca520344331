//! Rust resource generation.

use super::field_ident;
use crate::common::quote;
use crate::error::CodegenError;
use crate::target::Target;
use storz_schema::naming::{to_screaming_snake_case, to_snake_case};
use storz_schema::{PropertyType, ResourceDescriptor, SchemaRegistry};

/// Generator for one resource type, its constants and identity helpers.
pub struct ResourceGenerator<'a> {
    registry: &'a SchemaRegistry,
    descriptor: &'a ResourceDescriptor,
}

impl<'a> ResourceGenerator<'a> {
    /// Creates a new resource generator.
    #[must_use]
    pub fn new(registry: &'a SchemaRegistry, descriptor: &'a ResourceDescriptor) -> Self {
        Self {
            registry,
            descriptor,
        }
    }

    /// Generates the resource.
    ///
    /// # Errors
    /// Returns `CodegenError::Render` if the primary key path cannot be
    /// resolved to fields.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let primary_key = self.primary_key_expr()?;

        let mut output = String::new();
        output.push_str(&self.generate_struct());
        output.push_str(&self.generate_constants());
        output.push_str(&self.generate_impl());
        output.push_str(&self.generate_identity());
        output.push_str(&self.generate_serializable());
        output.push_str(&self.generate_object(&primary_key));
        if self.descriptor.external.is_some() {
            output.push_str(&format!(
                "\nimpl ExternalHolder for {} {{}}\n",
                self.descriptor.name
            ));
        }
        Ok(output)
    }

    /// Declared sub-objects as `(field, struct name)`.
    fn parts(&self) -> Vec<(&'static str, &'a str)> {
        let descriptor = self.descriptor;
        let mut parts = Vec::with_capacity(2);
        if let Some(external) = &descriptor.external {
            parts.push(("external", external.as_str()));
        }
        if let Some(internal) = &descriptor.internal {
            parts.push(("internal", internal.as_str()));
        }
        parts
    }

    fn const_prefix(&self) -> String {
        to_screaming_snake_case(&self.descriptor.name)
    }

    fn generate_struct(&self) -> String {
        let name = &self.descriptor.name;
        let mut output = String::new();

        output.push_str(&format!("\n/// Generated from object `{name}`.\n"));
        output.push_str("#[derive(Debug, Clone, PartialEq)]\n");
        output.push_str(&format!("pub struct {name} {{\n"));
        output.push_str("    meta: Meta,\n");
        for (field, struct_name) in self.parts() {
            output.push_str(&format!("    {field}: {struct_name},\n"));
        }
        output.push_str("}\n");
        output
    }

    fn generate_constants(&self) -> String {
        let name = &self.descriptor.name;
        let prefix = self.const_prefix();
        format!(
            "\n/// Kind of `{name}` resources.\npub const {prefix}_KIND: &str = {};\n\
             \n/// Identity prefix shared by every `{name}`.\npub const {prefix}_KIND_IDENTITY: &str = {};\n",
            quote(name),
            quote(&self.descriptor.kind_identity())
        )
    }

    fn generate_impl(&self) -> String {
        let name = &self.descriptor.name;
        let prefix = self.const_prefix();
        let mut output = String::new();

        output.push_str(&format!("\nimpl {name} {{\n"));
        output.push_str("    /// Creates a resource with fresh metadata and default fields.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub fn factory() -> Self {\n");
        output.push_str("        Self {\n");
        output.push_str(&format!("            meta: meta_factory({prefix}_KIND),\n"));
        for (field, struct_name) in self.parts() {
            output.push_str(&format!("            {field}: {struct_name}::factory(),\n"));
        }
        output.push_str("        }\n");
        output.push_str("    }\n");

        output.push_str("\n    /// Replaces the metadata.\n");
        output.push_str("    pub fn set_metadata(&mut self, meta: Meta) {\n");
        output.push_str("        self.meta = meta;\n");
        output.push_str("    }\n");

        for (field, struct_name) in self.parts() {
            output.push_str(&format!("\n    /// Returns the {field} fields.\n"));
            output.push_str("    #[must_use]\n");
            output.push_str(&format!("    pub fn {field}(&self) -> &{struct_name} {{\n"));
            output.push_str(&format!("        &self.{field}\n"));
            output.push_str("    }\n");
            output.push_str(&format!(
                "\n    pub fn {field}_mut(&mut self) -> &mut {struct_name} {{\n"
            ));
            output.push_str(&format!("        &mut self.{field}\n"));
            output.push_str("    }\n");
            output.push_str(&format!(
                "\n    pub fn set_{field}(&mut self, value: {struct_name}) {{\n"
            ));
            output.push_str(&format!("        self.{field} = value;\n"));
            output.push_str("    }\n");
        }

        output.push_str("}\n");
        output
    }

    fn generate_identity(&self) -> String {
        let snake = to_snake_case(&self.descriptor.name);
        let prefix = self.const_prefix();
        let mut output = String::new();

        output.push_str(&format!(
            "\n/// Builds the identity of the `{}` with the given primary key.\n",
            self.descriptor.name
        ));
        output.push_str("#[must_use]\n");
        output.push_str(&format!(
            "pub fn {snake}_identity(primary_key: &str) -> ObjectIdentity {{\n"
        ));
        output.push_str(&format!(
            "    ObjectIdentity::new(format!(\"{{{prefix}_KIND_IDENTITY}}{{primary_key}}\"))\n"
        ));
        output.push_str("}\n");

        output.push_str("\n#[must_use]\n");
        output.push_str(&format!("pub fn {snake}_kind_identity() -> ObjectIdentity {{\n"));
        output.push_str(&format!("    ObjectIdentity::new({prefix}_KIND_IDENTITY)\n"));
        output.push_str("}\n");
        output
    }

    fn generate_serializable(&self) -> String {
        let name = &self.descriptor.name;
        let mut fields = vec![("metadata", "meta")];
        fields.extend(self.parts().into_iter().map(|(field, _)| (field, field)));
        let mut output = String::new();

        output.push_str(&format!("\nimpl Serializable for {name} {{\n"));
        output.push_str("    fn to_dict(&self) -> Dict {\n");
        output.push_str("        let mut data = Dict::new();\n");
        for (key, field) in &fields {
            output.push_str(&format!(
                "        data.insert({}.to_string(), Value::Object(Serializable::to_dict(&self.{field})));\n",
                quote(key)
            ));
        }
        output.push_str("        data\n");
        output.push_str("    }\n\n");

        output.push_str("    fn from_dict(&mut self, data: &Dict) -> Result<()> {\n");
        output.push_str("        for (key, raw) in data {\n");
        output.push_str("            if raw.is_null() {\n");
        output.push_str("                continue;\n");
        output.push_str("            }\n");
        output.push_str("            match key.as_str() {\n");
        for (key, field) in &fields {
            output.push_str(&format!(
                "                {} => Serializable::from_dict(&mut self.{field}, convert::dict_value(key, raw)?)?,\n",
                quote(key)
            ));
        }
        output.push_str("                _ => {}\n");
        output.push_str("            }\n");
        output.push_str("        }\n");
        output.push_str("        Ok(())\n");
        output.push_str("    }\n");
        output.push_str("}\n");
        output
    }

    fn generate_object(&self, primary_key: &str) -> String {
        let name = &self.descriptor.name;
        let mut output = String::new();

        output.push_str(&format!("\nimpl Object for {name} {{\n"));
        output.push_str("    fn metadata(&self) -> &Meta {\n");
        output.push_str("        &self.meta\n");
        output.push_str("    }\n\n");
        output.push_str("    fn metadata_mut(&mut self) -> &mut Meta {\n");
        output.push_str("        &mut self.meta\n");
        output.push_str("    }\n\n");
        output.push_str("    fn clone_object(&self) -> Result<Box<dyn Object>> {\n");
        output.push_str("        let mut copy = Self::factory();\n");
        output.push_str("        copy.from_json(&self.to_json()?)?;\n");
        output.push_str("        Ok(Box::new(copy))\n");
        output.push_str("    }\n\n");
        output.push_str("    fn primary_key(&self) -> String {\n");
        output.push_str(&format!("        {primary_key}\n"));
        output.push_str("    }\n");
        output.push_str("}\n");
        output
    }

    /// Builds the `primary_key` body.
    ///
    /// Nested struct fields are optional, so paths through them read through
    /// `Option` and yield an empty key when a link is missing.
    fn primary_key_expr(&self) -> Result<String, CodegenError> {
        let descriptor = self.descriptor;
        let rule = &descriptor.primary_key;
        let fail = |message: String| CodegenError::render(Target::Rust, &descriptor.name, message);

        let mut owner = match rule.root() {
            "metadata" => {
                return match rule.tail() {
                    [field] if field == "identity" => Ok("self.meta.identity().to_string()".into()),
                    [field] if field == "kind" => Ok("self.meta.kind().to_string()".into()),
                    [field] if field == "revision" => Ok("self.meta.revision().to_string()".into()),
                    _ => Err(fail(format!("primary key '{rule}' is not a metadata field"))),
                };
            }
            "external" => descriptor.external.as_deref(),
            "internal" => descriptor.internal.as_deref(),
            _ => None,
        }
        .ok_or_else(|| fail(format!("primary key '{rule}' is not addressable")))?;

        // Segments up to the first optional link are plain field access.
        let direct = format!("self.{}", rule.root());
        let mut optional: Option<String> = None;

        let tail = rule.tail();
        for (pos, segment) in tail.iter().enumerate() {
            let property = self
                .registry
                .get_struct(owner)
                .and_then(|s| s.property(segment))
                .ok_or_else(|| fail(format!("struct {owner} has no property {segment}")))?;
            let ident = field_ident(owner, segment)?;
            let last = pos + 1 == tail.len();

            if last {
                let read = |place: &str| match &property.ty {
                    PropertyType::String | PropertyType::Datetime => format!("{place}.clone()"),
                    PropertyType::Int | PropertyType::Float | PropertyType::Bool => {
                        format!("{place}.to_string()")
                    }
                    PropertyType::Other(_) => format!("convert::key_string(&{place})"),
                    PropertyType::Complex(_) => format!("{place}.to_string()"),
                };
                return Ok(match optional {
                    None => read(&format!("{direct}.{ident}")),
                    Some(chain) => format!(
                        "{chain}.map(|v| {}).unwrap_or_default()",
                        read(&format!("v.{ident}"))
                    ),
                });
            }

            let PropertyType::Complex(next) = &property.ty else {
                return Err(fail(format!("property {segment} has no fields")));
            };
            optional = Some(match optional {
                None => format!("{direct}.{ident}.as_ref()"),
                Some(chain) => format!("{chain}.and_then(|v| v.{ident}.as_ref())"),
            });
            owner = next;
        }

        Err(fail(format!("primary key '{rule}' names no property")))
    }
}
