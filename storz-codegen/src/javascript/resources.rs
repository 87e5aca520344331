//! JavaScript resource class generation.

use super::CONSTRUCTOR_GUARD;
use crate::common::{primary_key_chain, quote};
use crate::error::CodegenError;
use crate::target::Target;
use storz_schema::{ResourceDescriptor, SchemaRegistry};

/// Generator for one resource class and its identity bindings.
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

    /// Generates the resource class, factory and identity bindings.
    ///
    /// # Errors
    /// Returns `CodegenError::Render` if the primary key is not addressable.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let chain = primary_key_chain(Target::JavaScript, self.registry, self.descriptor)?;

        let mut output = String::new();
        output.push_str(&self.generate_interface());
        output.push_str(&self.generate_factory());
        output.push_str(&self.generate_implementation(&chain));
        output.push_str(&self.generate_identity());
        Ok(output)
    }

    fn parts(&self) -> Vec<(&'static str, &'static str, &'a str)> {
        let descriptor = self.descriptor;
        let mut parts = Vec::with_capacity(2);
        if let Some(external) = &descriptor.external {
            parts.push(("external", "External", external.as_str()));
        }
        if let Some(internal) = &descriptor.internal {
            parts.push(("internal", "Internal", internal.as_str()));
        }
        parts
    }

    fn generate_interface(&self) -> String {
        let name = &self.descriptor.name;
        let base = if self.descriptor.external.is_some() {
            "store.ExternalHolder"
        } else {
            "store.Object"
        };
        let mut output = String::new();

        output.push_str(&format!("\nclass {name} extends {base} {{\n"));
        output.push_str("    constructor(token) {\n");
        output.push_str("        super();\n");
        output.push_str(CONSTRUCTOR_GUARD);
        output.push_str("    }\n\n");
        for method in [
            "ToDict()",
            "FromDict(data)",
            "ToJson()",
            "FromJson(jstr)",
            "Clone()",
            "Metadata()",
            "PrimaryKey()",
        ] {
            output.push_str(&format!(
                "    {method} {{ throw new Error(\"not implemented\"); }}\n"
            ));
        }
        for (_, accessor, _) in self.parts() {
            output.push_str(&format!(
                "    {accessor}() {{ throw new Error(\"not implemented\"); }}\n"
            ));
        }
        output.push_str("}\n");

        output
    }

    fn generate_factory(&self) -> String {
        let name = &self.descriptor.name;
        format!("\nfunction {name}Factory() {{\n    return new _{name}(factoryToken);\n}}\n")
    }

    fn generate_implementation(&self, chain: &[String]) -> String {
        let name = &self.descriptor.name;
        let mut output = String::new();

        output.push_str(&format!("\nclass _{name} extends {name} {{\n"));
        output.push_str("    constructor(token) {\n");
        output.push_str("        super(token);\n");
        output.push_str(&format!(
            "        this.meta_ = store.MetaFactory({});\n",
            quote(name)
        ));
        for (key, _, struct_name) in self.parts() {
            output.push_str(&format!("        this.{key}_ = {struct_name}Factory();\n"));
        }
        output.push_str("    }\n");

        output.push_str("\n    Metadata() { return this.meta_; }\n");
        output.push_str("    SetMetadata(val) { this.meta_ = val; }\n");
        for (key, accessor, _) in self.parts() {
            output.push_str(&format!("    {accessor}() {{ return this.{key}_; }}\n"));
            output.push_str(&format!("    Set{accessor}(val) {{ this.{key}_ = val; }}\n"));
        }

        output.push_str("\n    ToJson() {\n");
        output.push_str("        return JSON.stringify(this.ToDict());\n");
        output.push_str("    }\n");
        output.push_str("\n    FromJson(jstr) {\n");
        output.push_str("        this.FromDict(JSON.parse(jstr));\n");
        output.push_str("    }\n");

        output.push_str("\n    ToDict() {\n");
        output.push_str("        const data = {};\n");
        output.push_str("        data[\"metadata\"] = this.meta_.ToDict();\n");
        for (key, _, _) in self.parts() {
            output.push_str(&format!("        data[\"{key}\"] = this.{key}_.ToDict();\n"));
        }
        output.push_str("        return data;\n");
        output.push_str("    }\n");

        output.push_str("\n    FromDict(data) {\n");
        output.push_str("        for (const key of Object.keys(data)) {\n");
        output.push_str("            const rawValue = data[key];\n");
        output.push_str("            if (rawValue === null || rawValue === undefined) continue;\n\n");
        output.push_str("            if (key === \"metadata\") {\n");
        output.push_str("                this.meta_.FromDict(rawValue);\n");
        for (key, _, _) in self.parts() {
            output.push_str(&format!("            }} else if (key === \"{key}\") {{\n"));
            output.push_str(&format!("                this.{key}_.FromDict(rawValue);\n"));
        }
        output.push_str("            }\n");
        output.push_str("        }\n");
        output.push_str("    }\n");

        output.push_str("\n    Clone() {\n");
        output.push_str(&format!("        const ret = {name}Factory();\n"));
        output.push_str("        ret.FromJson(this.ToJson());\n");
        output.push_str("        return ret;\n");
        output.push_str("    }\n");

        let caller: Vec<String> = chain.iter().map(|accessor| format!("{accessor}()")).collect();
        output.push_str("\n    PrimaryKey() {\n");
        output.push_str(&format!("        return String(this.{});\n", caller.join(".")));
        output.push_str("    }\n");
        output.push_str("}\n");

        output
    }

    fn generate_identity(&self) -> String {
        let name = &self.descriptor.name;
        let kind_identity = quote(&self.descriptor.kind_identity());
        let mut output = String::new();

        output.push_str(&format!("\nfunction {name}Identity(pkey) {{\n"));
        output.push_str(&format!(
            "    return new store.ObjectIdentity({kind_identity} + pkey);\n"
        ));
        output.push_str("}\n\n");
        output.push_str(&format!(
            "const {name}KindIdentity = new store.ObjectIdentity({kind_identity});\n"
        ));
        output.push_str(&format!("const {name}Kind = {};\n", quote(name)));

        output
    }
}
