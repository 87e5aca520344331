//! Python resource class generation.

use crate::common::{primary_key_chain, quote};
use crate::error::CodegenError;
use crate::target::Target;
use storz_schema::{ResourceDescriptor, SchemaRegistry};

const NOT_IMPLEMENTED: &str = "        raise Exception(\"not implemented\")\n";

/// Generator for one resource class and its identity helpers.
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

    /// Generates the resource class, factory and identity helpers.
    ///
    /// # Errors
    /// Returns `CodegenError::Render` if the primary key is not addressable.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let chain = primary_key_chain(Target::Python, self.registry, self.descriptor)?;

        let mut output = String::new();
        output.push_str(&self.generate_interface());
        output.push_str(&self.generate_factory());
        output.push_str(&self.generate_implementation(&chain));
        output.push_str(&self.generate_identity());
        Ok(output)
    }

    /// Declared sub-objects as `(dict key, accessor, struct name)`.
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

        output.push_str(&format!("\n\nclass {name}({base}):\n"));
        output.push_str("    def __init__(self):\n");
        output.push_str(
            "        raise Exception(\"cannot initialize like this. use the factory method\")\n",
        );
        for signature in [
            "ToDict(self) -> dict",
            "FromDict(self, data: dict)",
            "ToJson(self) -> str",
            "FromJson(self, jstr: str)",
            "Clone(self)",
            "Metadata(self)",
            "PrimaryKey(self) -> str",
        ] {
            output.push_str(&format!("\n    def {signature}:\n"));
            output.push_str(NOT_IMPLEMENTED);
        }
        for (_, accessor, struct_name) in self.parts() {
            output.push_str(&format!("\n    def {accessor}(self) -> {struct_name}:\n"));
            output.push_str(NOT_IMPLEMENTED);
        }

        output
    }

    fn generate_factory(&self) -> String {
        let name = &self.descriptor.name;
        format!("\n\ndef {name}Factory() -> {name}:\n    return _{name}()\n")
    }

    fn generate_implementation(&self, chain: &[String]) -> String {
        let name = &self.descriptor.name;
        let mut output = String::new();

        output.push_str(&format!("\n\nclass _{name}({name}):\n"));
        output.push_str("    def __init__(self):\n");
        output.push_str(&format!(
            "        self.meta_ = store.MetaFactory({})\n",
            quote(name)
        ));
        for (key, _, struct_name) in self.parts() {
            output.push_str(&format!("        self.{key}_ = {struct_name}Factory()\n"));
        }

        output.push_str("\n    def Metadata(self):\n");
        output.push_str("        return self.meta_\n");
        output.push_str("\n    def SetMetadata(self, val):\n");
        output.push_str("        self.meta_ = val\n");
        for (key, accessor, struct_name) in self.parts() {
            output.push_str(&format!("\n    def {accessor}(self) -> {struct_name}:\n"));
            output.push_str(&format!("        return self.{key}_\n"));
            output.push_str(&format!("\n    def Set{accessor}(self, val: {struct_name}):\n"));
            output.push_str(&format!("        self.{key}_ = val\n"));
        }

        output.push_str("\n    def ToJson(self) -> str:\n");
        output.push_str("        return json.dumps(self.ToDict())\n");
        output.push_str("\n    def FromJson(self, jstr: str):\n");
        output.push_str("        self.FromDict(json.loads(jstr))\n");

        output.push_str("\n    def ToDict(self) -> dict:\n");
        output.push_str("        data = {}\n");
        output.push_str("        data[\"metadata\"] = self.meta_.ToDict()\n");
        for (key, _, _) in self.parts() {
            output.push_str(&format!("        data[\"{key}\"] = self.{key}_.ToDict()\n"));
        }
        output.push_str("        return data\n");

        output.push_str("\n    def FromDict(self, data: dict):\n");
        output.push_str("        for key, rawValue in data.items():\n");
        output.push_str("            if rawValue is None:\n");
        output.push_str("                continue\n");
        output.push_str("            if key == \"metadata\":\n");
        output.push_str("                self.meta_.FromDict(rawValue)\n");
        for (key, _, _) in self.parts() {
            output.push_str(&format!("            elif key == \"{key}\":\n"));
            output.push_str(&format!("                self.{key}_.FromDict(rawValue)\n"));
        }

        output.push_str("\n    def Clone(self):\n");
        output.push_str(&format!("        ret = {name}Factory()\n"));
        output.push_str("        ret.FromJson(self.ToJson())\n");
        output.push_str("        return ret\n");

        let caller: Vec<String> = chain.iter().map(|accessor| format!("{accessor}()")).collect();
        output.push_str("\n    def PrimaryKey(self) -> str:\n");
        output.push_str(&format!("        return str(self.{})\n", caller.join(".")));

        output
    }

    fn generate_identity(&self) -> String {
        let name = &self.descriptor.name;
        let kind_identity = quote(&self.descriptor.kind_identity());
        let mut output = String::new();

        output.push_str(&format!(
            "\n\ndef {name}Identity(pkey: str) -> store.ObjectIdentity:\n"
        ));
        output.push_str(&format!(
            "    return store.ObjectIdentity({kind_identity} + pkey)\n"
        ));
        output.push_str(&format!(
            "\n\n{name}KindIdentity = store.ObjectIdentity({kind_identity})\n"
        ));
        output.push_str(&format!("{name}Kind = {}\n", quote(name)));

        output
    }
}
