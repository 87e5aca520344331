//! Emission targets and the renderer seam.

use crate::error::CodegenError;
use std::fmt;
use std::str::FromStr;
use storz_schema::{ResourceDescriptor, SchemaRegistry, StructDescriptor};

/// Target language of generated sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    /// Python module.
    Python,
    /// CommonJS module.
    JavaScript,
    /// Rust module built on `storz-core`.
    Rust,
}

impl Target {
    /// Every supported target, in emission order.
    pub const ALL: [Target; 3] = [Target::Python, Target::JavaScript, Target::Rust];

    /// Returns the target name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::Rust => "rust",
        }
    }

    /// Returns the default output file name.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Python => "model.py",
            Self::JavaScript => "model.js",
            Self::Rust => "model.rs",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(Self::Python),
            "javascript" | "js" => Ok(Self::JavaScript),
            "rust" | "rs" => Ok(Self::Rust),
            other => Err(CodegenError::generation(format!("unknown target '{other}'"))),
        }
    }
}

/// Per-target source renderer.
///
/// The generator calls the prelude once, then each struct in dependency
/// order, each resource in declaration order, the schema and finally the
/// epilogue. Only descriptors that rendered successfully are passed to the
/// schema and epilogue.
pub trait Renderer {
    /// Returns the target this renderer emits.
    fn target(&self) -> Target;

    /// Renders the file header and imports.
    fn render_prelude(&self, registry: &SchemaRegistry) -> String;

    /// Renders one struct.
    ///
    /// # Errors
    /// Returns `CodegenError::Render` if the struct cannot be expressed in
    /// the target language.
    fn render_struct(
        &self,
        registry: &SchemaRegistry,
        descriptor: &StructDescriptor,
    ) -> Result<String, CodegenError>;

    /// Renders one resource.
    ///
    /// # Errors
    /// Returns `CodegenError::Render` if the resource cannot be expressed in
    /// the target language.
    fn render_resource(
        &self,
        registry: &SchemaRegistry,
        descriptor: &ResourceDescriptor,
    ) -> Result<String, CodegenError>;

    /// Returns the module-level names a struct binds in the generated file.
    ///
    /// The generator rejects a descriptor that would bind a name already
    /// bound by an earlier one.
    fn struct_names(&self, descriptor: &StructDescriptor) -> Vec<String>;

    /// Returns the module-level names a resource binds in the generated file.
    fn resource_names(&self, descriptor: &ResourceDescriptor) -> Vec<String>;

    /// Renders the schema registry over the given resources.
    ///
    /// # Errors
    /// Returns `CodegenError::Render` if the schema cannot be rendered.
    fn render_schema(&self, resources: &[&ResourceDescriptor]) -> Result<String, CodegenError>;

    /// Renders trailing declarations such as module exports.
    fn render_epilogue(
        &self,
        _structs: &[&StructDescriptor],
        _resources: &[&ResourceDescriptor],
    ) -> String {
        String::new()
    }

    /// Post-processes the assembled file.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` if the assembled file is invalid.
    fn finish(&self, source: String) -> Result<String, CodegenError> {
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_parse() {
        assert_eq!("py".parse::<Target>().unwrap(), Target::Python);
        assert_eq!("JavaScript".parse::<Target>().unwrap(), Target::JavaScript);
        assert_eq!("rust".parse::<Target>().unwrap(), Target::Rust);
        assert!("cobol".parse::<Target>().is_err());
    }

    #[test]
    fn test_target_file_names() {
        let names: Vec<_> = Target::ALL.iter().map(|t| t.file_name()).collect();
        assert_eq!(names, ["model.py", "model.js", "model.rs"]);
    }
}
