//! Emission engine.
//!
//! The generator walks a [`SchemaRegistry`] once per target and hands every
//! descriptor to that target's [`Renderer`]. A descriptor that fails to
//! render is left out of the output together with everything that depends
//! on it; the rest of the file is still emitted.

use crate::error::CodegenError;
use crate::javascript::JavaScriptRenderer;
use crate::python::PythonRenderer;
use crate::rust::RustRenderer;
use crate::target::{Renderer, Target};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use storz_schema::{ResourceDescriptor, SchemaRegistry, StructDescriptor};

/// Banner written at the top of every generated file by default.
pub const DEFAULT_BANNER: &str = "Code generated by storz. DO NOT EDIT.";

/// Options controlling a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Targets emitted by [`Generator::generate_all`].
    pub targets: Vec<Target>,
    /// Package that provides `store` to generated Python.
    pub python_runtime: String,
    /// Module required as `store` by generated JavaScript.
    pub javascript_runtime: String,
    /// Crate path of the runtime used by generated Rust.
    pub rust_runtime: String,
    /// Banner replacing [`DEFAULT_BANNER`].
    pub header: Option<String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            targets: Target::ALL.to_vec(),
            python_runtime: "pystorz".to_string(),
            javascript_runtime: "pystorz/store".to_string(),
            rust_runtime: "storz_core".to_string(),
            header: None,
        }
    }
}

impl GeneratorOptions {
    /// Sets the emitted targets.
    #[must_use]
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = Target>) -> Self {
        self.targets = targets.into_iter().collect();
        self
    }

    /// Sets the Python runtime package.
    #[must_use]
    pub fn with_python_runtime(mut self, package: impl Into<String>) -> Self {
        self.python_runtime = package.into();
        self
    }

    /// Sets the JavaScript runtime module.
    #[must_use]
    pub fn with_javascript_runtime(mut self, module: impl Into<String>) -> Self {
        self.javascript_runtime = module.into();
        self
    }

    /// Sets the Rust runtime crate path.
    #[must_use]
    pub fn with_rust_runtime(mut self, path: impl Into<String>) -> Self {
        self.rust_runtime = path.into();
        self
    }

    /// Sets the banner. Multi-line banners are emitted one comment per line.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Returns the banner text.
    #[must_use]
    pub fn banner(&self) -> &str {
        self.header.as_deref().unwrap_or(DEFAULT_BANNER)
    }
}

/// Source text generated for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    /// Target language.
    pub target: Target,
    /// Output file name.
    pub file_name: String,
    /// Generated text.
    pub content: String,
}

/// Outcome of an isolated generation run.
#[derive(Debug)]
pub struct GenerationReport {
    /// Source covering every descriptor that rendered.
    pub source: GeneratedSource,
    /// Per-descriptor failures, in emission order.
    pub failures: Vec<CodegenError>,
}

impl GenerationReport {
    /// Returns true if every descriptor rendered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Converts the report into the source, failing if anything was left out.
    ///
    /// # Errors
    /// Returns `CodegenError::Descriptors` with every isolated failure.
    pub fn into_result(self) -> Result<GeneratedSource, CodegenError> {
        if self.failures.is_empty() {
            Ok(self.source)
        } else {
            Err(CodegenError::Descriptors(self.failures))
        }
    }
}

/// Module-level names bound so far in one generated file, with the
/// descriptor that bound each.
#[derive(Debug, Default)]
struct NameClaims {
    owners: HashMap<String, String>,
}

impl NameClaims {
    fn check(&self, target: Target, descriptor: &str, names: &[String]) -> Result<(), CodegenError> {
        match names.iter().find_map(|name| Some((name, self.owners.get(name)?))) {
            Some((name, owner)) => Err(CodegenError::render(
                target,
                descriptor,
                format!("emits {name}, which {owner} already emits"),
            )),
            None => Ok(()),
        }
    }

    fn claim(&mut self, descriptor: &str, names: Vec<String>) {
        for name in names {
            self.owners.insert(name, descriptor.to_string());
        }
    }

    fn release(&mut self, descriptor: &str) {
        self.owners.retain(|_, owner| owner != descriptor);
    }
}

/// Model code generator.
pub struct Generator<'a> {
    registry: &'a SchemaRegistry,
    options: GeneratorOptions,
}

impl<'a> Generator<'a> {
    /// Creates a new generator with default options.
    #[must_use]
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self::with_options(registry, GeneratorOptions::default())
    }

    /// Creates a new generator with the given options.
    #[must_use]
    pub fn with_options(registry: &'a SchemaRegistry, options: GeneratorOptions) -> Self {
        Self { registry, options }
    }

    /// Returns the generation options.
    #[must_use]
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    fn renderer(&self, target: Target) -> Box<dyn Renderer + '_> {
        match target {
            Target::Python => Box::new(PythonRenderer::new(&self.options)),
            Target::JavaScript => Box::new(JavaScriptRenderer::new(&self.options)),
            Target::Rust => Box::new(RustRenderer::new(&self.options)),
        }
    }

    /// Generates one target, isolating per-descriptor failures.
    ///
    /// A struct is skipped when it, or a struct it references, fails to
    /// render. A resource is skipped when it fails or when its external or
    /// internal struct was skipped. A descriptor is also skipped when it
    /// would bind a module-level name that an earlier descriptor already
    /// bound.
    ///
    /// # Errors
    /// Returns an error only when the file as a whole cannot be produced,
    /// i.e. when the schema or the final assembly fails.
    pub fn generate_isolated(&self, target: Target) -> Result<GenerationReport, CodegenError> {
        let registry = self.registry;
        let renderer = self.renderer(target);
        tracing::info!(
            "generating {} model: {} structs, {} resources",
            target,
            registry.structs().len(),
            registry.resources().len()
        );

        let mut output = renderer.render_prelude(registry);
        let mut failures = Vec::new();
        let mut failed: HashSet<&str> = HashSet::new();
        let mut claims = NameClaims::default();

        let mut rendered: Vec<(&StructDescriptor, String)> = Vec::new();
        for descriptor in registry.structs_in_dependency_order() {
            let blocked = descriptor
                .dependencies()
                .into_iter()
                .find(|dep| failed.contains(dep));
            let names = renderer.struct_names(descriptor);
            let result = match blocked {
                Some(dep) => Err(CodegenError::render(
                    target,
                    &descriptor.name,
                    format!("depends on struct {dep}, which failed to render"),
                )),
                None => claims
                    .check(target, &descriptor.name, &names)
                    .and_then(|()| renderer.render_struct(registry, descriptor)),
            };
            match result {
                Ok(code) => {
                    tracing::debug!(lang = %target, name = %descriptor.name, "struct rendered");
                    claims.claim(&descriptor.name, names);
                    rendered.push((descriptor, code));
                }
                Err(err) => {
                    tracing::warn!(lang = %target, name = %descriptor.name, "{}", err);
                    failed.insert(descriptor.name.as_str());
                    failures.push(err);
                }
            }
        }

        // Array and map references may point forward, so drop dependents of
        // late failures until nothing changes.
        loop {
            let Some(pos) = rendered.iter().position(|(descriptor, _)| {
                descriptor.dependencies().iter().any(|dep| failed.contains(dep))
            }) else {
                break;
            };
            let (descriptor, _) = rendered.remove(pos);
            let dep = descriptor
                .dependencies()
                .into_iter()
                .find(|dep| failed.contains(dep))
                .unwrap_or_default();
            let err = CodegenError::render(
                target,
                &descriptor.name,
                format!("depends on struct {dep}, which failed to render"),
            );
            tracing::warn!(lang = %target, name = %descriptor.name, "{}", err);
            claims.release(&descriptor.name);
            failed.insert(descriptor.name.as_str());
            failures.push(err);
        }

        let mut structs: Vec<&StructDescriptor> = Vec::with_capacity(rendered.len());
        for (descriptor, code) in rendered {
            output.push_str(&code);
            structs.push(descriptor);
        }

        let mut resources: Vec<&ResourceDescriptor> = Vec::new();
        for descriptor in registry.resources() {
            let blocked = [&descriptor.external, &descriptor.internal]
                .into_iter()
                .flatten()
                .find(|name| failed.contains(name.as_str()));
            let names = renderer.resource_names(descriptor);
            let result = if let Some(name) = blocked {
                Err(CodegenError::render(
                    target,
                    &descriptor.name,
                    format!("uses struct {name}, which failed to render"),
                ))
            } else {
                claims
                    .check(target, &descriptor.name, &names)
                    .and_then(|()| renderer.render_resource(registry, descriptor))
            };
            match result {
                Ok(code) => {
                    tracing::debug!(lang = %target, name = %descriptor.name, "resource rendered");
                    claims.claim(&descriptor.name, names);
                    output.push_str(&code);
                    resources.push(descriptor);
                }
                Err(err) => {
                    tracing::warn!(lang = %target, name = %descriptor.name, "{}", err);
                    failures.push(err);
                }
            }
        }

        output.push_str(&renderer.render_schema(&resources)?);
        output.push_str(&renderer.render_epilogue(&structs, &resources));
        let content = renderer.finish(output)?;

        Ok(GenerationReport {
            source: GeneratedSource {
                target,
                file_name: target.file_name().to_string(),
                content,
            },
            failures,
        })
    }

    /// Generates the source text for one target.
    ///
    /// # Errors
    /// Returns `CodegenError::Descriptors` if any descriptor failed to render.
    pub fn generate(&self, target: Target) -> Result<String, CodegenError> {
        Ok(self.generate_isolated(target)?.into_result()?.content)
    }

    /// Generates every configured target.
    ///
    /// # Errors
    /// Returns the first target's error.
    pub fn generate_all(&self) -> Result<Vec<GeneratedSource>, CodegenError> {
        self.options
            .targets
            .iter()
            .map(|&target| self.generate_isolated(target)?.into_result())
            .collect()
    }

    /// Generates every configured target and writes one file per target
    /// into `dir`, creating it if needed.
    ///
    /// # Errors
    /// Returns an error if generation fails or a file cannot be written.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>, CodegenError> {
        let sources = self.generate_all()?;
        std::fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(sources.len());
        for source in sources {
            let path = dir.join(&source.file_name);
            std::fs::write(&path, source.content.as_bytes())?;
            tracing::info!("wrote {} model to {}", source.target, path.display());
            written.push(path);
        }
        Ok(written)
    }
}
