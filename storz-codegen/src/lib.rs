//! # Storz Codegen
//!
//! Model code generation from Storz schemas.
//!
//! This crate provides:
//! - The [`Renderer`] seam and one renderer per [`Target`]
//! - Python, JavaScript and Rust model generation
//! - A [`Generator`] that isolates per-descriptor failures
//! - Output writing for packaging steps

mod common;
pub mod error;
pub mod generator;
pub mod javascript;
pub mod python;
pub mod rust;
pub mod target;

pub use error::CodegenError;
pub use generator::{
    DEFAULT_BANNER, GeneratedSource, GenerationReport, Generator, GeneratorOptions,
};
pub use target::{Renderer, Target};

/// Generates source for one target from a YAML model document.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation or generation fails.
pub fn generate_from_yaml(yaml: &str, target: Target) -> Result<String, CodegenError> {
    let registry = storz_schema::registry_from_yaml(yaml)?;
    Generator::new(&registry).generate(target)
}

/// Generates source for one target from every model file under a directory.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, validation or generation
/// fails.
pub fn generate_from_dir(path: &std::path::Path, target: Target) -> Result<String, CodegenError> {
    let registry = storz_schema::registry_from_dir(path)?;
    Generator::new(&registry).generate(target)
}
