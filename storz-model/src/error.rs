//! Error types for model compilation.

use storz_schema::SchemaError;
use thiserror::Error;

/// Errors raised while compiling a registry into a model.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The schema could not be loaded or validated.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A property references a struct that has not been compiled.
    #[error("struct {owner} references uncompiled struct {name}")]
    UnresolvedStruct {
        /// Struct or resource holding the reference.
        owner: String,
        /// Referenced struct name.
        name: String,
    },
}
