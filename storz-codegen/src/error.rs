//! Error types for code generation.

use crate::target::Target;
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Model parsing error.
    #[error("model parse error: {0}")]
    Parse(#[from] storz_schema::ParseError),

    /// Schema validation error.
    #[error("schema error: {0}")]
    Schema(#[from] storz_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// One descriptor could not be rendered for one target.
    #[error("{target}: cannot render {descriptor}: {message}")]
    Render {
        /// Target being rendered.
        target: Target,
        /// Struct or resource name.
        descriptor: String,
        /// Error message.
        message: String,
    },

    /// Isolated failures collected over a whole generation run.
    #[error("{} descriptor(s) failed to render: {}", .0.len(), join(.0))]
    Descriptors(Vec<CodegenError>),

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

fn join(errors: &[CodegenError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates a render error for one descriptor.
    pub fn render(
        target: Target,
        descriptor: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Render {
            target,
            descriptor: descriptor.into(),
            message: message.into(),
        }
    }
}
