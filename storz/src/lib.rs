//! # Storz
//!
//! Schema-driven model code generation.
//!
//! A model is a set of structs and resources described in YAML. Storz
//! validates it into a schema registry, emits serializable model classes for
//! Python, JavaScript and Rust, and can also realize the same models
//! in-process without generating any code.
//!
//! ## Quick Start
//!
//! ```
//! use storz::prelude::*;
//!
//! let registry = registry_from_yaml(r#"
//! types:
//!   - kind: Struct
//!     name: Spec
//!     properties:
//!       - name: name
//!         type: string
//!   - kind: Object
//!     name: Account
//!     external: Spec
//!     primarykey: external.name
//! "#).unwrap();
//!
//! let python = Generator::new(&registry).generate(Target::Python).unwrap();
//! assert!(python.contains("def AccountFactory() -> Account:"));
//!
//! let schema = ModelSchema::compile(&registry).unwrap();
//! let account = schema.object_for_kind("account").unwrap();
//! assert_eq!(account.metadata().kind(), "Account");
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Runtime contract shared by generated models
//! - [`schema`] - Model descriptors, loading and validation
//! - [`codegen`] - Code generation for every target
//! - [`model`] - In-process models driven by the schema

pub mod prelude;

/// Runtime contract shared by generated models.
pub mod core {
    pub use storz_core::*;
}

/// Model descriptors, loading and validation.
pub mod schema {
    pub use storz_schema::*;
}

/// Code generation for every target.
pub mod codegen {
    pub use storz_codegen::*;
}

/// In-process models driven by the schema.
pub mod model {
    pub use storz_model::*;
}
