//! # Storz Model
//!
//! Storz models realized in-process, straight from schema descriptors.
//!
//! A [`ModelSchema`] compiles every struct of a registry into a table of
//! typed property handlers. Instances built from it follow the same contract
//! as generated code: factory-only construction, typed setters with
//! coercion, dict and JSON round trips, JSON-based cloning, primary keys,
//! namespaced identities and kind lookup.
//!
//! ## Example
//!
//! ```
//! use storz_model::ModelSchema;
//! use storz_core::{Object, Serializable};
//!
//! let schema = ModelSchema::from_yaml(r#"
//! types:
//!   - kind: Struct
//!     name: User
//!     properties:
//!       - name: id
//!         type: string
//!   - kind: Object
//!     name: Account
//!     external: User
//!     primarykey: external.id
//! "#).unwrap();
//!
//! let mut account = schema.resource_factory("Account").unwrap();
//! account.external_mut().unwrap().set("id", "42").unwrap();
//! assert_eq!(account.primary_key(), "42");
//! assert!(account.to_json().unwrap().contains("\"id\":\"42\""));
//! ```

pub mod error;
mod handler;
pub mod instance;
pub mod schema;
pub mod value;

pub use error::CompileError;
pub use instance::{ResourceObject, StructObject};
pub use schema::ModelSchema;
pub use value::FieldValue;
