//! # Storz Core
//!
//! Runtime contract shared by every generated Storz model.
//!
//! This crate provides:
//! - Canonical datetime encoding used by datetime properties
//! - Object identities and resource metadata
//! - Serialization and capability traits implemented by generated types
//! - Value conversion helpers used by generated `from_dict` code
//! - Error types for runtime operations

pub mod convert;
pub mod datetime;
pub mod error;
pub mod identity;
pub mod meta;
pub mod object;
pub mod utils;

pub use datetime::{DATETIME_ZERO, datetime_current, datetime_parse, datetime_string};
pub use error::{Error, Result};
pub use identity::ObjectIdentity;
pub use meta::{Meta, meta_factory};
pub use object::{Dict, ExternalHolder, Object, SchemaHolder, Serializable};
pub use utils::{clone_object, unmarshal_object};

// Generated Rust models reach these through the runtime crate.
pub use chrono;
pub use indexmap;
pub use serde_json;
