//! Model document loading.
//!
//! A model document lists struct and object (resource) declarations:
//!
//! ```yaml
//! types:
//!   - kind: Struct
//!     name: NestedWorld
//!     properties:
//!       - name: alive
//!         type: bool
//!       - name: tags
//!         type: "[]string"
//!   - kind: Object
//!     name: World
//!     external: WorldExternal
//!     internal: WorldInternal
//!     primarykey: external.name
//! ```

use crate::error::ParseError;
use crate::types::{
    Container, PrimaryKeyRule, PropertyDescriptor, PropertyType, ResourceDescriptor,
    StructDescriptor,
};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Struct and resource declarations read from one or more documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    /// Struct declarations in document order.
    pub structs: Vec<StructDescriptor>,
    /// Resource declarations in document order.
    pub resources: Vec<ResourceDescriptor>,
}

impl Model {
    /// Appends another model, rejecting duplicate names.
    ///
    /// # Errors
    /// Returns `ParseError::DuplicateDefinition` if a struct or object name
    /// is already present.
    pub fn merge(&mut self, other: Model) -> Result<(), ParseError> {
        for s in other.structs {
            if self.structs.iter().any(|existing| existing.name == s.name) {
                return Err(ParseError::duplicate("struct", s.name));
            }
            self.structs.push(s);
        }
        for r in other.resources {
            if self.resources.iter().any(|existing| existing.name == r.name) {
                return Err(ParseError::duplicate("object", r.name));
            }
            self.resources.push(r);
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ModelDocument {
    #[serde(default)]
    types: Vec<TypeDocument>,
}

#[derive(Debug, Deserialize)]
struct TypeDocument {
    kind: String,
    name: String,
    #[serde(default)]
    properties: Vec<PropertyDocument>,
    external: Option<String>,
    internal: Option<String>,
    primarykey: Option<String>,
    identity: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PropertyDocument {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
}

/// Parses a YAML model document.
///
/// # Errors
/// Returns `ParseError` if the YAML is malformed or declares invalid types.
pub fn parse_model(yaml: &str) -> Result<Model, ParseError> {
    let document: ModelDocument = serde_yaml::from_str(yaml)?;
    build_model(document)
}

/// Parses a JSON model document with the same shape as the YAML form.
///
/// # Errors
/// Returns `ParseError` if the JSON is malformed or declares invalid types.
pub fn parse_model_json(json: &str) -> Result<Model, ParseError> {
    let document: ModelDocument = serde_json::from_str(json)?;
    build_model(document)
}

/// Loads every `*.yaml`/`*.yml` model file under a directory, recursively.
///
/// Files are read in sorted path order so declaration order is stable.
///
/// # Errors
/// Returns `ParseError` on IO failures, malformed files, or names declared
/// in more than one file.
pub fn load_model_dir(path: &Path) -> Result<Model, ParseError> {
    let mut model = Model::default();
    for file in yaml_files(path)? {
        tracing::debug!("reading model from {}", file.display());
        let text = std::fs::read_to_string(&file).map_err(|e| ParseError::from(e).in_file(&file))?;
        let parsed = parse_model(&text).map_err(|e| e.in_file(&file))?;
        model.merge(parsed).map_err(|e| e.in_file(&file))?;
    }
    Ok(model)
}

/// Parses a property type declaration into its container and element type.
///
/// Accepted forms are `T`, `[]T` and `map[string]T`.
///
/// # Errors
/// Returns `ParseError::InvalidType` for malformed or nested declarations and
/// `ParseError::InvalidMapKey` for maps keyed by anything but `string`.
pub fn parse_type_decl(property: &str, decl: &str) -> Result<(Container, PropertyType), ParseError> {
    let decl = decl.trim();
    let (container, element) = if let Some(element) = decl.strip_prefix("[]") {
        (Container::Array, element)
    } else if let Some(rest) = decl.strip_prefix("map[") {
        let (key, value) = rest
            .split_once(']')
            .ok_or_else(|| ParseError::invalid_type(property, decl, "missing closing bracket"))?;
        if key.trim() != "string" {
            return Err(ParseError::InvalidMapKey {
                property: property.to_string(),
                key_type: key.trim().to_string(),
            });
        }
        (Container::Map, value)
    } else {
        (Container::Scalar, decl)
    };

    let element = element.trim();
    if element.is_empty() {
        return Err(ParseError::invalid_type(property, decl, "missing element type"));
    }
    if element.starts_with("[]") || element.starts_with("map[") {
        return Err(ParseError::invalid_type(
            property,
            decl,
            "nested containers are not supported",
        ));
    }
    if element.contains(['[', ']']) {
        return Err(ParseError::invalid_type(property, decl, "unbalanced brackets"));
    }

    Ok((container, PropertyType::from_name(element)))
}

fn build_model(document: ModelDocument) -> Result<Model, ParseError> {
    let mut model = Model::default();
    let mut struct_names = HashSet::new();
    let mut resource_names = HashSet::new();

    for entry in document.types {
        match entry.kind.to_lowercase().as_str() {
            "struct" => {
                if !struct_names.insert(entry.name.clone()) {
                    return Err(ParseError::duplicate("struct", entry.name));
                }
                let mut descriptor = StructDescriptor::new(entry.name);
                for p in entry.properties {
                    let (container, ty) = parse_type_decl(&p.name, &p.type_name)?;
                    descriptor.add_property(PropertyDescriptor::new(p.name, ty, container));
                }
                model.structs.push(descriptor);
            }
            "object" => {
                if !resource_names.insert(entry.name.clone()) {
                    return Err(ParseError::duplicate("object", entry.name));
                }
                let mut descriptor = ResourceDescriptor::new(entry.name);
                descriptor.external = entry.external;
                descriptor.internal = entry.internal;
                if let Some(pkey) = entry.primarykey {
                    descriptor.primary_key = PrimaryKeyRule::parse(&pkey);
                }
                if let Some(prefix) = entry.identity {
                    descriptor.identity_prefix = prefix;
                }
                model.resources.push(descriptor);
            }
            _ => {
                return Err(ParseError::UnknownKind {
                    kind: entry.kind,
                    name: entry.name,
                });
            }
        }
    }

    Ok(model)
}

/// Returns true for file names of the form `^\w+\.(yaml|yml)$`.
fn is_model_file(name: &str) -> bool {
    let Some((stem, ext)) = name.rsplit_once('.') else {
        return false;
    };
    matches!(ext, "yaml" | "yml")
        && !stem.is_empty()
        && stem.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn yaml_files(root: &Path) -> Result<Vec<PathBuf>, ParseError> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(is_model_file)
            {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD_YAML: &str = r#"
types:
  - kind: Struct
    name: NestedWorld
    properties:
      - name: alive
        type: bool
      - name: counter
        type: int
      - name: l1
        type: "[]bool"
  - kind: struct
    name: WorldExternal
    properties:
      - name: name
        type: string
      - name: nested
        type: NestedWorld
      - name: byName
        type: map[string]NestedWorld
  - kind: Object
    name: World
    external: WorldExternal
    primarykey: external.name
"#;

    #[test]
    fn test_parse_model() {
        let model = parse_model(WORLD_YAML).expect("Failed to parse");
        assert_eq!(model.structs.len(), 2);
        assert_eq!(model.resources.len(), 1);

        let nested = &model.structs[0];
        assert_eq!(nested.name, "NestedWorld");
        assert_eq!(nested.properties[2].container, Container::Array);
        assert_eq!(nested.properties[2].ty, PropertyType::Bool);

        let external = &model.structs[1];
        assert_eq!(
            external.properties[1].ty,
            PropertyType::Complex("NestedWorld".into())
        );
        assert_eq!(external.properties[2].container, Container::Map);

        let world = &model.resources[0];
        assert_eq!(world.external.as_deref(), Some("WorldExternal"));
        assert_eq!(world.internal, None);
        assert_eq!(world.primary_key.to_string(), "external.name");
        assert_eq!(world.identity_prefix, "world");
    }

    #[test]
    fn test_parse_model_json() {
        let json = r#"{"types": [
            {"kind": "Struct", "name": "Tag", "properties": [{"name": "label", "type": "string"}]},
            {"kind": "Object", "name": "Post", "internal": "Tag", "identity": "posts"}
        ]}"#;
        let model = parse_model_json(json).expect("Failed to parse");
        assert_eq!(model.resources[0].identity_prefix, "posts");
        assert_eq!(
            model.resources[0].primary_key,
            PrimaryKeyRule::parse("metadata.identity")
        );
    }

    #[test]
    fn test_unknown_kind() {
        let yaml = "types:\n  - kind: Enum\n    name: Color\n";
        assert!(matches!(
            parse_model(yaml),
            Err(ParseError::UnknownKind { .. })
        ));
    }

    #[test]
    fn test_duplicate_struct() {
        let yaml = "types:\n  - kind: Struct\n    name: A\n  - kind: Struct\n    name: A\n";
        assert!(matches!(
            parse_model(yaml),
            Err(ParseError::DuplicateDefinition { .. })
        ));
    }

    #[test]
    fn test_parse_type_decl() {
        assert_eq!(
            parse_type_decl("p", "int").unwrap(),
            (Container::Scalar, PropertyType::Int)
        );
        assert_eq!(
            parse_type_decl("p", "[]Nested").unwrap(),
            (Container::Array, PropertyType::Complex("Nested".into()))
        );
        assert_eq!(
            parse_type_decl("p", "map[string]datetime").unwrap(),
            (Container::Map, PropertyType::Datetime)
        );
    }

    #[test]
    fn test_parse_type_decl_errors() {
        assert!(matches!(
            parse_type_decl("p", "map[int]string"),
            Err(ParseError::InvalidMapKey { .. })
        ));
        assert!(matches!(
            parse_type_decl("p", "map[string"),
            Err(ParseError::InvalidType { .. })
        ));
        assert!(matches!(
            parse_type_decl("p", "[][]int"),
            Err(ParseError::InvalidType { .. })
        ));
        assert!(matches!(
            parse_type_decl("p", "[]"),
            Err(ParseError::InvalidType { .. })
        ));
    }

    #[test]
    fn test_is_model_file() {
        assert!(is_model_file("world.yaml"));
        assert!(is_model_file("model_2.yml"));
        assert!(!is_model_file("world.json"));
        assert!(!is_model_file("my-model.yaml"));
        assert!(!is_model_file(".yaml"));
    }

    #[test]
    fn test_load_model_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(
            dir.path().join("a.yaml"),
            "types:\n  - kind: Struct\n    name: A\n    properties:\n      - name: x\n        type: int\n",
        )
        .unwrap();
        std::fs::write(
            nested.join("b.yml"),
            "types:\n  - kind: Object\n    name: B\n    external: A\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("ignored.txt"), "not a model").unwrap();

        let model = load_model_dir(dir.path()).expect("load");
        assert_eq!(model.structs.len(), 1);
        assert_eq!(model.resources.len(), 1);
    }

    #[test]
    fn test_load_model_dir_duplicate_across_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let doc = "types:\n  - kind: Struct\n    name: A\n";
        std::fs::write(dir.path().join("a.yaml"), doc).unwrap();
        std::fs::write(dir.path().join("b.yaml"), doc).unwrap();

        let err = load_model_dir(dir.path()).unwrap_err();
        assert!(matches!(err, ParseError::InFile { .. }));
        assert!(err.to_string().contains("duplicate struct"));
    }
}
