//! Compiled property handlers.
//!
//! Every struct descriptor of a registry is compiled once into a
//! [`CompiledStruct`]: an ordered list of handlers plus a name index. All
//! compiled structs of a schema live in one [`StructTable`], and nested
//! references point into it by position, so recursive shapes such as
//! `children: []Node` need no reference cycles. A handler knows how to build
//! its default, coerce a setter argument, load a dict value and render the
//! stored value, so instances never branch on type names at runtime.

use crate::error::CompileError;
use crate::instance::StructObject;
use crate::value::FieldValue;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use storz_core::{DATETIME_ZERO, Error, Result, Serializable, convert};
use storz_schema::{Container, PropertyType, StructDescriptor};

/// Element rule of a property.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Scalar {
    String,
    Int,
    Float,
    Bool,
    Datetime,
    /// Position of the referenced struct in the owning table.
    Complex(usize),
    Other,
}

impl Scalar {
    fn name<'t>(&self, table: &'t StructTable) -> &'t str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Datetime => "datetime",
            Self::Complex(idx) => &table.get(*idx).name,
            Self::Other => "other",
        }
    }

    fn zero(&self, ty: &StructType) -> FieldValue {
        match self {
            Self::String => FieldValue::from(""),
            Self::Int => FieldValue::from(0_i64),
            Self::Float => FieldValue::from(0.0),
            Self::Bool => FieldValue::from(false),
            Self::Datetime => FieldValue::from(DATETIME_ZERO),
            Self::Complex(idx) => FieldValue::Object(Some(StructObject::factory(&ty.nested(*idx)))),
            Self::Other => FieldValue::Primitive(Value::Null),
        }
    }

    /// Setter coercion for one element.
    fn coerce(&self, ty: &StructType, property: &str, value: FieldValue) -> Result<FieldValue> {
        let raw = match (self, value) {
            (Self::Complex(idx), FieldValue::Object(Some(obj))) => {
                let expected = &ty.table.get(*idx).name;
                if obj.type_name() != expected {
                    return Err(mismatch(expected, obj.type_name()));
                }
                return Ok(FieldValue::Object(Some(obj)));
            }
            (Self::Complex(_), FieldValue::Object(None) | FieldValue::Primitive(Value::Null)) => {
                return Ok(FieldValue::Object(None));
            }
            (Self::Other, value) => return Ok(value),
            (_, FieldValue::Primitive(raw)) => raw,
            (scalar, other) => return Err(mismatch(scalar.name(&ty.table), other.shape())),
        };

        let coerced = match self {
            Self::String => Value::from(convert::coerce_string(property, &raw)?),
            Self::Int => Value::from(convert::coerce_int(property, &raw)?),
            Self::Float => Value::from(convert::coerce_float(property, &raw)?),
            Self::Bool => Value::from(convert::coerce_bool(&raw)),
            Self::Datetime => Value::from(convert::coerce_datetime(property, &raw)?),
            Self::Complex(_) => return Err(mismatch(self.name(&ty.table), "primitive")),
            Self::Other => raw,
        };
        Ok(FieldValue::Primitive(coerced))
    }

    /// Dict loading for one element: direct assignment after a shape check.
    fn load(&self, ty: &StructType, property: &str, raw: &Value) -> Result<FieldValue> {
        let value = match self {
            Self::String | Self::Datetime => Value::from(convert::string_value(property, raw)?),
            Self::Int => Value::from(convert::int_value(property, raw)?),
            Self::Float => Value::from(convert::float_value(property, raw)?),
            Self::Bool => Value::from(convert::bool_value(property, raw)?),
            Self::Other => raw.clone(),
            Self::Complex(idx) => {
                let mut obj = StructObject::factory(&ty.nested(*idx));
                obj.from_dict(convert::dict_value(property, raw)?)?;
                return Ok(FieldValue::Object(Some(obj)));
            }
        };
        Ok(FieldValue::Primitive(value))
    }
}

fn mismatch(expected: &str, actual: &str) -> Error {
    Error::TypeMismatch {
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}

fn render(value: &FieldValue) -> Value {
    match value {
        FieldValue::Primitive(v) => v.clone(),
        FieldValue::Object(Some(obj)) => Value::Object(obj.to_dict()),
        FieldValue::Object(None) => Value::Null,
        FieldValue::Array(items) => Value::Array(items.iter().map(render).collect()),
        FieldValue::Map(entries) => Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), render(v)))
                .collect(),
        ),
    }
}

/// Typed handler for one property slot.
#[derive(Debug, Clone)]
pub(crate) struct PropertyHandler {
    pub(crate) name: String,
    pub(crate) container: Container,
    pub(crate) scalar: Scalar,
}

impl PropertyHandler {
    /// `ty` is the struct owning this handler.
    pub(crate) fn default_value(&self, ty: &StructType) -> FieldValue {
        match self.container {
            Container::Scalar => self.scalar.zero(ty),
            Container::Array => FieldValue::Array(Vec::new()),
            Container::Map => FieldValue::Map(IndexMap::new()),
        }
    }

    pub(crate) fn is_datetime(&self) -> bool {
        matches!(
            (self.container, &self.scalar),
            (Container::Scalar, Scalar::Datetime)
        )
    }

    pub(crate) fn coerce(&self, ty: &StructType, value: FieldValue) -> Result<FieldValue> {
        match (self.container, value) {
            (Container::Scalar, value) => self.scalar.coerce(ty, &self.name, value),
            (Container::Array, FieldValue::Array(items)) => items
                .into_iter()
                .map(|item| self.scalar.coerce(ty, &self.name, item))
                .collect::<Result<Vec<_>>>()
                .map(FieldValue::Array),
            (Container::Map, FieldValue::Map(entries)) => entries
                .into_iter()
                .map(|(k, v)| Ok((k, self.scalar.coerce(ty, &self.name, v)?)))
                .collect::<Result<IndexMap<_, _>>>()
                .map(FieldValue::Map),
            (Container::Array, other) => Err(mismatch("array", other.shape())),
            (Container::Map, other) => Err(mismatch("map", other.shape())),
        }
    }

    /// Loads a non-null dict value into `slot`.
    ///
    /// Containers are rebuilt element by element. A struct scalar is loaded
    /// into the existing instance, created through its factory if cleared.
    pub(crate) fn load(&self, ty: &StructType, slot: &mut FieldValue, raw: &Value) -> Result<()> {
        match self.container {
            Container::Scalar => {
                if let (Scalar::Complex(idx), FieldValue::Object(current)) = (self.scalar, &mut *slot)
                {
                    let data = convert::dict_value(&self.name, raw)?;
                    current
                        .get_or_insert_with(|| StructObject::factory(&ty.nested(idx)))
                        .from_dict(data)?;
                    return Ok(());
                }
                *slot = self.scalar.load(ty, &self.name, raw)?;
            }
            Container::Array => {
                let items = convert::array_value(&self.name, raw)?
                    .iter()
                    .map(|item| self.scalar.load(ty, &self.name, item))
                    .collect::<Result<Vec<_>>>()?;
                *slot = FieldValue::Array(items);
            }
            Container::Map => {
                let entries = convert::dict_value(&self.name, raw)?
                    .iter()
                    .map(|(k, v)| Ok((k.clone(), self.scalar.load(ty, &self.name, v)?)))
                    .collect::<Result<IndexMap<_, _>>>()?;
                *slot = FieldValue::Map(entries);
            }
        }
        Ok(())
    }

    pub(crate) fn render(&self, slot: &FieldValue) -> Value {
        render(slot)
    }
}

/// A struct descriptor compiled into handlers.
#[derive(Debug)]
pub(crate) struct CompiledStruct {
    pub(crate) name: String,
    pub(crate) properties: Vec<PropertyHandler>,
    pub(crate) index: HashMap<String, usize>,
}

impl CompiledStruct {
    /// Compiles a struct. `positions` maps every struct name of the table to
    /// its position.
    fn compile(
        descriptor: &StructDescriptor,
        positions: &HashMap<String, usize>,
    ) -> std::result::Result<Self, CompileError> {
        let mut properties = Vec::with_capacity(descriptor.properties.len());
        let mut index = HashMap::with_capacity(descriptor.properties.len());

        for (idx, property) in descriptor.properties.iter().enumerate() {
            let scalar = match &property.ty {
                PropertyType::String => Scalar::String,
                PropertyType::Int => Scalar::Int,
                PropertyType::Float => Scalar::Float,
                PropertyType::Bool => Scalar::Bool,
                PropertyType::Datetime => Scalar::Datetime,
                PropertyType::Other(_) => Scalar::Other,
                PropertyType::Complex(name) => {
                    let position =
                        positions
                            .get(name)
                            .ok_or_else(|| CompileError::UnresolvedStruct {
                                owner: descriptor.name.clone(),
                                name: name.clone(),
                            })?;
                    Scalar::Complex(*position)
                }
            };
            index.insert(property.name.clone(), idx);
            properties.push(PropertyHandler {
                name: property.name.clone(),
                container: property.container,
                scalar,
            });
        }

        Ok(Self {
            name: descriptor.name.clone(),
            properties,
            index,
        })
    }

    pub(crate) fn handler(&self, name: &str) -> Option<(usize, &PropertyHandler)> {
        self.index.get(name).map(|&idx| (idx, &self.properties[idx]))
    }
}

/// Every compiled struct of one schema.
#[derive(Debug)]
pub(crate) struct StructTable {
    structs: Vec<CompiledStruct>,
    positions: HashMap<String, usize>,
}

impl StructTable {
    /// Compiles a set of struct descriptors. References may point anywhere
    /// in the set, including back at the referencing struct.
    pub(crate) fn compile<'d>(
        descriptors: impl IntoIterator<Item = &'d StructDescriptor>,
    ) -> std::result::Result<Arc<Self>, CompileError> {
        let descriptors: Vec<&StructDescriptor> = descriptors.into_iter().collect();
        let positions: HashMap<String, usize> = descriptors
            .iter()
            .enumerate()
            .map(|(idx, d)| (d.name.clone(), idx))
            .collect();

        let mut structs = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let compiled = CompiledStruct::compile(descriptor, &positions)?;
            tracing::debug!(
                name = %descriptor.name,
                properties = compiled.properties.len(),
                "compiled struct"
            );
            structs.push(compiled);
        }
        Ok(Arc::new(Self { structs, positions }))
    }

    fn get(&self, idx: usize) -> &CompiledStruct {
        &self.structs[idx]
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }
}

/// Handle to one struct of a shared table.
#[derive(Debug, Clone)]
pub(crate) struct StructType {
    table: Arc<StructTable>,
    idx: usize,
}

impl StructType {
    pub(crate) fn new(table: &Arc<StructTable>, idx: usize) -> Self {
        Self {
            table: Arc::clone(table),
            idx,
        }
    }

    pub(crate) fn compiled(&self) -> &CompiledStruct {
        self.table.get(self.idx)
    }

    fn nested(&self, idx: usize) -> Self {
        Self::new(&self.table, idx)
    }
}
