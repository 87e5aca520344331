//! Model instances.
//!
//! Instances only come from factories on [`ModelSchema`](crate::ModelSchema)
//! or from the factory of a containing instance; their fields are private so
//! direct construction is impossible outside this crate.

use crate::handler::{PropertyHandler, StructType};
use crate::value::FieldValue;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use storz_core::{
    Dict, Error, Meta, Object, ObjectIdentity, Result, Serializable, convert, datetime_parse,
    meta_factory,
};
use storz_schema::ResourceDescriptor;

/// Instance of a compiled struct.
#[derive(Debug, Clone)]
pub struct StructObject {
    ty: StructType,
    values: Vec<FieldValue>,
}

impl StructObject {
    /// Builds an instance with every property at its default.
    pub(crate) fn factory(ty: &StructType) -> Self {
        Self {
            ty: ty.clone(),
            values: ty
                .compiled()
                .properties
                .iter()
                .map(|handler| handler.default_value(ty))
                .collect(),
        }
    }

    /// Returns the struct name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.ty.compiled().name
    }

    /// Returns the property names in declaration order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.ty.compiled().properties.iter().map(|p| p.name.as_str())
    }

    fn slot(&self, name: &str) -> Result<(usize, &PropertyHandler)> {
        let compiled = self.ty.compiled();
        compiled
            .handler(name)
            .ok_or_else(|| Error::unknown_property(&compiled.name, name))
    }

    /// Returns the stored value of a property.
    ///
    /// # Errors
    /// Returns `Error::UnknownProperty` if the struct declares no such
    /// property.
    pub fn get(&self, name: &str) -> Result<&FieldValue> {
        let (idx, _) = self.slot(name)?;
        Ok(&self.values[idx])
    }

    /// Reads a datetime property back as a temporal value.
    ///
    /// # Errors
    /// Returns `Error::TypeMismatch` if the property is not a datetime
    /// scalar, or `Error::Datetime` if the stored string does not parse.
    pub fn get_datetime(&self, name: &str) -> Result<DateTime<Utc>> {
        let (idx, handler) = self.slot(name)?;
        if !handler.is_datetime() {
            return Err(Error::TypeMismatch {
                expected: "datetime".to_string(),
                actual: name.to_string(),
            });
        }
        match self.values[idx].as_str() {
            Some(text) => datetime_parse(text),
            None => Err(Error::invalid_value(name, "string")),
        }
    }

    /// Sets a property, coercing the value to the declared type.
    ///
    /// # Errors
    /// Returns `Error::UnknownProperty` for undeclared names, and
    /// `Error::Coercion`, `Error::Datetime` or `Error::TypeMismatch` if the
    /// value cannot be coerced.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        let (idx, handler) = self.slot(name)?;
        let value = handler.coerce(&self.ty, value.into())?;
        self.values[idx] = value;
        Ok(())
    }

    /// Returns a nested struct property, if set.
    ///
    /// # Errors
    /// Returns `Error::UnknownProperty` for undeclared names.
    pub fn object(&self, name: &str) -> Result<Option<&StructObject>> {
        Ok(self.get(name)?.as_object())
    }

    /// Returns a nested struct property mutably, if set.
    ///
    /// Edit the nested instance through its own setters. Assigning a whole
    /// instance through this reference is not type checked; a struct of
    /// another type stored this way renders under the wrong shape and later
    /// fails to clone. Use [`set`](Self::set) to replace the instance.
    ///
    /// # Errors
    /// Returns `Error::UnknownProperty` for undeclared names.
    pub fn object_mut(&mut self, name: &str) -> Result<Option<&mut StructObject>> {
        let (idx, _) = self.slot(name)?;
        Ok(self.values[idx].as_object_mut())
    }
}

impl PartialEq for StructObject {
    fn eq(&self, other: &Self) -> bool {
        self.type_name() == other.type_name() && self.values == other.values
    }
}

impl Serializable for StructObject {
    fn to_dict(&self) -> Dict {
        self.ty
            .compiled()
            .properties
            .iter()
            .zip(&self.values)
            .map(|(handler, value)| (handler.name.clone(), handler.render(value)))
            .collect()
    }

    fn from_dict(&mut self, data: &Dict) -> Result<()> {
        for (key, raw) in data {
            if raw.is_null() {
                continue;
            }
            if let Some((idx, handler)) = self.ty.compiled().handler(key) {
                handler.load(&self.ty, &mut self.values[idx], raw)?;
            }
        }
        Ok(())
    }
}

/// A resource descriptor compiled against its external and internal structs.
#[derive(Debug)]
pub(crate) struct CompiledResource {
    pub(crate) descriptor: ResourceDescriptor,
    pub(crate) external: Option<StructType>,
    pub(crate) internal: Option<StructType>,
}

/// Instance of a compiled resource.
#[derive(Debug, Clone)]
pub struct ResourceObject {
    ty: Arc<CompiledResource>,
    meta: Meta,
    external: Option<StructObject>,
    internal: Option<StructObject>,
}

impl ResourceObject {
    pub(crate) fn factory(ty: &Arc<CompiledResource>) -> Self {
        Self {
            ty: Arc::clone(ty),
            meta: meta_factory(&ty.descriptor.name),
            external: ty.external.as_ref().map(StructObject::factory),
            internal: ty.internal.as_ref().map(StructObject::factory),
        }
    }

    /// Returns the resource kind.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.ty.descriptor.name
    }

    /// Returns the external fields, if declared.
    #[must_use]
    pub fn external(&self) -> Option<&StructObject> {
        self.external.as_ref()
    }

    /// Returns the external fields mutably, if declared.
    ///
    /// The same caveat as [`StructObject::object_mut`] applies to assigning
    /// a whole instance.
    pub fn external_mut(&mut self) -> Option<&mut StructObject> {
        self.external.as_mut()
    }

    /// Returns the internal fields, if declared.
    #[must_use]
    pub fn internal(&self) -> Option<&StructObject> {
        self.internal.as_ref()
    }

    /// Returns the internal fields mutably, if declared.
    ///
    /// The same caveat as [`StructObject::object_mut`] applies to assigning
    /// a whole instance.
    pub fn internal_mut(&mut self) -> Option<&mut StructObject> {
        self.internal.as_mut()
    }

    /// Returns true if the resource carries external fields.
    #[must_use]
    pub fn is_external_holder(&self) -> bool {
        self.ty.external.is_some()
    }

    /// Builds the namespaced identity for a primary key of this kind.
    #[must_use]
    pub fn identity(&self, primary_key: &str) -> ObjectIdentity {
        ObjectIdentity::new(self.ty.descriptor.identity(primary_key))
    }

    /// Returns the identity of this resource under its current primary key.
    #[must_use]
    pub fn own_identity(&self) -> ObjectIdentity {
        self.identity(&self.primary_key())
    }

    /// Deep-copies the resource through a JSON round trip, keeping the
    /// concrete type.
    ///
    /// # Errors
    /// Returns an error if the round trip fails.
    pub fn duplicate(&self) -> Result<Self> {
        let mut ret = Self::factory(&self.ty);
        ret.from_json(&self.to_json()?)?;
        Ok(ret)
    }

    fn key_segment(&self) -> Option<String> {
        let rule = &self.ty.descriptor.primary_key;
        let mut current = match rule.root() {
            "metadata" => {
                return match rule.tail().first().map(String::as_str) {
                    Some("identity") => Some(self.meta.identity().to_string()),
                    Some("kind") => Some(self.meta.kind().to_string()),
                    Some("revision") => Some(self.meta.revision().to_string()),
                    _ => None,
                };
            }
            "external" => self.external.as_ref()?,
            "internal" => self.internal.as_ref()?,
            _ => return None,
        };

        let (last, path) = rule.tail().split_last()?;
        for segment in path {
            current = current.object(segment).ok()??;
        }
        let value = current.get(last).ok()?.as_value()?;
        Some(convert::key_string(value))
    }
}

impl PartialEq for ResourceObject {
    fn eq(&self, other: &Self) -> bool {
        self.ty.descriptor.name == other.ty.descriptor.name
            && self.meta == other.meta
            && self.external == other.external
            && self.internal == other.internal
    }
}

impl Serializable for ResourceObject {
    fn to_dict(&self) -> Dict {
        let mut data = Dict::new();
        data.insert("metadata".to_string(), self.meta.to_dict().into());
        if let Some(external) = &self.external {
            data.insert("external".to_string(), external.to_dict().into());
        }
        if let Some(internal) = &self.internal {
            data.insert("internal".to_string(), internal.to_dict().into());
        }
        data
    }

    fn from_dict(&mut self, data: &Dict) -> Result<()> {
        for (key, raw) in data {
            if raw.is_null() {
                continue;
            }
            match key.as_str() {
                "metadata" => self.meta.from_dict(convert::dict_value(key, raw)?)?,
                "external" => {
                    if let Some(external) = &mut self.external {
                        external.from_dict(convert::dict_value(key, raw)?)?;
                    }
                }
                "internal" => {
                    if let Some(internal) = &mut self.internal {
                        internal.from_dict(convert::dict_value(key, raw)?)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl Object for ResourceObject {
    fn metadata(&self) -> &Meta {
        &self.meta
    }

    fn metadata_mut(&mut self) -> &mut Meta {
        &mut self.meta
    }

    fn clone_object(&self) -> Result<Box<dyn Object>> {
        Ok(Box::new(self.duplicate()?))
    }

    fn primary_key(&self) -> String {
        self.key_segment().unwrap_or_default()
    }
}
