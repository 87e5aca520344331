//! Rust struct generation.

use super::{default_expr, element_type, field_ident, field_type};
use crate::common::quote;
use crate::error::CodegenError;
use crate::target::Target;
use std::collections::HashSet;
use storz_schema::{Container, PropertyDescriptor, PropertyType, StructDescriptor};

/// One property with its resolved Rust names.
struct Field<'a> {
    prop: &'a PropertyDescriptor,
    /// Field and getter identifier, possibly raw.
    ident: String,
    /// Identifier without the raw prefix, used to derive method names.
    base: String,
}

impl Field<'_> {
    /// Float containers are only replaced through their checked setter.
    fn has_mut(&self) -> bool {
        match (self.prop.container, &self.prop.ty) {
            (_, PropertyType::Float) => false,
            (Container::Scalar, ty) => ty.is_complex(),
            _ => true,
        }
    }

    fn method_names(&self) -> Vec<String> {
        let mut names = vec![self.base.clone(), format!("set_{}", self.base)];
        if self.has_mut() {
            names.push(format!("{}_mut", self.base));
        }
        names
    }
}

/// Generator for one struct type.
pub struct StructGenerator<'a> {
    descriptor: &'a StructDescriptor,
}

impl<'a> StructGenerator<'a> {
    /// Creates a new struct generator.
    #[must_use]
    pub fn new(descriptor: &'a StructDescriptor) -> Self {
        Self { descriptor }
    }

    /// Generates the struct, its accessors and its `Serializable` impl.
    ///
    /// # Errors
    /// Returns `CodegenError::Render` if property names cannot be mapped to
    /// distinct Rust identifiers.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let fields = self.fields()?;
        let mut output = String::new();
        output.push_str(&self.generate_struct(&fields));
        output.push_str(&self.generate_impl(&fields));
        output.push_str(&self.generate_serializable(&fields));
        Ok(output)
    }

    fn fields(&self) -> Result<Vec<Field<'a>>, CodegenError> {
        let name = &self.descriptor.name;
        let mut methods: HashSet<String> = HashSet::from(["factory".to_string()]);
        let mut fields = Vec::with_capacity(self.descriptor.properties.len());

        for prop in &self.descriptor.properties {
            let ident = field_ident(name, &prop.name)?;
            let base = ident.trim_start_matches("r#").to_string();
            let field = Field { prop, ident, base };
            for method in field.method_names() {
                if !methods.insert(method.clone()) {
                    return Err(CodegenError::render(
                        Target::Rust,
                        name,
                        format!("property '{}' collides on method {method}", prop.name),
                    ));
                }
            }
            fields.push(field);
        }
        Ok(fields)
    }

    fn generate_struct(&self, fields: &[Field<'_>]) -> String {
        let name = &self.descriptor.name;
        let mut output = String::new();

        output.push_str(&format!("\n/// Generated from struct `{name}`.\n"));
        output.push_str("#[derive(Debug, Clone, PartialEq)]\n");
        output.push_str(&format!("pub struct {name} {{\n"));
        for field in fields {
            output.push_str(&format!("    {}: {},\n", field.ident, field_type(field.prop)));
        }
        output.push_str("}\n");
        output
    }

    fn generate_impl(&self, fields: &[Field<'_>]) -> String {
        let name = &self.descriptor.name;
        let mut output = String::new();

        output.push_str(&format!("\nimpl {name} {{\n"));
        output.push_str("    /// Creates an instance with every property at its default.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub fn factory() -> Self {\n");
        output.push_str("        Self {\n");
        for field in fields {
            output.push_str(&format!(
                "            {}: {},\n",
                field.ident,
                default_expr(&field.prop.default_value())
            ));
        }
        output.push_str("        }\n");
        output.push_str("    }\n");

        for field in fields {
            output.push_str(&generate_accessors(field));
        }

        output.push_str("}\n");
        output
    }

    fn generate_serializable(&self, fields: &[Field<'_>]) -> String {
        let name = &self.descriptor.name;
        let mut output = String::new();

        output.push_str(&format!("\nimpl Serializable for {name} {{\n"));
        output.push_str("    fn to_dict(&self) -> Dict {\n");
        output.push_str("        let mut data = Dict::new();\n");
        for field in fields {
            output.push_str(&format!(
                "        data.insert({}.to_string(), {});\n",
                quote(&field.prop.name),
                to_value(field)
            ));
        }
        output.push_str("        data\n");
        output.push_str("    }\n\n");

        output.push_str("    fn from_dict(&mut self, data: &Dict) -> Result<()> {\n");
        output.push_str("        for (key, raw) in data {\n");
        output.push_str("            if raw.is_null() {\n");
        output.push_str("                continue;\n");
        output.push_str("            }\n");
        output.push_str("            match key.as_str() {\n");
        for field in fields {
            output.push_str(&generate_load(field));
        }
        output.push_str("                _ => {}\n");
        output.push_str("            }\n");
        output.push_str("        }\n");
        output.push_str("        Ok(())\n");
        output.push_str("    }\n");
        output.push_str("}\n");
        output
    }
}

fn generate_accessors(field: &Field<'_>) -> String {
    let prop = field.prop;
    let ident = &field.ident;
    let base = &field.base;
    let element = element_type(&prop.ty);
    let mut output = String::new();

    let (getter_ty, getter_body, setter_arg) = match (prop.container, &prop.ty) {
        (Container::Scalar, PropertyType::String) => (
            "&str".to_string(),
            format!("&self.{ident}"),
            "impl Into<String>".to_string(),
        ),
        (Container::Scalar, PropertyType::Datetime) => (
            "Result<DateTime<Utc>>".to_string(),
            format!("datetime_parse(&self.{ident})"),
            "&DateTime<Utc>".to_string(),
        ),
        (Container::Scalar, PropertyType::Int | PropertyType::Float | PropertyType::Bool) => {
            (element.clone(), format!("self.{ident}"), element.clone())
        }
        (Container::Scalar, PropertyType::Complex(_)) => (
            format!("Option<&{element}>"),
            format!("self.{ident}.as_ref()"),
            format!("Option<{element}>"),
        ),
        (Container::Scalar, PropertyType::Other(_)) => (
            "&Value".to_string(),
            format!("&self.{ident}"),
            "Value".to_string(),
        ),
        (Container::Array, _) => (
            format!("&[{element}]"),
            format!("&self.{ident}"),
            format!("Vec<{element}>"),
        ),
        (Container::Map, _) => (
            format!("&IndexMap<String, {element}>"),
            format!("&self.{ident}"),
            format!("IndexMap<String, {element}>"),
        ),
    };

    let getter_doc = match (prop.container, &prop.ty) {
        (Container::Scalar, PropertyType::Datetime) => {
            "    ///\n    /// # Errors\n    /// Returns `Error::Datetime` if the stored value is not canonical.\n"
        }
        _ => "    #[must_use]\n",
    };
    output.push_str(&format!("\n    /// Returns `{}`.\n", prop.name));
    output.push_str(getter_doc);
    output.push_str(&format!("    pub fn {ident}(&self) -> {getter_ty} {{\n"));
    output.push_str(&format!("        {getter_body}\n"));
    output.push_str("    }\n");

    if field.has_mut() {
        let (mut_ty, mut_body) = match prop.container {
            Container::Scalar => (
                format!("Option<&mut {element}>"),
                format!("self.{ident}.as_mut()"),
            ),
            Container::Array => (format!("&mut Vec<{element}>"), format!("&mut self.{ident}")),
            Container::Map => (
                format!("&mut IndexMap<String, {element}>"),
                format!("&mut self.{ident}"),
            ),
        };
        output.push_str(&format!("\n    /// Returns `{}` mutably.\n", prop.name));
        output.push_str(&format!("    pub fn {base}_mut(&mut self) -> {mut_ty} {{\n"));
        output.push_str(&format!("        {mut_body}\n"));
        output.push_str("    }\n");
    }

    output.push_str(&format!("\n    /// Sets `{}`.\n", prop.name));
    if let PropertyType::Float = prop.ty {
        let key = quote(&prop.name);
        output.push_str("    ///\n");
        output.push_str("    /// # Errors\n");
        output.push_str("    /// Returns `Error::Coercion` for NaN and infinite values.\n");
        output.push_str(&format!(
            "    pub fn set_{base}(&mut self, value: {setter_arg}) -> Result<()> {{\n"
        ));
        match prop.container {
            Container::Scalar => {
                output.push_str(&format!(
                    "        self.{ident} = convert::finite_float({key}, value)?;\n"
                ));
            }
            Container::Array => {
                output.push_str("        for v in &value {\n");
                output.push_str(&format!("            convert::finite_float({key}, *v)?;\n"));
                output.push_str("        }\n");
                output.push_str(&format!("        self.{ident} = value;\n"));
            }
            Container::Map => {
                output.push_str("        for v in value.values() {\n");
                output.push_str(&format!("            convert::finite_float({key}, *v)?;\n"));
                output.push_str("        }\n");
                output.push_str(&format!("        self.{ident} = value;\n"));
            }
        }
        output.push_str("        Ok(())\n");
    } else {
        let setter_body = match (prop.container, &prop.ty) {
            (Container::Scalar, PropertyType::String) => format!("self.{ident} = value.into();"),
            (Container::Scalar, PropertyType::Datetime) => {
                format!("self.{ident} = datetime_string(value);")
            }
            _ => format!("self.{ident} = value;"),
        };
        output.push_str(&format!(
            "    pub fn set_{base}(&mut self, value: {setter_arg}) {{\n"
        ));
        output.push_str(&format!("        {setter_body}\n"));
    }
    output.push_str("    }\n");

    output
}

/// Expression rendering one element `v: &T` as a JSON value.
fn element_to_value(ty: &PropertyType) -> &'static str {
    match ty {
        PropertyType::String | PropertyType::Datetime => "Value::from(v.clone())",
        PropertyType::Int | PropertyType::Float | PropertyType::Bool => "Value::from(*v)",
        PropertyType::Complex(_) => "Value::Object(Serializable::to_dict(v))",
        PropertyType::Other(_) => "v.clone()",
    }
}

fn to_value(field: &Field<'_>) -> String {
    let ident = &field.ident;
    let prop = field.prop;
    match (prop.container, &prop.ty) {
        (Container::Array, ty) => format!(
            "Value::Array(self.{ident}.iter().map(|v| {}).collect())",
            element_to_value(ty)
        ),
        (Container::Map, ty) => format!(
            "Value::Object(self.{ident}.iter().map(|(k, v)| (k.clone(), {})).collect())",
            element_to_value(ty)
        ),
        (Container::Scalar, PropertyType::String | PropertyType::Datetime) => {
            format!("Value::from(self.{ident}.clone())")
        }
        (Container::Scalar, PropertyType::Int | PropertyType::Float | PropertyType::Bool) => {
            format!("Value::from(self.{ident})")
        }
        (Container::Scalar, PropertyType::Complex(_)) => format!(
            "self.{ident}.as_ref().map_or(Value::Null, |v| Value::Object(Serializable::to_dict(v)))"
        ),
        (Container::Scalar, PropertyType::Other(_)) => format!("self.{ident}.clone()"),
    }
}

/// Expression loading one element from `source: &Value`.
fn element_from_value(ty: &PropertyType, source: &str) -> String {
    match ty {
        PropertyType::String | PropertyType::Datetime => {
            format!("convert::string_value(key, {source})?")
        }
        PropertyType::Int => format!("convert::int_value(key, {source})?"),
        PropertyType::Float => format!("convert::float_value(key, {source})?"),
        PropertyType::Bool => format!("convert::bool_value(key, {source})?"),
        PropertyType::Other(_) => format!("{source}.clone()"),
        PropertyType::Complex(name) => format!(
            "{{\n                            let mut ud = {name}::factory();\n                            \
             Serializable::from_dict(&mut ud, convert::dict_value(key, {source})?)?;\n                            \
             ud\n                        }}"
        ),
    }
}

fn generate_load(field: &Field<'_>) -> String {
    let ident = &field.ident;
    let prop = field.prop;
    let key = quote(&prop.name);

    match (prop.container, &prop.ty) {
        (Container::Scalar, PropertyType::Complex(name)) => format!(
            "                {key} => Serializable::from_dict(\n                    \
             self.{ident}.get_or_insert_with({name}::factory),\n                    \
             convert::dict_value(key, raw)?,\n                )?,\n"
        ),
        (Container::Scalar, ty) => format!(
            "                {key} => self.{ident} = {},\n",
            element_from_value(ty, "raw")
        ),
        (Container::Array, ty) => format!(
            "                {key} => {{\n                    \
             let mut res = Vec::new();\n                    \
             for rw in convert::array_value(key, raw)? {{\n                        \
             res.push({});\n                    \
             }}\n                    \
             self.{ident} = res;\n                \
             }}\n",
            element_from_value(ty, "rw")
        ),
        (Container::Map, ty) => format!(
            "                {key} => {{\n                    \
             let mut res = IndexMap::new();\n                    \
             for (rk, rw) in convert::dict_value(key, raw)? {{\n                        \
             res.insert(rk.clone(), {});\n                    \
             }}\n                    \
             self.{ident} = res;\n                \
             }}\n",
            element_from_value(ty, "rw")
        ),
    }
}
