//! Python struct class generation.

use super::{default_expr, type_hint};
use storz_schema::{Container, PropertyDescriptor, PropertyType, StructDescriptor};

const NOT_IMPLEMENTED: &str = "        raise Exception(\"not implemented\")\n";

/// Generator for one struct class.
pub struct StructGenerator<'a> {
    descriptor: &'a StructDescriptor,
}

impl<'a> StructGenerator<'a> {
    /// Creates a new struct generator.
    #[must_use]
    pub fn new(descriptor: &'a StructDescriptor) -> Self {
        Self { descriptor }
    }

    /// Generates the interface, factory and implementation.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.generate_interface());
        output.push_str(&self.generate_factory());
        output.push_str(&self.generate_implementation());
        output
    }

    fn generate_interface(&self) -> String {
        let name = &self.descriptor.name;
        let mut output = String::new();

        output.push_str(&format!("\n\nclass {name}:\n"));
        output.push_str("    def __init__(self):\n");
        output.push_str(
            "        raise Exception(\"cannot initialize like this. use the factory method\")\n",
        );
        for signature in [
            "ToDict(self) -> dict",
            "FromDict(self, data: dict)",
            "ToJson(self) -> str",
            "FromJson(self, jstr: str)",
        ] {
            output.push_str(&format!("\n    def {signature}:\n"));
            output.push_str(NOT_IMPLEMENTED);
        }

        for prop in &self.descriptor.properties {
            let accessor = prop.capitalized_name();
            let hint = type_hint(prop);
            output.push_str(&format!("\n    def {accessor}(self) -> {hint}:\n"));
            output.push_str(NOT_IMPLEMENTED);
            output.push_str(&format!("\n    def Set{accessor}(self, val: {hint}):\n"));
            output.push_str(NOT_IMPLEMENTED);
        }

        output
    }

    fn generate_factory(&self) -> String {
        let name = &self.descriptor.name;
        format!("\n\ndef {name}Factory() -> {name}:\n    return _{name}()\n")
    }

    fn generate_implementation(&self) -> String {
        let name = &self.descriptor.name;
        let mut output = String::new();

        output.push_str(&format!("\n\nclass _{name}({name}):\n"));
        output.push_str("    def __init__(self):\n");
        if self.descriptor.properties.is_empty() {
            output.push_str("        pass\n");
        }
        for prop in &self.descriptor.properties {
            output.push_str(&format!(
                "        self.{}_ = {}\n",
                prop.name,
                default_expr(&prop.default_value())
            ));
        }

        for prop in &self.descriptor.properties {
            output.push_str(&generate_accessors(prop));
        }

        output.push_str("\n    def ToJson(self) -> str:\n");
        output.push_str("        return json.dumps(self.ToDict())\n");
        output.push_str("\n    def FromJson(self, jstr: str):\n");
        output.push_str("        self.FromDict(json.loads(jstr))\n");

        output.push_str(&self.generate_to_dict());
        output.push_str(&self.generate_from_dict());
        output
    }

    fn generate_to_dict(&self) -> String {
        let mut output = String::new();
        output.push_str("\n    def ToDict(self) -> dict:\n");
        output.push_str("        data = {}\n");

        for prop in &self.descriptor.properties {
            let field = format!("self.{}_", prop.name);
            let value = match (prop.container, prop.is_complex_type()) {
                (Container::Array, true) => format!("[v.ToDict() for v in {field}]"),
                (Container::Array, false) => format!("list({field})"),
                (Container::Map, true) => {
                    format!("{{k: v.ToDict() for k, v in {field}.items()}}")
                }
                (Container::Map, false) => format!("dict({field})"),
                (Container::Scalar, true) => {
                    format!("{field}.ToDict() if {field} is not None else None")
                }
                (Container::Scalar, false) => field,
            };
            output.push_str(&format!("        data[\"{}\"] = {value}\n", prop.name));
        }

        output.push_str("        return data\n");
        output
    }

    fn generate_from_dict(&self) -> String {
        let mut output = String::new();
        output.push_str("\n    def FromDict(self, data: dict):\n");
        output.push_str("        for key, rawValue in data.items():\n");
        output.push_str("            if rawValue is None:\n");
        output.push_str("                continue\n");

        for (idx, prop) in self.descriptor.properties.iter().enumerate() {
            let keyword = if idx == 0 { "if" } else { "elif" };
            output.push_str(&format!("            {keyword} key == \"{}\":\n", prop.name));
            output.push_str(&generate_load(prop));
        }

        output
    }
}

fn generate_accessors(prop: &PropertyDescriptor) -> String {
    let accessor = prop.capitalized_name();
    let hint = type_hint(prop);
    let field = format!("self.{}_", prop.name);
    let mut output = String::new();

    let getter = match (prop.container, &prop.ty) {
        (Container::Scalar, PropertyType::Datetime) => format!("store.datetime_parse({field})"),
        _ => field.clone(),
    };
    output.push_str(&format!("\n    def {accessor}(self) -> {hint}:\n"));
    output.push_str(&format!("        return {getter}\n"));

    let coerced = match (prop.container, &prop.ty) {
        (Container::Scalar, PropertyType::Datetime) => "store.datetime_string(val)",
        (Container::Scalar, PropertyType::String) => "str(val)",
        (Container::Scalar, PropertyType::Int) => "int(val)",
        (Container::Scalar, PropertyType::Float) => "float(val)",
        (Container::Scalar, PropertyType::Bool) => "bool(val)",
        _ => "val",
    };
    output.push_str(&format!("\n    def Set{accessor}(self, val: {hint}):\n"));
    output.push_str(&format!("        {field} = {coerced}\n"));

    output
}

fn generate_load(prop: &PropertyDescriptor) -> String {
    let field = format!("self.{}_", prop.name);
    let indent = "                ";
    let factory = prop.ty.struct_name().map(|n| format!("{n}Factory()"));

    match (prop.container, factory) {
        (Container::Array, Some(factory)) => format!(
            "{indent}res = []\n\
             {indent}for rw in rawValue:\n\
             {indent}    ud = {factory}\n\
             {indent}    ud.FromDict(rw)\n\
             {indent}    res.append(ud)\n\
             {indent}{field} = res\n"
        ),
        (Container::Array, None) => format!("{indent}{field} = list(rawValue)\n"),
        (Container::Map, Some(factory)) => format!(
            "{indent}res = {{}}\n\
             {indent}for rk, rw in rawValue.items():\n\
             {indent}    ud = {factory}\n\
             {indent}    ud.FromDict(rw)\n\
             {indent}    res[rk] = ud\n\
             {indent}{field} = res\n"
        ),
        (Container::Map, None) => format!("{indent}{field} = dict(rawValue)\n"),
        (Container::Scalar, Some(factory)) => format!(
            "{indent}if {field} is None:\n\
             {indent}    {field} = {factory}\n\
             {indent}{field}.FromDict(rawValue)\n"
        ),
        (Container::Scalar, None) => format!("{indent}{field} = rawValue\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> StructDescriptor {
        StructDescriptor::new("UserSpec")
            .with_property(PropertyDescriptor::scalar("count", PropertyType::Int))
            .with_property(PropertyDescriptor::scalar("createdAt", PropertyType::Datetime))
            .with_property(PropertyDescriptor::array("tags", PropertyType::String))
            .with_property(PropertyDescriptor::scalar(
                "address",
                PropertyType::Complex("Address".into()),
            ))
            .with_property(PropertyDescriptor::map(
                "contacts",
                PropertyType::Complex("Address".into()),
            ))
    }

    #[test]
    fn test_interface_and_factory() {
        let code = StructGenerator::new(&descriptor()).generate();
        assert!(code.contains("class UserSpec:\n"));
        assert!(code.contains("cannot initialize like this. use the factory method"));
        assert!(code.contains("def UserSpecFactory() -> UserSpec:\n    return _UserSpec()\n"));
        assert!(code.contains("class _UserSpec(UserSpec):\n"));
        assert!(code.contains("        self.count_ = 0\n"));
        assert!(code.contains("        self.tags_ = []\n"));
        assert!(code.contains("        self.address_ = AddressFactory()\n"));
    }

    #[test]
    fn test_accessors_coerce() {
        let code = StructGenerator::new(&descriptor()).generate();
        assert!(code.contains("        self.count_ = int(val)\n"));
        assert!(code.contains("        self.createdAt_ = store.datetime_string(val)\n"));
        assert!(code.contains("        return store.datetime_parse(self.createdAt_)\n"));
        assert!(code.contains("    def CreatedAt(self) -> datetime:\n"));
    }

    #[test]
    fn test_dict_conversion() {
        let code = StructGenerator::new(&descriptor()).generate();
        assert!(code.contains(
            "data[\"address\"] = self.address_.ToDict() if self.address_ is not None else None"
        ));
        assert!(code.contains("data[\"contacts\"] = {k: v.ToDict() for k, v in self.contacts_.items()}"));
        assert!(code.contains("            if rawValue is None:\n                continue\n"));
        assert!(code.contains("            if key == \"count\":\n"));
        assert!(code.contains("            elif key == \"tags\":\n"));
        assert!(code.contains("                    ud = AddressFactory()\n"));
    }

    #[test]
    fn test_empty_struct() {
        let code = StructGenerator::new(&StructDescriptor::new("Empty")).generate();
        assert!(code.contains("    def __init__(self):\n        pass\n"));
    }
}
