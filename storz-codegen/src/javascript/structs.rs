//! JavaScript struct class generation.

use super::{CONSTRUCTOR_GUARD, default_expr};
use storz_schema::{Container, PropertyDescriptor, PropertyType, StructDescriptor};

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

        output.push_str(&format!("\nclass {name} {{\n"));
        output.push_str("    constructor(token) {\n");
        output.push_str(CONSTRUCTOR_GUARD);
        output.push_str("    }\n\n");
        output.push_str("    ToDict() { throw new Error(\"not implemented\"); }\n");
        output.push_str("    FromDict(data) { throw new Error(\"not implemented\"); }\n");
        output.push_str("    ToJson() { throw new Error(\"not implemented\"); }\n");
        output.push_str("    FromJson(jstr) { throw new Error(\"not implemented\"); }\n");

        for prop in &self.descriptor.properties {
            let accessor = prop.capitalized_name();
            output.push_str(&format!(
                "    {accessor}() {{ throw new Error(\"not implemented\"); }}\n"
            ));
            output.push_str(&format!(
                "    Set{accessor}(val) {{ throw new Error(\"not implemented\"); }}\n"
            ));
        }

        output.push_str("}\n");
        output
    }

    fn generate_factory(&self) -> String {
        let name = &self.descriptor.name;
        format!("\nfunction {name}Factory() {{\n    return new _{name}(factoryToken);\n}}\n")
    }

    fn generate_implementation(&self) -> String {
        let name = &self.descriptor.name;
        let mut output = String::new();

        output.push_str(&format!("\nclass _{name} extends {name} {{\n"));
        output.push_str("    constructor(token) {\n");
        output.push_str("        super(token);\n");
        for prop in &self.descriptor.properties {
            output.push_str(&format!(
                "        this.{}_ = {};\n",
                prop.name,
                default_expr(&prop.default_value())
            ));
        }
        output.push_str("    }\n");

        for prop in &self.descriptor.properties {
            output.push_str(&generate_accessors(prop));
        }

        output.push_str("\n    ToJson() {\n");
        output.push_str("        return JSON.stringify(this.ToDict());\n");
        output.push_str("    }\n");
        output.push_str("\n    FromJson(jstr) {\n");
        output.push_str("        this.FromDict(JSON.parse(jstr));\n");
        output.push_str("    }\n");

        output.push_str(&self.generate_to_dict());
        output.push_str(&self.generate_from_dict());
        output.push_str("}\n");
        output
    }

    fn generate_to_dict(&self) -> String {
        let mut output = String::new();
        output.push_str("\n    ToDict() {\n");
        output.push_str("        const data = {};\n");

        for prop in &self.descriptor.properties {
            let field = format!("this.{}_", prop.name);
            let value = match (prop.container, prop.is_complex_type()) {
                (Container::Array, true) => format!("{field}.map((v) => v.ToDict())"),
                (Container::Array, false) => format!("{field}.slice()"),
                (Container::Map, true) => format!(
                    "Object.fromEntries(Object.entries({field}).map(([k, v]) => [k, v.ToDict()]))"
                ),
                (Container::Map, false) => format!("Object.assign({{}}, {field})"),
                (Container::Scalar, true) => format!("{field} ? {field}.ToDict() : null"),
                (Container::Scalar, false) => field,
            };
            output.push_str(&format!("        data[\"{}\"] = {value};\n", prop.name));
        }

        output.push_str("        return data;\n");
        output.push_str("    }\n");
        output
    }

    fn generate_from_dict(&self) -> String {
        let mut output = String::new();
        output.push_str("\n    FromDict(data) {\n");
        output.push_str("        for (const key of Object.keys(data)) {\n");
        output.push_str("            const rawValue = data[key];\n");
        output.push_str("            if (rawValue === null || rawValue === undefined) continue;\n\n");
        output.push_str("            switch (key) {\n");

        for prop in &self.descriptor.properties {
            output.push_str(&format!("                case \"{}\": {{\n", prop.name));
            output.push_str(&generate_load(prop));
            output.push_str("                    break;\n");
            output.push_str("                }\n");
        }

        output.push_str("            }\n");
        output.push_str("        }\n");
        output.push_str("    }\n");
        output
    }
}

fn generate_accessors(prop: &PropertyDescriptor) -> String {
    let accessor = prop.capitalized_name();
    let field = format!("this.{}_", prop.name);
    let mut output = String::new();

    let getter = match (prop.container, &prop.ty) {
        (Container::Scalar, PropertyType::Datetime) => format!("store.datetime_parse({field})"),
        _ => field.clone(),
    };
    output.push_str(&format!("\n    {accessor}() {{\n"));
    output.push_str(&format!("        return {getter};\n"));
    output.push_str("    }\n");

    output.push_str(&format!("\n    Set{accessor}(val) {{\n"));
    match (prop.container, &prop.ty) {
        (Container::Scalar, PropertyType::Int) => {
            output.push_str("        const parsed = Number.parseInt(val, 10);\n");
            output.push_str(&format!(
                "        if (Number.isNaN(parsed)) throw new TypeError(\"{}: not an int: \" + val);\n",
                prop.name
            ));
            output.push_str(&format!("        {field} = parsed;\n"));
        }
        (Container::Scalar, PropertyType::Float) => {
            output.push_str("        const parsed = Number(val);\n");
            output.push_str(&format!(
                "        if (Number.isNaN(parsed)) throw new TypeError(\"{}: not a float: \" + val);\n",
                prop.name
            ));
            output.push_str(&format!("        {field} = parsed;\n"));
        }
        (Container::Scalar, PropertyType::Datetime) => {
            output.push_str(&format!("        {field} = store.datetime_string(val);\n"));
        }
        (Container::Scalar, PropertyType::String) => {
            output.push_str(&format!("        {field} = String(val);\n"));
        }
        (Container::Scalar, PropertyType::Bool) => {
            output.push_str(&format!("        {field} = Boolean(val);\n"));
        }
        _ => output.push_str(&format!("        {field} = val;\n")),
    }
    output.push_str("    }\n");

    output
}

fn generate_load(prop: &PropertyDescriptor) -> String {
    let field = format!("this.{}_", prop.name);
    let indent = "                    ";
    let factory = prop.ty.struct_name().map(|n| format!("{n}Factory()"));

    match (prop.container, factory) {
        (Container::Array, Some(factory)) => format!(
            "{indent}{field} = rawValue.map((rw) => {{\n\
             {indent}    const ud = {factory};\n\
             {indent}    ud.FromDict(rw);\n\
             {indent}    return ud;\n\
             {indent}}});\n"
        ),
        (Container::Array, None) => format!("{indent}{field} = rawValue.slice();\n"),
        (Container::Map, Some(factory)) => format!(
            "{indent}const res = {{}};\n\
             {indent}for (const rk of Object.keys(rawValue)) {{\n\
             {indent}    const ud = {factory};\n\
             {indent}    ud.FromDict(rawValue[rk]);\n\
             {indent}    res[rk] = ud;\n\
             {indent}}}\n\
             {indent}{field} = res;\n"
        ),
        (Container::Map, None) => format!("{indent}{field} = Object.assign({{}}, rawValue);\n"),
        (Container::Scalar, Some(factory)) => format!(
            "{indent}if ({field} === null) {{\n\
             {indent}    {field} = {factory};\n\
             {indent}}}\n\
             {indent}{field}.FromDict(rawValue);\n"
        ),
        (Container::Scalar, None) => format!("{indent}{field} = rawValue;\n"),
    }
}
