//! Naming conventions for different target languages.

use veneer_core::{SymbolStrategy, to_snake_case};
use veneer_model::{TypeKind, TypeRef};

/// How a language interpolates values into a printed string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintStyle {
    /// Replace `%s` with a fixed placeholder and pass arguments separately.
    Positional(&'static str),
    /// `{0}`, `{1}`, ... with arguments passed separately.
    Numbered,
    /// Splice arguments into the string between a prefix and a suffix.
    Inline(&'static str, &'static str),
}

/// Language-specific naming rules used when building views.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Transform a name to a type name (e.g., "shelf_book" -> "ShelfBook")
    pub type_case: fn(&str) -> String,
    /// Transform a name to a field name
    pub field_case: fn(&str) -> String,
    /// Transform a name to a method name
    pub method_case: fn(&str) -> String,
    /// Transform a name to a local variable name
    pub local_case: fn(&str) -> String,
    /// Transform a name to a constant name
    pub constant_case: fn(&str) -> String,
    /// List of reserved words in the language
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "class" -> "class_")
    pub escape_reserved: fn(&str) -> String,
    /// Type names of scalar kinds
    pub primitive_type: fn(TypeKind) -> &'static str,
    /// Repeated type with `{}` standing for the element type
    pub list_type: &'static str,
    /// Map type with `{}` standing for the key and then the value type
    pub map_type: &'static str,
    /// Prefix of getter methods; `None` means fields are read directly
    pub getter_prefix: Option<&'static str>,
    /// Prefix of setter methods; `None` means fields are assigned directly
    pub setter_prefix: Option<&'static str>,
    /// Field accessor template with `{}` standing for the getter or field name
    pub field_accessor: &'static str,
    /// Index accessor template with `{}` standing for the index
    pub index_accessor: &'static str,
    /// Map lookup template with `{}` standing for the key literal
    pub map_accessor: &'static str,
    pub print_style: PrintStyle,
    /// Disambiguation applied by per-sample symbol tables
    pub symbol_strategy: SymbolStrategy,
}

/// Names the sample templates declare themselves.
const SAMPLE_TEMPLATE_NAMES: &[&str] = &["client", "request", "response"];

impl NamingConvention {
    /// Check if a name is a reserved word.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    pub fn type_name(&self, name: &str) -> String {
        self.safe_name(&(self.type_case)(name))
    }

    pub fn field_name(&self, name: &str) -> String {
        self.safe_name(&(self.field_case)(name))
    }

    pub fn method_name(&self, name: &str) -> String {
        self.safe_name(&(self.method_case)(name))
    }

    pub fn local_var_name(&self, name: &str) -> String {
        self.safe_name(&(self.local_case)(name))
    }

    pub fn constant_name(&self, name: &str) -> String {
        (self.constant_case)(name)
    }

    /// Whether a sample may not declare this variable.
    pub fn is_sample_template_name(&self, name: &str) -> bool {
        SAMPLE_TEMPLATE_NAMES.contains(&name)
    }

    /// The type name of a field, method input or method output.
    pub fn type_name_for(&self, type_ref: &TypeRef) -> String {
        if let (Some(key), Some(value)) = (type_ref.map_key(), type_ref.map_value()) {
            return self
                .map_type
                .replacen("{}", &self.type_name_for(key), 1)
                .replacen("{}", &self.type_name_for(value), 1);
        }
        let element = self.element_type_name(type_ref);
        if type_ref.is_repeated() {
            self.list_type.replacen("{}", &element, 1)
        } else {
            element
        }
    }

    /// The type name of one element, ignoring repetition.
    pub fn element_type_name(&self, type_ref: &TypeRef) -> String {
        if type_ref.is_message() || type_ref.is_enum() {
            self.type_name(type_ref.simple_name())
        } else {
            (self.primitive_type)(type_ref.kind).to_string()
        }
    }

    pub fn getter_name(&self, field: &str) -> String {
        match self.getter_prefix {
            Some(prefix) => self.method_name(&format!("{}_{}", prefix, to_snake_case(field))),
            None => self.field_name(field),
        }
    }

    pub fn setter_name(&self, field: &str) -> String {
        match self.setter_prefix {
            Some(prefix) => self.method_name(&format!("{}_{}", prefix, to_snake_case(field))),
            None => self.field_name(field),
        }
    }

    /// Getter for the element count of a repeated field.
    pub fn count_getter_name(&self, field: &str) -> String {
        let prefix = self.getter_prefix.unwrap_or("get");
        self.method_name(&format!("{}_{}_count", prefix, to_snake_case(field)))
    }

    /// The accessor appended to a variable to read a field.
    pub fn field_accessor(&self, field: &str) -> String {
        self.field_accessor.replacen("{}", &self.getter_name(field), 1)
    }

    pub fn index_accessor(&self, index: usize) -> String {
        self.index_accessor.replacen("{}", &index.to_string(), 1)
    }

    /// The accessor for a map lookup; string keys keep their quotes.
    pub fn map_key_accessor(&self, key_type: &TypeRef, key: &str) -> String {
        let literal = if key_type.is_string_or_bytes() {
            format!("\"{}\"", key)
        } else {
            key.to_string()
        };
        self.map_accessor.replacen("{}", &literal, 1)
    }

    /// Turn a `%s` format plus rendered arguments into this language's form.
    pub fn interpolate(&self, format: &str, args: Vec<String>) -> (String, Vec<String>) {
        match self.print_style {
            PrintStyle::Positional(placeholder) => (format.replace("%s", placeholder), args),
            PrintStyle::Numbered => {
                let mut out = String::new();
                let mut index = 0;
                let mut rest = format;
                while let Some(pos) = rest.find("%s") {
                    out.push_str(&rest[..pos]);
                    out.push_str(&format!("{{{}}}", index));
                    index += 1;
                    rest = &rest[pos + 2..];
                }
                out.push_str(rest);
                (out, args)
            }
            PrintStyle::Inline(prefix, suffix) => {
                let mut out = String::new();
                let mut args = args.into_iter();
                let mut rest = format;
                while let Some(pos) = rest.find("%s") {
                    out.push_str(&rest[..pos]);
                    if let Some(arg) = args.next() {
                        out.push_str(prefix);
                        out.push_str(&arg);
                        out.push_str(suffix);
                    }
                    rest = &rest[pos + 2..];
                }
                out.push_str(rest);
                (out, Vec::new())
            }
        }
    }
}
