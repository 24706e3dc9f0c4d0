//! Naming tables for each target language.

use veneer_config::Language;
use veneer_core::{SymbolStrategy, to_camel_case, to_pascal_case, to_snake_case};
use veneer_model::TypeKind;

use super::{NamingConvention, PrintStyle};

fn to_upper_snake_case(s: &str) -> String {
    to_snake_case(s).to_uppercase()
}

fn append_underscore(s: &str) -> String {
    format!("{}_", s)
}

fn prepend_at(s: &str) -> String {
    format!("@{}", s)
}

fn java_primitive(kind: TypeKind) -> &'static str {
    match kind {
        TypeKind::Bool => "boolean",
        TypeKind::Double => "double",
        TypeKind::Float => "float",
        TypeKind::Int32 | TypeKind::Uint32 | TypeKind::Sint32 => "int",
        TypeKind::Fixed32 | TypeKind::Sfixed32 => "int",
        TypeKind::String => "String",
        TypeKind::Bytes => "ByteString",
        _ => "long",
    }
}

/// Boxed forms used inside generic collections.
fn java_boxed(name: &str) -> &str {
    match name {
        "boolean" => "Boolean",
        "double" => "Double",
        "float" => "Float",
        "int" => "Integer",
        "long" => "Long",
        other => other,
    }
}

fn java_element_primitive(kind: TypeKind) -> &'static str {
    java_boxed(java_primitive(kind))
}

fn python_primitive(kind: TypeKind) -> &'static str {
    match kind {
        TypeKind::Bool => "bool",
        TypeKind::Double | TypeKind::Float => "float",
        TypeKind::String => "str",
        TypeKind::Bytes => "bytes",
        _ => "int",
    }
}

fn go_primitive(kind: TypeKind) -> &'static str {
    match kind {
        TypeKind::Bool => "bool",
        TypeKind::Double => "float64",
        TypeKind::Float => "float32",
        TypeKind::Int32 | TypeKind::Sint32 | TypeKind::Sfixed32 => "int32",
        TypeKind::Uint32 | TypeKind::Fixed32 => "uint32",
        TypeKind::Uint64 | TypeKind::Fixed64 => "uint64",
        TypeKind::String => "string",
        TypeKind::Bytes => "[]byte",
        _ => "int64",
    }
}

fn csharp_primitive(kind: TypeKind) -> &'static str {
    match kind {
        TypeKind::Bool => "bool",
        TypeKind::Double => "double",
        TypeKind::Float => "float",
        TypeKind::Int32 | TypeKind::Sint32 | TypeKind::Sfixed32 => "int",
        TypeKind::Uint32 | TypeKind::Fixed32 => "uint",
        TypeKind::Uint64 | TypeKind::Fixed64 => "ulong",
        TypeKind::String => "string",
        TypeKind::Bytes => "ByteString",
        _ => "long",
    }
}

fn ruby_primitive(kind: TypeKind) -> &'static str {
    match kind {
        TypeKind::Bool => "true/false",
        TypeKind::Double | TypeKind::Float => "Float",
        TypeKind::String | TypeKind::Bytes => "String",
        _ => "Integer",
    }
}

fn php_primitive(kind: TypeKind) -> &'static str {
    match kind {
        TypeKind::Bool => "bool",
        TypeKind::Double | TypeKind::Float => "float",
        TypeKind::String | TypeKind::Bytes => "string",
        _ => "int",
    }
}

fn nodejs_primitive(kind: TypeKind) -> &'static str {
    match kind {
        TypeKind::Bool => "boolean",
        TypeKind::String => "string",
        TypeKind::Bytes => "Buffer",
        _ => "number",
    }
}

pub const JAVA_NAMING: NamingConvention = NamingConvention {
    type_case: to_pascal_case,
    field_case: to_camel_case,
    method_case: to_camel_case,
    local_case: to_camel_case,
    constant_case: to_upper_snake_case,
    reserved_words: &[
        "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
        "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally",
        "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface",
        "long", "native", "new", "package", "private", "protected", "public", "return", "short",
        "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
        "transient", "try", "void", "volatile", "while", "true", "false", "null",
    ],
    escape_reserved: append_underscore,
    primitive_type: java_element_primitive,
    list_type: "List<{}>",
    map_type: "Map<{}, {}>",
    getter_prefix: Some("get"),
    setter_prefix: Some("set"),
    field_accessor: ".{}()",
    index_accessor: ".get({})",
    map_accessor: ".get({})",
    print_style: PrintStyle::Positional("%s"),
    symbol_strategy: SymbolStrategy::Numeric,
};

pub const PYTHON_NAMING: NamingConvention = NamingConvention {
    type_case: to_pascal_case,
    field_case: to_snake_case,
    method_case: to_snake_case,
    local_case: to_snake_case,
    constant_case: to_upper_snake_case,
    reserved_words: &[
        "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
        "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is",
        "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with",
        "yield", "None", "True", "False", "type", "id", "input", "object", "property",
    ],
    escape_reserved: append_underscore,
    primitive_type: python_primitive,
    list_type: "list[{}]",
    map_type: "dict[{}, {}]",
    getter_prefix: None,
    setter_prefix: None,
    field_accessor: ".{}",
    index_accessor: "[{}]",
    map_accessor: "[{}]",
    print_style: PrintStyle::Positional("{}"),
    symbol_strategy: SymbolStrategy::Underscore,
};

pub const GO_NAMING: NamingConvention = NamingConvention {
    type_case: to_pascal_case,
    field_case: to_pascal_case,
    method_case: to_pascal_case,
    local_case: to_camel_case,
    constant_case: to_camel_case,
    reserved_words: &[
        "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
        "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
        "return", "select", "struct", "switch", "type", "var",
    ],
    escape_reserved: append_underscore,
    primitive_type: go_primitive,
    list_type: "[]{}",
    map_type: "map[{}]{}",
    getter_prefix: Some("get"),
    setter_prefix: None,
    field_accessor: ".{}()",
    index_accessor: "[{}]",
    map_accessor: "[{}]",
    print_style: PrintStyle::Positional("%v"),
    symbol_strategy: SymbolStrategy::Numeric,
};

pub const CSHARP_NAMING: NamingConvention = NamingConvention {
    type_case: to_pascal_case,
    field_case: to_pascal_case,
    method_case: to_pascal_case,
    local_case: to_camel_case,
    constant_case: to_pascal_case,
    reserved_words: &[
        "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
        "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
        "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
        "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
        "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
        "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
        "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
        "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
        "void", "volatile", "while",
    ],
    escape_reserved: prepend_at,
    primitive_type: csharp_primitive,
    list_type: "IEnumerable<{}>",
    map_type: "IDictionary<{}, {}>",
    getter_prefix: None,
    setter_prefix: None,
    field_accessor: ".{}",
    index_accessor: "[{}]",
    map_accessor: "[{}]",
    print_style: PrintStyle::Numbered,
    symbol_strategy: SymbolStrategy::Numeric,
};

pub const RUBY_NAMING: NamingConvention = NamingConvention {
    type_case: to_pascal_case,
    field_case: to_snake_case,
    method_case: to_snake_case,
    local_case: to_snake_case,
    constant_case: to_upper_snake_case,
    reserved_words: &[
        "BEGIN", "END", "alias", "and", "begin", "break", "case", "class", "def", "defined?", "do",
        "else", "elsif", "end", "ensure", "false", "for", "if", "in", "module", "next", "nil",
        "not", "or", "redo", "rescue", "retry", "return", "self", "super", "then", "true",
        "undef", "unless", "until", "when", "while", "yield",
    ],
    escape_reserved: append_underscore,
    primitive_type: ruby_primitive,
    list_type: "Array<{}>",
    map_type: "Hash{{} => {}}",
    getter_prefix: None,
    setter_prefix: None,
    field_accessor: ".{}",
    index_accessor: "[{}]",
    map_accessor: "[{}]",
    print_style: PrintStyle::Inline("#{", "}"),
    symbol_strategy: SymbolStrategy::Underscore,
};

pub const PHP_NAMING: NamingConvention = NamingConvention {
    type_case: to_pascal_case,
    field_case: to_camel_case,
    method_case: to_camel_case,
    local_case: to_camel_case,
    constant_case: to_upper_snake_case,
    reserved_words: &[
        "abstract", "and", "array", "as", "break", "callable", "case", "catch", "class", "clone",
        "const", "continue", "declare", "default", "do", "echo", "else", "elseif", "empty",
        "enddeclare", "endfor", "endforeach", "endif", "endswitch", "endwhile", "eval", "exit",
        "extends", "final", "finally", "for", "foreach", "function", "global", "goto", "if",
        "implements", "include", "instanceof", "insteadof", "interface", "isset", "list",
        "namespace", "new", "or", "print", "private", "protected", "public", "require", "return",
        "static", "switch", "throw", "trait", "try", "unset", "use", "var", "while", "xor",
    ],
    escape_reserved: append_underscore,
    primitive_type: php_primitive,
    list_type: "{}[]",
    map_type: "array<{}, {}>",
    getter_prefix: Some("get"),
    setter_prefix: Some("set"),
    field_accessor: "->{}()",
    index_accessor: "[{}]",
    map_accessor: "[{}]",
    print_style: PrintStyle::Positional("%s"),
    symbol_strategy: SymbolStrategy::Numeric,
};

pub const NODEJS_NAMING: NamingConvention = NamingConvention {
    type_case: to_pascal_case,
    field_case: to_camel_case,
    method_case: to_camel_case,
    local_case: to_camel_case,
    constant_case: to_upper_snake_case,
    reserved_words: &[
        "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
        "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
        "import", "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw",
        "true", "try", "typeof", "var", "void", "while", "with", "yield", "let", "static",
        "await",
    ],
    escape_reserved: append_underscore,
    primitive_type: nodejs_primitive,
    list_type: "{}[]",
    map_type: "Object.<{}, {}>",
    getter_prefix: None,
    setter_prefix: None,
    field_accessor: ".{}",
    index_accessor: "[{}]",
    map_accessor: "[{}]",
    print_style: PrintStyle::Inline("${", "}"),
    symbol_strategy: SymbolStrategy::Numeric,
};

/// The naming table for a language.
pub fn naming_for(language: Language) -> &'static NamingConvention {
    match language {
        Language::Java => &JAVA_NAMING,
        Language::Python => &PYTHON_NAMING,
        Language::Go => &GO_NAMING,
        Language::CSharp => &CSHARP_NAMING,
        Language::Ruby => &RUBY_NAMING,
        Language::Php => &PHP_NAMING,
        Language::NodeJs => &NODEJS_NAMING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_has_a_table() {
        for language in Language::ALL {
            let naming = naming_for(language);
            assert!(!naming.type_name("shelf_book").is_empty());
        }
    }

    #[test]
    fn test_go_naming() {
        assert_eq!(GO_NAMING.type_name("list_shelves_request"), "ListShelvesRequest");
        assert_eq!(GO_NAMING.field_accessor("next_page_token"), ".GetNextPageToken()");
        assert_eq!(GO_NAMING.local_var_name("type"), "type_");
    }

    #[test]
    fn test_csharp_escape() {
        assert_eq!(CSHARP_NAMING.local_var_name("string"), "@string");
    }
}
