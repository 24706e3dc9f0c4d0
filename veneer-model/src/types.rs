//! Field and type references shared by both API sources.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Double,
    Float,
    Int64,
    Uint64,
    Int32,
    Fixed64,
    Fixed32,
    Bool,
    String,
    Bytes,
    Uint32,
    Sfixed32,
    Sfixed64,
    Sint32,
    Sint64,
    Enum,
    Message,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Double => "double",
            TypeKind::Float => "float",
            TypeKind::Int64 => "int64",
            TypeKind::Uint64 => "uint64",
            TypeKind::Int32 => "int32",
            TypeKind::Fixed64 => "fixed64",
            TypeKind::Fixed32 => "fixed32",
            TypeKind::Bool => "bool",
            TypeKind::String => "string",
            TypeKind::Bytes => "bytes",
            TypeKind::Uint32 => "uint32",
            TypeKind::Sfixed32 => "sfixed32",
            TypeKind::Sfixed64 => "sfixed64",
            TypeKind::Sint32 => "sint32",
            TypeKind::Sint64 => "sint64",
            TypeKind::Enum => "enum",
            TypeKind::Message => "message",
        }
    }

    /// Integer kinds of any width or encoding.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            TypeKind::Int64
                | TypeKind::Uint64
                | TypeKind::Int32
                | TypeKind::Fixed64
                | TypeKind::Fixed32
                | TypeKind::Uint32
                | TypeKind::Sfixed32
                | TypeKind::Sfixed64
                | TypeKind::Sint32
                | TypeKind::Sint64
        )
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, TypeKind::Double | TypeKind::Float)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses scalar kinds only; `enum` and `message` are not written by name.
impl FromStr for TypeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "double" => TypeKind::Double,
            "float" => TypeKind::Float,
            "int64" => TypeKind::Int64,
            "uint64" => TypeKind::Uint64,
            "int32" => TypeKind::Int32,
            "fixed64" => TypeKind::Fixed64,
            "fixed32" => TypeKind::Fixed32,
            "bool" => TypeKind::Bool,
            "string" => TypeKind::String,
            "bytes" => TypeKind::Bytes,
            "uint32" => TypeKind::Uint32,
            "sfixed32" => TypeKind::Sfixed32,
            "sfixed64" => TypeKind::Sfixed64,
            "sint32" => TypeKind::Sint32,
            "sint64" => TypeKind::Sint64,
            _ => return Err(format!("'{}' is not a scalar type", s)),
        };
        Ok(kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    #[default]
    Optional,
    Required,
    Repeated,
}

/// Key and value types of a map field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MapEntry {
    pub key: TypeRef,
    pub value: TypeRef,
}

/// A reference to the type of a field, a method input or a method output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeRef {
    pub kind: TypeKind,
    pub cardinality: Cardinality,
    /// Full name of the referenced message or enum.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_entry: Option<Box<MapEntry>>,
}

impl TypeRef {
    pub fn scalar(kind: TypeKind) -> Self {
        Self {
            kind,
            cardinality: Cardinality::Optional,
            type_name: None,
            map_entry: None,
        }
    }

    pub fn message(full_name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Message,
            cardinality: Cardinality::Optional,
            type_name: Some(full_name.into()),
            map_entry: None,
        }
    }

    pub fn enumeration(full_name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Enum,
            cardinality: Cardinality::Optional,
            type_name: Some(full_name.into()),
            map_entry: None,
        }
    }

    /// A `map<key, value>`: a repeated message whose entries carry the key and value types.
    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        Self {
            kind: TypeKind::Message,
            cardinality: Cardinality::Repeated,
            type_name: None,
            map_entry: Some(Box::new(MapEntry { key, value })),
        }
    }

    pub fn repeated(mut self) -> Self {
        self.cardinality = Cardinality::Repeated;
        self
    }

    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    /// The single-element form of this type.
    pub fn make_optional(&self) -> TypeRef {
        TypeRef {
            kind: self.kind,
            cardinality: Cardinality::Optional,
            type_name: self.type_name.clone(),
            map_entry: None,
        }
    }

    pub fn is_repeated(&self) -> bool {
        self.cardinality == Cardinality::Repeated
    }

    pub fn is_map(&self) -> bool {
        self.is_repeated() && self.map_entry.is_some()
    }

    pub fn is_message(&self) -> bool {
        self.kind == TypeKind::Message
    }

    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }

    pub fn is_primitive(&self) -> bool {
        !self.is_message() && !self.is_enum()
    }

    pub fn is_string_or_bytes(&self) -> bool {
        matches!(self.kind, TypeKind::String | TypeKind::Bytes)
    }

    pub fn map_key(&self) -> Option<&TypeRef> {
        self.map_entry.as_deref().map(|entry| &entry.key)
    }

    pub fn map_value(&self) -> Option<&TypeRef> {
        self.map_entry.as_deref().map(|entry| &entry.value)
    }

    /// The last segment of the referenced type name, or the kind name for scalars.
    pub fn simple_name(&self) -> &str {
        match &self.type_name {
            Some(name) => name.rsplit('.').next().unwrap_or(name),
            None => self.kind.as_str(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(entry) = self.map_entry.as_deref() {
            return write!(f, "map<{}, {}>", entry.key, entry.value);
        }
        if self.is_repeated() {
            write!(f, "repeated ")?;
        }
        match &self.type_name {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{}", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_predicates() {
        let map = TypeRef::map(
            TypeRef::scalar(TypeKind::String),
            TypeRef::message("library.Shelf"),
        );
        assert!(map.is_map());
        assert!(map.is_repeated());
        assert_eq!(map.map_key().map(|k| k.kind), Some(TypeKind::String));
        assert!(!map.make_optional().is_map());
        assert_eq!(map.to_string(), "map<string, library.Shelf>");
    }

    #[test]
    fn test_make_optional_drops_repetition() {
        let list = TypeRef::message("library.Book").repeated();
        assert_eq!(list.to_string(), "repeated library.Book");
        let single = list.make_optional();
        assert!(!single.is_repeated());
        assert_eq!(single.simple_name(), "Book");
    }

    #[test]
    fn test_scalar_from_str() {
        assert_eq!("sint64".parse::<TypeKind>(), Ok(TypeKind::Sint64));
        assert!("message".parse::<TypeKind>().is_err());
        assert!(TypeKind::Fixed32.is_integer());
        assert!(!TypeKind::Float.is_integer());
    }
}
