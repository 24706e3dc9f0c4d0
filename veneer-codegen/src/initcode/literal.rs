//! Literal validation for assigned values, map keys and list indices.

use std::sync::LazyLock;

use regex::Regex;
use veneer_model::{TypeKind, TypeRef};

use crate::{Error, Result};

static FLOAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").expect("Invalid regex"));
static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("Invalid regex"));
static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"([^"]*)"$"#).expect("Invalid regex"));

/// Check a literal against a type and return its normalized form.
///
/// Booleans are lowercased and strings lose their surrounding quotes. Integer
/// literals are not checked against the width of the declared type.
pub fn validate_value(type_ref: &TypeRef, value: &str) -> Result<String> {
    let kind = type_ref.kind;
    let normalized = match kind {
        TypeKind::Bool => {
            let lower = value.to_ascii_lowercase();
            (lower == "true" || lower == "false").then_some(lower)
        }
        TypeKind::Double | TypeKind::Float => FLOAT.is_match(value).then(|| value.to_string()),
        kind if kind.is_integer() => INTEGER.is_match(value).then(|| value.to_string()),
        TypeKind::String | TypeKind::Bytes => QUOTED
            .captures(value)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string()),
        _ => {
            return Err(Error::UnsupportedLiteralType {
                type_name: type_ref.to_string(),
            });
        }
    };
    normalized.ok_or_else(|| Error::InvalidLiteral {
        value: value.to_string(),
        type_name: type_ref.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(kind: TypeKind) -> TypeRef {
        TypeRef::scalar(kind)
    }

    #[test]
    fn test_bool_is_normalized() {
        assert_eq!(validate_value(&scalar(TypeKind::Bool), "TRUE").unwrap(), "true");
        assert_eq!(validate_value(&scalar(TypeKind::Bool), "false").unwrap(), "false");
        let err = validate_value(&scalar(TypeKind::Bool), "notabool").unwrap_err();
        assert_eq!(err.to_string(), "Could not assign value 'notabool' to type bool");
    }

    #[test]
    fn test_numbers() {
        assert!(validate_value(&scalar(TypeKind::Double), "-1.5").is_ok());
        assert!(validate_value(&scalar(TypeKind::Float), ".5").is_ok());
        assert!(validate_value(&scalar(TypeKind::Float), "1.").is_err());
        assert!(validate_value(&scalar(TypeKind::Int64), "+42").is_ok());
        assert!(validate_value(&scalar(TypeKind::Uint32), "4.2").is_err());
        // No width check
        assert!(validate_value(&scalar(TypeKind::Int32), "99999999999999").is_ok());
    }

    #[test]
    fn test_strings_are_unquoted() {
        assert_eq!(
            validate_value(&scalar(TypeKind::String), "\"shelves/1\"").unwrap(),
            "shelves/1"
        );
        assert!(validate_value(&scalar(TypeKind::Bytes), "raw").is_err());
        assert!(validate_value(&scalar(TypeKind::String), "\"a\"b\"").is_err());
    }

    #[test]
    fn test_unsupported_kind() {
        let err = validate_value(&TypeRef::message("library.Shelf"), "x").unwrap_err();
        assert!(matches!(err, Error::UnsupportedLiteralType { .. }));
    }
}
