use thiserror::Error;

/// Result type for consistency checks.
pub type Result<T> = std::result::Result<T, Error>;

/// A generation config or sample spec that cannot be made consistent with the model.
///
/// These indicate a malformed hand-written input and abort the run immediately.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid field path '{spec}': {message}")]
    FieldPath { spec: String, message: String },

    #[error("Message type {type_name} does not have field {field}")]
    MissingField { type_name: String, field: String },

    #[error("Primitive type {type_name} cannot have children")]
    PrimitiveWithChildren { type_name: String },

    #[error("typeRef {type_name} not compatible with {line_type}")]
    IncompatibleLineType {
        type_name: String,
        line_type: &'static str,
    },

    #[error("typeRef {type_name} must have ordered indices, got [{keys}]")]
    UnorderedIndices { type_name: String, keys: String },

    #[error("node with Unknown type cannot have children")]
    UnknownWithChildren,

    #[error("Could not assign value '{value}' to type {type_name}")]
    InvalidLiteral { value: String, type_name: String },

    #[error("Tried to assign value for unsupported type {type_name}")]
    UnsupportedLiteralType { type_name: String },

    #[error("{method}:{sample}: {message}")]
    OutputSpec {
        method: String,
        sample: String,
        message: String,
    },

    #[error("method {method}: {message}")]
    Consistency { method: String, message: String },
}

impl Error {
    pub(crate) fn consistency(method: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Consistency {
            method: method.into(),
            message: message.into(),
        }
    }
}
