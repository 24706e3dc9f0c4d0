//! The source-agnostic API model.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::{Error, Result, TypeRef};

/// Full name of the well-known empty message.
pub const EMPTY_TYPE: &str = "google.protobuf.Empty";
/// Full name of the long-running operation message.
pub const OPERATION_TYPE: &str = "google.longrunning.Operation";

/// Which kind of description an [`ApiModel`] was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiSource {
    Proto,
    Discovery,
}

impl fmt::Display for ApiSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiSource::Proto => write!(f, "Protobuf"),
            ApiSource::Discovery => write!(f, "Discovery"),
        }
    }
}

/// Schema details only discovery documents carry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DiscoverySchema {
    /// `path` or `query` for method parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum FieldDetail {
    Proto { number: u32 },
    Discovery(DiscoverySchema),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldModel {
    /// Simple name as declared.
    pub name: String,
    /// `<parent full name>.<name>`
    pub full_name: String,
    /// Full name of the message declaring this field.
    pub parent: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oneof: Option<String>,
    pub detail: FieldDetail,
}

impl FieldModel {
    pub fn api_source(&self) -> ApiSource {
        match self.detail {
            FieldDetail::Proto { .. } => ApiSource::Proto,
            FieldDetail::Discovery(_) => ApiSource::Discovery,
        }
    }

    pub fn is_repeated(&self) -> bool {
        self.type_ref.is_repeated()
    }

    pub fn is_map(&self) -> bool {
        self.type_ref.is_map()
    }

    pub fn is_message(&self) -> bool {
        self.type_ref.is_message()
    }

    pub fn is_enum(&self) -> bool {
        self.type_ref.is_enum()
    }

    pub fn is_primitive(&self) -> bool {
        self.type_ref.is_primitive()
    }

    /// The discovery schema of this field.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnsupportedOperation`] for proto fields.
    pub fn discovery_schema(&self) -> Result<&DiscoverySchema> {
        match &self.detail {
            FieldDetail::Discovery(schema) => Ok(schema),
            FieldDetail::Proto { .. } => Err(Box::new(Error::UnsupportedOperation {
                operation: "discovery field schema",
                api_source: ApiSource::Proto,
            })),
        }
    }

    /// The proto field number.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnsupportedOperation`] for discovery fields.
    pub fn proto_number(&self) -> Result<u32> {
        match &self.detail {
            FieldDetail::Proto { number } => Ok(*number),
            FieldDetail::Discovery(_) => Err(Box::new(Error::UnsupportedOperation {
                operation: "proto field number",
                api_source: ApiSource::Discovery,
            })),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageModel {
    pub name: String,
    pub full_name: String,
    pub fields: Vec<FieldModel>,
}

impl MessageModel {
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumModel {
    pub name: String,
    pub full_name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpBinding {
    /// Lowercase HTTP verb.
    pub verb: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl HttpBinding {
    /// Field paths bound by `{field}` or `{field=template}` segments, with the template if any.
    pub fn path_fields(&self) -> Vec<(String, Option<String>)> {
        let mut fields = Vec::new();
        let mut rest = self.path.as_str();
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            let inner = &rest[start + 1..start + len];
            match inner.split_once('=') {
                Some((field, template)) => {
                    fields.push((field.trim().to_string(), Some(template.trim().to_string())))
                }
                None => fields.push((inner.trim().to_string(), None)),
            }
            rest = &rest[start + len + 1..];
        }
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodModel {
    /// Simple name, e.g. `ListShelves`.
    pub name: String,
    /// Fully qualified name, e.g. `google.example.library.v1.LibraryService.ListShelves`.
    pub full_name: String,
    /// The name as written in the source description.
    pub raw_name: String,
    pub input: TypeRef,
    pub output: TypeRef,
    pub request_streaming: bool,
    pub response_streaming: bool,
    pub idempotent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpBinding>,
}

impl MethodModel {
    pub fn is_streaming(&self) -> bool {
        self.request_streaming || self.response_streaming
    }
}

/// Whether an HTTP verb is idempotent.
pub fn is_idempotent_verb(verb: &str) -> bool {
    matches!(
        verb.to_ascii_lowercase().as_str(),
        "get" | "head" | "put" | "delete"
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceModel {
    pub name: String,
    pub full_name: String,
    /// Unreachable interfaces are declared but not exposed by the service.
    pub reachable: bool,
    pub methods: Vec<MethodModel>,
}

impl InterfaceModel {
    pub fn method(&self, simple_name: &str) -> Option<&MethodModel> {
        self.methods.iter().find(|m| m.name == simple_name)
    }
}

/// A read-only API description, whichever source it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiModel {
    pub source: ApiSource,
    /// Dotted package, e.g. `google.example.library.v1`.
    pub package: String,
    pub interfaces: Vec<InterfaceModel>,
    pub messages: IndexMap<String, MessageModel>,
    pub enums: IndexMap<String, EnumModel>,
}

impl ApiModel {
    pub fn interface(&self, full_name: &str) -> Option<&InterfaceModel> {
        self.interfaces.iter().find(|i| i.full_name == full_name)
    }

    pub fn message(&self, full_name: &str) -> Option<&MessageModel> {
        self.messages.get(full_name)
    }

    /// The message a type refers to, if it is a (non-map) message type.
    pub fn message_of(&self, type_ref: &TypeRef) -> Option<&MessageModel> {
        if type_ref.is_map() {
            return None;
        }
        type_ref.type_name.as_deref().and_then(|name| self.message(name))
    }

    /// Fields of a message type; empty for anything else.
    pub fn fields_of(&self, type_ref: &TypeRef) -> &[FieldModel] {
        self.message_of(type_ref)
            .map(|m| m.fields.as_slice())
            .unwrap_or(&[])
    }

    pub fn field_of(&self, type_ref: &TypeRef, name: &str) -> Option<&FieldModel> {
        self.message_of(type_ref).and_then(|m| m.field(name))
    }

    pub fn input_fields(&self, method: &MethodModel) -> &[FieldModel] {
        self.fields_of(&method.input)
    }

    pub fn output_fields(&self, method: &MethodModel) -> &[FieldModel] {
        self.fields_of(&method.output)
    }

    pub fn is_empty_type(&self, type_ref: &TypeRef) -> bool {
        type_ref.type_name.as_deref() == Some(EMPTY_TYPE)
    }

    pub fn is_operation_type(&self, type_ref: &TypeRef) -> bool {
        type_ref.type_name.as_deref() == Some(OPERATION_TYPE)
    }

    /// Resolve a possibly package-relative message name to a declared full name.
    pub fn resolve_message_name(&self, name: &str) -> Option<&str> {
        if let Some((full, _)) = self.messages.get_key_value(name) {
            return Some(full.as_str());
        }
        let qualified = format!("{}.{}", self.package, name);
        self.messages
            .get_key_value(&qualified)
            .map(|(full, _)| full.as_str())
    }
}

/// The messages every model can refer to without declaring them.
pub(crate) fn well_known_messages(source: ApiSource) -> Vec<MessageModel> {
    let empty = MessageModel {
        name: "Empty".into(),
        full_name: EMPTY_TYPE.into(),
        fields: Vec::new(),
    };
    let operation_fields = [
        ("name", TypeRef::scalar(crate::TypeKind::String), 1),
        ("done", TypeRef::scalar(crate::TypeKind::Bool), 3),
    ]
    .into_iter()
    .map(|(name, type_ref, number)| FieldModel {
        name: name.into(),
        full_name: format!("{}.{}", OPERATION_TYPE, name),
        parent: OPERATION_TYPE.into(),
        type_ref,
        oneof: None,
        detail: match source {
            ApiSource::Proto => FieldDetail::Proto { number },
            ApiSource::Discovery => FieldDetail::Discovery(DiscoverySchema::default()),
        },
    })
    .collect();
    let operation = MessageModel {
        name: "Operation".into(),
        full_name: OPERATION_TYPE.into(),
        fields: operation_fields,
    };
    vec![empty, operation]
}
