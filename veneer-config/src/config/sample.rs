//! Sample configs and the output statements they print.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SampleConfigProto {
    pub id: String,
    /// Field path specs for the request, e.g. `shelf.theme="Fiction"`.
    #[serde(default)]
    pub init_fields: Vec<String>,
    /// Output statements; the response is printed when empty.
    #[serde(default)]
    pub output: Vec<OutputSpec>,
}

/// One output statement. Exactly one of the fields must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputSpec {
    #[serde(rename = "loop", default, skip_serializing_if = "Option::is_none")]
    pub loop_statement: Option<LoopStatement>,

    /// Format string followed by accessor arguments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub print: Vec<String>,

    /// `name = accessor`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub define: String,

    /// Format string followed by local variable arguments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comment: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_file: Option<WriteFileStatement>,
}

/// Loop over a collection (`collection` + `variable`) or a map (`map` + `key`/`value`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoopStatement {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub collection: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub variable: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub map: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(default)]
    pub body: Vec<OutputSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct WriteFileStatement {
    /// Format string followed by accessor arguments.
    pub file_name: Vec<String>,
    /// Accessor for a string or bytes value.
    pub contents: String,
}
