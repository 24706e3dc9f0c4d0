//! Per-method entries of an interface config.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::SampleConfigProto;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MethodConfigProto {
    /// Simple method name.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_streaming: Option<PageStreamingProto>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flattening: Option<FlatteningProto>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_fields: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_object_method: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_codes_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_params_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_millis: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batching: Option<BatchingProto>,

    /// Field path -> entity name of a collection.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub field_name_patterns: IndexMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_running: Option<LongRunningProto>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sample_code_init_fields: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<SampleConfigProto>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageStreamingProto {
    pub request: PageStreamingRequestProto,
    pub response: PageStreamingResponseProto,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageStreamingRequestProto {
    pub token_field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size_field: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageStreamingResponseProto {
    pub token_field: String,
    pub resources_field: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FlatteningProto {
    #[serde(default)]
    pub groups: Vec<FlatteningGroupProto>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FlatteningGroupProto {
    pub parameters: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BatchingProto {
    pub thresholds: BatchingThresholdsProto,
    pub batch_descriptor: BatchDescriptorProto,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BatchDescriptorProto {
    /// Repeated request field whose elements are merged across requests.
    pub batched_field: String,
    /// Request fields (dotted paths) that must match for requests to be merged.
    #[serde(default)]
    pub discriminator_fields: Vec<String>,
    /// Repeated response field split back to individual callers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subresponse_field: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BatchingThresholdsProto {
    #[serde(default)]
    pub element_count_threshold: u64,
    #[serde(default)]
    pub element_count_limit: u64,
    #[serde(default)]
    pub request_byte_threshold: u64,
    #[serde(default)]
    pub request_byte_limit: u64,
    #[serde(default)]
    pub delay_threshold_millis: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_control_element_limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_control_byte_limit: Option<u64>,
    #[serde(default)]
    pub flow_control_limit_exceeded_behavior: FlowControlLimitExceededBehavior,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowControlLimitExceededBehavior {
    ThrowException,
    Block,
    #[default]
    Ignore,
}

impl FlowControlLimitExceededBehavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowControlLimitExceededBehavior::ThrowException => "THROW_EXCEPTION",
            FlowControlLimitExceededBehavior::Block => "BLOCK",
            FlowControlLimitExceededBehavior::Ignore => "IGNORE",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LongRunningProto {
    /// Message the operation resolves to.
    pub return_type: String,
    pub metadata_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_poll_delay_millis: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_poll_timeout_millis: Option<u64>,
}
