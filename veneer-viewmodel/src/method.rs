use serde::Serialize;

use crate::{InitCodeView, SampleView};

/// One API method as seen by a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodView {
    /// Method name cased for the target language.
    pub name: String,
    pub simple_name: String,
    pub full_name: String,
    pub request_type_name: String,
    pub response_type_name: String,
    pub has_return_value: bool,
    pub is_request_streaming: bool,
    pub is_response_streaming: bool,
    pub is_idempotent: bool,
    /// Whether an overload taking the whole request object is emitted.
    pub request_object_method: bool,
    pub flattening_groups: Vec<FlatteningGroupView>,
    pub required_fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_streaming: Option<PageStreamingView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batching: Option<BatchingView>,
    pub retry_codes_name: String,
    pub retry_params_name: String,
    pub timeout_millis: u64,
    pub field_name_patterns: Vec<FieldNamePatternView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_running: Option<LongRunningView>,
    /// Sample construction of the full request object.
    pub init_code: InitCodeView,
    pub samples: Vec<SampleView>,
}

impl MethodView {
    pub fn is_page_streaming(&self) -> bool {
        self.page_streaming.is_some()
    }

    pub fn is_flattened(&self) -> bool {
        !self.flattening_groups.is_empty()
    }
}

/// A flattened overload and how to build its arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatteningGroupView {
    pub parameters: Vec<ParamView>,
    pub init_code: InitCodeView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamView {
    pub name: String,
    pub type_name: String,
    pub is_required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageStreamingView {
    pub request: PageStreamingRequestView,
    pub response: PageStreamingResponseView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageStreamingRequestView {
    pub token_field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size_field: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageStreamingResponseView {
    pub token_field: String,
    pub resources_field: String,
    pub resource_type_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchingView {
    pub descriptor: BatchingDescriptorView,
    pub thresholds: BatchingThresholdsView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchingDescriptorView {
    pub batched_field: String,
    pub discriminator_fields: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subresponse_field: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchingThresholdsView {
    pub element_count_threshold: u64,
    pub element_count_limit: u64,
    pub request_byte_threshold: u64,
    pub request_byte_limit: u64,
    pub delay_threshold_millis: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_control_element_limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_control_byte_limit: Option<u64>,
    pub flow_control_limit_exceeded_behavior: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldNamePatternView {
    pub field_path: String,
    pub entity_name: String,
    pub path_template: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LongRunningView {
    pub return_type_name: String,
    pub metadata_type_name: String,
    pub initial_poll_delay_millis: u64,
    pub total_poll_timeout_millis: u64,
}
