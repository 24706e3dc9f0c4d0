use serde::Serialize;

use crate::{InitCodeView, MethodView};

/// Everything a renderer needs to emit one client class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceView {
    /// Fully qualified interface name.
    pub name: String,
    pub simple_name: String,
    pub client_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    pub required_constructor_params: Vec<String>,
    pub retry_codes: Vec<RetryCodesView>,
    pub retry_params: Vec<RetryParamsView>,
    pub methods: Vec<MethodView>,
    pub page_streaming_descriptors: Vec<PageStreamingDescriptorView>,
    pub batching_descriptors: Vec<BatchingDescriptorClassView>,
    pub resource_names: Vec<ResourceNameView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoke_test: Option<SmokeTestView>,
    pub has_page_streaming_methods: bool,
    pub has_batching_methods: bool,
    pub has_long_running_methods: bool,
    pub has_streaming_methods: bool,
}

impl InterfaceView {
    pub fn method(&self, simple_name: &str) -> Option<&MethodView> {
        self.methods.iter().find(|m| m.simple_name == simple_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetryCodesView {
    pub name: String,
    /// Constant name of the retry codes set in the target language.
    pub constant_name: String,
    pub codes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetryParamsView {
    pub name: String,
    pub constant_name: String,
    pub initial_retry_delay_millis: u64,
    pub retry_delay_multiplier: f64,
    pub max_retry_delay_millis: u64,
    pub initial_rpc_timeout_millis: u64,
    pub rpc_timeout_multiplier: f64,
    pub max_rpc_timeout_millis: u64,
    pub total_timeout_millis: u64,
}

/// Accessors a paged-list implementation needs for one method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageStreamingDescriptorView {
    pub name: String,
    pub method_name: String,
    pub request_type_name: String,
    pub response_type_name: String,
    pub resource_type_name: String,
    pub request_token_setter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_page_size_setter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_page_size_getter: Option<String>,
    pub response_token_getter: String,
    pub resources_getter: String,
}

/// Accessors a request batcher needs for one method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchingDescriptorClassView {
    pub name: String,
    pub method_name: String,
    pub request_type_name: String,
    pub response_type_name: String,
    pub batched_field_type_name: String,
    pub batched_field_getter: String,
    pub batched_field_setter: String,
    pub batched_field_count_getter: String,
    pub discriminator_field_getters: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subresponse_getter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subresponse_setter: Option<String>,
    pub byte_length_function: String,
}

/// A resource name template declared by an interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceNameView {
    pub entity_name: String,
    pub path_template: String,
    /// Name of the formatting function, e.g. `shelfPath`.
    pub format_function: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmokeTestView {
    pub method_name: String,
    pub request_object_method: bool,
    pub init_code: InitCodeView,
}
