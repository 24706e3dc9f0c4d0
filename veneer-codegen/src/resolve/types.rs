//! The generation config after it was checked against the model.

use indexmap::IndexMap;
use serde::Serialize;
use veneer_config::{
    BatchingThresholdsProto, Language, RetryParamsDefinition, SampleConfigProto, StatusCode,
};
use veneer_model::{FieldModel, TypeRef};

/// Milliseconds a call may take when the config does not say.
pub const DEFAULT_TIMEOUT_MILLIS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationConfig {
    pub language: Language,
    pub package_name: String,
    /// Keyed by interface full name, in config order.
    pub interfaces: IndexMap<String, InterfaceConfig>,
}

impl GenerationConfig {
    pub fn interface(&self, full_name: &str) -> Option<&InterfaceConfig> {
        self.interfaces.get(full_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceConfig {
    pub name: String,
    pub simple_name: String,
    pub client_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang_doc: Option<String>,
    /// In model declaration order.
    pub methods: Vec<MethodConfig>,
    pub retry_codes: IndexMap<String, Vec<StatusCode>>,
    pub retry_params: IndexMap<String, RetryParamsDefinition>,
    pub required_constructor_params: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoke_test: Option<SmokeTestConfig>,
    /// Entity name to path template.
    pub collections: IndexMap<String, String>,
}

impl InterfaceConfig {
    pub fn method(&self, simple_name: &str) -> Option<&MethodConfig> {
        self.methods.iter().find(|m| m.name == simple_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmokeTestConfig {
    pub method: String,
    pub init_fields: Vec<String>,
    /// Top-level field of each init field spec.
    pub field_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodConfig {
    pub name: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_streaming: Option<PageStreamingConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batching: Option<BatchingConfig>,
    pub flattening: Vec<FlatteningConfig>,
    pub request_object_method: bool,
    pub required_fields: Vec<FieldModel>,
    /// Keyed by field path.
    pub field_name_patterns: IndexMap<String, FieldNamePattern>,
    pub retry_codes_name: String,
    pub retry_params_name: String,
    pub timeout_millis: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_running: Option<LongRunningConfig>,
    pub sample_code_init_fields: Vec<String>,
    pub samples: Vec<SampleConfigProto>,
}

impl MethodConfig {
    pub fn is_page_streaming(&self) -> bool {
        self.page_streaming.is_some()
    }

    pub fn is_flattening(&self) -> bool {
        !self.flattening.is_empty()
    }

    pub fn is_long_running(&self) -> bool {
        self.long_running.is_some()
    }

    pub fn is_required(&self, field_name: &str) -> bool {
        self.required_fields.iter().any(|f| f.name == field_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageStreamingConfig {
    pub request_token_field: FieldModel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size_field: Option<FieldModel>,
    pub response_token_field: FieldModel,
    pub resources_field: FieldModel,
    /// Type of one resource; what iterating a page yields.
    pub resources_element: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatteningConfig {
    pub parameters: Vec<FieldModel>,
}

/// A dotted field path through nested messages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSelector {
    pub path: String,
    /// One field per path segment; the last one is the selected field.
    pub fields: Vec<FieldModel>,
}

impl FieldSelector {
    pub fn last(&self) -> Option<&FieldModel> {
        self.fields.last()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchingConfig {
    pub batched_field: FieldModel,
    pub discriminator_fields: Vec<FieldSelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subresponse_field: Option<FieldModel>,
    pub thresholds: BatchingThresholdsProto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldNamePattern {
    pub entity_name: String,
    pub path_template: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LongRunningConfig {
    pub return_type: TypeRef,
    pub metadata_type: TypeRef,
    pub initial_poll_delay_millis: u64,
    pub total_poll_timeout_millis: u64,
}
