//! Generation config types loaded from YAML.
//!
//! The types here mirror the document as written; cross-checking against the
//! API model happens in the resolver.

mod method;
mod parse;
mod retry;
mod sample;
mod validate;

use indexmap::IndexMap;
pub use method::{
    BatchDescriptorProto, BatchingProto, BatchingThresholdsProto, FlatteningGroupProto,
    FlatteningProto, FlowControlLimitExceededBehavior, LongRunningProto, MethodConfigProto,
    PageStreamingProto, PageStreamingRequestProto, PageStreamingResponseProto,
};
pub use parse::parse_config;
pub use retry::{RetryCodesDefinition, RetryParamsDefinition, StatusCode};
pub use sample::{LoopStatement, OutputSpec, SampleConfigProto, WriteFileStatement};
use serde::{Deserialize, Serialize};

use crate::Language;

/// Root of a generation config document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ConfigProto {
    /// Document schema identifier.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub config_type: Option<String>,

    /// Per-language package settings.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub language_settings: IndexMap<Language, LanguageSettingsProto>,

    /// Interfaces to generate, in emission order.
    #[serde(default)]
    pub interfaces: Vec<InterfaceConfigProto>,
}

impl ConfigProto {
    /// Find the entry for an interface by full name.
    pub fn interface(&self, name: &str) -> Option<&InterfaceConfigProto> {
        self.interfaces.iter().find(|i| i.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LanguageSettingsProto {
    pub package_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_layer_location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct InterfaceConfigProto {
    /// Fully qualified interface name.
    pub name: String,

    /// Replacement for the generated client name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang_doc: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoke_test: Option<SmokeTestProto>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_constructor_params: Vec<String>,

    /// Resource name templates and the entity they name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collections: Vec<CollectionProto>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub retry_codes_def: Vec<RetryCodesDefinition>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub retry_params_def: Vec<RetryParamsDefinition>,

    #[serde(default)]
    pub methods: Vec<MethodConfigProto>,
}

impl InterfaceConfigProto {
    pub fn method(&self, name: &str) -> Option<&MethodConfigProto> {
        self.methods.iter().find(|m| m.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SmokeTestProto {
    /// Simple name of the method the smoke test calls.
    pub method: String,
    /// Field path specs for the request, e.g. `name="shelves/1"`.
    #[serde(default)]
    pub init_fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CollectionProto {
    /// Path template, e.g. `shelves/{shelf}/books/{book}`.
    pub name_pattern: String,
    pub entity_name: String,
}
