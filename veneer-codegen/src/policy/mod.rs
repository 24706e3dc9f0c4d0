//! Method policies inferred from the model alone.
//!
//! Everything here is a pure function of the model and [`PagingParameters`].
//! The resolver uses these results where a method config is silent, and
//! config generation writes them out as a starting config.

mod flattening;
mod paging;
mod resource;
mod retry;

pub use flattening::{
    FLATTENING_THRESHOLD, flattening_candidates, infer_flattening, infer_request_object_method,
};
pub use paging::{
    PageStreamingHeuristic, PagingParameters, ambiguous_paging_warning, infer_page_streaming,
    resources_element,
};
pub use resource::{ResourceNamePattern, infer_resource_patterns, named_template, singularize};
pub use retry::{
    RETRY_CODES_IDEMPOTENT_NAME, RETRY_CODES_NON_IDEMPOTENT_NAME, RETRY_PARAMS_DEFAULT_NAME,
    default_retry_codes, default_retry_params, infer_retry_codes_name, retry_codes_map,
    retry_params_map,
};
use veneer_model::{ApiModel, FieldModel, MethodModel};

use crate::resolve::FlatteningConfig;

/// Every policy the heuristics would pick for one method.
#[derive(Debug, Clone, PartialEq)]
pub struct InferredPolicy {
    pub page_streaming: PageStreamingHeuristic,
    pub flattening: Vec<FlatteningConfig>,
    pub required_fields: Vec<FieldModel>,
    pub request_object_method: bool,
    pub retry_codes_name: &'static str,
    pub retry_params_name: &'static str,
    pub resource_patterns: Vec<ResourceNamePattern>,
}

pub fn infer_method_policy(
    model: &ApiModel,
    method: &MethodModel,
    params: &PagingParameters,
) -> InferredPolicy {
    let candidates = flattening_candidates(model, method, params);
    let input_count = model.input_fields(method).len();
    InferredPolicy {
        page_streaming: infer_page_streaming(model, method, params),
        flattening: infer_flattening(&candidates),
        request_object_method: infer_request_object_method(
            input_count,
            candidates.len(),
            method.request_streaming,
        ),
        required_fields: candidates,
        retry_codes_name: infer_retry_codes_name(method),
        retry_params_name: RETRY_PARAMS_DEFAULT_NAME,
        resource_patterns: infer_resource_patterns(method),
    }
}
