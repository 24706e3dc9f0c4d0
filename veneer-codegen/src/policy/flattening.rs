//! Flattened method signatures.

use veneer_model::{ApiModel, FieldModel, MethodModel};

use super::PagingParameters;
use crate::resolve::FlatteningConfig;

/// Methods with more candidate parameters than this are not flattened.
pub const FLATTENING_THRESHOLD: usize = 4;

/// Request fields a caller would pass as plain arguments.
///
/// Oneof members and paging fields are left to the request object.
pub fn flattening_candidates(
    model: &ApiModel,
    method: &MethodModel,
    params: &PagingParameters,
) -> Vec<FieldModel> {
    model
        .input_fields(method)
        .iter()
        .filter(|f| f.oneof.is_none() && !params.is_ignored_parameter(&f.name))
        .cloned()
        .collect()
}

/// One group with every candidate, if there are not too many of them.
pub fn infer_flattening(candidates: &[FieldModel]) -> Vec<FlatteningConfig> {
    if candidates.is_empty() || candidates.len() > FLATTENING_THRESHOLD {
        return Vec::new();
    }
    vec![FlatteningConfig {
        parameters: candidates.to_vec(),
    }]
}

/// Whether a method also gets an overload taking the whole request.
///
/// Needed when flattening cannot set every field; streaming requests never get one.
pub fn infer_request_object_method(
    input_count: usize,
    candidate_count: usize,
    request_streaming: bool,
) -> bool {
    (input_count > 1 || input_count != candidate_count) && !request_streaming
}
