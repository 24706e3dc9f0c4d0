//! Method configs: explicit entries, with inferred policies filling the gaps.

use indexmap::IndexMap;
use veneer_config::{BatchingProto, LongRunningProto, MethodConfigProto, PageStreamingProto};
use veneer_model::{ApiModel, FieldModel, MethodModel, TypeRef};

use super::{
    BatchingConfig, DEFAULT_TIMEOUT_MILLIS, FieldNamePattern, FieldSelector, FlatteningConfig,
    LongRunningConfig, MethodConfig, PageStreamingConfig,
};
use crate::{
    Error, Result,
    pipeline::Diagnostic,
    policy::{
        PageStreamingHeuristic, PagingParameters, ambiguous_paging_warning, infer_method_policy,
        resources_element,
    },
};

pub const DEFAULT_INITIAL_POLL_DELAY_MILLIS: u64 = 5_000;
pub const DEFAULT_TOTAL_POLL_TIMEOUT_MILLIS: u64 = 300_000;

const PHASE: &str = "resolve";

/// Everything a method config is resolved against.
pub(crate) struct MethodScope<'a> {
    pub model: &'a ApiModel,
    pub interface: &'a str,
    pub collections: &'a IndexMap<String, String>,
    pub paging: &'a PagingParameters,
}

pub(crate) fn resolve_method(
    scope: &MethodScope<'_>,
    method: &MethodModel,
    proto: Option<&MethodConfigProto>,
    warnings: &mut Vec<Diagnostic>,
) -> Result<MethodConfig> {
    let model = scope.model;
    let empty = MethodConfigProto::default();
    let proto = proto.unwrap_or(&empty);
    let inferred = infer_method_policy(model, method, scope.paging);
    let location = format!("{}.{}", scope.interface, method.name);

    let page_streaming = match &proto.page_streaming {
        Some(explicit) => Some(resolve_page_streaming(model, method, explicit)?),
        None => match inferred.page_streaming {
            PageStreamingHeuristic::Paged(config) => Some(config),
            PageStreamingHeuristic::NotPaged => None,
            PageStreamingHeuristic::Ambiguous { repeated_fields } => {
                warnings.push(ambiguous_paging_warning(
                    PHASE,
                    scope.interface,
                    method,
                    &repeated_fields,
                ));
                None
            }
        },
    };

    let flattening = match &proto.flattening {
        Some(explicit) => explicit
            .groups
            .iter()
            .map(|group| -> Result<FlatteningConfig> {
                let parameters = group
                    .parameters
                    .iter()
                    .map(|name| input_field(model, method, name, "flattening parameter"))
                    .collect::<Result<Vec<_>>>()?;
                Ok(FlatteningConfig { parameters })
            })
            .collect::<Result<Vec<_>>>()?,
        None => inferred.flattening,
    };

    let required_fields = match &proto.required_fields {
        Some(names) => names
            .iter()
            .map(|name| input_field(model, method, name, "required field"))
            .collect::<Result<Vec<_>>>()?,
        None => inferred.required_fields,
    };

    let batching = proto
        .batching
        .as_ref()
        .map(|batching| resolve_batching(model, method, batching))
        .transpose()?;

    let field_name_patterns = if proto.field_name_patterns.is_empty() {
        inferred
            .resource_patterns
            .into_iter()
            .map(|pattern| {
                let template = scope
                    .collections
                    .get(&pattern.entity_name)
                    .cloned()
                    .unwrap_or(pattern.path_template);
                (
                    pattern.field_path,
                    FieldNamePattern {
                        entity_name: pattern.entity_name,
                        path_template: template,
                    },
                )
            })
            .collect()
    } else {
        resolve_field_name_patterns(scope, method, &proto.field_name_patterns)?
    };

    let long_running = match &proto.long_running {
        Some(explicit) => Some(resolve_long_running(model, method, explicit)?),
        None => {
            if model.is_operation_type(&method.output) {
                tracing::warn!(method = %method.full_name, "Operation returned without long_running config");
                warnings.push(
                    Diagnostic::warning(
                        PHASE,
                        format!(
                            "method {} returns {} but has no long_running config",
                            method.name,
                            veneer_model::OPERATION_TYPE
                        ),
                    )
                    .at(location.clone()),
                );
            }
            None
        }
    };

    let config = MethodConfig {
        name: method.name.clone(),
        full_name: method.full_name.clone(),
        page_streaming,
        batching,
        flattening,
        request_object_method: proto
            .request_object_method
            .unwrap_or(inferred.request_object_method),
        required_fields,
        field_name_patterns,
        retry_codes_name: proto
            .retry_codes_name
            .clone()
            .unwrap_or_else(|| inferred.retry_codes_name.to_string()),
        retry_params_name: proto
            .retry_params_name
            .clone()
            .unwrap_or_else(|| inferred.retry_params_name.to_string()),
        timeout_millis: proto.timeout_millis.unwrap_or(DEFAULT_TIMEOUT_MILLIS),
        long_running,
        sample_code_init_fields: proto.sample_code_init_fields.clone(),
        samples: proto.samples.clone(),
    };
    tracing::debug!(
        method = %method.full_name,
        paged = config.is_page_streaming(),
        flattened = config.is_flattening(),
        "Resolved method config"
    );
    Ok(config)
}

fn missing(method: &MethodModel, what: &str, name: &str, type_ref: &TypeRef) -> Error {
    Error::consistency(
        &method.full_name,
        format!("{} '{}' is not a field of {}", what, name, type_ref),
    )
}

fn input_field(model: &ApiModel, method: &MethodModel, name: &str, what: &str) -> Result<FieldModel> {
    model
        .field_of(&method.input, name)
        .cloned()
        .ok_or_else(|| missing(method, what, name, &method.input))
}

fn output_field(model: &ApiModel, method: &MethodModel, name: &str, what: &str) -> Result<FieldModel> {
    model
        .field_of(&method.output, name)
        .cloned()
        .ok_or_else(|| missing(method, what, name, &method.output))
}

fn resolve_page_streaming(
    model: &ApiModel,
    method: &MethodModel,
    proto: &PageStreamingProto,
) -> Result<PageStreamingConfig> {
    let request_token_field =
        input_field(model, method, &proto.request.token_field, "page token field")?;
    let page_size_field = proto
        .request
        .page_size_field
        .as_deref()
        .map(|name| input_field(model, method, name, "page size field"))
        .transpose()?;
    let response_token_field =
        output_field(model, method, &proto.response.token_field, "next page token field")?;
    let resources_field =
        output_field(model, method, &proto.response.resources_field, "resources field")?;
    if !resources_field.is_repeated() {
        return Err(Error::consistency(
            &method.full_name,
            format!("resources field '{}' is not repeated", resources_field.name),
        ));
    }
    Ok(PageStreamingConfig {
        resources_element: resources_element(&resources_field),
        request_token_field,
        page_size_field,
        response_token_field,
        resources_field,
    })
}

fn resolve_batching(model: &ApiModel, method: &MethodModel, proto: &BatchingProto) -> Result<BatchingConfig> {
    let descriptor = &proto.batch_descriptor;
    let batched_field = input_field(model, method, &descriptor.batched_field, "batched field")?;
    if !batched_field.is_repeated() {
        return Err(Error::consistency(
            &method.full_name,
            format!("batched field '{}' is not repeated", batched_field.name),
        ));
    }
    let discriminator_fields = descriptor
        .discriminator_fields
        .iter()
        .map(|path| {
            FieldSelector::resolve(model, &method.input, path)
                .ok_or_else(|| missing(method, "discriminator field", path, &method.input))
        })
        .collect::<Result<Vec<_>>>()?;
    let subresponse_field = descriptor
        .subresponse_field
        .as_deref()
        .map(|name| output_field(model, method, name, "subresponse field"))
        .transpose()?;
    Ok(BatchingConfig {
        batched_field,
        discriminator_fields,
        subresponse_field,
        thresholds: proto.thresholds.clone(),
    })
}

fn resolve_field_name_patterns(
    scope: &MethodScope<'_>,
    method: &MethodModel,
    patterns: &IndexMap<String, String>,
) -> Result<IndexMap<String, FieldNamePattern>> {
    let mut resolved = IndexMap::new();
    for (field_path, entity_name) in patterns {
        if FieldSelector::resolve(scope.model, &method.input, field_path).is_none() {
            return Err(missing(method, "resource name field", field_path, &method.input));
        }
        let Some(template) = scope.collections.get(entity_name) else {
            return Err(Error::consistency(
                &method.full_name,
                format!("entity '{}' is not defined in collections", entity_name),
            ));
        };
        resolved.insert(
            field_path.clone(),
            FieldNamePattern {
                entity_name: entity_name.clone(),
                path_template: template.clone(),
            },
        );
    }
    Ok(resolved)
}

fn resolve_long_running(
    model: &ApiModel,
    method: &MethodModel,
    proto: &LongRunningProto,
) -> Result<LongRunningConfig> {
    let message = |name: &str, what: &str| {
        model
            .resolve_message_name(name)
            .map(TypeRef::message)
            .ok_or_else(|| {
                Error::consistency(&method.full_name, format!("{} '{}' not found", what, name))
            })
    };
    Ok(LongRunningConfig {
        return_type: message(&proto.return_type, "long running return type")?,
        metadata_type: message(&proto.metadata_type, "long running metadata type")?,
        initial_poll_delay_millis: proto
            .initial_poll_delay_millis
            .unwrap_or(DEFAULT_INITIAL_POLL_DELAY_MILLIS),
        total_poll_timeout_millis: proto
            .total_poll_timeout_millis
            .unwrap_or(DEFAULT_TOTAL_POLL_TIMEOUT_MILLIS),
    })
}

impl FieldSelector {
    /// Walk a dotted path through message fields, starting at `root`.
    pub fn resolve(model: &ApiModel, root: &TypeRef, path: &str) -> Option<FieldSelector> {
        let mut fields = Vec::new();
        let mut current = root.clone();
        for segment in path.split('.') {
            let field = model.field_of(&current, segment)?.clone();
            current = field.type_ref.clone();
            fields.push(field);
        }
        Some(FieldSelector {
            path: path.to_string(),
            fields,
        })
    }
}
