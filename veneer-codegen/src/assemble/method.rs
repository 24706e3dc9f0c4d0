//! Method views and the per-method descriptor classes.

use veneer_core::to_snake_case;
use veneer_model::{ApiModel, MethodModel, TypeRef};
use veneer_viewmodel::{
    BatchingDescriptorClassView, BatchingDescriptorView, BatchingThresholdsView, BatchingView,
    FieldNamePatternView, FlatteningGroupView, LongRunningView, MethodView,
    PageStreamingDescriptorView, PageStreamingRequestView, PageStreamingResponseView,
    PageStreamingView, ParamView, SampleView,
};

use super::init_code::RequestBuilder;
use crate::{
    Result,
    language::NamingConvention,
    output::{OutputTransformer, default_output_specs},
    resolve::{BatchingConfig, FieldSelector, MethodConfig, PageStreamingConfig},
};

pub(crate) fn method_view(
    model: &ApiModel,
    naming: &'static NamingConvention,
    method: &MethodModel,
    config: &MethodConfig,
) -> Result<MethodView> {
    let requests = RequestBuilder {
        model,
        naming,
        method,
        config,
    };

    let flattening_groups = config
        .flattening
        .iter()
        .map(|group| -> Result<FlatteningGroupView> {
            let names: Vec<String> = group.parameters.iter().map(|p| p.name.clone()).collect();
            Ok(FlatteningGroupView {
                parameters: group
                    .parameters
                    .iter()
                    .map(|p| ParamView {
                        name: naming.local_var_name(&p.name),
                        type_name: naming.type_name_for(&p.type_ref),
                        is_required: config.is_required(&p.name),
                    })
                    .collect(),
                init_code: requests.flattened(&names)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let samples = config
        .samples
        .iter()
        .map(|sample| -> Result<SampleView> {
            let specs = if sample.output.is_empty() {
                default_output_specs(model, method, config)
            } else {
                sample.output.clone()
            };
            let outputs = OutputTransformer::new(model, naming, method, config, &sample.id)
                .transform(&specs)?;
            Ok(SampleView {
                id: sample.id.clone(),
                init_code: requests.request(&sample.init_fields)?,
                outputs,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(MethodView {
        name: naming.method_name(&method.name),
        simple_name: method.name.clone(),
        full_name: method.full_name.clone(),
        request_type_name: naming.type_name_for(&method.input),
        response_type_name: naming.type_name_for(&method.output),
        has_return_value: !model.is_empty_type(&method.output),
        is_request_streaming: method.request_streaming,
        is_response_streaming: method.response_streaming,
        is_idempotent: method.idempotent,
        request_object_method: config.request_object_method,
        flattening_groups,
        required_fields: config
            .required_fields
            .iter()
            .map(|f| naming.field_name(&f.name))
            .collect(),
        page_streaming: config
            .page_streaming
            .as_ref()
            .map(|paging| page_streaming_view(naming, paging)),
        batching: config.batching.as_ref().map(|b| batching_view(naming, b)),
        retry_codes_name: config.retry_codes_name.clone(),
        retry_params_name: config.retry_params_name.clone(),
        timeout_millis: config.timeout_millis,
        field_name_patterns: config
            .field_name_patterns
            .iter()
            .map(|(field_path, pattern)| FieldNamePatternView {
                field_path: field_path.clone(),
                entity_name: pattern.entity_name.clone(),
                path_template: pattern.path_template.clone(),
            })
            .collect(),
        long_running: config.long_running.as_ref().map(|lro| LongRunningView {
            return_type_name: naming.type_name_for(&lro.return_type),
            metadata_type_name: naming.type_name_for(&lro.metadata_type),
            initial_poll_delay_millis: lro.initial_poll_delay_millis,
            total_poll_timeout_millis: lro.total_poll_timeout_millis,
        }),
        init_code: requests.request(&config.sample_code_init_fields)?,
        samples,
    })
}

fn page_streaming_view(naming: &NamingConvention, paging: &PageStreamingConfig) -> PageStreamingView {
    PageStreamingView {
        request: PageStreamingRequestView {
            token_field: naming.field_name(&paging.request_token_field.name),
            page_size_field: paging
                .page_size_field
                .as_ref()
                .map(|f| naming.field_name(&f.name)),
        },
        response: PageStreamingResponseView {
            token_field: naming.field_name(&paging.response_token_field.name),
            resources_field: naming.field_name(&paging.resources_field.name),
            resource_type_name: naming.type_name_for(&paging.resources_element),
        },
    }
}

fn batching_view(naming: &NamingConvention, batching: &BatchingConfig) -> BatchingView {
    let thresholds = &batching.thresholds;
    BatchingView {
        descriptor: BatchingDescriptorView {
            batched_field: naming.field_name(&batching.batched_field.name),
            discriminator_fields: batching
                .discriminator_fields
                .iter()
                .map(|selector| selector.path.clone())
                .collect(),
            subresponse_field: batching
                .subresponse_field
                .as_ref()
                .map(|f| naming.field_name(&f.name)),
        },
        thresholds: BatchingThresholdsView {
            element_count_threshold: thresholds.element_count_threshold,
            element_count_limit: thresholds.element_count_limit,
            request_byte_threshold: thresholds.request_byte_threshold,
            request_byte_limit: thresholds.request_byte_limit,
            delay_threshold_millis: thresholds.delay_threshold_millis,
            flow_control_element_limit: thresholds.flow_control_element_limit,
            flow_control_byte_limit: thresholds.flow_control_byte_limit,
            flow_control_limit_exceeded_behavior: thresholds
                .flow_control_limit_exceeded_behavior
                .as_str()
                .to_string(),
        },
    }
}

pub(crate) fn page_streaming_descriptor(
    naming: &NamingConvention,
    method: &MethodModel,
    paging: &PageStreamingConfig,
) -> PageStreamingDescriptorView {
    PageStreamingDescriptorView {
        name: naming.constant_name(&format!("{}_page_str_desc", to_snake_case(&method.name))),
        method_name: naming.method_name(&method.name),
        request_type_name: naming.type_name_for(&method.input),
        response_type_name: naming.type_name_for(&method.output),
        resource_type_name: naming.type_name_for(&paging.resources_element),
        request_token_setter: naming.setter_name(&paging.request_token_field.name),
        request_page_size_setter: paging
            .page_size_field
            .as_ref()
            .map(|f| naming.setter_name(&f.name)),
        request_page_size_getter: paging
            .page_size_field
            .as_ref()
            .map(|f| naming.getter_name(&f.name)),
        response_token_getter: naming.getter_name(&paging.response_token_field.name),
        resources_getter: naming.getter_name(&paging.resources_field.name),
    }
}

pub(crate) fn batching_descriptor(
    naming: &NamingConvention,
    method: &MethodModel,
    batching: &BatchingConfig,
) -> BatchingDescriptorClassView {
    let batched = &batching.batched_field;
    BatchingDescriptorClassView {
        name: naming.constant_name(&format!("{}_batching_desc", to_snake_case(&method.name))),
        method_name: naming.method_name(&method.name),
        request_type_name: naming.type_name_for(&method.input),
        response_type_name: naming.type_name_for(&method.output),
        batched_field_type_name: naming.type_name_for(&batched.type_ref),
        batched_field_getter: naming.getter_name(&batched.name),
        batched_field_setter: naming.setter_name(&batched.name),
        batched_field_count_getter: naming.count_getter_name(&batched.name),
        discriminator_field_getters: batching
            .discriminator_fields
            .iter()
            .map(|selector| selector_getter(naming, selector))
            .collect(),
        subresponse_getter: batching
            .subresponse_field
            .as_ref()
            .map(|f| naming.getter_name(&f.name)),
        subresponse_setter: batching
            .subresponse_field
            .as_ref()
            .map(|f| naming.setter_name(&f.name)),
        byte_length_function: byte_length_function(naming, &batched.type_ref),
    }
}

/// Accessor chain reading a nested field off the request, e.g. `getShelf().getName()`.
fn selector_getter(naming: &NamingConvention, selector: &FieldSelector) -> String {
    let chain: String = selector
        .fields
        .iter()
        .map(|field| naming.field_accessor(&field.name))
        .collect();
    chain.strip_prefix('.').unwrap_or(&chain).to_string()
}

fn byte_length_function(naming: &NamingConvention, type_ref: &TypeRef) -> String {
    if type_ref.is_message() {
        naming.method_name("get_serialized_size")
    } else {
        naming.method_name(&format!("compute_{}_size", type_ref.kind.as_str()))
    }
}
