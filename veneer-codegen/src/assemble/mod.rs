//! View-model assembly: a resolved generation config becomes an [`ApiView`].
//!
//! Every name in the views is cased for the config's language through its
//! [`NamingConvention`](crate::language::NamingConvention). Assembly fails on
//! the first init-code or output-spec error.

mod init_code;
mod method;

use veneer_model::{ApiModel, InterfaceModel};
use veneer_viewmodel::{
    ApiView, InterfaceView, ResourceNameView, RetryCodesView, RetryParamsView, SmokeTestView,
};

use self::{
    init_code::RequestBuilder,
    method::{batching_descriptor, method_view, page_streaming_descriptor},
};
use crate::{
    Error, Result,
    language::{NamingConvention, naming_for},
    resolve::{GenerationConfig, InterfaceConfig},
};

/// Build the view of every configured interface.
///
/// # Errors
///
/// Fails when a sample or init field does not fit the model, or when the
/// config names an interface or method the model lacks.
pub fn assemble_api(model: &ApiModel, config: &GenerationConfig) -> Result<ApiView> {
    let naming = naming_for(config.language);
    let interfaces = config
        .interfaces
        .values()
        .map(|interface| {
            let Some(model_interface) = model.interface(&interface.name) else {
                return Err(Error::consistency(
                    &interface.name,
                    "interface is not part of the model",
                ));
            };
            interface_view(model, naming, model_interface, interface)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ApiView {
        package_name: config.package_name.clone(),
        language: config.language.as_str().to_string(),
        interfaces,
    })
}

fn interface_view(
    model: &ApiModel,
    naming: &'static NamingConvention,
    interface: &InterfaceModel,
    config: &InterfaceConfig,
) -> Result<InterfaceView> {
    let mut methods = Vec::new();
    let mut page_streaming_descriptors = Vec::new();
    let mut batching_descriptors = Vec::new();
    for method_config in &config.methods {
        let Some(method) = interface.method(&method_config.name) else {
            return Err(Error::consistency(
                &method_config.full_name,
                "method is not part of the model",
            ));
        };
        if let Some(paging) = &method_config.page_streaming {
            page_streaming_descriptors.push(page_streaming_descriptor(naming, method, paging));
        }
        if let Some(batching) = &method_config.batching {
            batching_descriptors.push(batching_descriptor(naming, method, batching));
        }
        methods.push(method_view(model, naming, method, method_config)?);
    }

    let smoke_test = match &config.smoke_test {
        Some(smoke) => {
            let (Some(method), Some(method_config)) =
                (interface.method(&smoke.method), config.method(&smoke.method))
            else {
                return Err(Error::consistency(
                    format!("{}.{}", config.name, smoke.method),
                    "smoke test method is not part of the model",
                ));
            };
            let requests = RequestBuilder {
                model,
                naming,
                method,
                config: method_config,
            };
            Some(SmokeTestView {
                method_name: naming.method_name(&method.name),
                request_object_method: method_config.request_object_method,
                init_code: requests.request(&smoke.init_fields)?,
            })
        }
        None => None,
    };

    let view = InterfaceView {
        name: config.name.clone(),
        simple_name: config.simple_name.clone(),
        client_name: config.client_name.clone(),
        doc: config.lang_doc.clone(),
        required_constructor_params: config.required_constructor_params.clone(),
        retry_codes: config
            .retry_codes
            .iter()
            .map(|(name, codes)| RetryCodesView {
                name: name.clone(),
                constant_name: naming.constant_name(name),
                codes: codes.iter().map(|code| code.as_str().to_string()).collect(),
            })
            .collect(),
        retry_params: config
            .retry_params
            .iter()
            .map(|(name, params)| RetryParamsView {
                name: name.clone(),
                constant_name: naming.constant_name(name),
                initial_retry_delay_millis: params.initial_retry_delay_millis,
                retry_delay_multiplier: params.retry_delay_multiplier,
                max_retry_delay_millis: params.max_retry_delay_millis,
                initial_rpc_timeout_millis: params.initial_rpc_timeout_millis,
                rpc_timeout_multiplier: params.rpc_timeout_multiplier,
                max_rpc_timeout_millis: params.max_rpc_timeout_millis,
                total_timeout_millis: params.total_timeout_millis,
            })
            .collect(),
        has_page_streaming_methods: !page_streaming_descriptors.is_empty(),
        has_batching_methods: !batching_descriptors.is_empty(),
        has_long_running_methods: config.methods.iter().any(|m| m.is_long_running()),
        has_streaming_methods: interface.methods.iter().any(|m| m.is_streaming()),
        page_streaming_descriptors,
        batching_descriptors,
        resource_names: config
            .collections
            .iter()
            .map(|(entity_name, path_template)| ResourceNameView {
                entity_name: entity_name.clone(),
                path_template: path_template.clone(),
                format_function: naming.method_name(&format!("{}_path", entity_name)),
            })
            .collect(),
        smoke_test,
        methods,
    };
    tracing::debug!(
        interface = %view.name,
        methods = view.methods.len(),
        "Assembled interface view"
    );
    Ok(view)
}
