//! Configuration resolver: joins the generation config with the model.
//!
//! Reference errors (an interface or method the model does not have, an
//! undefined retry name) are collected as diagnostics so that one run reports
//! all of them. Consistency errors (a field selector naming a missing field)
//! stop resolution immediately.

mod method;
mod types;

pub use method::{DEFAULT_INITIAL_POLL_DELAY_MILLIS, DEFAULT_TOTAL_POLL_TIMEOUT_MILLIS};
pub use types::{
    BatchingConfig, DEFAULT_TIMEOUT_MILLIS, FieldNamePattern, FieldSelector, FlatteningConfig,
    GenerationConfig, InterfaceConfig, LongRunningConfig, MethodConfig, PageStreamingConfig,
    SmokeTestConfig,
};
use veneer_config::{ConfigProto, Language};
use veneer_model::ApiModel;

use crate::{
    Error,
    initcode::init_field_name,
    language::LanguageFormatterRegistry,
    pipeline::{Diagnostic, phases::default_lints},
    policy::{PagingParameters, retry_codes_map, retry_params_map},
};

/// Per-run resolver settings.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub language: Language,
    pub paging: PagingParameters,
}

impl ResolveOptions {
    /// Options with the default paging names for the model's source.
    pub fn new(language: Language, model: &ApiModel) -> Self {
        Self {
            language,
            paging: PagingParameters::for_source(model.source),
        }
    }
}

/// A resolved config and the warnings raised while resolving it.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub config: GenerationConfig,
    pub warnings: Vec<Diagnostic>,
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("configuration does not match the model ({} error(s))", .0.iter().filter(|d| d.severity.is_error()).count())]
    Diagnostics(Vec<Diagnostic>),

    #[error(transparent)]
    Consistency(#[from] Error),
}

/// Check a config against the model and build the generation config.
///
/// # Errors
///
/// [`ResolveError::Diagnostics`] carries every reference error found.
/// [`ResolveError::Consistency`] is the first consistency error.
pub fn resolve(
    model: &ApiModel,
    config: &ConfigProto,
    options: &ResolveOptions,
    registry: &LanguageFormatterRegistry,
) -> std::result::Result<Resolved, ResolveError> {
    let mut diagnostics = Vec::new();
    for lint in default_lints() {
        lint.check(model, config, &mut diagnostics);
    }
    if diagnostics.iter().any(|d| d.severity.is_error()) {
        return Err(ResolveError::Diagnostics(diagnostics));
    }

    let mut warnings = diagnostics;
    let config = build_generation_config(model, config, options, registry, &mut warnings)?;
    Ok(Resolved { config, warnings })
}

/// Build the generation config from a config that passed the reference lints.
pub(crate) fn build_generation_config(
    model: &ApiModel,
    config: &ConfigProto,
    options: &ResolveOptions,
    registry: &LanguageFormatterRegistry,
    warnings: &mut Vec<Diagnostic>,
) -> crate::Result<GenerationConfig> {
    let package_name = match config.language_settings.get(&options.language) {
        Some(settings) => settings.package_name.clone(),
        None => registry.format_package(options.language, &model.package),
    };

    let mut interfaces = indexmap::IndexMap::new();
    for interface_proto in &config.interfaces {
        let Some(interface) = model.interface(&interface_proto.name) else {
            continue;
        };
        let collections = interface_proto
            .collections
            .iter()
            .map(|c| (c.entity_name.clone(), c.name_pattern.clone()))
            .collect();
        let scope = method::MethodScope {
            model,
            interface: &interface.name,
            collections: &collections,
            paging: &options.paging,
        };
        let methods = interface
            .methods
            .iter()
            .map(|m| method::resolve_method(&scope, m, interface_proto.method(&m.name), warnings))
            .collect::<crate::Result<Vec<_>>>()?;

        let smoke_test = interface_proto.smoke_test.as_ref().map(|smoke| SmokeTestConfig {
            method: smoke.method.clone(),
            field_names: smoke
                .init_fields
                .iter()
                .map(|spec| init_field_name(spec).to_string())
                .collect(),
            init_fields: smoke.init_fields.clone(),
        });

        let resolved = InterfaceConfig {
            name: interface.full_name.clone(),
            simple_name: interface.name.clone(),
            client_name: interface_proto
                .client_name
                .clone()
                .unwrap_or_else(|| format!("{}Client", interface.name)),
            lang_doc: interface_proto.lang_doc.clone(),
            methods,
            retry_codes: retry_codes_map(&interface_proto.retry_codes_def),
            retry_params: retry_params_map(&interface_proto.retry_params_def),
            required_constructor_params: interface_proto.required_constructor_params.clone(),
            smoke_test,
            collections,
        };
        tracing::debug!(
            interface = %resolved.name,
            methods = resolved.methods.len(),
            "Resolved interface config"
        );
        interfaces.insert(resolved.name.clone(), resolved);
    }

    Ok(GenerationConfig {
        language: options.language,
        package_name,
        interfaces,
    })
}
