//! Starting generation configs built from the model alone.
//!
//! Every method entry holds what the resolver would infer for a method the
//! config leaves out, so a generated config resolves to the same method
//! configs as an empty one. It is meant to be edited by hand.

use indexmap::IndexMap;
use veneer_config::{
    CollectionProto, ConfigProto, FlatteningGroupProto, FlatteningProto, InterfaceConfigProto,
    Language, LanguageSettingsProto, MethodConfigProto, PageStreamingProto,
    PageStreamingRequestProto, PageStreamingResponseProto,
};
use veneer_model::{ApiModel, InterfaceModel, MethodModel};

use crate::{
    language::LanguageFormatterRegistry,
    pipeline::Diagnostic,
    policy::{
        PageStreamingHeuristic, PagingParameters, ambiguous_paging_warning, default_retry_codes,
        default_retry_params, infer_method_policy, infer_resource_patterns,
    },
    resolve::DEFAULT_TIMEOUT_MILLIS,
};

/// Schema identifier written to the `type` key.
pub const CONFIG_TYPE: &str = "com.google.api.codegen.ConfigProto";

const PHASE: &str = "configgen";

/// A generated config with the warnings raised while inferring it.
#[derive(Debug, Clone)]
pub struct GeneratedConfig {
    pub config: ConfigProto,
    /// Methods whose policies need a hand-written entry.
    pub warnings: Vec<Diagnostic>,
}

/// Generate a config for every interface of the model.
pub fn configgen(model: &ApiModel, registry: &LanguageFormatterRegistry) -> GeneratedConfig {
    let paging = PagingParameters::for_source(model.source);
    let language_settings = Language::ALL
        .into_iter()
        .map(|language| {
            (
                language,
                LanguageSettingsProto {
                    package_name: registry.format_package(language, &model.package),
                    domain_layer_location: None,
                },
            )
        })
        .collect();

    let mut warnings = Vec::new();
    let interfaces = model
        .interfaces
        .iter()
        .map(|interface| interface_config(model, interface, &paging, &mut warnings))
        .collect();

    GeneratedConfig {
        config: ConfigProto {
            config_type: Some(CONFIG_TYPE.to_string()),
            language_settings,
            interfaces,
        },
        warnings,
    }
}

fn interface_config(
    model: &ApiModel,
    interface: &InterfaceModel,
    paging: &PagingParameters,
    warnings: &mut Vec<Diagnostic>,
) -> InterfaceConfigProto {
    let mut collections: IndexMap<String, String> = IndexMap::new();
    let methods = interface
        .methods
        .iter()
        .map(|method| {
            for pattern in infer_resource_patterns(method) {
                collections
                    .entry(pattern.entity_name)
                    .or_insert(pattern.path_template);
            }
            method_config(model, interface, method, paging, warnings)
        })
        .collect();
    tracing::debug!(interface = %interface.full_name, "Generated interface config");

    InterfaceConfigProto {
        name: interface.full_name.clone(),
        collections: collections
            .into_iter()
            .map(|(entity_name, name_pattern)| CollectionProto {
                name_pattern,
                entity_name,
            })
            .collect(),
        retry_codes_def: default_retry_codes(),
        retry_params_def: default_retry_params(),
        methods,
        ..Default::default()
    }
}

fn method_config(
    model: &ApiModel,
    interface: &InterfaceModel,
    method: &MethodModel,
    paging: &PagingParameters,
    warnings: &mut Vec<Diagnostic>,
) -> MethodConfigProto {
    let inferred = infer_method_policy(model, method, paging);
    let page_streaming = match inferred.page_streaming {
        PageStreamingHeuristic::Paged(config) => Some(PageStreamingProto {
            request: PageStreamingRequestProto {
                token_field: config.request_token_field.name,
                page_size_field: config.page_size_field.map(|f| f.name),
            },
            response: PageStreamingResponseProto {
                token_field: config.response_token_field.name,
                resources_field: config.resources_field.name,
            },
        }),
        PageStreamingHeuristic::NotPaged => None,
        PageStreamingHeuristic::Ambiguous { repeated_fields } => {
            warnings.push(ambiguous_paging_warning(
                PHASE,
                &interface.name,
                method,
                &repeated_fields,
            ));
            None
        }
    };
    let flattening = (!inferred.flattening.is_empty()).then(|| FlatteningProto {
        groups: inferred
            .flattening
            .iter()
            .map(|group| FlatteningGroupProto {
                parameters: group.parameters.iter().map(|p| p.name.clone()).collect(),
            })
            .collect(),
    });

    MethodConfigProto {
        name: method.name.clone(),
        page_streaming,
        flattening,
        required_fields: Some(inferred.required_fields.into_iter().map(|f| f.name).collect()),
        request_object_method: Some(inferred.request_object_method),
        retry_codes_name: Some(inferred.retry_codes_name.to_string()),
        retry_params_name: Some(inferred.retry_params_name.to_string()),
        timeout_millis: Some(DEFAULT_TIMEOUT_MILLIS),
        field_name_patterns: inferred
            .resource_patterns
            .into_iter()
            .map(|p| (p.field_path, p.entity_name))
            .collect(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{LIBRARY_SERVICE, library_model};

    #[test]
    fn test_language_settings() {
        let config = configgen(&library_model(), &LanguageFormatterRegistry::new()).config;
        assert_eq!(config.config_type.as_deref(), Some(CONFIG_TYPE));
        assert_eq!(config.language_settings.len(), Language::ALL.len());
        assert_eq!(
            config.language_settings[&Language::Python].package_name,
            "google.cloud.example.library_v1.gapic"
        );
    }

    #[test]
    fn test_inferred_methods() {
        let config = configgen(&library_model(), &LanguageFormatterRegistry::new()).config;
        let interface = config.interface(LIBRARY_SERVICE).unwrap();
        assert_eq!(interface.methods.len(), 9);

        let list = interface.method("ListShelves").unwrap();
        let paging = list.page_streaming.as_ref().unwrap();
        assert_eq!(paging.request.token_field, "page_token");
        assert_eq!(paging.response.resources_field, "shelves");

        let get = interface.method("GetShelf").unwrap();
        assert_eq!(get.retry_codes_name.as_deref(), Some("idempotent"));
        assert_eq!(get.field_name_patterns.get("name").map(String::as_str), Some("shelf"));

        let related = interface.method("FindRelatedBooks").unwrap();
        assert!(related.page_streaming.is_none());
    }

    #[test]
    fn test_collections_from_http_paths() {
        let config = configgen(&library_model(), &LanguageFormatterRegistry::new()).config;
        let interface = config.interface(LIBRARY_SERVICE).unwrap();
        assert_eq!(
            interface.collections,
            vec![CollectionProto {
                name_pattern: "shelves/{shelf}".into(),
                entity_name: "shelf".into(),
            }]
        );
        assert_eq!(interface.retry_codes_def.len(), 2);
    }

    #[test]
    fn test_ambiguous_paging_is_reported() {
        let generated = configgen(&library_model(), &LanguageFormatterRegistry::new());
        assert_eq!(generated.warnings.len(), 1);

        let warning = &generated.warnings[0];
        assert_eq!(warning.phase, PHASE);
        assert_eq!(warning.location.as_deref(), Some("LibraryService.FindRelatedBooks"));
        assert!(warning.message.contains("names, shelves"));
    }
}
