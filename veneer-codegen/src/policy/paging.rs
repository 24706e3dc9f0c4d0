//! Page-streaming detection.

use veneer_config::PagingOverrides;
use veneer_model::{ApiModel, ApiSource, FieldModel, MethodModel};

use crate::{pipeline::Diagnostic, resolve::PageStreamingConfig};

/// Field names that mark a method as paged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingParameters {
    pub page_token_names: Vec<String>,
    pub page_size_names: Vec<String>,
    pub next_page_token_names: Vec<String>,
}

impl PagingParameters {
    /// The default name sets for an API source.
    pub fn for_source(source: ApiSource) -> Self {
        let mut page_size_names = vec!["pageSize".to_string(), "page_size".to_string()];
        if source == ApiSource::Discovery {
            page_size_names.push("maxResults".to_string());
        }
        Self {
            page_token_names: vec!["pageToken".to_string(), "page_token".to_string()],
            page_size_names,
            next_page_token_names: vec![
                "nextPageToken".to_string(),
                "next_page_token".to_string(),
            ],
        }
    }

    /// Replace whichever name sets the overrides provide.
    pub fn with_overrides(mut self, overrides: &PagingOverrides) -> Self {
        if let Some(names) = &overrides.page_token_names {
            self.page_token_names = names.clone();
        }
        if let Some(names) = &overrides.page_size_names {
            self.page_size_names = names.clone();
        }
        if let Some(names) = &overrides.next_page_token_names {
            self.next_page_token_names = names.clone();
        }
        self
    }

    /// Request fields that never become flattened parameters.
    pub fn is_ignored_parameter(&self, name: &str) -> bool {
        self.page_token_names.iter().any(|n| n == name)
            || self.page_size_names.iter().any(|n| n == name)
    }
}

/// What the paging heuristic decided for a method.
#[derive(Debug, Clone, PartialEq)]
pub enum PageStreamingHeuristic {
    Paged(PageStreamingConfig),
    NotPaged,
    /// The response has several repeated fields and none can be picked.
    Ambiguous { repeated_fields: Vec<String> },
}

/// Warn that no resources field could be picked for a method.
pub fn ambiguous_paging_warning(
    phase: &str,
    interface: &str,
    method: &MethodModel,
    repeated_fields: &[String],
) -> Diagnostic {
    tracing::warn!(
        method = %method.full_name,
        fields = ?repeated_fields,
        "Page streaming resource field could not be determined"
    );
    Diagnostic::warning(
        phase,
        format!(
            "page streaming resource field could not be determined for method {}: \
             candidates are {}",
            method.name,
            repeated_fields.join(", ")
        ),
    )
    .at(format!("{}.{}", interface, method.name))
}

/// Infer page streaming from field names.
///
/// A paged method takes a page token, returns a next-page token and exactly
/// one repeated field. Discovery responses without a repeated field may use a
/// map named `items` instead.
pub fn infer_page_streaming(
    model: &ApiModel,
    method: &MethodModel,
    params: &PagingParameters,
) -> PageStreamingHeuristic {
    if model.is_empty_type(&method.output) || method.response_streaming {
        return PageStreamingHeuristic::NotPaged;
    }
    let find = |fields: &[FieldModel], names: &[String]| {
        fields
            .iter()
            .find(|f| names.iter().any(|n| *n == f.name))
            .cloned()
    };

    let input = model.input_fields(method);
    let output = model.output_fields(method);
    let Some(request_token_field) = find(input, &params.page_token_names) else {
        return PageStreamingHeuristic::NotPaged;
    };
    let page_size_field = find(input, &params.page_size_names);

    // Several repeated fields are ambiguous whether or not a next-page token exists
    let repeated: Vec<&FieldModel> = output
        .iter()
        .filter(|f| f.is_repeated() && !f.is_map())
        .collect();
    if repeated.len() > 1 {
        return PageStreamingHeuristic::Ambiguous {
            repeated_fields: repeated.iter().map(|f| f.name.clone()).collect(),
        };
    }
    let Some(response_token_field) = find(output, &params.next_page_token_names) else {
        return PageStreamingHeuristic::NotPaged;
    };

    let resources_field = match repeated.first() {
        Some(field) => (*field).clone(),
        None => match output.iter().find(|f| f.name == "items" && f.is_map()) {
            Some(items) if model.source == ApiSource::Discovery => items.clone(),
            _ => return PageStreamingHeuristic::NotPaged,
        },
    };

    let resources_element = resources_element(&resources_field);
    PageStreamingHeuristic::Paged(PageStreamingConfig {
        request_token_field,
        page_size_field,
        response_token_field,
        resources_field,
        resources_element,
    })
}

/// The type one iteration over a resources field yields.
pub fn resources_element(field: &FieldModel) -> veneer_model::TypeRef {
    match field.type_ref.map_value() {
        Some(value) => value.clone(),
        None => field.type_ref.make_optional(),
    }
}
