//! Resource names derived from HTTP path templates.

use veneer_core::to_snake_case;
use veneer_model::MethodModel;

/// A request field whose value is a formatted resource name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNamePattern {
    pub field_path: String,
    pub entity_name: String,
    pub path_template: String,
}

/// Resource patterns for every `{field=template}` segment of a method's HTTP path.
pub fn infer_resource_patterns(method: &MethodModel) -> Vec<ResourceNamePattern> {
    let Some(http) = &method.http else {
        return Vec::new();
    };
    http.path_fields()
        .into_iter()
        .filter_map(|(field_path, template)| {
            let (entity_name, path_template) = named_template(template.as_deref()?)?;
            Some(ResourceNamePattern {
                field_path,
                entity_name,
                path_template,
            })
        })
        .collect()
}

/// Turn `shelves/*/books/*` into (`book`, `shelves/{shelf}/books/{book}`).
///
/// Each wildcard is named after the singular of the literal before it. The
/// entity is the name of the last wildcard. Templates without a wildcard, or
/// with a wildcard that has no literal before it, have no entity.
pub fn named_template(template: &str) -> Option<(String, String)> {
    let mut segments = Vec::new();
    let mut previous: Option<&str> = None;
    let mut entity = None;
    for segment in template.split('/') {
        if segment == "*" || segment == "**" {
            let name = to_snake_case(&singularize(previous?));
            segments.push(format!("{{{}}}", name));
            entity = Some(name);
            previous = None;
        } else {
            segments.push(segment.to_string());
            previous = Some(segment);
        }
    }
    Some((entity?, segments.join("/")))
}

/// English singular of a collection name, good enough for resource segments.
pub fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        format!("{}y", stem)
    } else if let Some(stem) = word.strip_suffix("lves") {
        format!("{}lf", stem)
    } else if ["sses", "shes", "ches", "xes", "zes"]
        .iter()
        .any(|suffix| word.ends_with(suffix))
    {
        word[..word.len() - 2].to_string()
    } else if word.ends_with('s') && !word.ends_with("ss") {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

#[cfg(test)]
mod tests {
    use veneer_model::{HttpBinding, TypeRef};

    use super::*;

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("shelves"), "shelf");
        assert_eq!(singularize("books"), "book");
        assert_eq!(singularize("policies"), "policy");
        assert_eq!(singularize("addresses"), "address");
        assert_eq!(singularize("archives"), "archive");
        assert_eq!(singularize("access"), "access");
    }

    #[test]
    fn test_named_template() {
        assert_eq!(
            named_template("shelves/*/books/*"),
            Some(("book".to_string(), "shelves/{shelf}/books/{book}".to_string()))
        );
        assert_eq!(
            named_template("projects/*/instanceConfigs/*"),
            Some((
                "instance_config".to_string(),
                "projects/{project}/instanceConfigs/{instance_config}".to_string()
            ))
        );
        assert_eq!(named_template("shelves"), None);
        assert_eq!(named_template("*/books"), None);
    }

    #[test]
    fn test_patterns_from_http_path() {
        let method = MethodModel {
            name: "GetBook".into(),
            full_name: "library.LibraryService.GetBook".into(),
            raw_name: "GetBook".into(),
            input: TypeRef::message("library.GetBookRequest"),
            output: TypeRef::message("library.Book"),
            request_streaming: false,
            response_streaming: false,
            idempotent: true,
            http: Some(HttpBinding {
                verb: "get".into(),
                path: "/v1/{name=shelves/*/books/*}".into(),
                body: None,
            }),
        };
        assert_eq!(
            infer_resource_patterns(&method),
            vec![ResourceNamePattern {
                field_path: "name".into(),
                entity_name: "book".into(),
                path_template: "shelves/{shelf}/books/{book}".into(),
            }]
        );
    }
}
