//! Init-code trees rendered as view lines.

use indexmap::IndexMap;
use veneer_core::Name;
use veneer_model::{ApiModel, MethodModel, TypeRef};
use veneer_viewmodel::{
    FieldSettingView, InitCodeLineView, InitCodeView, InitValueView, ListInitCodeLineView,
    MapEntryView, MapInitCodeLineView, SimpleInitCodeLineView, StructureInitCodeLineView,
};

use crate::{
    Result,
    initcode::{
        InitCode, InitCodeContext, InitCodeLineType, InitCodeNode, InitValueConfig, ValueGenerator,
        init_field_name,
    },
    language::NamingConvention,
    resolve::MethodConfig,
};

/// Suggested name of the request object in every init-code tree.
const REQUEST_NAME: &str = "request";

/// Builds the request objects of one method.
pub(crate) struct RequestBuilder<'a> {
    pub model: &'a ApiModel,
    pub naming: &'static NamingConvention,
    pub method: &'a MethodModel,
    pub config: &'a MethodConfig,
}

impl RequestBuilder<'_> {
    /// Resource-name values for the top-level fields bound to a collection.
    fn values(&self) -> IndexMap<String, InitValueConfig> {
        self.config
            .field_name_patterns
            .iter()
            .filter(|(path, _)| !path.contains('.'))
            .map(|(path, pattern)| {
                (
                    path.clone(),
                    InitValueConfig::with_resource_name(&pattern.entity_name, &pattern.path_template),
                )
            })
            .collect()
    }

    fn context(&self, specs: &[String]) -> InitCodeContext<'_> {
        InitCodeContext::new(self.model, self.method.input.clone(), Name::from(REQUEST_NAME))
            .field_specs(specs.iter().cloned())
            .values(self.values())
            .value_generator(ValueGenerator::new())
            .symbol_strategy(self.naming.symbol_strategy)
    }

    /// The request built from `specs`, completed with every required field.
    pub fn request(&self, specs: &[String]) -> Result<InitCodeView> {
        let mut field_set: Vec<String> = self
            .config
            .required_fields
            .iter()
            .map(|field| field.name.clone())
            .collect();
        for spec in specs {
            let name = init_field_name(spec);
            if !field_set.iter().any(|existing| existing == name) {
                field_set.push(name.to_string());
            }
        }
        let init = self.context(specs).field_set(field_set).build()?;
        Ok(render(self.naming, &init))
    }

    /// Arguments of one flattened overload.
    pub fn flattened(&self, parameters: &[String]) -> Result<InitCodeView> {
        let init = self
            .context(&self.config.sample_code_init_fields)
            .field_set(parameters.iter().cloned())
            .build()?;
        Ok(render(self.naming, &init))
    }
}

fn identifier_of(naming: &NamingConvention, node: &InitCodeNode) -> String {
    match node.identifier() {
        Some(name) => naming.local_var_name(&name.to_lower_underscore()),
        None => naming.local_var_name(node.key()),
    }
}

fn type_name(naming: &NamingConvention, node: &InitCodeNode) -> String {
    node.type_ref()
        .map(|type_ref| naming.type_name_for(type_ref))
        .unwrap_or_default()
}

fn field_setting(naming: &NamingConvention, node: &InitCodeNode) -> FieldSettingView {
    FieldSettingView {
        field_name: naming.field_name(node.key()),
        setter: naming.setter_name(node.key()),
        type_name: type_name(naming, node),
        identifier: identifier_of(naming, node),
    }
}

fn value(config: &InitValueConfig) -> InitValueView {
    if let Some(literal) = &config.initial_value {
        InitValueView::Literal {
            value: literal.clone(),
        }
    } else if let Some(resource) = &config.resource_name {
        InitValueView::ResourceName {
            entity_name: resource.entity_name.clone(),
            path_template: resource.path_template.clone(),
        }
    } else {
        InitValueView::Default
    }
}

fn line(naming: &NamingConvention, node: &InitCodeNode) -> InitCodeLineView {
    let identifier = identifier_of(naming, node);
    let type_name = type_name(naming, node);
    match node.line_type() {
        InitCodeLineType::Structure => InitCodeLineView::Structure(StructureInitCodeLineView {
            type_name,
            identifier,
            field_settings: node
                .children()
                .values()
                .map(|child| field_setting(naming, child))
                .collect(),
        }),
        InitCodeLineType::List => InitCodeLineView::List(ListInitCodeLineView {
            type_name,
            element_type_name: node
                .type_ref()
                .map(|type_ref| naming.element_type_name(type_ref))
                .unwrap_or_default(),
            identifier,
            element_identifiers: node
                .children()
                .values()
                .map(|child| identifier_of(naming, child))
                .collect(),
        }),
        InitCodeLineType::Map => {
            let entry_type = |select: fn(&TypeRef) -> Option<&TypeRef>| {
                node.type_ref()
                    .and_then(select)
                    .map(|t| naming.type_name_for(t))
                    .unwrap_or_default()
            };
            InitCodeLineView::Map(MapInitCodeLineView {
                type_name,
                key_type_name: entry_type(TypeRef::map_key),
                value_type_name: entry_type(TypeRef::map_value),
                identifier,
                entries: node
                    .children()
                    .values()
                    .map(|child| MapEntryView {
                        key: child.key().to_string(),
                        identifier: identifier_of(naming, child),
                    })
                    .collect(),
            })
        }
        // Resolution turns childless placeholders into simple lines
        InitCodeLineType::Simple | InitCodeLineType::Unknown => {
            InitCodeLineView::Simple(SimpleInitCodeLineView {
                type_name,
                identifier,
                value: value(node.value()),
            })
        }
    }
}

/// Lines in initialization order, the request last.
pub(crate) fn render(naming: &NamingConvention, init: &InitCode) -> InitCodeView {
    InitCodeView {
        lines: init
            .root
            .list_in_initialization_order()
            .into_iter()
            .map(|node| line(naming, node))
            .collect(),
        top_level_fields: init
            .root
            .children()
            .values()
            .map(|child| field_setting(naming, child))
            .collect(),
        request_identifier: identifier_of(naming, &init.root),
    }
}

#[cfg(test)]
mod tests {
    use veneer_config::Language;

    use super::*;
    use crate::{
        language::naming_for,
        resolve::{ResolveOptions, resolve},
        testing::{LIBRARY_SERVICE, library_config, library_model},
    };

    fn with_builder<T>(language: Language, method: &str, f: impl FnOnce(&RequestBuilder<'_>) -> T) -> T {
        let model = library_model();
        let options = ResolveOptions::new(language, &model);
        let resolved = resolve(&model, &library_config(), &options, &Default::default()).unwrap();
        let interface = resolved.config.interface(LIBRARY_SERVICE).unwrap();
        let builder = RequestBuilder {
            model: &model,
            naming: naming_for(language),
            method: model.interface(LIBRARY_SERVICE).unwrap().method(method).unwrap(),
            config: interface.method(method).unwrap(),
        };
        f(&builder)
    }

    #[test]
    fn test_request_lines_end_with_request() {
        let view = with_builder(Language::Java, "ListBooks", |builder| {
            builder.request(&["parent=\"shelves/1\"".to_string()]).unwrap()
        });
        assert_eq!(view.request_identifier, "request");
        assert_eq!(view.lines.len(), 2);
        let InitCodeLineView::Simple(parent) = &view.lines[0] else {
            panic!("expected a simple line, got {:?}", view.lines[0]);
        };
        assert_eq!(parent.identifier, "parent");
        assert_eq!(parent.type_name, "String");
        assert_eq!(
            parent.value,
            InitValueView::Literal {
                value: "shelves/1".into()
            }
        );
        let InitCodeLineView::Structure(request) = &view.lines[1] else {
            panic!("expected a structure line, got {:?}", view.lines[1]);
        };
        assert_eq!(request.type_name, "ListBooksRequest");
        assert_eq!(request.field_settings[0].setter, "setParent");
    }

    #[test]
    fn test_unassigned_pattern_field_gets_resource_name() {
        let view = with_builder(Language::Java, "GetShelf", |builder| builder.request(&[]).unwrap());
        let InitCodeLineView::Simple(name) = &view.lines[0] else {
            panic!("expected a simple line, got {:?}", view.lines[0]);
        };
        assert_eq!(
            name.value,
            InitValueView::ResourceName {
                entity_name: "shelf".into(),
                path_template: "shelves/{shelf}".into(),
            }
        );
    }

    #[test]
    fn test_flattened_message_parameter_is_default() {
        let view = with_builder(Language::Java, "PublishSeries", |builder| {
            builder
                .flattened(&["shelf".to_string(), "books".to_string()])
                .unwrap()
        });
        let names: Vec<_> = view.top_level_fields.iter().map(|f| f.field_name.as_str()).collect();
        assert_eq!(names, vec!["shelf", "books"]);
        let InitCodeLineView::Simple(books) = &view.lines[1] else {
            panic!("expected a simple line, got {:?}", view.lines[1]);
        };
        assert_eq!(books.type_name, "List<Book>");
        assert_eq!(books.value, InitValueView::Default);
    }

    #[test]
    fn test_map_entries_and_python_names() {
        let view = with_builder(Language::Python, "CreateShelf", |builder| {
            builder
                .request(&["shelf.labels{\"genre\"}=\"fiction\"".to_string()])
                .unwrap()
        });
        let map = view
            .lines
            .iter()
            .find_map(|line| match line {
                InitCodeLineView::Map(map) => Some(map),
                _ => None,
            })
            .unwrap();
        assert_eq!(map.key_type_name, "str");
        assert_eq!(map.entries.len(), 1);
        assert_eq!(map.entries[0].key, "genre");
        assert_eq!(view.top_level_fields[0].setter, "shelf");
    }
}
