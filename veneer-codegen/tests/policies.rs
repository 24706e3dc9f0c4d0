//! Inferred method policies resolved end to end.

use veneer_codegen::{
    assemble_api,
    language::LanguageFormatterRegistry,
    pipeline::Severity,
    policy::FLATTENING_THRESHOLD,
    resolve::{ResolveOptions, Resolved, resolve},
};
use veneer_config::{ConfigProto, Language, parse_config};
use veneer_model::{ApiModel, load_proto_str};
use veneer_viewmodel::{InitCodeLineView, InitValueView};

const FOO_SERVICE: &str = "google.example.foo.v1.FooService";

const DESCRIPTOR: &str = include_str!("fixtures/foo.toml");

const CONFIG: &str = r#"
type: com.google.api.codegen.ConfigProto
interfaces:
- name: google.example.foo.v1.FooService
"#;

fn model() -> ApiModel {
    load_proto_str(DESCRIPTOR, "foo.toml").expect("Failed to load model")
}

fn config() -> ConfigProto {
    parse_config(CONFIG, "foo.yaml").expect("Failed to parse config")
}

fn resolve_foo(model: &ApiModel, config: &ConfigProto) -> Resolved {
    let options = ResolveOptions::new(Language::Java, model);
    resolve(model, config, &options, &LanguageFormatterRegistry::new()).expect("Failed to resolve")
}

#[test]
fn test_list_foos_is_page_streamed() {
    let model = model();
    let resolved = resolve_foo(&model, &config());
    let method = resolved.config.interface(FOO_SERVICE).unwrap().method("ListFoos").unwrap();

    let paging = method.page_streaming.as_ref().expect("ListFoos should be paged");
    assert_eq!(paging.request_token_field.name, "pageToken");
    assert_eq!(paging.page_size_field.as_ref().map(|f| f.name.as_str()), Some("pageSize"));
    assert_eq!(paging.response_token_field.name, "nextPageToken");
    assert_eq!(paging.resources_field.name, "foos");
    assert_eq!(paging.resources_element.simple_name(), "Foo");
    assert!(!paging.resources_element.is_repeated());
}

#[test]
fn test_too_many_parameters_are_not_flattened() {
    let model = model();
    let resolved = resolve_foo(&model, &config());
    let method = resolved.config.interface(FOO_SERVICE).unwrap().method("CreateFoo").unwrap();

    assert_eq!(method.required_fields.len(), FLATTENING_THRESHOLD + 1);
    assert!(!method.is_flattening());
    assert!(method.request_object_method);
}

#[test]
fn test_ambiguous_resources_warn() {
    let model = model();
    let resolved = resolve_foo(&model, &config());
    let method = resolved.config.interface(FOO_SERVICE).unwrap().method("SearchFoos").unwrap();
    assert!(!method.is_page_streaming());

    let warning = resolved
        .warnings
        .iter()
        .find(|d| d.location.as_deref() == Some("FooService.SearchFoos"))
        .expect("missing page streaming warning");
    assert_eq!(warning.severity, Severity::Warning);
    assert!(warning.message.contains("foos, related"));
}

#[test]
fn test_ambiguous_resources_without_next_token_warn() {
    let model = model();
    let resolved = resolve_foo(&model, &config());
    let method = resolved.config.interface(FOO_SERVICE).unwrap().method("ScanFoos").unwrap();
    assert!(!method.is_page_streaming());

    let warning = resolved
        .warnings
        .iter()
        .find(|d| d.location.as_deref() == Some("FooService.ScanFoos"))
        .expect("missing page streaming warning");
    assert_eq!(warning.severity, Severity::Warning);
    assert!(warning.message.contains("foos, bars"));
}

#[test]
fn test_nested_init_field_of_optional_message() {
    let model = model();
    let config = parse_config(
        r#"
interfaces:
- name: google.example.foo.v1.FooService
  methods:
  - name: UpdateFoo
    required_fields: [update_mask]
    sample_code_init_fields:
    - foo.name="foos/1"
"#,
        "foo.yaml",
    )
    .unwrap();
    let resolved = resolve_foo(&model, &config);
    let api = assemble_api(&model, &resolved.config).expect("Failed to assemble");
    let method = api.interface(FOO_SERVICE).unwrap().method("UpdateFoo").unwrap();

    let mut fields: Vec<_> = method
        .init_code
        .top_level_fields
        .iter()
        .map(|f| f.field_name.as_str())
        .collect();
    fields.sort();
    assert_eq!(fields, vec!["foo", "updateMask"]);

    let literal = InitValueView::Literal {
        value: "foos/1".into(),
    };
    let name = method
        .init_code
        .lines
        .iter()
        .find_map(|line| match line {
            InitCodeLineView::Simple(simple) if simple.value == literal => Some(simple),
            _ => None,
        })
        .expect("foo.name should be initialized");
    assert_eq!(name.type_name, "String");

    let foo = method
        .init_code
        .lines
        .iter()
        .find_map(|line| match line {
            InitCodeLineView::Structure(structure) if structure.type_name == "Foo" => {
                Some(structure)
            }
            _ => None,
        })
        .expect("foo should be built from its fields");
    assert_eq!(foo.field_settings[0].identifier, name.identifier);
}

#[test]
fn test_resolving_twice_is_identical() {
    let model = model();
    let config = config();
    let first = resolve_foo(&model, &config);
    let second = resolve_foo(&model, &config);
    assert_eq!(first.config, second.config);
    assert_eq!(first.warnings, second.warnings);
}

#[test]
fn test_unknown_interface_is_reported() {
    let model = model();
    let config = parse_config(
        r#"
interfaces:
- name: google.example.foo.v1.BarService
- name: google.example.foo.v1.BazService
"#,
        "foo.yaml",
    )
    .unwrap();
    let options = ResolveOptions::new(Language::Java, &model);
    let err = resolve(&model, &config, &options, &LanguageFormatterRegistry::new()).unwrap_err();
    assert_eq!(err.to_string(), "configuration does not match the model (2 error(s))");
}
