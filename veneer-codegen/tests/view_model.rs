//! Full pipeline runs from model and config to view model.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::sync::Arc;

use veneer_codegen::{
    configgen,
    language::LanguageFormatterRegistry,
    pipeline::{Pipeline, SnapshotPlugin},
    resolve::{ResolveOptions, resolve},
};
use veneer_config::{ConfigProto, Language, parse_config};
use veneer_model::{ApiModel, load_proto_str};
use veneer_viewmodel::{ApiView, InitCodeLineView, InitValueView, OutputView};

const FOO_SERVICE: &str = "google.example.foo.v1.FooService";
const LIBRARY_SERVICE: &str = "google.example.library.v1.LibraryService";

fn foo_model() -> ApiModel {
    load_proto_str(include_str!("fixtures/foo.toml"), "foo.toml").expect("Failed to load model")
}

fn library_model() -> ApiModel {
    load_proto_str(include_str!("fixtures/library.toml"), "library.toml")
        .expect("Failed to load model")
}

fn library_config() -> ConfigProto {
    parse_config(include_str!("fixtures/library.yaml"), "library.yaml")
        .expect("Failed to parse config")
}

fn run(model: ApiModel, config: ConfigProto, language: Language) -> ApiView {
    let options = ResolveOptions::new(language, &model);
    let ctx = Pipeline::new()
        .run(model, config, options)
        .expect("Pipeline failed");
    ctx.view.expect("No view model produced")
}

#[test]
fn test_list_foos_descriptor() {
    let config = parse_config(
        "interfaces:\n- name: google.example.foo.v1.FooService\n",
        "foo.yaml",
    )
    .unwrap();
    let api = run(foo_model(), config, Language::Java);
    let interface = api.interface(FOO_SERVICE).unwrap();
    assert_eq!(api.package_name, "com.google.cloud.example.foo.v1");

    insta::assert_json_snapshot!(interface.page_streaming_descriptors, @r#"
    [
      {
        "name": "LIST_FOOS_PAGE_STR_DESC",
        "method_name": "listFoos",
        "request_type_name": "ListFoosRequest",
        "response_type_name": "ListFoosResponse",
        "resource_type_name": "Foo",
        "request_token_setter": "setPageToken",
        "request_page_size_setter": "setPageSize",
        "request_page_size_getter": "getPageSize",
        "response_token_getter": "getNextPageToken",
        "resources_getter": "getFoos"
      }
    ]
    "#);
}

#[test]
fn test_library_views_per_language() {
    for language in [Language::Java, Language::Python, Language::Ruby] {
        let api = run(library_model(), library_config(), language);
        assert_eq!(api.language, language.as_str());
        let interface = api.interface(LIBRARY_SERVICE).unwrap();
        assert_eq!(interface.methods.len(), 9);
        assert!(interface.smoke_test.is_some());
    }
}

#[test]
fn test_get_shelf_sample() {
    let api = run(library_model(), library_config(), Language::Java);
    let method = api.interface(LIBRARY_SERVICE).unwrap().method("GetShelf").unwrap();
    assert_eq!(method.timeout_millis, 30_000);

    let sample = &method.samples[0];
    let InitCodeLineView::Simple(name) = &sample.init_code.lines[0] else {
        panic!("expected a simple line, got {:?}", sample.init_code.lines[0]);
    };
    assert_eq!(
        name.value,
        InitValueView::Literal {
            value: "shelves/1".into()
        }
    );

    let OutputView::MapLoop(labels) = &sample.outputs[1] else {
        panic!("expected a map loop, got {:?}", sample.outputs[1]);
    };
    assert_eq!(labels.key_variable_name.as_deref(), Some("label"));
    assert_eq!(labels.value_variable_name.as_deref(), Some("text"));
    assert_eq!(labels.body.len(), 1);
}

#[test]
fn test_views_serialize() {
    let api = run(library_model(), library_config(), Language::Python);
    let json = serde_json::to_value(&api).unwrap();
    let interface = &json["interfaces"][0];
    assert_eq!(interface["client_name"], "LibraryServiceClient");
    assert_eq!(interface["methods"][0]["name"], "create_shelf");
    assert_eq!(interface["resource_names"][0]["format_function"], "shelf_path");
}

#[test]
fn test_snapshot_plugin_records_phases() {
    let plugin = Arc::new(SnapshotPlugin::new());
    let model = library_model();
    let options = ResolveOptions::new(Language::Java, &model);
    Pipeline::new()
        .plugin(plugin.clone())
        .run(model, library_config(), options)
        .unwrap();

    let phases: Vec<_> = plugin.snapshots().iter().map(|s| s.phase.clone()).collect();
    assert_eq!(phases, vec!["validate", "resolve", "assemble"]);
}

#[test]
fn test_generated_config_matches_inference() {
    let model = library_model();
    let registry = LanguageFormatterRegistry::new();
    let generated = configgen(&model, &registry).config;

    let yaml = serde_yaml::to_string(&generated).unwrap();
    let reparsed = parse_config(&yaml, "generated.yaml").unwrap();
    assert_eq!(reparsed, generated);

    let empty = parse_config(
        "interfaces:\n- name: google.example.library.v1.LibraryService\n",
        "empty.yaml",
    )
    .unwrap();
    let options = ResolveOptions::new(Language::Java, &model);
    let from_generated = resolve(&model, &reparsed, &options, &registry).unwrap();
    let from_empty = resolve(&model, &empty, &options, &registry).unwrap();
    assert_eq!(
        from_generated.config.interface(LIBRARY_SERVICE).unwrap().methods,
        from_empty.config.interface(LIBRARY_SERVICE).unwrap().methods
    );
}
