//! Loading models from disk with format detection.

use std::fs;

use tempfile::TempDir;
use veneer_model::{ApiModel, ApiSource, Error};

const DESCRIPTOR: &str = r#"
package = "google.example.echo.v1"

[[services]]
name = "Echo"

[[services.methods]]
name = "Say"
input = "SayRequest"
output = "SayResponse"
http = { verb = "post", path = "/v1/echo:say", body = "*" }

[[messages]]
name = "SayRequest"
fields = [{ name = "content", type = "string", number = 1 }]

[[messages]]
name = "SayResponse"
fields = [{ name = "content", type = "string", number = 1 }]
"#;

const DOCUMENT: &str = r#"{
    "name": "echo",
    "version": "v1",
    "schemas": { "Message": { "type": "object", "properties": { "content": { "type": "string" } } } },
    "resources": {
        "messages": {
            "methods": {
                "get": {
                    "id": "echo.messages.get",
                    "path": "messages/{id}",
                    "httpMethod": "GET",
                    "parameters": { "id": { "type": "string", "required": true, "location": "path" } },
                    "parameterOrder": ["id"],
                    "response": { "$ref": "Message" }
                }
            }
        }
    }
}"#;

#[test]
fn test_detects_proto_descriptor() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("echo.toml");
    fs::write(&path, DESCRIPTOR).unwrap();

    let model = ApiModel::from_file(&path, None).expect("descriptor should load");
    assert_eq!(model.source, ApiSource::Proto);
    let echo = model.interface("google.example.echo.v1.Echo").unwrap();
    assert!(!echo.method("Say").unwrap().idempotent);
}

#[test]
fn test_detects_discovery_document() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("echo.json");
    fs::write(&path, DOCUMENT).unwrap();

    let model = ApiModel::from_file(&path, None).expect("document should load");
    assert_eq!(model.source, ApiSource::Discovery);
    let get = model
        .interface("echo.v1.Messages")
        .and_then(|i| i.method("Get"))
        .unwrap();
    assert!(get.idempotent);
    assert_eq!(get.http.as_ref().unwrap().path, "messages/{id}");
}

#[test]
fn test_explicit_source_overrides_extension() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("echo.descriptor");
    fs::write(&path, DESCRIPTOR).unwrap();

    assert!(matches!(
        *ApiModel::from_file(&path, None).unwrap_err(),
        Error::UnknownFormat { .. }
    ));
    let model = ApiModel::from_file(&path, Some(ApiSource::Proto)).unwrap();
    assert_eq!(model.package, "google.example.echo.v1");
}

#[test]
fn test_missing_file_is_io_error() {
    let err = ApiModel::from_file("/nonexistent/model.toml", None).unwrap_err();
    assert!(matches!(*err, Error::Io { .. }));
}
