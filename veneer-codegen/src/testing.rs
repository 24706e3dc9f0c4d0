//! Shared fixtures for unit tests.

use veneer_config::ConfigProto;
use veneer_model::{ApiModel, load_proto_str};

pub(crate) const LIBRARY_MODEL: &str = include_str!("../tests/fixtures/library.toml");
pub(crate) const LIBRARY_CONFIG: &str = include_str!("../tests/fixtures/library.yaml");

pub(crate) const LIBRARY_SERVICE: &str = "google.example.library.v1.LibraryService";

pub(crate) fn library_model() -> ApiModel {
    load_proto_str(LIBRARY_MODEL, "library.toml").expect("Failed to load test model")
}

pub(crate) fn library_config() -> ConfigProto {
    parse_config(LIBRARY_CONFIG)
}

pub(crate) fn parse_config(content: &str) -> ConfigProto {
    veneer_config::parse_config(content, "gapic.yaml").expect("Failed to parse test config")
}
