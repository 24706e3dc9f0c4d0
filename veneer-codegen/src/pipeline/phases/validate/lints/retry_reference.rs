//! Lint for retry names that no definition provides.

use indexmap::IndexMap;
use veneer_config::ConfigProto;
use veneer_model::ApiModel;

use super::{super::Lint, PHASE, method_location};
use crate::{
    pipeline::Diagnostic,
    policy::{RETRY_PARAMS_DEFAULT_NAME, infer_retry_codes_name, retry_codes_map, retry_params_map},
};

/// Lint that errors when a method's retry codes or params name is not
/// defined by its interface.
///
/// Names inferred for methods the config is silent about are checked too,
/// so an interface that defines its own retry codes must also define the
/// `idempotent` and `non_idempotent` sets its unconfigured methods use.
pub struct RetryReferenceLint;

impl Lint for RetryReferenceLint {
    fn name(&self) -> &'static str {
        "retry-reference"
    }

    fn description(&self) -> &'static str {
        "Detect retry codes and params names the interface doesn't define"
    }

    fn check(&self, model: &ApiModel, config: &ConfigProto, diagnostics: &mut Vec<Diagnostic>) {
        for entry in &config.interfaces {
            let Some(interface) = model.interface(&entry.name) else {
                continue;
            };
            let codes = retry_codes_map(&entry.retry_codes_def);
            let params = retry_params_map(&entry.retry_params_def);

            for method in &interface.methods {
                let proto = entry.method(&method.name);
                let codes_name = proto
                    .and_then(|m| m.retry_codes_name.as_deref())
                    .unwrap_or_else(|| infer_retry_codes_name(method));
                let params_name = proto
                    .and_then(|m| m.retry_params_name.as_deref())
                    .unwrap_or(RETRY_PARAMS_DEFAULT_NAME);

                check_defined(&codes, codes_name, "retry codes", &entry.name, &method.name, diagnostics);
                check_defined(&params, params_name, "retry params", &entry.name, &method.name, diagnostics);
            }
        }
    }
}

fn check_defined<V>(
    defined: &IndexMap<String, V>,
    name: &str,
    kind: &str,
    interface: &str,
    method: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if defined.contains_key(name) {
        return;
    }
    diagnostics.push(
        Diagnostic::error(
            PHASE,
            format!("{} '{}' used by {} is not defined in {}", kind, name, method, interface),
        )
        .at(method_location(interface, method)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{library_config, library_model, parse_config};

    #[test]
    fn test_defaults_cover_unconfigured_interface() {
        let config = parse_config(
            r#"
interfaces:
- name: google.example.library.v1.LibraryService
"#,
        );

        let mut diagnostics = Vec::new();
        RetryReferenceLint.check(&library_model(), &config, &mut diagnostics);

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_undefined_explicit_name() {
        let config = parse_config(
            r#"
interfaces:
- name: google.example.library.v1.LibraryService
  methods:
  - name: GetShelf
    retry_codes_name: aggressive
"#,
        );

        let mut diagnostics = Vec::new();
        RetryReferenceLint.check(&library_model(), &config, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.starts_with("retry codes 'aggressive' used by GetShelf"));
        assert_eq!(
            diagnostics[0].location.as_deref(),
            Some("interfaces.google.example.library.v1.LibraryService.methods.GetShelf")
        );
    }

    #[test]
    fn test_inferred_name_must_be_defined() {
        let config = parse_config(
            r#"
interfaces:
- name: google.example.library.v1.LibraryService
  retry_codes_def:
  - name: idempotent
    retry_codes: [UNAVAILABLE]
"#,
        );

        let mut diagnostics = Vec::new();
        RetryReferenceLint.check(&library_model(), &config, &mut diagnostics);

        // CreateShelf and PublishSeries are not idempotent
        assert!(!diagnostics.is_empty());
        assert!(
            diagnostics
                .iter()
                .all(|d| d.message.starts_with("retry codes 'non_idempotent'"))
        );
    }

    #[test]
    fn test_library_config_is_clean() {
        let mut diagnostics = Vec::new();
        RetryReferenceLint.check(&library_model(), &library_config(), &mut diagnostics);
        assert!(diagnostics.is_empty());
    }
}
