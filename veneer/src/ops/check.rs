//! Check operation - config validation without output.

use veneer_codegen::{
    assemble_api,
    language::LanguageFormatterRegistry,
    pipeline::{Diagnostic, Severity},
    resolve::{ResolveError, resolve},
};

use super::{Project, describe};
use crate::reports::{CheckReport, InterfaceSummary};

/// Execute the check operation.
///
/// Resolves and assembles the project like `generate` does and reports
/// every diagnostic instead of failing on the first.
pub fn check(project: &Project) -> CheckReport {
    let registry = LanguageFormatterRegistry::new();
    let mut interfaces = Vec::new();

    let diagnostics = match resolve(&project.model, &project.config, &project.options, &registry) {
        Ok(resolved) => {
            let mut diagnostics = resolved.warnings;
            match assemble_api(&project.model, &resolved.config) {
                Ok(view) => {
                    interfaces = view
                        .interfaces
                        .iter()
                        .map(|interface| InterfaceSummary {
                            name: interface.name.clone(),
                            method_count: interface.methods.len(),
                        })
                        .collect();
                }
                Err(e) => diagnostics.push(Diagnostic::error("assemble", e.to_string())),
            }
            diagnostics
        }
        Err(ResolveError::Diagnostics(diagnostics)) => diagnostics,
        Err(ResolveError::Consistency(e)) => vec![Diagnostic::error("resolve", e.to_string())],
    };

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for diag in &diagnostics {
        let msg = describe(diag);
        match diag.severity {
            Severity::Error => errors.push(msg),
            Severity::Warning => warnings.push(msg),
            Severity::Info => infos.push(msg),
        }
    }

    CheckReport {
        config_path: project.config_path.clone(),
        language: project.options.language,
        interfaces,
        errors,
        warnings,
        infos,
    }
}

#[cfg(test)]
mod tests {
    use veneer_config::Language;

    use super::*;
    use crate::ops::testing::{LIBRARY_CONFIG, project};

    #[test]
    fn test_library_config_is_valid() {
        let report = check(&project(LIBRARY_CONFIG, Language::Java));
        assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
        assert_eq!(report.interfaces.len(), 1);
        assert_eq!(report.interfaces[0].method_count, 9);
    }

    #[test]
    fn test_reports_every_reference_error() {
        let report = check(&project(
            r#"
interfaces:
- name: google.example.library.v1.Missing
- name: google.example.library.v1.AlsoMissing
"#,
            Language::Python,
        ));
        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 2);
        assert!(report.interfaces.is_empty());
    }

    #[test]
    fn test_bad_sample_is_an_error() {
        let report = check(&project(
            r#"
interfaces:
- name: google.example.library.v1.LibraryService
  retry_codes_def:
  - name: idempotent
  - name: non_idempotent
  retry_params_def:
  - name: default
    initial_retry_delay_millis: 100
    retry_delay_multiplier: 1.3
    max_retry_delay_millis: 60000
    initial_rpc_timeout_millis: 20000
    rpc_timeout_multiplier: 1.0
    max_rpc_timeout_millis: 20000
    total_timeout_millis: 600000
  methods:
  - name: GetShelf
    samples:
    - id: broken
      output:
      - print: ["%s", "$resp.missing"]
"#,
            Language::Java,
        ));
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("broken"));
    }
}
