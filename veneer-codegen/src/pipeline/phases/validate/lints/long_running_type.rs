//! Lint for long-running configs naming unknown messages.

use veneer_config::ConfigProto;
use veneer_model::ApiModel;

use super::{super::Lint, PHASE, method_location};
use crate::pipeline::Diagnostic;

/// Lint that errors when a `long_running` return or metadata type is not a
/// message of the model.
pub struct LongRunningTypeLint;

impl Lint for LongRunningTypeLint {
    fn name(&self) -> &'static str {
        "long-running-type"
    }

    fn description(&self) -> &'static str {
        "Detect long-running return and metadata types the model doesn't declare"
    }

    fn check(&self, model: &ApiModel, config: &ConfigProto, diagnostics: &mut Vec<Diagnostic>) {
        for entry in &config.interfaces {
            if model.interface(&entry.name).is_none() {
                continue;
            }
            for method in &entry.methods {
                let Some(long_running) = &method.long_running else {
                    continue;
                };
                for (kind, name) in [
                    ("return", &long_running.return_type),
                    ("metadata", &long_running.metadata_type),
                ] {
                    if model.resolve_message_name(name).is_none() {
                        diagnostics.push(
                            Diagnostic::error(
                                PHASE,
                                format!("long running {} type not found: {}", kind, name),
                            )
                            .at(method_location(&entry.name, &method.name)),
                        );
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{library_config, library_model, parse_config};

    #[test]
    fn test_relative_names_resolve() {
        let mut diagnostics = Vec::new();
        LongRunningTypeLint.check(&library_model(), &library_config(), &mut diagnostics);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_metadata_type() {
        let config = parse_config(
            r#"
interfaces:
- name: google.example.library.v1.LibraryService
  methods:
  - name: ArchiveBooks
    long_running:
      return_type: ArchiveBooksResponse
      metadata_type: Progress
"#,
        );

        let mut diagnostics = Vec::new();
        LongRunningTypeLint.check(&library_model(), &config, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "long running metadata type not found: Progress");
    }
}
