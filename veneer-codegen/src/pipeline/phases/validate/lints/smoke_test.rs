//! Lint for smoke tests calling a missing method.

use veneer_config::ConfigProto;
use veneer_model::ApiModel;

use super::{super::Lint, PHASE, interface_location};
use crate::pipeline::Diagnostic;

pub struct SmokeTestLint;

impl Lint for SmokeTestLint {
    fn name(&self) -> &'static str {
        "smoke-test"
    }

    fn description(&self) -> &'static str {
        "Detect smoke tests whose method the interface doesn't declare"
    }

    fn check(&self, model: &ApiModel, config: &ConfigProto, diagnostics: &mut Vec<Diagnostic>) {
        for entry in &config.interfaces {
            let (Some(interface), Some(smoke_test)) = (model.interface(&entry.name), &entry.smoke_test)
            else {
                continue;
            };
            if interface.method(&smoke_test.method).is_none() {
                diagnostics.push(
                    Diagnostic::error(PHASE, "The configured smoke test method does not exist.")
                        .at(format!("{}.smoke_test", interface_location(&entry.name))),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{library_model, parse_config};

    #[test]
    fn test_missing_smoke_test_method() {
        let config = parse_config(
            r#"
interfaces:
- name: google.example.library.v1.LibraryService
  smoke_test:
    method: Ping
"#,
        );

        let mut diagnostics = Vec::new();
        SmokeTestLint.check(&library_model(), &config, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "The configured smoke test method does not exist.");
    }
}
