//! Lint for config methods the model doesn't declare.

use veneer_config::ConfigProto;
use veneer_model::ApiModel;

use super::{super::Lint, PHASE, method_location};
use crate::pipeline::Diagnostic;

/// Lint that errors on method entries naming no method of their interface.
pub struct MethodReferenceLint;

impl Lint for MethodReferenceLint {
    fn name(&self) -> &'static str {
        "method-reference"
    }

    fn description(&self) -> &'static str {
        "Detect config methods the interface doesn't declare"
    }

    fn check(&self, model: &ApiModel, config: &ConfigProto, diagnostics: &mut Vec<Diagnostic>) {
        for entry in &config.interfaces {
            let Some(interface) = model.interface(&entry.name) else {
                continue;
            };
            for method in &entry.methods {
                if interface.method(&method.name).is_none() {
                    diagnostics.push(
                        Diagnostic::error(
                            PHASE,
                            format!("method not found: {}.{}", entry.name, method.name),
                        )
                        .at(method_location(&entry.name, &method.name)),
                    );
                }
            }
        }
    }
}
