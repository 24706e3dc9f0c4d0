//! Lint for config interfaces the model doesn't expose.

use veneer_config::ConfigProto;
use veneer_model::ApiModel;

use super::{super::Lint, PHASE, interface_location};
use crate::pipeline::Diagnostic;

/// Lint that errors on interfaces that are missing from the model or unreachable.
pub struct InterfaceReferenceLint;

impl Lint for InterfaceReferenceLint {
    fn name(&self) -> &'static str {
        "interface-reference"
    }

    fn description(&self) -> &'static str {
        "Detect config interfaces the model doesn't declare or expose"
    }

    fn check(&self, model: &ApiModel, config: &ConfigProto, diagnostics: &mut Vec<Diagnostic>) {
        for entry in &config.interfaces {
            let message = match model.interface(&entry.name) {
                None => format!("interface not found: {}", entry.name),
                Some(interface) if !interface.reachable => {
                    format!("interface not reachable: {}", entry.name)
                }
                Some(_) => continue,
            };
            diagnostics.push(Diagnostic::error(PHASE, message).at(interface_location(&entry.name)));
        }
    }
}
