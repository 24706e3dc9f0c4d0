use serde::Serialize;

use crate::InterfaceView;

/// Root of the view model for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiView {
    /// Package or namespace in the target language.
    pub package_name: String,
    /// Target language identifier, e.g. `java`.
    pub language: String,
    pub interfaces: Vec<InterfaceView>,
}

impl ApiView {
    pub fn interface(&self, name: &str) -> Option<&InterfaceView> {
        self.interfaces.iter().find(|i| i.name == name)
    }
}
