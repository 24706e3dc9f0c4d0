//! Compilation context passed through pipeline phases.

use std::sync::Arc;

use veneer_config::ConfigProto;
use veneer_model::ApiModel;
use veneer_viewmodel::ApiView;

use super::diagnostic::{Diagnostic, Severity};
use crate::{
    language::LanguageFormatterRegistry,
    resolve::{GenerationConfig, ResolveOptions},
};

/// Context passed through all pipeline phases.
///
/// Carries the inputs of one generation run for one language and accumulates
/// the resolved config, the view model and diagnostics along the way.
#[derive(Debug)]
pub struct CompilationContext {
    pub model: ApiModel,
    pub config: ConfigProto,
    pub options: ResolveOptions,
    pub registry: Arc<LanguageFormatterRegistry>,
    /// The resolved generation config (populated by ResolvePhase).
    pub resolved: Option<GenerationConfig>,
    /// The view model (populated by AssemblePhase).
    pub view: Option<ApiView>,
    /// Diagnostics collected during compilation.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationContext {
    pub fn new(
        model: ApiModel,
        config: ConfigProto,
        options: ResolveOptions,
        registry: Arc<LanguageFormatterRegistry>,
    ) -> Self {
        Self {
            model,
            config,
            options,
            registry,
            resolved: None,
            view: None,
            diagnostics: Vec::new(),
        }
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::info(phase, message));
    }

    /// Add a diagnostic with a location.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Error))
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }
}
