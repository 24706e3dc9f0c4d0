//! Validate phase - runs lints on the generation config.

mod lint;
pub mod lints;

use eyre::{Result, bail};
pub use lint::{Lint, LintInfo};
pub use lints::{
    CollectionReferenceLint, InterfaceReferenceLint, LongRunningTypeLint, MethodReferenceLint,
    RetryReferenceLint, SmokeTestLint, default_lints,
};

use crate::pipeline::{CompilationContext, Phase};

/// Phase that validates the config using configurable lints.
pub struct ValidatePhase {
    lints: Vec<Box<dyn Lint>>,
}

impl ValidatePhase {
    /// Create a new validate phase with default lints.
    pub fn new() -> Self {
        Self {
            lints: default_lints(),
        }
    }

    /// Create a validate phase with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    /// Add a custom lint to the validation phase.
    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    /// Get the names of all lints that will be run.
    pub fn lint_names(&self) -> Vec<&'static str> {
        self.lints.iter().map(|l| l.name()).collect()
    }

    /// Get information about all lints that will be run.
    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.lints.iter().map(|l| l.info()).collect()
    }
}

impl Default for ValidatePhase {
    fn default() -> Self {
        Self::new()
    }
}

impl Phase for ValidatePhase {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        "Check config references against the model and collect diagnostics"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        for lint in &self.lints {
            lint.check(&ctx.model, &ctx.config, &mut ctx.diagnostics);
        }

        // Warnings are allowed
        if ctx.has_errors() {
            bail!("Validation failed with {} error(s)", ctx.error_count());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use veneer_config::{ConfigProto, Language};
    use veneer_model::ApiModel;

    use super::*;
    use crate::{
        pipeline::Diagnostic,
        resolve::ResolveOptions,
        testing::{library_config, library_model},
    };

    fn make_context() -> CompilationContext {
        let model = library_model();
        let options = ResolveOptions::new(Language::Java, &model);
        CompilationContext::new(model, library_config(), options, Arc::default())
    }

    #[test]
    fn test_with_errors() {
        struct AlwaysErrorLint;
        impl Lint for AlwaysErrorLint {
            fn name(&self) -> &'static str {
                "always-error"
            }
            fn description(&self) -> &'static str {
                "Always produces an error"
            }
            fn check(&self, _model: &ApiModel, _config: &ConfigProto, diagnostics: &mut Vec<Diagnostic>) {
                diagnostics.push(Diagnostic::error("test", "forced error"));
            }
        }

        let mut ctx = make_context();

        let phase = ValidatePhase::empty().with_lint(AlwaysErrorLint);
        let result = phase.run(&mut ctx);

        assert!(result.is_err());
        assert!(ctx.has_errors());
    }

    #[test]
    fn test_library_config_is_clean() {
        let mut ctx = make_context();

        ValidatePhase::new().run(&mut ctx).expect("validation should pass");
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_default_lint_names() {
        assert_eq!(
            ValidatePhase::new().lint_names(),
            vec![
                "interface-reference",
                "method-reference",
                "retry-reference",
                "smoke-test",
                "long-running-type",
                "collection-reference",
            ]
        );
    }
}
