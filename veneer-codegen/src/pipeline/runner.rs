//! Pipeline orchestrator.

use std::sync::Arc;

use eyre::Result;
use veneer_config::ConfigProto;
use veneer_model::ApiModel;

use super::{
    CompilationContext, Phase, PhaseInfo, Plugin,
    phases::{AssemblePhase, ResolvePhase, ValidatePhase},
};
use crate::{language::LanguageFormatterRegistry, resolve::ResolveOptions};

/// The compilation pipeline orchestrator.
///
/// Runs the built-in phases (validate, resolve, assemble) followed by any
/// user phases, calling plugin hooks before and after each phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .plugin(SnapshotPlugin::with_output_dir(".veneer/debug"))
///     .phase(MyCustomPhase);
///
/// let ctx = pipeline.run(model, config, options)?;
/// ```
pub struct Pipeline {
    validate: ValidatePhase,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
    registry: Arc<LanguageFormatterRegistry>,
}

impl Pipeline {
    /// Create a new pipeline with the default lints and formatter registry.
    pub fn new() -> Self {
        Self {
            validate: ValidatePhase::new(),
            phases: Vec::new(),
            plugins: Vec::new(),
            registry: Arc::default(),
        }
    }

    /// Replace the validate phase, e.g. to run extra lints.
    pub fn validate(mut self, validate: ValidatePhase) -> Self {
        self.validate = validate;
        self
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Use a shared formatter registry instead of building a new one.
    pub fn registry(mut self, registry: Arc<LanguageFormatterRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Every phase in run order.
    pub fn phases(&self) -> Vec<PhaseInfo> {
        self.ordered_phases().map(|phase| phase.info()).collect()
    }

    fn ordered_phases(&self) -> impl Iterator<Item = &dyn Phase> {
        let builtin_phases: [&dyn Phase; 3] = [&self.validate, &ResolvePhase, &AssemblePhase];
        builtin_phases
            .into_iter()
            .chain(self.phases.iter().map(|p| p.as_ref()))
    }

    /// Run the pipeline on a model and config.
    ///
    /// Executes all phases in order:
    /// 1. ValidatePhase - checks config references, collects diagnostics
    /// 2. ResolvePhase - builds the generation config
    /// 3. AssemblePhase - builds the view model
    /// 4. User phases (if any)
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally.
    pub fn run(
        &self,
        model: ApiModel,
        config: ConfigProto,
        options: ResolveOptions,
    ) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(model, config, options, self.registry.clone());

        for phase in self.ordered_phases() {
            self.run_phase(phase, &mut ctx)?;
        }

        Ok(ctx)
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let PhaseInfo {
            name: phase_name,
            description,
        } = phase.info();
        tracing::debug!(phase = phase_name, description, "Running phase");

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
