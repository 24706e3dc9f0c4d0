//! Resolve phase - joins the config with the model.

use eyre::{Context, Result};

use crate::{
    pipeline::{CompilationContext, Phase},
    resolve::build_generation_config,
};

/// Phase that builds the [`GenerationConfig`](crate::resolve::GenerationConfig).
///
/// Heuristic warnings are added to the context diagnostics.
pub struct ResolvePhase;

impl Phase for ResolvePhase {
    fn name(&self) -> &'static str {
        "resolve"
    }

    fn description(&self) -> &'static str {
        "Resolve method configs and inferred policies against the model"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let mut warnings = Vec::new();
        let resolved = build_generation_config(
            &ctx.model,
            &ctx.config,
            &ctx.options,
            &ctx.registry,
            &mut warnings,
        )
        .wrap_err("Generation config is inconsistent with the model")?;

        ctx.diagnostics.extend(warnings);
        ctx.resolved = Some(resolved);
        Ok(())
    }
}
