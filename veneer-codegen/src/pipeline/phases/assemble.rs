//! Assemble phase - builds the view model.

use eyre::{Context, Result, eyre};

use crate::{
    assemble::assemble_api,
    pipeline::{CompilationContext, Phase},
};

/// Phase that turns the resolved config into an [`ApiView`](veneer_viewmodel::ApiView).
pub struct AssemblePhase;

impl Phase for AssemblePhase {
    fn name(&self) -> &'static str {
        "assemble"
    }

    fn description(&self) -> &'static str {
        "Build interface and method views for the target language"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let resolved = ctx
            .resolved
            .as_ref()
            .ok_or_else(|| eyre!("Generation config not set - did ResolvePhase run?"))?;
        let view = assemble_api(&ctx.model, resolved).wrap_err("Failed to assemble view model")?;
        ctx.view = Some(view);
        Ok(())
    }
}
