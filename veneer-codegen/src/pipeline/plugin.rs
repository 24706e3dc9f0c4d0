//! Hooks around each phase of a generation run.

use eyre::Result;

use super::CompilationContext;

/// Observer of a generation run, called around every phase.
///
/// Hooks may read the resolved config or view model as soon as the phase
/// producing it has run.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// # Errors
    ///
    /// An error stops the run before `phase` starts.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }

    /// Runs only when `phase` succeeded.
    ///
    /// # Errors
    ///
    /// An error stops the run before the next phase.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }
}

/// Lets a caller keep a handle on a plugin the pipeline owns.
impl<P: Plugin + ?Sized> Plugin for std::sync::Arc<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        (**self).on_before_phase(phase, ctx)
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        (**self).on_after_phase(phase, ctx)
    }
}
