//! One step of a generation run.

use eyre::Result;

use super::CompilationContext;

/// Name and summary of a phase, logged as the phase starts.
#[derive(Debug, Clone)]
pub struct PhaseInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// One step from a model and config to a view model.
///
/// The default pipeline validates config references, resolves the
/// generation config, then assembles the view model. Extra phases run last
/// and see both results on the context.
pub trait Phase: Send + Sync {
    /// Tag written to the `phase` of each diagnostic it records.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns an error only when later phases cannot run. Config problems
    /// go into the context's diagnostics.
    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;

    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
