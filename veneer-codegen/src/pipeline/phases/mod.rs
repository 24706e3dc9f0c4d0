//! Built-in pipeline phases.
//!
//! - [`ValidatePhase`] - checks config references against the model
//! - [`ResolvePhase`] - builds the generation config
//! - [`AssemblePhase`] - builds the view model

mod assemble;
mod resolve;
mod validate;

pub use assemble::AssemblePhase;
pub use resolve::ResolvePhase;
pub use validate::{
    CollectionReferenceLint, InterfaceReferenceLint, Lint, LintInfo, LongRunningTypeLint,
    MethodReferenceLint, RetryReferenceLint, SmokeTestLint, ValidatePhase, default_lints,
};
