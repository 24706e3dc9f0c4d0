//! Compilation pipeline for one generation run.
//!
//! A [`Pipeline`] takes a model and a generation config through explicit
//! phases (validate → resolve → assemble), calling plugin hooks before and
//! after each one and collecting diagnostics on a shared
//! [`CompilationContext`].
//!
//! # Example
//!
//! ```ignore
//! use veneer_codegen::pipeline::Pipeline;
//!
//! let options = ResolveOptions::new(Language::Java, &model);
//! let ctx = Pipeline::new().run(model, config, options)?;
//!
//! for diag in ctx.warnings() {
//!     eprintln!("{}", diag);
//! }
//! let view = ctx.view.expect("assemble phase ran");
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::CompilationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::{Phase, PhaseInfo};
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{PhaseSnapshot, SnapshotPlugin};
