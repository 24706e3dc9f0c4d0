//! Generation config and project settings for the veneer generator.
//!
//! The generation config (YAML) describes per-interface and per-method
//! generation options. Project settings (`veneer.toml`) tell the CLI where the
//! model and config live and which language to target.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod language;
mod settings;

pub use config::*;
pub use error::{Error, Result, SourceContext};
pub use language::Language;
pub use settings::{PagingOverrides, ProjectSettings};
