//! Core operations.
//!
//! This module contains the business logic for veneer commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod configgen;
pub mod generate;

use std::path::PathBuf;

pub use check::check;
pub use configgen::{ConfiggenOptions, configgen};
pub use generate::{GenerateOptions, generate};
use veneer_codegen::{pipeline::Diagnostic, resolve::ResolveOptions};
use veneer_config::ConfigProto;
use veneer_model::ApiModel;

/// Inputs of one generation run.
#[derive(Debug)]
pub struct Project {
    pub model: ApiModel,
    pub config: ConfigProto,
    pub config_path: PathBuf,
    pub options: ResolveOptions,
    /// Output directory from `veneer.toml`, if one was read.
    pub output: Option<PathBuf>,
}

/// Diagnostic message with its location on a second line.
fn describe(diag: &Diagnostic) -> String {
    match &diag.location {
        Some(loc) => format!("{}\n  --> {}", diag.message, loc),
        None => diag.message.clone(),
    }
}
