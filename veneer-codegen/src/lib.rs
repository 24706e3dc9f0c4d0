//! Configuration resolution, method policies and view-model assembly for the
//! veneer generator.
//!
//! # Module Organization
//!
//! - [`resolve`] - Joins a generation config with the model (GenerationConfig, MethodConfig, etc.)
//! - [`policy`] - Heuristics that fill in what the config leaves out
//! - [`initcode`] - Field path specs turned into typed request trees
//! - [`output`] - Sample output statements type-checked into views
//! - [`assemble`] - The final `ApiView` for a resolved config
//! - [`language`] - Package formatters and naming conventions per target language
//! - [`pipeline`] - Validate, resolve and assemble phases with plugin hooks
//! - [`configgen`] - Starting configs inferred from the model

pub mod assemble;
pub mod configgen;
mod error;
pub mod initcode;
pub mod language;
pub mod output;
pub mod pipeline;
pub mod policy;
pub mod resolve;

#[cfg(test)]
mod testing;

pub use assemble::assemble_api;
pub use configgen::configgen;
pub use error::{Error, Result};
