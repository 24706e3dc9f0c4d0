//! Core utilities and types for the veneer generator.
//!
//! This crate provides the naming primitives, symbol allocation and file
//! writing used across the veneer workspace.

mod file;
mod name;
mod symbol_table;
mod utils;

// File operations
pub use file::{File, FileRules, Overwrite, WriteResult};
// Naming
pub use name::Name;
pub use symbol_table::{SymbolStrategy, SymbolTable};
// String utilities
pub use utils::{split_words, to_camel_case, to_kebab_case, to_pascal_case, to_snake_case};
