//! Language-specific tables.
//!
//! - [`LanguageFormatterRegistry`] - package name formatting per language
//! - [`NamingConvention`] - casing, reserved words and accessor syntax per language

mod conventions;
mod formatter;
mod naming;

pub use conventions::{
    CSHARP_NAMING, GO_NAMING, JAVA_NAMING, NODEJS_NAMING, PHP_NAMING, PYTHON_NAMING, RUBY_NAMING,
    naming_for,
};
pub use formatter::{LanguageFormatterRegistry, PackageFormatter, is_version};
pub use naming::{NamingConvention, PrintStyle};
