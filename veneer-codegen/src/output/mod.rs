//! Sample output statements.
//!
//! Samples describe what to do with a response through small statements
//! (`print`, `loop`, `define`, `comment`, `write_file`) whose arguments are
//! accessor expressions rooted at `$resp` or at a variable an earlier
//! statement declared. [`OutputTransformer`] type-checks those against the
//! model and produces [`OutputView`](veneer_viewmodel::OutputView)s.

mod scanner;
mod scope;
mod transformer;

pub use scanner::{Scanner, Token};
pub use scope::{LocalVariable, ScopeId, ScopeTable};
pub use transformer::{OutputTransformer, RESPONSE_PLACEHOLDER, default_output_specs, response_type};
