//! Built-in lints for config validation.
//!
//! Each lint reports references in the config that the model cannot
//! satisfy. Entries for interfaces the model lacks are reported once by
//! [`InterfaceReferenceLint`] and skipped by the others.

mod collection_reference;
mod interface_reference;
mod long_running_type;
mod method_reference;
mod retry_reference;
mod smoke_test;

pub use collection_reference::CollectionReferenceLint;
pub use interface_reference::InterfaceReferenceLint;
pub use long_running_type::LongRunningTypeLint;
pub use method_reference::MethodReferenceLint;
pub use retry_reference::RetryReferenceLint;
pub use smoke_test::SmokeTestLint;

use super::Lint;

const PHASE: &str = "validate";

/// The lints every pipeline and [`resolve`](crate::resolve::resolve) call runs.
pub fn default_lints() -> Vec<Box<dyn Lint>> {
    vec![
        Box::new(InterfaceReferenceLint),
        Box::new(MethodReferenceLint),
        Box::new(RetryReferenceLint),
        Box::new(SmokeTestLint),
        Box::new(LongRunningTypeLint),
        Box::new(CollectionReferenceLint),
    ]
}

fn interface_location(interface: &str) -> String {
    format!("interfaces.{}", interface)
}

fn method_location(interface: &str, method: &str) -> String {
    format!("interfaces.{}.methods.{}", interface, method)
}
