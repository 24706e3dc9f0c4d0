//! Initial values of init-code leaves.

use std::collections::HashSet;

use veneer_core::Name;
use veneer_model::{TypeKind, TypeRef};

/// A field bound to a resource name template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNameValue {
    pub entity_name: String,
    pub path_template: String,
}

/// What a leaf is initialized with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitValueConfig {
    pub initial_value: Option<String>,
    pub resource_name: Option<ResourceNameValue>,
}

impl InitValueConfig {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            initial_value: Some(value.into()),
            resource_name: None,
        }
    }

    pub fn with_resource_name(entity_name: impl Into<String>, path_template: impl Into<String>) -> Self {
        Self {
            initial_value: None,
            resource_name: Some(ResourceNameValue {
                entity_name: entity_name.into(),
                path_template: path_template.into(),
            }),
        }
    }

    pub fn has_initial_value(&self) -> bool {
        self.initial_value.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.initial_value.is_none() && self.resource_name.is_none()
    }
}

/// Produces placeholder literals for leaves nobody assigned.
///
/// Values are deterministic for a given seed and never repeat within one generator.
#[derive(Debug, Clone, Default)]
pub struct ValueGenerator {
    counter: u64,
    used: HashSet<String>,
}

impl ValueGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            counter: seed,
            used: HashSet::new(),
        }
    }

    /// Generate a value for `type_ref`, already in normalized literal form.
    pub fn generate(&mut self, type_ref: &TypeRef, identifier: &Name) -> String {
        loop {
            self.counter += 1;
            let value = match type_ref.kind {
                TypeKind::Bool => (self.counter % 2 == 1).to_string(),
                TypeKind::Double | TypeKind::Float => format!("{}.0", self.counter),
                kind if kind.is_integer() => self.counter.to_string(),
                _ => format!("{}{}", identifier.to_lower_camel(), -(self.counter as i64)),
            };
            // Booleans only have two values
            if type_ref.kind == TypeKind::Bool || self.used.insert(value.clone()) {
                return value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_strings_are_unique() {
        let mut generator = ValueGenerator::new();
        let string = TypeRef::scalar(TypeKind::String);
        let name = Name::from("display_name");
        let first = generator.generate(&string, &name);
        let second = generator.generate(&string, &name);
        assert_eq!(first, "displayName-1");
        assert_ne!(first, second);
    }

    #[test]
    fn test_seed_is_deterministic() {
        let int = TypeRef::scalar(TypeKind::Int32);
        let name = Name::from("count");
        let a = ValueGenerator::with_seed(10).generate(&int, &name);
        let b = ValueGenerator::with_seed(10).generate(&int, &name);
        assert_eq!(a, b);
        assert_eq!(a, "11");
    }
}
