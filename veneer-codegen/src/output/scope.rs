//! Variables declared by a sample's output statements.
//!
//! Every name goes into one sample-wide set, so a name can be declared only
//! once per sample. Lookups only see the current scope and its ancestors.

use std::collections::{HashMap, HashSet};

use veneer_model::TypeRef;

/// Index of a scope in a [`ScopeTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId(usize);

#[derive(Debug, Clone, PartialEq)]
pub struct LocalVariable {
    pub type_ref: TypeRef,
    /// Type name in the target language.
    pub type_name: String,
}

#[derive(Debug, Default)]
struct Scope {
    parent: Option<ScopeId>,
    variables: HashMap<String, LocalVariable>,
}

#[derive(Debug)]
pub struct ScopeTable {
    scopes: Vec<Scope>,
    sample: HashSet<String>,
}

impl ScopeTable {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
            sample: HashSet::new(),
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Open a scope nested in `parent`.
    pub fn new_child(&mut self, parent: ScopeId) -> ScopeId {
        self.scopes.push(Scope {
            parent: Some(parent),
            variables: HashMap::new(),
        });
        ScopeId(self.scopes.len() - 1)
    }

    /// Find a variable visible from `scope`.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&LocalVariable> {
        let mut current = Some(scope);
        while let Some(ScopeId(index)) = current {
            let scope = &self.scopes[index];
            if let Some(variable) = scope.variables.get(name) {
                return Some(variable);
            }
            current = scope.parent;
        }
        None
    }

    /// Declare a variable in `scope`. Returns false if the sample already declared the name.
    pub fn put(&mut self, scope: ScopeId, name: &str, variable: LocalVariable) -> bool {
        if !self.sample.insert(name.to_string()) {
            return false;
        }
        self.scopes[scope.0].variables.insert(name.to_string(), variable);
        true
    }

    /// Whether any scope of the sample declared the name.
    pub fn is_declared(&self, name: &str) -> bool {
        self.sample.contains(name)
    }
}

impl Default for ScopeTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use veneer_model::TypeKind;

    use super::*;

    fn string_var() -> LocalVariable {
        LocalVariable {
            type_ref: TypeRef::scalar(TypeKind::String),
            type_name: "String".into(),
        }
    }

    #[test]
    fn test_child_sees_parent() {
        let mut table = ScopeTable::new();
        let root = table.root();
        assert!(table.put(root, "title", string_var()));

        let child = table.new_child(root);
        assert!(table.lookup(child, "title").is_some());
    }

    #[test]
    fn test_sibling_scopes_are_isolated() {
        let mut table = ScopeTable::new();
        let root = table.root();
        let first = table.new_child(root);
        let second = table.new_child(root);
        assert!(table.put(first, "book", string_var()));

        assert!(table.lookup(second, "book").is_none());
        assert!(table.lookup(root, "book").is_none());
        // Still reserved for the whole sample
        assert!(!table.put(second, "book", string_var()));
        assert!(table.is_declared("book"));
    }
}
