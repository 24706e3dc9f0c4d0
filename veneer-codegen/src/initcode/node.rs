//! The tree of objects a sample request is built from.

use indexmap::IndexMap;
use veneer_core::{Name, SymbolTable};
use veneer_model::{ApiModel, TypeKind, TypeRef};

use super::literal::validate_value;
use super::value::{InitValueConfig, ValueGenerator};
use crate::{Error, Result};

/// Key of the node standing for the request object itself.
pub const ROOT_KEY: &str = "root";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InitCodeLineType {
    /// Placeholder whose shape is decided by a later merge.
    Unknown,
    Simple,
    Structure,
    List,
    Map,
}

impl InitCodeLineType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InitCodeLineType::Unknown => "Unknown",
            InitCodeLineType::Simple => "SimpleInitLine",
            InitCodeLineType::Structure => "StructureInitLine",
            InitCodeLineType::List => "ListInitLine",
            InitCodeLineType::Map => "MapInitLine",
        }
    }
}

/// One object to initialize and the objects it is built from.
///
/// Equality compares children as a map, so two trees built from the same
/// specs in a different order are equal.
#[derive(Debug, Clone, PartialEq)]
pub struct InitCodeNode {
    key: String,
    line_type: InitCodeLineType,
    value: InitValueConfig,
    children: IndexMap<String, InitCodeNode>,
    type_ref: Option<TypeRef>,
    identifier: Option<Name>,
}

impl InitCodeNode {
    pub fn new(key: impl Into<String>, line_type: InitCodeLineType) -> Self {
        Self {
            key: key.into(),
            line_type,
            value: InitValueConfig::default(),
            children: IndexMap::new(),
            type_ref: None,
            identifier: None,
        }
    }

    /// A placeholder to be replaced by whatever merges into it.
    pub fn placeholder(key: impl Into<String>) -> Self {
        Self::new(key, InitCodeLineType::Unknown)
    }

    pub fn with_value(key: impl Into<String>, value: InitValueConfig) -> Self {
        let mut node = Self::new(key, InitCodeLineType::Simple);
        node.value = value;
        node
    }

    pub fn with_children(
        key: impl Into<String>,
        line_type: InitCodeLineType,
        children: Vec<InitCodeNode>,
    ) -> Self {
        let mut node = Self::new(key, line_type);
        for child in children {
            node.add_child(child);
        }
        node
    }

    /// The request object with the given top-level subtrees.
    pub fn root(children: Vec<InitCodeNode>) -> Self {
        Self::with_children(ROOT_KEY, InitCodeLineType::Structure, children)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn line_type(&self) -> InitCodeLineType {
        self.line_type
    }

    pub fn value(&self) -> &InitValueConfig {
        &self.value
    }

    pub fn children(&self) -> &IndexMap<String, InitCodeNode> {
        &self.children
    }

    pub fn child(&self, key: &str) -> Option<&InitCodeNode> {
        self.children.get(key)
    }

    /// Resolved type; `None` until [`resolve`](Self::resolve) ran.
    pub fn type_ref(&self) -> Option<&TypeRef> {
        self.type_ref.as_ref()
    }

    pub fn identifier(&self) -> Option<&Name> {
        self.identifier.as_ref()
    }

    /// Merge a child in. An existing child absorbs the new child's children
    /// unless it is still a placeholder, in which case it is replaced.
    pub fn add_child(&mut self, child: InitCodeNode) {
        match self.children.get_mut(&child.key) {
            Some(existing) if existing.line_type != InitCodeLineType::Unknown => {
                for grandchild in child.children.into_values() {
                    existing.add_child(grandchild);
                }
            }
            _ => {
                self.children.insert(child.key.clone(), child);
            }
        }
    }

    /// Type the tree against `type_ref`, check keys and values, and allocate identifiers.
    ///
    /// Children get their identifiers before their parent.
    pub fn resolve(
        &mut self,
        model: &ApiModel,
        table: &mut SymbolTable,
        mut generator: Option<&mut ValueGenerator>,
        type_ref: &TypeRef,
        suggested_name: &Name,
    ) -> Result<()> {
        let children = std::mem::take(&mut self.children);
        for (_, mut child) in children {
            child.key = key_value(type_ref, &child.key)?;
            let child_type = child_type(model, type_ref, &child.key)?;
            let child_name = self.child_suggested_name(suggested_name, &child.key);
            child.resolve(
                model,
                table,
                generator.as_deref_mut(),
                &child_type,
                &child_name,
            )?;
            self.add_child(child);
        }

        self.type_ref = Some(type_ref.clone());
        self.validate_type(type_ref)?;
        let identifier = table.new_name(suggested_name);

        if self.children.is_empty() {
            if let Some(initial) = &self.value.initial_value {
                let checked = validate_value(type_ref, initial)?;
                self.value = InitValueConfig::with_value(checked);
            } else if self.value.is_empty()
                && type_ref.is_primitive()
                && !type_ref.is_repeated()
                && let Some(generator) = generator
            {
                let generated = generator.generate(type_ref, &identifier);
                self.value = InitValueConfig::with_value(generated);
            }
        }
        self.identifier = Some(identifier);
        Ok(())
    }

    fn child_suggested_name(&self, parent: &Name, key: &str) -> Name {
        match self.line_type {
            InitCodeLineType::Map => parent.join("item"),
            InitCodeLineType::List => parent.join("element"),
            // Non-structure parents with children fail validation afterwards
            _ => Name::from(key),
        }
    }

    fn validate_type(&mut self, type_ref: &TypeRef) -> Result<()> {
        let incompatible = || Error::IncompatibleLineType {
            type_name: type_ref.to_string(),
            line_type: self.line_type.as_str(),
        };
        match self.line_type {
            InitCodeLineType::Structure => {
                if !type_ref.is_message() || type_ref.is_repeated() {
                    return Err(incompatible());
                }
            }
            InitCodeLineType::List => {
                if type_ref.is_map() || !type_ref.is_repeated() {
                    return Err(incompatible());
                }
                let ordered = (0..self.children.len())
                    .all(|i| self.children.contains_key(&i.to_string()));
                if !ordered {
                    return Err(Error::UnorderedIndices {
                        type_name: type_ref.to_string(),
                        keys: self.children.keys().cloned().collect::<Vec<_>>().join(", "),
                    });
                }
            }
            InitCodeLineType::Map => {
                if !type_ref.is_map() {
                    return Err(incompatible());
                }
            }
            InitCodeLineType::Simple => {
                if !type_ref.is_primitive() && !type_ref.is_enum() {
                    return Err(incompatible());
                }
                if !self.children.is_empty() {
                    return Err(Error::UnknownWithChildren);
                }
            }
            InitCodeLineType::Unknown => {
                if !self.children.is_empty() {
                    return Err(Error::UnknownWithChildren);
                }
            }
        }
        if self.children.is_empty() {
            self.line_type = InitCodeLineType::Simple;
        }
        Ok(())
    }

    /// Every node of the tree, children before parents.
    pub fn list_in_initialization_order(&self) -> Vec<&InitCodeNode> {
        let mut nodes = Vec::new();
        self.collect_post_order(&mut nodes);
        nodes
    }

    fn collect_post_order<'a>(&'a self, nodes: &mut Vec<&'a InitCodeNode>) {
        for child in self.children.values() {
            child.collect_post_order(nodes);
        }
        nodes.push(self);
    }
}

/// Check a child key against its parent: map keys against the key type, list indices as uint64.
fn key_value(parent: &TypeRef, key: &str) -> Result<String> {
    if let Some(key_type) = parent.map_key() {
        validate_value(key_type, key)
    } else if parent.is_repeated() {
        validate_value(&TypeRef::scalar(TypeKind::Uint64), key)
    } else {
        // A bad field name shows up as a missing field
        Ok(key.to_string())
    }
}

fn child_type(model: &ApiModel, parent: &TypeRef, key: &str) -> Result<TypeRef> {
    if let Some(value_type) = parent.map_value() {
        Ok(value_type.clone())
    } else if parent.is_repeated() {
        Ok(parent.make_optional())
    } else if parent.is_message() {
        model
            .field_of(parent, key)
            .map(|field| field.type_ref.clone())
            .ok_or_else(|| Error::MissingField {
                type_name: parent.to_string(),
                field: key.to_string(),
            })
    } else {
        Err(Error::PrimitiveWithChildren {
            type_name: parent.to_string(),
        })
    }
}
