//! Init-code synthesis: turning field specs into a typed tree of objects to initialize.
//!
//! # Example
//!
//! ```ignore
//! let init = InitCodeContext::new(&model, method.input.clone(), Name::from("request"))
//!     .field_specs(["shelf.name=\"shelves/1\"", "page_size=10"])
//!     .build()?;
//! for node in init.root.list_in_initialization_order() {
//!     // children come before the objects built from them
//! }
//! ```

mod literal;
mod node;
mod spec;
mod value;

use indexmap::IndexMap;
pub use literal::validate_value;
pub use node::{InitCodeLineType, InitCodeNode, ROOT_KEY};
pub use spec::parse_field_spec;
pub use value::{InitValueConfig, ResourceNameValue, ValueGenerator};
use veneer_core::{Name, SymbolStrategy, SymbolTable};
use veneer_model::{ApiModel, TypeRef};

use crate::Result;

/// A resolved init-code tree and the symbols it allocated.
#[derive(Debug, Clone)]
pub struct InitCode {
    pub root: InitCodeNode,
    pub symbols: SymbolTable,
}

/// Everything one init-code synthesis needs.
pub struct InitCodeContext<'a> {
    model: &'a ApiModel,
    root_type: TypeRef,
    suggested_name: Name,
    field_specs: Vec<String>,
    field_set: Option<Vec<String>>,
    values: IndexMap<String, InitValueConfig>,
    sub_trees: Vec<InitCodeNode>,
    generator: Option<ValueGenerator>,
    symbols: SymbolTable,
}

impl<'a> InitCodeContext<'a> {
    pub fn new(model: &'a ApiModel, root_type: TypeRef, suggested_name: Name) -> Self {
        Self {
            model,
            root_type,
            suggested_name,
            field_specs: Vec::new(),
            field_set: None,
            values: IndexMap::new(),
            sub_trees: Vec::new(),
            generator: None,
            symbols: SymbolTable::new(),
        }
    }

    pub fn field_specs<I, S>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field_specs.extend(specs.into_iter().map(Into::into));
        self
    }

    /// Restrict the top-level fields to these names, adding the ones no spec mentions.
    pub fn field_set<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field_set = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Initial values for top-level fields left without one.
    pub fn values(mut self, values: IndexMap<String, InitValueConfig>) -> Self {
        self.values = values;
        self
    }

    /// Extra subtrees merged in after the parsed specs.
    pub fn sub_trees(mut self, trees: Vec<InitCodeNode>) -> Self {
        self.sub_trees = trees;
        self
    }

    pub fn value_generator(mut self, generator: ValueGenerator) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn symbol_strategy(mut self, strategy: SymbolStrategy) -> Self {
        self.symbols = SymbolTable::with_strategy(strategy);
        self
    }

    /// Parse, merge and type the tree.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed spec or the first node that does not fit the model.
    pub fn build(self) -> Result<InitCode> {
        let mut sub_trees = Vec::new();
        for field_spec in &self.field_specs {
            let node = parse_field_spec(field_spec)?;
            sub_trees.push(self.with_configured_value(node));
        }

        if let Some(field_set) = &self.field_set {
            sub_trees.retain(|tree| field_set.iter().any(|name| name == tree.key()));
            for name in field_set {
                if sub_trees.iter().any(|tree| tree.key() == name) {
                    continue;
                }
                let node = match self.values.get(name) {
                    Some(value) => InitCodeNode::with_value(name.clone(), value.clone()),
                    None => InitCodeNode::placeholder(name.clone()),
                };
                sub_trees.push(node);
            }
        }
        sub_trees.extend(self.sub_trees);

        let mut root = InitCodeNode::root(sub_trees);
        let mut symbols = self.symbols;
        let mut generator = self.generator;
        root.resolve(
            self.model,
            &mut symbols,
            generator.as_mut(),
            &self.root_type,
            &self.suggested_name,
        )?;
        tracing::debug!(
            root_type = %self.root_type,
            nodes = root.list_in_initialization_order().len(),
            "Built init code tree"
        );
        Ok(InitCode { root, symbols })
    }

    /// A bare top-level spec picks up the configured value for its field.
    fn with_configured_value(&self, node: InitCodeNode) -> InitCodeNode {
        let bare = node.children().is_empty() && node.value().is_empty();
        match self.values.get(node.key()) {
            Some(value) if bare => InitCodeNode::with_value(node.key().to_string(), value.clone()),
            _ => node,
        }
    }
}

/// The top-level field an init field spec assigns: its leading identifier.
pub fn init_field_name(spec: &str) -> &str {
    spec.split(['.', '[', '{', '<', '=', '>']).next().unwrap_or(spec).trim()
}
