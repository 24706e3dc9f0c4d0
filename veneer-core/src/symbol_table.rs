//! Unique identifier allocation.

use std::collections::HashSet;

use crate::Name;

/// How a symbol table disambiguates a name that is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymbolStrategy {
    /// `foo`, `foo2`, `foo3`, ...
    #[default]
    Numeric,
    /// `foo`, `foo_`, `foo__`, ...
    Underscore,
}

/// Hands out identifiers that have not been handed out before.
///
/// A table is local to one synthesis call; nothing is shared between calls.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    strategy: SymbolStrategy,
    symbols: HashSet<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(strategy: SymbolStrategy) -> Self {
        Self {
            strategy,
            symbols: HashSet::new(),
        }
    }

    /// Mark names as taken without returning them.
    pub fn seed<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols.extend(names.into_iter().map(Into::into));
    }

    pub fn is_used(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    /// Return `desired`, or the first unused disambiguation of it.
    pub fn new_symbol(&mut self, desired: &str) -> String {
        let symbol = self.next_free(desired);
        self.symbols.insert(symbol.clone());
        symbol
    }

    /// Allocate a symbol for a [`Name`], keyed on its lower_underscore form.
    pub fn new_name(&mut self, desired: &Name) -> Name {
        let base = desired.to_lower_underscore();
        let symbol = self.new_symbol(&base);
        desired.with_suffix(&symbol[base.len()..])
    }

    fn next_free(&self, desired: &str) -> String {
        if !self.symbols.contains(desired) {
            return desired.to_string();
        }
        match self.strategy {
            SymbolStrategy::Numeric => (2..)
                .map(|i| format!("{}{}", desired, i))
                .find(|candidate| !self.symbols.contains(candidate))
                .unwrap_or_default(),
            SymbolStrategy::Underscore => {
                let mut candidate = format!("{}_", desired);
                while self.symbols.contains(&candidate) {
                    candidate.push('_');
                }
                candidate
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_strategy() {
        let mut table = SymbolTable::new();
        assert_eq!(table.new_symbol("foo"), "foo");
        assert_eq!(table.new_symbol("foo"), "foo2");
        assert_eq!(table.new_symbol("foo"), "foo3");
        assert_eq!(table.new_symbol("bar"), "bar");
    }

    #[test]
    fn test_underscore_strategy() {
        let mut table = SymbolTable::with_strategy(SymbolStrategy::Underscore);
        assert_eq!(table.new_symbol("foo"), "foo");
        assert_eq!(table.new_symbol("foo"), "foo_");
        assert_eq!(table.new_symbol("foo"), "foo__");
    }

    #[test]
    fn test_seeded_names_are_skipped() {
        let mut table = SymbolTable::new();
        table.seed(["request", "request2"]);
        assert_eq!(table.new_symbol("request"), "request3");
    }

    #[test]
    fn test_new_name_keeps_words() {
        let mut table = SymbolTable::new();
        let first = table.new_name(&Name::from("pageToken"));
        let second = table.new_name(&Name::from("page_token"));
        assert_eq!(first.to_lower_camel(), "pageToken");
        assert_eq!(second.to_lower_camel(), "pageToken2");
    }
}
