//! A flat symbol table over [`indexmap::IndexMap`].
//!
//! Identifiers are interned at scan time: each unique name gets a stable
//! index in insertion order, and token values carry the index instead of the
//! text. Every binding starts at 0, so reading a variable that was never
//! assigned yields 0 — the behavior a calculator user expects from an
//! uninitialized accumulator.

use indexmap::{map::Entry, IndexMap};
use smartstring::alias::String;
use thiserror::Error;

/// Errors from symbol-table access.
#[derive(Debug, Error)]
pub enum SymTabError {
    /// An index outside the table was used. Only reachable through a token
    /// whose index did not come from [`SymTab::intern`].
    #[error("invalid symbol index {index} (table length {len})")]
    InvalidIndex { index: usize, len: usize },
}

/// Variable bindings, name to value, with stable insertion-order indices.
#[derive(Debug, Default)]
pub struct SymTab {
    tab: IndexMap<String, i64>,
}

impl SymTab {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct names interned so far.
    pub fn len(&self) -> usize {
        self.tab.len()
    }

    /// True when no name has been interned.
    pub fn is_empty(&self) -> bool {
        self.tab.is_empty()
    }

    /// Returns the index for `name`, inserting it with value 0 when new.
    /// Re-interning an existing name returns the same index and leaves its
    /// value untouched.
    ///
    /// ```
    /// # use pushdown_calc::SymTab;
    /// let mut vars = SymTab::new();
    /// let i = vars.intern("x");
    /// vars.set(i, 7).unwrap();
    /// assert_eq!(vars.intern("x"), i);
    /// assert_eq!(vars.get(i).unwrap(), 7);
    /// ```
    pub fn intern(&mut self, name: impl AsRef<str>) -> usize {
        match self.tab.entry(String::from(name.as_ref())) {
            Entry::Occupied(entry) => entry.index(),
            Entry::Vacant(entry) => entry.insert_entry(0).index(),
        }
    }

    /// The name stored at `index`.
    pub fn name(&self, index: usize) -> Result<&str, SymTabError> {
        let (name, _) = self
            .tab
            .get_index(index)
            .ok_or(SymTabError::InvalidIndex {
                index,
                len: self.tab.len(),
            })?;
        Ok(name)
    }

    /// The value bound at `index`.
    pub fn get(&self, index: usize) -> Result<i64, SymTabError> {
        let (_, value) = self
            .tab
            .get_index(index)
            .ok_or(SymTabError::InvalidIndex {
                index,
                len: self.tab.len(),
            })?;
        Ok(*value)
    }

    /// Rebinds `index` to `value`.
    pub fn set(&mut self, index: usize, value: i64) -> Result<(), SymTabError> {
        let len = self.tab.len();
        let (_, slot) = self
            .tab
            .get_index_mut(index)
            .ok_or(SymTabError::InvalidIndex { index, len })?;
        *slot = value;
        Ok(())
    }

    /// Iterates bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.tab.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_assigns_sequential_indices() {
        let mut vars = SymTab::new();
        assert_eq!(vars.intern("a"), 0);
        assert_eq!(vars.intern("b"), 1);
        assert_eq!(vars.intern("a"), 0);
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn fresh_names_read_zero() {
        let mut vars = SymTab::new();
        let i = vars.intern("never_assigned");
        assert_eq!(vars.get(i).unwrap(), 0);
    }

    #[test]
    fn set_then_get_roundtrips() {
        let mut vars = SymTab::new();
        let i = vars.intern("x");
        vars.set(i, -42).unwrap();
        assert_eq!(vars.get(i).unwrap(), -42);
        assert_eq!(vars.name(i).unwrap(), "x");
    }

    #[test]
    fn re_intern_preserves_value() {
        let mut vars = SymTab::new();
        let i = vars.intern("x");
        vars.set(i, 9).unwrap();
        assert_eq!(vars.intern("x"), i);
        assert_eq!(vars.get(i).unwrap(), 9);
    }

    #[test]
    fn out_of_range_index_errors() {
        let mut vars = SymTab::new();
        vars.intern("only");
        assert!(matches!(
            vars.get(3),
            Err(SymTabError::InvalidIndex { index: 3, len: 1 })
        ));
        assert!(matches!(
            vars.set(3, 1),
            Err(SymTabError::InvalidIndex { index: 3, len: 1 })
        ));
    }

    #[test]
    fn iter_walks_insertion_order() {
        let mut vars = SymTab::new();
        let a = vars.intern("a");
        let b = vars.intern("b");
        vars.set(a, 1).unwrap();
        vars.set(b, 2).unwrap();
        let all: Vec<_> = vars.iter().collect();
        assert_eq!(all, vec![("a", 1), ("b", 2)]);
    }
}
