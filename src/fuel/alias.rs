//! Category → display alias mapping

use std::collections::HashMap;

/// Maps token categories (rule names) to display aliases.
///
/// Unmapped categories resolve to themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    /// Table with no entries; every category maps to itself
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: impl Into<String>, alias: impl Into<String>) {
        self.entries.insert(category.into(), alias.into());
    }

    /// Alias for `category`, or `category` itself when unmapped
    pub fn resolve<'a>(&'a self, category: &'a str) -> &'a str {
        self.entries
            .get(category)
            .map(String::as_str)
            .unwrap_or(category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = AliasTable::identity();
        for (k, v) in iter {
            table.insert(k, v);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_default() {
        let table = AliasTable::identity();
        assert_eq!(table.resolve("comment"), "comment");
        assert!(table.is_empty());
    }

    #[test]
    fn test_mapped_alias() {
        let table: AliasTable = [("comment", "co1"), ("keywords", "kw1")].into_iter().collect();
        assert_eq!(table.resolve("comment"), "co1");
        assert_eq!(table.resolve("keywords"), "kw1");
        assert_eq!(table.resolve("strings"), "strings");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_insert_overwrites() {
        let mut table = AliasTable::identity();
        table.insert("a", "x");
        table.insert("a", "y");
        assert_eq!(table.resolve("a"), "y");
    }
}
