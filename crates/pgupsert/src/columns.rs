//! Column resolution across a batch of rows.

use crate::row::Row;
use std::collections::HashSet;

/// Ordered, duplicate-free column names.
///
/// Order is first occurrence across the rows, scanning rows in input order
/// and keys in row order. It is never sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet {
    names: Vec<String>,
}

impl ColumnSet {
    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

impl<S: Into<String>> FromIterator<S> for ColumnSet {
    /// Collect names, dropping later duplicates.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for name in iter {
            let name = name.into();
            if seen.insert(name.clone()) {
                names.push(name);
            }
        }
        Self { names }
    }
}

/// Union of all keys present in `rows`, in first-occurrence order.
///
/// Use-default cells count as present.
pub fn column_set<V>(rows: &[Row<V>]) -> ColumnSet {
    rows.iter().flat_map(Row::columns).collect()
}

/// `columns` minus `excluded`, keeping the order of `columns`.
pub fn update_columns<S: AsRef<str>>(columns: &ColumnSet, excluded: &[S]) -> ColumnSet {
    columns
        .iter()
        .filter(|col| !excluded.iter().any(|ex| ex.as_ref() == *col))
        .collect()
}
